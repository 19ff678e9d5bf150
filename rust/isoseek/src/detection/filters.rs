//! Gates a candidate has to pass before its signal is even extracted.

use isoquery::Sample;

use crate::config::IsotopeParameters;
use crate::isotopes::{
    ElementFlags,
    IsotopeCandidate,
};
use crate::models::PeakGroup;

pub const NEGLIGIBLE_ABUNDANCE: f64 = 1e-8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rejection {
    NegligibleAbundance,
    BelowDetectionFloor,
    NaturalAbundanceError { error_pct: f32 },
    LowCorrelation { correlation: f32 },
}

/// Checks the observed isotope/parent ratio against the expected abundance.
///
/// ```
/// use isoseek::detection::filters::{check_natural_abundance, Rejection};
///
/// // 50 / (1000 + 50) vs 0.06 expected is ~21% off
/// assert_eq!(check_natural_abundance(0.06, 50.0, 1000.0, 30.0), None);
/// assert!(matches!(
///     check_natural_abundance(0.06, 50.0, 1000.0, 10.0),
///     Some(Rejection::NaturalAbundanceError { .. })
/// ));
/// ```
pub fn check_natural_abundance(
    expected_abundance: f64,
    isotope_intensity: f32,
    parent_intensity: f32,
    max_error_pct: f32,
) -> Option<Rejection> {
    if expected_abundance < NEGLIGIBLE_ABUNDANCE {
        return Some(Rejection::NegligibleAbundance);
    }
    if expected_abundance * (parent_intensity as f64) < 1.0 {
        return Some(Rejection::BelowDetectionFloor);
    }
    let observed =
        isotope_intensity as f64 / (parent_intensity as f64 + isotope_intensity as f64);
    let error_pct = ((observed - expected_abundance).abs() / expected_abundance * 100.0) as f32;
    if error_pct > max_error_pct {
        return Some(Rejection::NaturalAbundanceError { error_pct });
    }
    None
}

pub fn check_correlation(correlation: f32, min_correlation: f32) -> Option<Rejection> {
    if correlation < min_correlation {
        Some(Rejection::LowCorrelation { correlation })
    } else {
        None
    }
}

/// The abundance and correlation gates, applied per (sample, candidate).
#[derive(Debug, Clone, Copy)]
pub struct CandidateFilter<'a> {
    params: &'a IsotopeParameters,
    flags: ElementFlags,
}

impl<'a> CandidateFilter<'a> {
    pub fn new(params: &'a IsotopeParameters, flags: ElementFlags) -> Self {
        Self { params, flags }
    }

    /// First gate that rejects the candidate, `None` when it may proceed.
    ///
    /// The abundance gate only looks at candidates carrying a substitution of
    /// an element the run is not tracking. The correlation gate runs whenever
    /// a parent is given.
    #[cfg_attr(
        feature = "instrumentation",
        tracing::instrument(skip_all, level = "trace")
    )]
    pub fn rejection(
        &self,
        candidate: &IsotopeCandidate,
        isotope_intensity: f32,
        parent_intensity: f32,
        sample: &Sample,
        parent: Option<&PeakGroup>,
    ) -> Option<Rejection> {
        if candidate.uses_disabled_element(self.flags) {
            if let Some(r) = check_natural_abundance(
                candidate.abundance,
                isotope_intensity,
                parent_intensity,
                self.params.max_natural_abundance_err,
            ) {
                return Some(r);
            }
        }

        let parent = parent?;
        let rt_bounds = match parent.get_peak(sample.id) {
            Some(peak) => isoquery::TupleRange::try_new(peak.rtmin, peak.rtmax)
                .unwrap_or_else(|_| parent.rt_bounds()),
            None => parent.rt_bounds(),
        };
        let window = rt_bounds.expand(self.params.max_rt_diff());
        let correlation = sample.correlation(
            candidate.mass,
            parent.stats.mean_mz,
            &self.params.compound_mass_cutoff,
            window,
            self.params.eic_type,
        );
        check_correlation(correlation, self.params.min_isotopic_correlation)
    }
}
