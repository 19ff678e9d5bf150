use isoquery::{
    Peak,
    Sample,
};
use tracing::trace;

use super::accumulator::IsotopeAccumulator;
use super::detector::IsotopeDetector;
use super::filters::CandidateFilter;
use super::intensity::sample_intensity;
use crate::errors::Result;
use crate::isotopes::IsotopeCandidate;
use crate::models::PeakGroup;

/// Peak closest to `target_rt`, as long as it is at most `max_rt_diff` away.
///
/// On ties the first peak wins.
///
/// ```
/// use isoquery::Peak;
/// use isoseek::detection::search::nearest_peak;
///
/// let peaks: Vec<Peak> = [12.0, 5.0, 11.0, 18.0]
///     .iter()
///     .map(|&rt| Peak { rt, ..Default::default() })
///     .collect();
/// let best = nearest_peak(&peaks, 10.0, 4.0).unwrap();
/// assert_eq!(best.rt, 11.0);
/// assert!(nearest_peak(&peaks, 30.0, 4.0).is_none());
/// ```
pub fn nearest_peak(peaks: &[Peak], target_rt: f32, max_rt_diff: f32) -> Option<&Peak> {
    let mut best: Option<&Peak> = None;
    let mut best_dist = f32::MAX;
    for peak in peaks {
        let dist = peak.rt_distance(target_rt);
        if dist > max_rt_diff {
            continue;
        }
        if dist < best_dist {
            best_dist = dist;
            best = Some(peak);
        }
    }
    best
}

impl IsotopeDetector<'_> {
    /// Looks for every candidate in one sample and records what it finds.
    #[cfg_attr(
        feature = "instrumentation",
        tracing::instrument(skip_all, level = "trace")
    )]
    pub(super) fn search_sample(
        &self,
        sample: &Sample,
        parent: &PeakGroup,
        candidates: &[IsotopeCandidate],
        filter: &CandidateFilter<'_>,
        acc: &mut IsotopeAccumulator,
    ) -> Result<()> {
        let max_rt_diff = self.params.max_rt_diff();
        let rt_range = sample.rt_range();
        let parent_peak = parent.get_peak(sample.id);

        for candidate in candidates {
            if !(candidate.mass.is_finite() && candidate.mass > 0.0) {
                trace!(
                    "Skipping {} with unusable mass {}",
                    candidate.name,
                    candidate.mass
                );
                continue;
            }
            let mz_range = self.params.compound_mass_cutoff.mz_range(candidate.mass);

            let mut target_rt = parent.median_rt();
            let mut parent_intensity = 0.0;
            let mut isotope_intensity = 0.0;
            if let Some(peak) = parent_peak {
                target_rt = peak.rt;
                parent_intensity = peak.peak_intensity;
                let (intensity, rt) = sample_intensity(sample, peak.scan_num, mz_range);
                isotope_intensity = intensity;
                if intensity > 0.0 {
                    target_rt = rt;
                }
            }

            if let Some(reason) = filter.rejection(
                candidate,
                isotope_intensity,
                parent_intensity,
                sample,
                Some(parent),
            ) {
                trace!(
                    "Rejected {} in sample {}: {:?}",
                    candidate.name,
                    sample.name,
                    reason
                );
                continue;
            }

            let mut eic = self.extractor.extract(sample, mz_range, rt_range)?;
            self.peak_filter.filter(&mut eic.peaks);

            match nearest_peak(&eic.peaks, target_rt, max_rt_diff) {
                Some(peak) => acc.add_peak(candidate, parent, peak.clone()),
                None => trace!(
                    "No peak for {} within {} of rt {} in sample {}",
                    candidate.name,
                    max_rt_diff,
                    target_rt,
                    sample.name
                ),
            }
        }
        Ok(())
    }
}
