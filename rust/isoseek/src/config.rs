use isoquery::{
    EicType,
    MassCutoff,
    Sample,
};
use serde::{
    Deserialize,
    Serialize,
};

use crate::models::Compound;

/// Settings for one isotope detection run.
///
/// Read-only during a run, the same instance can be shared by every parent
/// processed in parallel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IsotopeParameters {
    pub compound_mass_cutoff: MassCutoff,
    /// Max rt distance between an isotope peak and its parent, in scans.
    pub max_isotope_scan_diff: f32,
    /// Minutes between consecutive MS1 scans.
    pub avg_scan_time: f32,
    /// Percent.
    pub max_natural_abundance_err: f32,
    pub min_isotopic_correlation: f32,
    pub eic_type: EicType,
    pub delta_rt_check_flag: bool,
    pub compound_rt_window: f32,
    pub quality_weight: u32,
    pub intensity_weight: u32,
    pub delta_rt_weight: u32,
    pub ionization_mode: i32,
    pub charge: i32,
    pub peak_filter: PeakFilterParameters,
}

impl Default for IsotopeParameters {
    fn default() -> Self {
        Self {
            compound_mass_cutoff: MassCutoff::Ppm(10.0),
            max_isotope_scan_diff: 10.0,
            avg_scan_time: 0.2,
            max_natural_abundance_err: 100.0,
            min_isotopic_correlation: 0.2,
            eic_type: EicType::Max,
            delta_rt_check_flag: false,
            compound_rt_window: 2.0,
            quality_weight: 10,
            intensity_weight: 10,
            delta_rt_weight: 10,
            ionization_mode: 1,
            charge: 1,
            peak_filter: PeakFilterParameters::default(),
        }
    }
}

impl IsotopeParameters {
    /// Largest rt distance at which an isotope peak still counts as coeluting.
    pub fn max_rt_diff(&self) -> f32 {
        self.max_isotope_scan_diff * self.avg_scan_time
    }

    /// Ion charge used to compute the isotope masses of `compound`.
    ///
    /// The compound's own charge wins, otherwise the run-wide charge signed by
    /// the ionization mode.
    pub fn charge_for(&self, compound: &Compound) -> i32 {
        if compound.charge != 0 {
            compound.charge
        } else {
            self.ionization_mode.signum() * self.charge.abs()
        }
    }

    /// Replaces `avg_scan_time` with the mean over the samples that have one.
    ///
    /// Keeps the current value when no sample has at least two MS1 scans.
    pub fn with_avg_scan_time_from(self, samples: &[Sample]) -> Self {
        let times: Vec<f32> = samples.iter().filter_map(|s| s.avg_scan_time()).collect();
        if times.is_empty() {
            return self;
        }
        let avg_scan_time = times.iter().sum::<f32>() / times.len() as f32;
        Self {
            avg_scan_time,
            ..self
        }
    }
}

/// Thresholds of the standard peak filter.
///
/// The `isotopic` variants replace the regular ones when filtering isotope
/// peaks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PeakFilterParameters {
    pub min_peak_quality: f32,
    pub min_isotopic_peak_quality: f32,
    pub min_peak_intensity: f32,
    pub min_isotopic_peak_intensity: f32,
    pub min_signal_baseline_ratio: f32,
    pub min_peak_width: usize,
}

impl Default for PeakFilterParameters {
    fn default() -> Self {
        Self {
            min_peak_quality: 0.0,
            min_isotopic_peak_quality: 0.0,
            min_peak_intensity: 0.0,
            min_isotopic_peak_intensity: 0.0,
            min_signal_baseline_ratio: 0.0,
            min_peak_width: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let conf: IsotopeParameters = serde_json::from_str(
            r#"{
                "compound_mass_cutoff": {"mda": 5.0},
                "min_isotopic_correlation": 0.8,
                "peak_filter": {"min_isotopic_peak_intensity": 100.0}
            }"#,
        )
        .unwrap();
        assert_eq!(conf.compound_mass_cutoff, MassCutoff::MilliDalton(5.0));
        assert_eq!(conf.min_isotopic_correlation, 0.8);
        assert_eq!(conf.max_isotope_scan_diff, 10.0);
        assert_eq!(conf.peak_filter.min_isotopic_peak_intensity, 100.0);
        assert_eq!(conf.peak_filter.min_peak_width, 1);
        assert_eq!(conf.eic_type, EicType::Max);
    }

    #[test]
    fn test_max_rt_diff() {
        let conf = IsotopeParameters {
            max_isotope_scan_diff: 4.0,
            avg_scan_time: 0.5,
            ..Default::default()
        };
        assert_eq!(conf.max_rt_diff(), 2.0);
    }

    #[test]
    fn test_charge_for() {
        let conf = IsotopeParameters {
            ionization_mode: -1,
            charge: 2,
            ..Default::default()
        };
        let neutral = Compound {
            formula: "C6H12O6".to_string(),
            ..Default::default()
        };
        assert_eq!(conf.charge_for(&neutral), -2);
        let charged = Compound {
            charge: 1,
            ..neutral
        };
        assert_eq!(conf.charge_for(&charged), 1);
    }
}
