use isoquery::Peak;

use crate::config::PeakFilterParameters;
use crate::traits::PeakFilter;

/// Threshold filter on quality, intensity, signal/baseline ratio and width.
///
/// In isotope mode the isotopic quality and intensity thresholds replace the
/// regular ones, isotopes are expected to be a lot smaller than their parent.
#[derive(Debug, Clone)]
pub struct QualityPeakFilter {
    params: PeakFilterParameters,
    is_isotope: bool,
}

impl QualityPeakFilter {
    pub fn new(params: PeakFilterParameters, is_isotope: bool) -> Self {
        Self { params, is_isotope }
    }

    pub fn isotopic(params: PeakFilterParameters) -> Self {
        Self::new(params, true)
    }

    fn keep(&self, peak: &Peak) -> bool {
        let (min_quality, min_intensity) = if self.is_isotope {
            (
                self.params.min_isotopic_peak_quality,
                self.params.min_isotopic_peak_intensity,
            )
        } else {
            (self.params.min_peak_quality, self.params.min_peak_intensity)
        };
        peak.quality >= min_quality
            && peak.peak_intensity >= min_intensity
            && peak.signal_baseline_ratio >= self.params.min_signal_baseline_ratio
            && peak.width >= self.params.min_peak_width
    }
}

impl PeakFilter for QualityPeakFilter {
    fn filter(&self, peaks: &mut Vec<Peak>) {
        peaks.retain(|p| self.keep(p));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peak(quality: f32, intensity: f32, width: usize) -> Peak {
        Peak {
            quality,
            peak_intensity: intensity,
            signal_baseline_ratio: 10.0,
            width,
            ..Default::default()
        }
    }

    #[test]
    fn test_isotope_mode_uses_isotopic_thresholds() {
        let params = PeakFilterParameters {
            min_peak_quality: 0.5,
            min_isotopic_peak_quality: 0.1,
            min_peak_intensity: 1000.0,
            min_isotopic_peak_intensity: 10.0,
            min_signal_baseline_ratio: 2.0,
            min_peak_width: 3,
        };
        let mut peaks = vec![
            peak(0.2, 50.0, 5),
            peak(0.05, 50.0, 5),
            peak(0.9, 5.0, 5),
            peak(0.9, 5000.0, 2),
        ];
        let mut regular = peaks.clone();

        QualityPeakFilter::isotopic(params.clone()).filter(&mut peaks);
        assert_eq!(peaks.len(), 1);
        assert_eq!(peaks[0].quality, 0.2);

        QualityPeakFilter::new(params, false).filter(&mut regular);
        assert!(regular.is_empty());
    }
}
