use serde::{
    Deserialize,
    Serialize,
};

use crate::errors::Result;
use crate::models::{
    Eic,
    EicType,
    Peak,
    Sample,
};
use crate::utils::TupleRange;

/// Capability that turns a (m/z window, rt window, sample) query into a
/// chromatogram with its peaks already picked.
///
/// Implementors must be deterministic for identical inputs. Smoothing and
/// baseline settings belong to the implementor.
pub trait SignalExtractor: Send + Sync {
    fn extract(
        &self,
        sample: &Sample,
        mz_range: TupleRange<f64>,
        rt_range: TupleRange<f32>,
    ) -> Result<Eic>;
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EicParameters {
    pub eic_type: EicType,
    /// Boxcar width in scans, 1 disables smoothing.
    pub smoothing_window: usize,
    /// Percentage of the most intense points ignored when estimating the baseline.
    pub baseline_drop_top_x: u8,
    pub min_signal_baseline_difference: f32,
}

impl Default for EicParameters {
    fn default() -> Self {
        Self {
            eic_type: EicType::Max,
            smoothing_window: 1,
            baseline_drop_top_x: 80,
            min_signal_baseline_difference: 0.0,
        }
    }
}

/// Builds the chromatogram straight from the sample scans and picks local
/// maxima above a flat baseline.
#[derive(Debug, Clone, Default)]
pub struct ScanEicExtractor {
    pub params: EicParameters,
}

impl ScanEicExtractor {
    pub fn new(params: EicParameters) -> Self {
        Self { params }
    }
}

impl SignalExtractor for ScanEicExtractor {
    fn extract(
        &self,
        sample: &Sample,
        mz_range: TupleRange<f64>,
        rt_range: TupleRange<f32>,
    ) -> Result<Eic> {
        let mut eic = sample.eic(mz_range, rt_range, 1, self.params.eic_type);
        eic.peaks = pick_peaks(&eic, &self.params);
        Ok(eic)
    }
}

fn boxcar(values: &[f32], window: usize) -> Vec<f32> {
    if window <= 1 || values.len() < 2 {
        return values.to_vec();
    }
    let half = window / 2;
    (0..values.len())
        .map(|i| {
            let lo = i.saturating_sub(half);
            let hi = (i + half + 1).min(values.len());
            values[lo..hi].iter().sum::<f32>() / (hi - lo) as f32
        })
        .collect()
}

fn estimate_baseline(values: &[f32], drop_top_x: u8) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let keep_frac = 1.0 - (drop_top_x.min(100) as f32 / 100.0);
    let keep = ((sorted.len() as f32 * keep_frac).round() as usize).max(1);
    sorted[..keep].iter().sum::<f32>() / keep as f32
}

/// Local-maximum peak picking over the (optionally smoothed) chromatogram.
///
/// Boundaries walk downhill from the apex until the signal stops decreasing.
pub fn pick_peaks(eic: &Eic, params: &EicParameters) -> Vec<Peak> {
    let n = eic.len();
    if n == 0 {
        return Vec::new();
    }
    let smoothed = boxcar(&eic.intensity, params.smoothing_window);
    let baseline = estimate_baseline(&smoothed, params.baseline_drop_top_x);

    let mut peaks = Vec::new();
    for i in 0..n {
        let s = smoothed[i];
        if s <= 0.0 {
            continue;
        }
        let rising = i == 0 || s > smoothed[i - 1];
        let falling = i == n - 1 || s >= smoothed[i + 1];
        if !(rising && falling) || s - baseline <= params.min_signal_baseline_difference {
            continue;
        }

        let mut left = i;
        while left > 0 && smoothed[left - 1] < smoothed[left] {
            left -= 1;
        }
        let mut right = i;
        while right + 1 < n && smoothed[right + 1] < smoothed[right] {
            right += 1;
        }

        let apex_intensity = eic.intensity[i];
        let quality = if apex_intensity > 0.0 {
            (1.0 - baseline / apex_intensity).clamp(0.0, 1.0)
        } else {
            0.0
        };
        peaks.push(Peak {
            sample_id: eic.sample_id,
            scan_num: eic.scan_nums[i],
            rt: eic.rt[i],
            rtmin: eic.rt[left],
            rtmax: eic.rt[right],
            peak_mz: eic.mz[i],
            peak_intensity: apex_intensity,
            quality,
            signal_baseline_ratio: apex_intensity / baseline.max(1.0),
            width: right - left + 1,
        });
    }
    peaks
}
