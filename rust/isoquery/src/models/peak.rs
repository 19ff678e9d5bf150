use serde::{
    Deserialize,
    Serialize,
};

use super::sample::SampleId;

/// A chromatographic peak picked from an [`crate::Eic`] of a single sample.
///
/// `scan_num` points back at the apex scan in the sample the peak came from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Peak {
    pub sample_id: SampleId,
    pub scan_num: usize,
    pub rt: f32,
    pub rtmin: f32,
    pub rtmax: f32,
    pub peak_mz: f64,
    pub peak_intensity: f32,
    /// In the [0, 1] range, higher is better.
    pub quality: f32,
    pub signal_baseline_ratio: f32,
    /// Number of scans between the peak boundaries, inclusive.
    pub width: usize,
}

impl Peak {
    pub fn rt_distance(&self, rt: f32) -> f32 {
        (self.rt - rt).abs()
    }
}
