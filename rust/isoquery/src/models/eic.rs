use serde::{
    Deserialize,
    Serialize,
};

use super::peak::Peak;
use super::sample::SampleId;

/// How the intensities inside the m/z window of a scan collapse into a single
/// chromatogram point.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum EicType {
    #[default]
    #[serde(rename = "max")]
    Max,
    #[serde(rename = "sum")]
    Sum,
}

/// Extracted ion chromatogram of one sample.
///
/// All the per-point arrays are aligned and ordered by retention time.
/// `peaks` is empty until a peak picker fills it.
#[derive(Debug, Clone, Default)]
pub struct Eic {
    pub sample_id: SampleId,
    pub scan_nums: Vec<usize>,
    pub rt: Vec<f32>,
    pub mz: Vec<f64>,
    pub intensity: Vec<f32>,
    pub peaks: Vec<Peak>,
}

impl Eic {
    pub fn new(sample_id: SampleId) -> Self {
        Self {
            sample_id,
            ..Default::default()
        }
    }

    pub fn push(&mut self, scan_num: usize, rt: f32, mz: f64, intensity: f32) {
        self.scan_nums.push(scan_num);
        self.rt.push(rt);
        self.mz.push(mz);
        self.intensity.push(intensity);
    }

    pub fn len(&self) -> usize {
        self.rt.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rt.is_empty()
    }

    pub fn max_intensity(&self) -> f32 {
        self.intensity.iter().cloned().fold(0.0, f32::max)
    }
}
