use isoquery::{
    Peak,
    SampleId,
    TupleRange,
};
use serde::{
    Deserialize,
    Serialize,
};
use std::sync::Arc;

/// Compound annotation shared by a parent group and all of its isotopes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Compound {
    pub id: String,
    pub name: String,
    pub formula: String,
    /// Minutes, 0 when unknown.
    pub expected_rt: f32,
    /// 0 means "use the run-wide charge".
    pub charge: i32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum GroupType {
    #[default]
    None,
    Isotope,
}

/// The child list of a [`PeakGroup`] an isotope run writes into.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum AttachmentView {
    #[default]
    PeakDetection,
    IsoWidget,
    BarPlot,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct GroupStatistics {
    pub sample_count: usize,
    pub max_intensity: f32,
    pub total_intensity: f32,
    pub mean_rt: f32,
    pub mean_mz: f64,
    pub min_rt: f32,
    pub max_rt: f32,
    pub max_quality: f32,
    pub max_signal_baseline_ratio: f32,
}

/// A chromatographic feature grouped across samples.
///
/// Parents own their isotope children, one list per [`AttachmentView`].
/// Children point back at their parent through `parent_group_id`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PeakGroup {
    pub group_id: u32,
    /// Shared by every isotope found in the same detection run, starts at 1.
    pub meta_group_id: u32,
    pub parent_group_id: Option<u32>,
    pub compound: Option<Arc<Compound>>,
    pub tag_string: String,
    pub group_type: GroupType,
    pub peaks: Vec<Peak>,
    pub selected_samples: Vec<SampleId>,

    pub expected_mz: f64,
    pub expected_abundance: f64,
    pub isotope_c13_count: u32,
    pub isotope_n15_count: u32,
    pub isotope_s34_count: u32,
    pub isotope_h2_count: u32,

    pub stats: GroupStatistics,
    pub group_rank: f32,

    pub children: Vec<PeakGroup>,
    pub children_iso_widget: Vec<PeakGroup>,
    pub children_bar_plot: Vec<PeakGroup>,
}

impl PeakGroup {
    /// Builds a group from its peaks and computes its statistics.
    pub fn new(group_id: u32, compound: Option<Arc<Compound>>, peaks: Vec<Peak>) -> Self {
        let selected_samples = peaks.iter().map(|p| p.sample_id).collect();
        let mut out = Self {
            group_id,
            compound,
            peaks,
            selected_samples,
            ..Default::default()
        };
        out.group_statistics();
        out
    }

    pub fn add_peak(&mut self, peak: Peak) {
        self.peaks.push(peak);
    }

    /// Peak of this group picked in `sample_id`, if any.
    pub fn get_peak(&self, sample_id: SampleId) -> Option<&Peak> {
        self.peaks.iter().find(|p| p.sample_id == sample_id)
    }

    pub fn median_rt(&self) -> f32 {
        if self.peaks.is_empty() {
            return self.stats.mean_rt;
        }
        let mut rts: Vec<f32> = self.peaks.iter().map(|p| p.rt).collect();
        rts.sort_by(|a, b| a.total_cmp(b));
        let mid = rts.len() / 2;
        if rts.len() % 2 == 0 {
            (rts[mid - 1] + rts[mid]) / 2.0
        } else {
            rts[mid]
        }
    }

    pub fn rt_bounds(&self) -> TupleRange<f32> {
        TupleRange::try_new(self.stats.min_rt, self.stats.max_rt).unwrap_or_else(|_| {
            let rt = self.median_rt();
            TupleRange::try_new(rt, rt).expect("a single value is always ordered")
        })
    }

    /// Recomputes [`GroupStatistics`] from the current peaks.
    ///
    /// `mean_mz` only averages peaks with a known m/z and keeps its previous
    /// value (the expected m/z for isotopes) otherwise.
    pub fn group_statistics(&mut self) {
        if self.peaks.is_empty() {
            self.stats = GroupStatistics {
                mean_mz: self.stats.mean_mz,
                ..Default::default()
            };
            return;
        }
        let n = self.peaks.len() as f32;
        let mut stats = GroupStatistics {
            min_rt: f32::MAX,
            max_rt: f32::MIN,
            mean_mz: self.stats.mean_mz,
            ..Default::default()
        };
        let mut mz_sum = 0.0;
        let mut mz_count = 0usize;
        for peak in self.peaks.iter() {
            if peak.peak_intensity > 0.0 {
                stats.sample_count += 1;
            }
            stats.max_intensity = stats.max_intensity.max(peak.peak_intensity);
            stats.total_intensity += peak.peak_intensity;
            stats.mean_rt += peak.rt / n;
            stats.min_rt = stats.min_rt.min(peak.rtmin);
            stats.max_rt = stats.max_rt.max(peak.rtmax);
            stats.max_quality = stats.max_quality.max(peak.quality);
            stats.max_signal_baseline_ratio = stats
                .max_signal_baseline_ratio
                .max(peak.signal_baseline_ratio);
            if peak.peak_mz > 0.0 {
                mz_sum += peak.peak_mz;
                mz_count += 1;
            }
        }
        if mz_count > 0 {
            stats.mean_mz = mz_sum / mz_count as f64;
        }
        self.stats = stats;
    }

    /// Distance between the observed and the annotated rt, 0 without one.
    pub fn expected_rt_diff(&self) -> f32 {
        match self.compound.as_deref() {
            Some(c) if c.expected_rt > 0.0 => (c.expected_rt - self.stats.mean_rt).abs(),
            _ => 0.0,
        }
    }

    /// Ranks the group from its quality, intensity and, optionally, its
    /// agreement with the expected rt. Weights are on a 0-10 scale.
    pub fn calculate_group_rank(
        &mut self,
        delta_rt_check: bool,
        compound_rt_window: f32,
        quality_weight: u32,
        intensity_weight: u32,
        delta_rt_weight: u32,
    ) {
        let a = quality_weight as f64 / 10.0;
        let b = intensity_weight as f64 / 10.0;
        let c = delta_rt_weight as f64 / 10.0;
        let quality_term = (self.stats.max_quality as f64).powf(a);
        let intensity_term = ((self.stats.max_intensity as f64) + 1.0).ln().powf(b);

        let has_expected_rt = self
            .compound
            .as_deref()
            .is_some_and(|x| x.expected_rt > 0.0);
        let rank = if delta_rt_check && has_expected_rt && compound_rt_window > 0.0 {
            let rel = self.expected_rt_diff() as f64 / compound_rt_window as f64;
            // past ~1.05 windows the base goes negative, those rank at the bottom
            let rt_term = (1.1 - rel * rel).max(0.0).powf(c);
            quality_term * rt_term * intensity_term
        } else {
            quality_term * intensity_term
        };
        self.group_rank = rank as f32;
    }

    pub fn children(&self, view: AttachmentView) -> &[PeakGroup] {
        match view {
            AttachmentView::PeakDetection => &self.children,
            AttachmentView::IsoWidget => &self.children_iso_widget,
            AttachmentView::BarPlot => &self.children_bar_plot,
        }
    }

    fn children_mut(&mut self, view: AttachmentView) -> &mut Vec<PeakGroup> {
        match view {
            AttachmentView::PeakDetection => &mut self.children,
            AttachmentView::IsoWidget => &mut self.children_iso_widget,
            AttachmentView::BarPlot => &mut self.children_bar_plot,
        }
    }

    pub fn has_child_labeled(&self, view: AttachmentView, label: &str) -> bool {
        self.children(view).iter().any(|c| c.tag_string == label)
    }

    /// Appends `child` to the list of `view` unless a child with the same
    /// label is already there. Returns whether it was added.
    pub fn attach_child(&mut self, view: AttachmentView, child: PeakGroup) -> bool {
        if self.has_child_labeled(view, &child.tag_string) {
            return false;
        }
        self.children_mut(view).push(child);
        true
    }
}
