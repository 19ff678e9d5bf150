use tracing::trace;

use super::accumulator::IsotopeAccumulator;
use super::detector::IsotopeDetector;
use crate::isotopes::label_allowed;
use crate::models::{
    GroupType,
    PeakGroup,
};

impl IsotopeDetector<'_> {
    /// Turns an accumulated feature into a child of `parent`.
    pub(super) fn child_statistics(&self, parent: &PeakGroup, child: &mut PeakGroup) {
        child.group_id = parent.group_id;
        child.compound = parent.compound.clone();
        child.parent_group_id = Some(parent.group_id);
        child.group_type = GroupType::Isotope;
        child.group_statistics();

        if let Some(classifier) = self.classifier {
            if classifier.has_model() {
                classifier.classify(child);
                child.group_statistics();
            }
        }

        child.calculate_group_rank(
            self.params.delta_rt_check_flag,
            self.params.compound_rt_window,
            self.params.quality_weight,
            self.params.intensity_weight,
            self.params.delta_rt_weight,
        );
    }

    /// Attaches the features of a finished run to `parent`.
    ///
    /// Returns how many children were actually added to the run's view.
    pub(super) fn add_isotopes(&self, parent: &mut PeakGroup, acc: IsotopeAccumulator) -> usize {
        let mut attached = 0;
        for (i, mut child) in acc.into_features().into_iter().enumerate() {
            child.meta_group_id = (i + 1) as u32;
            self.child_statistics(parent, &mut child);

            if !label_allowed(&child.tag_string, self.flags) {
                trace!("Label {} filtered out", child.tag_string);
                continue;
            }
            let label = child.tag_string.clone();
            if parent.attach_child(self.view, child) {
                attached += 1;
            } else {
                trace!("Parent {} already has a {} child", parent.group_id, label);
            }
        }
        attached
    }
}
