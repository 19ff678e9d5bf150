use std::collections::HashMap;

use isoquery::Peak;

use crate::isotopes::IsotopeCandidate;
use crate::models::{
    GroupStatistics,
    PeakGroup,
};

/// Isotope features found during a single detection run, keyed by label.
///
/// Features keep the order in which their label was first seen, which is
/// the order they get their meta group id in.
#[derive(Debug, Default)]
pub struct IsotopeAccumulator {
    features: Vec<PeakGroup>,
    index: HashMap<String, usize>,
}

impl IsotopeAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `peak` to the feature of `candidate`, creating the feature the
    /// first time its label shows up.
    pub fn add_peak(&mut self, candidate: &IsotopeCandidate, parent: &PeakGroup, peak: Peak) {
        let idx = match self.index.get(&candidate.name) {
            Some(&idx) => idx,
            None => {
                let feature = PeakGroup {
                    tag_string: candidate.name.clone(),
                    expected_mz: candidate.mass,
                    expected_abundance: candidate.abundance,
                    isotope_c13_count: candidate.c13,
                    isotope_n15_count: candidate.n15,
                    isotope_s34_count: candidate.s34,
                    isotope_h2_count: candidate.h2,
                    selected_samples: parent.selected_samples.clone(),
                    stats: GroupStatistics {
                        mean_mz: candidate.mass,
                        ..Default::default()
                    },
                    ..Default::default()
                };
                self.features.push(feature);
                self.index
                    .insert(candidate.name.clone(), self.features.len() - 1);
                self.features.len() - 1
            }
        };
        self.features[idx].add_peak(peak);
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn into_features(self) -> Vec<PeakGroup> {
        self.features
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str, mass: f64) -> IsotopeCandidate {
        IsotopeCandidate {
            name: name.to_string(),
            mass,
            abundance: 0.05,
            c13: 1,
            n15: 0,
            s34: 0,
            h2: 0,
        }
    }

    #[test]
    fn test_one_feature_per_label_in_first_seen_order() {
        let parent = PeakGroup {
            selected_samples: vec![0, 1],
            ..Default::default()
        };
        let mut acc = IsotopeAccumulator::new();
        acc.add_peak(&candidate("C13-label-2", 183.08), &parent, Peak::default());
        acc.add_peak(&candidate("C13-label-1", 182.07), &parent, Peak::default());
        acc.add_peak(
            &candidate("C13-label-2", 183.08),
            &parent,
            Peak {
                sample_id: 1,
                ..Default::default()
            },
        );
        assert_eq!(acc.len(), 2);

        let features = acc.into_features();
        assert_eq!(features[0].tag_string, "C13-label-2");
        assert_eq!(features[0].peaks.len(), 2);
        assert_eq!(features[0].expected_mz, 183.08);
        assert_eq!(features[0].stats.mean_mz, 183.08);
        assert_eq!(features[0].isotope_c13_count, 1);
        assert_eq!(features[0].selected_samples, vec![0, 1]);
        assert_eq!(features[1].tag_string, "C13-label-1");
        assert_eq!(features[1].peaks.len(), 1);
    }
}
