//! Capabilities the isotope detector depends on.
//!
//! The detector only talks to its collaborators through these traits, so
//! each of them can be swapped for a deterministic fake in tests. The
//! signal extractor lives in [`isoquery::SignalExtractor`] next to the data
//! it reads.
//!
//! All of them are `Send + Sync` because [`crate::IsotopeDetector::detect_all`]
//! shares them across the rayon pool.

use isoquery::Peak;

use crate::errors::Result;
use crate::isotopes::{
    ElementFlags,
    IsotopeCandidate,
};
use crate::models::PeakGroup;

/// Formula + charge + element flags -> ordered theoretical isotopologues.
///
/// Must be deterministic. An empty formula yields an empty list, a formula
/// the generator cannot understand is an error.
pub trait IsotopeGenerator: Send + Sync {
    fn isotopes(
        &self,
        formula: &str,
        charge: i32,
        flags: ElementFlags,
    ) -> Result<Vec<IsotopeCandidate>>;
}

/// Drops peaks that do not meet the general quality heuristics.
pub trait PeakFilter: Send + Sync {
    fn filter(&self, peaks: &mut Vec<Peak>);
}

/// Optional model that re-scores a group in place.
pub trait Classifier: Send + Sync {
    fn has_model(&self) -> bool;
    fn classify(&self, group: &mut PeakGroup);
}
