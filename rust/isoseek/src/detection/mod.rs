//! Isotope search over the samples of a run and attachment of the results.

pub mod accumulator;
mod detector;
pub mod filters;
pub mod intensity;
mod labeling;
pub mod peak_filter;
pub mod search;

pub use accumulator::IsotopeAccumulator;
pub use detector::{
    DetectionOutcome,
    DetectionSummary,
    IsotopeDetector,
    SkipReason,
};
pub use filters::{
    CandidateFilter,
    Rejection,
};
pub use intensity::sample_intensity;
pub use peak_filter::QualityPeakFilter;
pub use search::nearest_peak;
