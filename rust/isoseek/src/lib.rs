pub mod config;
pub mod detection;
pub mod errors;
pub mod isotopes;
pub mod models;
pub mod traits;

pub use config::{
    IsotopeParameters,
    PeakFilterParameters,
};
pub use detection::{
    DetectionOutcome,
    IsotopeDetector,
    QualityPeakFilter,
    Rejection,
    SkipReason,
};
pub use errors::{
    IsoSeekError,
    Result,
};
pub use isotopes::{
    ElementFlags,
    FormulaIsotopeGenerator,
    IsotopeCandidate,
};
pub use models::{
    AttachmentView,
    Compound,
    PeakGroup,
};
pub use traits::{
    Classifier,
    IsotopeGenerator,
    PeakFilter,
};
