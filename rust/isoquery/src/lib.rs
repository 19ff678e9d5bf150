//! Raw LC-MS data access: scans, samples, extracted ion chromatograms and
//! the tolerance and correlation helpers used to query them.

// Re-export main structures
pub use crate::models::{
    Eic,
    EicType,
    MassCutoff,
    Peak,
    Sample,
    SampleId,
    Scan,
};

// Re-export traits
pub use crate::traits::{
    EicParameters,
    ScanEicExtractor,
    SignalExtractor,
};

// Declare modules
pub mod errors;
pub mod models;
pub mod traits;
pub mod utils;
pub use crate::utils::TupleRange;

// Re-export errors
pub use crate::errors::{
    DataProcessingError,
    IsoQueryError,
};
