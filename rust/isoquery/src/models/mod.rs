pub mod eic;
pub mod peak;
pub mod sample;
pub mod scan;
pub mod tolerance;

pub use eic::{
    Eic,
    EicType,
};
pub use peak::Peak;
pub use sample::{
    Sample,
    SampleId,
};
pub use scan::Scan;
pub use tolerance::MassCutoff;
