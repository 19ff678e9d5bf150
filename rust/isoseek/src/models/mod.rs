pub mod peak_group;

pub use peak_group::{
    AttachmentView,
    Compound,
    GroupStatistics,
    GroupType,
    PeakGroup,
};
