//! Theoretical isotopologues of a molecular formula.

pub mod candidates;
pub mod formula;
pub mod labels;

pub use candidates::{
    FormulaIsotopeGenerator,
    IsotopeCandidate,
};
pub use formula::{
    adjust_mass,
    SumFormula,
};
pub use labels::{
    label_allowed,
    ElementFlags,
};
