use isoquery::IsoQueryError;

#[derive(Debug)]
pub enum FormulaError {
    UnknownElement { element: String, formula: String },
    UnexpectedCharacters { formula: String, position: usize },
    CountOverflow { element: String, formula: String },
}

impl std::fmt::Display for FormulaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownElement { element, formula } => {
                write!(f, "Unknown element {} in formula {}", element, formula)
            }
            Self::UnexpectedCharacters { formula, position } => write!(
                f,
                "Unexpected characters in formula {} at position {}",
                formula, position
            ),
            Self::CountOverflow { element, formula } => {
                write!(f, "Atom count for {} overflows in formula {}", element, formula)
            }
        }
    }
}

/// Failures coming from the collaborators of the detector.
///
/// The detector itself never fails on a missing isotope, those are silent
/// skips, so everything here is something the caller has to look at.
#[derive(Debug)]
pub enum IsoSeekError {
    Isoquery(IsoQueryError),
    Formula(FormulaError),
}

impl std::fmt::Display for IsoSeekError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Isoquery(e) => write!(f, "Error querying sample data: {}", e),
            Self::Formula(e) => write!(f, "Error computing isotopes: {}", e),
        }
    }
}

impl std::error::Error for IsoSeekError {}

pub type Result<T> = std::result::Result<T, IsoSeekError>;

impl From<IsoQueryError> for IsoSeekError {
    fn from(x: IsoQueryError) -> Self {
        Self::Isoquery(x)
    }
}

impl From<FormulaError> for IsoSeekError {
    fn from(x: FormulaError) -> Self {
        Self::Formula(x)
    }
}
