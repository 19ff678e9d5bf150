use std::fmt::Display;

use crate::utils::TupleRangeError;

#[derive(Debug)]
pub enum IsoQueryError {
    DataProcessingError(DataProcessingError),
    InvalidRange(String),
    Other(String),
}

impl Display for IsoQueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DataProcessingError(e) => write!(f, "Error processing data: {}", e),
            Self::InvalidRange(msg) => write!(f, "Invalid range: {}", msg),
            Self::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for IsoQueryError {}

impl IsoQueryError {
    pub fn custom(msg: impl Display) -> Self {
        Self::Other(msg.to_string())
    }
}

#[derive(Debug)]
pub enum DataProcessingError {
    ExpectedSlicesSameLength {
        expected: usize,
        other: usize,
        context: &'static str,
    },
    ExpectedNonEmptyData {
        context: &'static str,
    },
    ExpectedSortedData {
        context: &'static str,
    },
}

impl Display for DataProcessingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ExpectedSlicesSameLength {
                expected,
                other,
                context,
            } => write!(
                f,
                "Expected slices of the same length in {}, got {} and {}",
                context, expected, other
            ),
            Self::ExpectedNonEmptyData { context } => {
                write!(f, "Expected non-empty data in {}", context)
            }
            Self::ExpectedSortedData { context } => {
                write!(f, "Expected sorted data in {}", context)
            }
        }
    }
}

impl From<DataProcessingError> for IsoQueryError {
    fn from(e: DataProcessingError) -> Self {
        IsoQueryError::DataProcessingError(e)
    }
}

impl<T: Copy + PartialOrd + std::fmt::Debug> From<TupleRangeError<T>> for IsoQueryError {
    fn from(e: TupleRangeError<T>) -> Self {
        IsoQueryError::InvalidRange(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, IsoQueryError>;
