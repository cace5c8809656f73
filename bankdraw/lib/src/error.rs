//! Error types for the different ways that Bankdraw can fail.
//!
//! Note that failing to generate a full sequence is _not_ an error; that is reported through
//! [`Outcome`](crate::Outcome).

use std::fmt::{Display, Formatter};

use crate::formula::FormulaError;

/// Alias for `Result<T, bankdraw::Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// The different ways that Bankdraw can fail.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Dimensions must be given as `[len]` or `[rows, cols]`
    InvalidDims(Vec<usize>),
    /// `rows * cols` doesn't fit in a `usize`
    DimsTooLarge { rows: usize, cols: usize },
    /// Some formula couldn't be evaluated
    Formula { formula: String, cause: FormulaError },
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidDims(dims) => write!(
                f,
                "Dimensions must be `[len]` or `[rows, cols]`, but {:?} has {} entries",
                dims,
                dims.len()
            ),
            Error::DimsTooLarge { rows, cols } => {
                write!(f, "Dimensions {} x {} are too large to generate", rows, cols)
            }
            Error::Formula { formula, cause } => {
                write!(f, "Error evaluating formula {:?}: {}", formula, cause)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidDims(_) | Error::DimsTooLarge { .. } => None,
            Error::Formula { cause, .. } => Some(cause),
        }
    }
}
