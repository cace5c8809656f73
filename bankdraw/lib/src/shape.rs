//! Dimensions of a generation request, and the conversion of flat sequences into rows.

use itertools::Itertools;

use crate::{utils::div_rounding_up, Error, Result};

/// The shape of the output requested from a generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dims {
    /// A single sequence of the given length
    Flat(usize),
    /// `rows` rows of `cols` values each, stored row-major
    Matrix { rows: usize, cols: usize },
}

impl Dims {
    /// Parse `Dims` from either `[len]` or `[rows, cols]`
    pub fn from_slice(dims: &[usize]) -> Result<Self> {
        match *dims {
            [len] => Ok(Dims::Flat(len)),
            [rows, cols] => match rows.checked_mul(cols) {
                Some(_) => Ok(Dims::Matrix { rows, cols }),
                None => Err(Error::DimsTooLarge { rows, cols }),
            },
            _ => Err(Error::InvalidDims(dims.to_vec())),
        }
    }

    /// The total number of values requested.  Saturates at `usize::MAX` for matrices which
    /// [`Dims::from_slice`] would reject as too large.
    pub fn total(self) -> usize {
        match self {
            Dims::Flat(len) => len,
            Dims::Matrix { rows, cols } => rows.saturating_mul(cols),
        }
    }

    /// The row size passed to [`Rule`](crate::Rule)s, or `None` for flat requests
    pub fn row_size(self) -> Option<usize> {
        match self {
            Dims::Flat(_) => None,
            Dims::Matrix { cols, .. } => Some(cols),
        }
    }

    /// The number of values over which the ordered generator enforces ascending order.  Flat
    /// requests are treated as one long row.
    pub(crate) fn ordering_row_len(self) -> usize {
        self.row_size().unwrap_or_else(|| self.total())
    }

    /// Convert a (possibly partial) flat sequence into the shape described by `self`
    pub fn shape(self, flat: Vec<i64>) -> Shaped {
        match self {
            Dims::Flat(_) => Shaped::Sequence(flat),
            Dims::Matrix { cols, .. } => Shaped::Matrix(fold_rows(&flat, cols)),
        }
    }

    /// An empty output of the right shape
    pub(crate) fn empty(self) -> Shaped {
        self.shape(Vec::new())
    }
}

/// The output of a generator, shaped according to the requested [`Dims`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shaped {
    Sequence(Vec<i64>),
    Matrix(Vec<Vec<i64>>),
}

impl Shaped {
    /// Concatenate every row, undoing the shaping
    pub fn flatten(&self) -> Vec<i64> {
        match self {
            Shaped::Sequence(values) => values.clone(),
            Shaped::Matrix(rows) => rows.iter().flatten().copied().collect_vec(),
        }
    }

    /// The number of values (not rows) contained in this output
    pub fn len(&self) -> usize {
        match self {
            Shaped::Sequence(values) => values.len(),
            Shaped::Matrix(rows) => rows.iter().map(Vec::len).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// View this output as a list of rows.  A [`Shaped::Sequence`] is a single row.
    pub fn rows(&self) -> Vec<&[i64]> {
        match self {
            Shaped::Sequence(values) => vec![values.as_slice()],
            Shaped::Matrix(rows) => rows.iter().map(Vec::as_slice).collect_vec(),
        }
    }
}

/// Fold a flat sequence into rows of `cols` values.  If `flat.len()` isn't a multiple of `cols`,
/// then the last row will be shorter than the rest.  `cols == 0` produces no rows.
pub fn fold_rows(flat: &[i64], cols: usize) -> Vec<Vec<i64>> {
    if cols == 0 {
        return Vec::new();
    }
    let mut rows = Vec::with_capacity(div_rounding_up(flat.len(), cols));
    rows.extend(flat.chunks(cols).map(<[i64]>::to_vec));
    rows
}
