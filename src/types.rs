//! Sample containers and common types.

use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::error::{CopulaError, Result};

/// Values usable as categories of a discrete variable.
///
/// Discovered categories are laid out in ascending `Ord` order unless an
/// explicit ordering is supplied.
pub trait Category: Clone + Ord + Hash + fmt::Debug + 'static {}

impl<T: Clone + Ord + Hash + fmt::Debug + 'static> Category for T {}

/// One of the two axes of a joint table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Categories of the first variable.
    Rows,
    /// Categories of the second variable.
    Columns,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Rows => write!(f, "row"),
            Axis::Columns => write!(f, "column"),
        }
    }
}

/// An ordered set of paired observations `(x_i, y_i)` of two discrete variables.
///
/// Never mutated by the estimators; they only borrow it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairedSamples<A, B> {
    pairs: Vec<(A, B)>,
}

impl<A, B> PairedSamples<A, B> {
    /// Wrap a list of observation pairs.
    pub fn new(pairs: Vec<(A, B)>) -> Self {
        Self { pairs }
    }

    /// Pair two equally long columns row by row.
    pub fn from_columns(first: Vec<A>, second: Vec<B>) -> Result<Self> {
        if first.len() != second.len() {
            return Err(CopulaError::LengthMismatch {
                first: first.len(),
                second: second.len(),
            });
        }
        Ok(Self {
            pairs: first.into_iter().zip(second).collect(),
        })
    }

    /// Number of observations `n`.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// True if there are no observations.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// The observation pairs in input order.
    pub fn pairs(&self) -> &[(A, B)] {
        &self.pairs
    }

    /// Values of the first variable in input order.
    pub fn first_column(&self) -> impl Iterator<Item = &A> + '_ {
        self.pairs.iter().map(|(a, _)| a)
    }

    /// Values of the second variable in input order.
    pub fn second_column(&self) -> impl Iterator<Item = &B> + '_ {
        self.pairs.iter().map(|(_, b)| b)
    }
}

impl<A, B> FromIterator<(A, B)> for PairedSamples<A, B> {
    fn from_iter<I: IntoIterator<Item = (A, B)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<A, B> From<Vec<(A, B)>> for PairedSamples<A, B> {
    fn from(pairs: Vec<(A, B)>) -> Self {
        Self::new(pairs)
    }
}
