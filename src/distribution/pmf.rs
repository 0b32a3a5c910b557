//! Empirical marginal probability mass functions.

use std::collections::{BTreeMap, HashMap, HashSet};

use nalgebra::DMatrix;
use serde::Serialize;

use crate::distribution::table::JointProbabilityTable;
use crate::error::{CopulaError, Result};
use crate::types::{Axis, Category};

/// Probability of each category of a single discrete variable.
///
/// Entries keep an explicit order; that order becomes the row or column order
/// of any table built from the pmf.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarginalPmf<T> {
    entries: Vec<(T, f64)>,
}

impl<T: Category> MarginalPmf<T> {
    /// Wrap externally supplied `(value, probability)` entries.
    ///
    /// Probabilities are not required to sum to one. Repeated values are rejected.
    pub fn from_entries(entries: Vec<(T, f64)>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(entries.len());
        for (value, _) in &entries {
            if !seen.insert(value) {
                return Err(CopulaError::DuplicateValue(format!("{value:?}")));
            }
        }
        Ok(Self { entries })
    }

    /// Probability of `value`, if it is in the support.
    pub fn get(&self, value: &T) -> Option<f64> {
        self.entries
            .iter()
            .find(|(v, _)| v == value)
            .map(|&(_, p)| p)
    }

    /// Support values in pmf order.
    pub fn values(&self) -> Vec<T> {
        self.entries.iter().map(|(v, _)| v.clone()).collect()
    }

    /// Probabilities in pmf order.
    pub fn probabilities(&self) -> Vec<f64> {
        self.entries.iter().map(|&(_, p)| p).collect()
    }

    /// Iterate `(value, probability)` in pmf order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, f64)> + '_ {
        self.entries.iter().map(|(v, p)| (v, *p))
    }

    /// Number of support values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the support is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all probabilities.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|&(_, p)| p).sum()
    }

    /// Running sum of the probabilities in pmf order.
    pub fn cumulative(&self) -> Vec<f64> {
        self.entries
            .iter()
            .scan(0.0, |acc, &(_, p)| {
                *acc += p;
                Some(*acc)
            })
            .collect()
    }

    /// Same pmf with entries laid out in `order`, which must be a permutation
    /// of the support.
    pub fn reorder(&self, order: &[T], axis: Axis) -> Result<Self> {
        let lookup: HashMap<T, usize> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, (v, _))| (v.clone(), i))
            .collect();
        let positions = crate::distribution::table::permutation_positions(&lookup, order, axis)?;
        Ok(Self {
            entries: positions.into_iter().map(|i| self.entries[i].clone()).collect(),
        })
    }
}

/// Estimate the pmf of a discrete variable from its observed values.
///
/// Each distinct value gets `count / n`; the support is laid out in ascending
/// value order.
///
/// # Errors
///
/// [`CopulaError::EmptyInput`] if there are no observations.
pub fn empirical_marginal_pmf<T, I>(samples: I) -> Result<MarginalPmf<T>>
where
    T: Category,
    I: IntoIterator<Item = T>,
{
    let mut counts: BTreeMap<T, u64> = BTreeMap::new();
    let mut n = 0u64;
    for value in samples {
        *counts.entry(value).or_insert(0) += 1;
        n += 1;
    }
    if n == 0 {
        return Err(CopulaError::EmptyInput);
    }

    let n = n as f64;
    Ok(MarginalPmf {
        entries: counts
            .into_iter()
            .map(|(value, count)| (value, count as f64 / n))
            .collect(),
    })
}

/// Outer product of two pmfs: cell `(a, b)` holds `P(a) * P(b)`.
///
/// Rows follow `pmf1` order and columns follow `pmf2` order. Inputs are not
/// normalised.
pub fn independent_pmf<A: Category, B: Category>(
    pmf1: &MarginalPmf<A>,
    pmf2: &MarginalPmf<B>,
) -> JointProbabilityTable<A, B> {
    let p1 = pmf1.probabilities();
    let p2 = pmf2.probabilities();
    let values = DMatrix::from_fn(p1.len(), p2.len(), |i, j| p1[i] * p2[j]);
    JointProbabilityTable::from_unique_parts(pmf1.values(), pmf2.values(), values)
}

/// Order a pmf according to the kind of variable it describes.
///
/// Ordinal variables are sorted by ascending value. Other variables are sorted
/// by descending probability; the sort is stable, so values with equal
/// probability keep their original relative order.
pub fn order_pmf<T: Category>(pmf: &MarginalPmf<T>, is_ordinal: bool) -> MarginalPmf<T> {
    let mut entries = pmf.entries.clone();
    if is_ordinal {
        entries.sort_by(|a, b| a.0.cmp(&b.0));
    } else {
        entries.sort_by(|a, b| b.1.total_cmp(&a.1));
    }
    MarginalPmf { entries }
}
