//! Joint counts, joint frequencies, and the empirical copula.

use std::collections::{BTreeSet, HashMap};

use nalgebra::DMatrix;
use serde::Serialize;

use crate::distribution::pmf::{empirical_marginal_pmf, independent_pmf, MarginalPmf};
use crate::distribution::table::{JointCountTable, JointProbabilityTable};
use crate::error::{CopulaError, Result};
use crate::types::{Category, PairedSamples};

/// Paired samples with each value replaced by its position on the table axis.
///
/// Axes are the distinct observed values in ascending order. Resampling works
/// on the codes so that building a count table is a single pass.
#[derive(Debug, Clone)]
pub(crate) struct EncodedSamples<A, B> {
    pub(crate) rows: Vec<A>,
    pub(crate) columns: Vec<B>,
    pub(crate) row_codes: Vec<usize>,
    pub(crate) column_codes: Vec<usize>,
}

impl<A: Category, B: Category> EncodedSamples<A, B> {
    pub(crate) fn new(samples: &PairedSamples<A, B>) -> Result<Self> {
        if samples.is_empty() {
            return Err(CopulaError::EmptyInput);
        }

        let rows: Vec<A> = samples
            .first_column()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let columns: Vec<B> = samples
            .second_column()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let row_lookup: HashMap<&A, usize> = rows.iter().enumerate().map(|(i, v)| (v, i)).collect();
        let column_lookup: HashMap<&B, usize> =
            columns.iter().enumerate().map(|(j, v)| (v, j)).collect();
        let row_codes = samples.first_column().map(|a| row_lookup[a]).collect();
        let column_codes = samples.second_column().map(|b| column_lookup[b]).collect();

        Ok(Self {
            rows,
            columns,
            row_codes,
            column_codes,
        })
    }

    pub(crate) fn sample_size(&self) -> usize {
        self.row_codes.len()
    }

    /// `(rows, columns)` of the table the codes index into.
    pub(crate) fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.columns.len())
    }
}

/// Cross-tabulate code pairs into a dense count matrix of the given shape.
pub(crate) fn count_codes(
    shape: (usize, usize),
    row_codes: &[usize],
    column_codes: &[usize],
) -> DMatrix<u64> {
    let mut counts = DMatrix::from_element(shape.0, shape.1, 0u64);
    for (&i, &j) in row_codes.iter().zip(column_codes) {
        counts[(i, j)] += 1;
    }
    counts
}

/// Cross-tabulate paired samples into a dense count table.
///
/// Combinations that never occur get a count of zero. Without explicit orders
/// both axes list the observed values in ascending order. An explicit order
/// must be a permutation of the observed values of that column.
///
/// # Errors
///
/// [`CopulaError::EmptyInput`] for an empty sample set,
/// [`CopulaError::InvalidOrdering`] for an order that omits an observed value
/// or introduces an unobserved one.
pub fn joint_counts<A: Category, B: Category>(
    samples: &PairedSamples<A, B>,
    row_order: Option<&[A]>,
    column_order: Option<&[B]>,
) -> Result<JointCountTable<A, B>> {
    let encoded = EncodedSamples::new(samples)?;
    let counts = count_codes(encoded.shape(), &encoded.row_codes, &encoded.column_codes);
    let table = JointCountTable::from_unique_parts(encoded.rows, encoded.columns, counts);

    if row_order.is_none() && column_order.is_none() {
        return Ok(table);
    }
    let rows = row_order.map_or_else(|| table.rows().to_vec(), <[A]>::to_vec);
    let columns = column_order.map_or_else(|| table.columns().to_vec(), <[B]>::to_vec);
    table.reindex(&rows, &columns)
}

/// Divide a count table by its total so the cells sum to one.
pub fn joint_frequencies<A: Category, B: Category>(
    counts: &JointCountTable<A, B>,
) -> Result<JointProbabilityTable<A, B>> {
    let total = counts.sum();
    if total == 0 {
        return Err(CopulaError::EmptyInput);
    }
    let total = total as f64;
    Ok(counts.map(|count| count as f64 / total))
}

/// Ratio of the joint frequencies to the independent baseline, cell by cell.
///
/// A value of 1 means the two variables are locally independent at that
/// combination. Cells are matched by label, so `baseline` may be laid out in a
/// different order than `frequencies`.
///
/// # Errors
///
/// [`CopulaError::InvalidOrdering`] if the two tables cover different
/// categories, [`CopulaError::DegenerateBaseline`] at the first cell (row-major)
/// whose baseline probability is zero.
pub fn empirical_copula<A: Category, B: Category>(
    frequencies: &JointProbabilityTable<A, B>,
    baseline: &JointProbabilityTable<A, B>,
) -> Result<JointProbabilityTable<A, B>> {
    let aligned = baseline.reindex(frequencies.rows(), frequencies.columns())?;
    if let Some((row, column, _)) = aligned.iter().find(|(_, _, p)| **p == 0.0) {
        return Err(CopulaError::DegenerateBaseline {
            row: format!("{row:?}"),
            column: format!("{column:?}"),
        });
    }
    frequencies.zip_with(&aligned, |freq, independent| freq / independent)
}

/// Every intermediate of an empirical joint pmf estimate.
#[derive(Debug, Clone, Serialize)]
pub struct JointPmfDetails<A, B> {
    /// Marginal pmf of the first variable.
    pub pmf1: MarginalPmf<A>,
    /// Marginal pmf of the second variable.
    pub pmf2: MarginalPmf<B>,
    /// Joint frequency over independent baseline.
    pub copula: JointProbabilityTable<A, B>,
    /// Raw joint counts.
    pub counts: JointCountTable<A, B>,
    /// Joint counts divided by their total.
    pub joint_frequencies: JointProbabilityTable<A, B>,
    /// Outer product of the two marginals.
    pub independent: JointProbabilityTable<A, B>,
}

/// Estimate the marginals, the empirical copula, and all intermediate tables.
pub fn empirical_joint_pmf_details<A: Category, B: Category>(
    samples: &PairedSamples<A, B>,
) -> Result<JointPmfDetails<A, B>> {
    let pmf1 = empirical_marginal_pmf(samples.first_column().cloned())?;
    let pmf2 = empirical_marginal_pmf(samples.second_column().cloned())?;
    let counts = joint_counts(samples, Some(&pmf1.values()[..]), Some(&pmf2.values()[..]))?;
    let joint_frequencies = joint_frequencies(&counts)?;
    let independent = independent_pmf(&pmf1, &pmf2);
    let copula = empirical_copula(&joint_frequencies, &independent)?;

    Ok(JointPmfDetails {
        pmf1,
        pmf2,
        copula,
        counts,
        joint_frequencies,
        independent,
    })
}

/// Estimate the two marginals and the empirical copula.
pub fn empirical_joint_pmf<A: Category, B: Category>(
    samples: &PairedSamples<A, B>,
) -> Result<(MarginalPmf<A>, MarginalPmf<B>, JointProbabilityTable<A, B>)> {
    let details = empirical_joint_pmf_details(samples)?;
    Ok((details.pmf1, details.pmf2, details.copula))
}
