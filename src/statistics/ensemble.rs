//! Cellwise null distributions built from independent resamples.

use nalgebra::DMatrix;

use crate::distribution::{JointCountTable, JointProbabilityTable};
use crate::statistics::quantile::{compute_quantile, compute_quantiles_with_buffer};
use crate::types::Category;

/// `B` joint count tables stacked cell by cell.
///
/// Every resample covers the same dense grid: the full Cartesian product of
/// the values observed in each column of the original samples. A combination
/// that a resample never produced holds a zero for that resample.
#[derive(Debug, Clone)]
pub struct BootstrapEnsemble<A, B> {
    rows: Vec<A>,
    columns: Vec<B>,
    sample_size: usize,
    resamples: Vec<DMatrix<u64>>,
}

impl<A: Category, B: Category> BootstrapEnsemble<A, B> {
    pub(crate) fn new(
        rows: Vec<A>,
        columns: Vec<B>,
        sample_size: usize,
        resamples: Vec<DMatrix<u64>>,
    ) -> Self {
        Self {
            rows,
            columns,
            sample_size,
            resamples,
        }
    }

    /// Row categories (ascending), shared by every resample.
    pub fn rows(&self) -> &[A] {
        &self.rows
    }

    /// Column categories (ascending), shared by every resample.
    pub fn columns(&self) -> &[B] {
        &self.columns
    }

    /// Number of observations `n` in each resample.
    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    /// Number of resamples `B`.
    pub fn n_bootstraps(&self) -> usize {
        self.resamples.len()
    }

    /// Joint count table of resample `k`.
    pub fn resample(&self, k: usize) -> Option<JointCountTable<A, B>> {
        let counts = self.resamples.get(k)?;
        Some(JointCountTable::from_unique_parts(
            self.rows.clone(),
            self.columns.clone(),
            counts.clone(),
        ))
    }

    /// The `B` counts of one cell, in resample order.
    pub fn cell_counts(&self, row: &A, column: &B) -> Option<Vec<u64>> {
        let i = self.rows.binary_search(row).ok()?;
        let j = self.columns.binary_search(column).ok()?;
        Some(self.resamples.iter().map(|m| m[(i, j)]).collect())
    }

    /// Per-cell quantile of the resampled counts at `level`.
    ///
    /// # Panics
    ///
    /// Panics if the ensemble is empty or `level` is outside [0, 1].
    pub fn quantile_table(&self, level: f64) -> JointProbabilityTable<A, B> {
        let mut scratch = Vec::with_capacity(self.resamples.len());
        let values = DMatrix::from_fn(self.rows.len(), self.columns.len(), |i, j| {
            scratch.clear();
            scratch.extend(self.resamples.iter().map(|m| m[(i, j)] as f64));
            compute_quantile(&mut scratch, level)
        });
        JointProbabilityTable::from_unique_parts(self.rows.clone(), self.columns.clone(), values)
    }

    /// Per-cell quantiles at several levels, one table per level.
    ///
    /// Each cell's counts are sorted once and read at every level.
    ///
    /// # Panics
    ///
    /// Panics if the ensemble is empty or any level is outside [0, 1].
    pub fn quantile_tables(&self, levels: &[f64]) -> Vec<JointProbabilityTable<A, B>> {
        let (n_rows, n_cols) = (self.rows.len(), self.columns.len());
        let mut tables = vec![DMatrix::from_element(n_rows, n_cols, 0.0); levels.len()];

        let mut cell = Vec::with_capacity(self.resamples.len());
        let mut buffer = Vec::with_capacity(self.resamples.len());
        for i in 0..n_rows {
            for j in 0..n_cols {
                cell.clear();
                cell.extend(self.resamples.iter().map(|m| m[(i, j)] as f64));
                let quantiles = compute_quantiles_with_buffer(&cell, levels, &mut buffer);
                for (table, q) in tables.iter_mut().zip(quantiles) {
                    table[(i, j)] = q;
                }
            }
        }

        tables
            .into_iter()
            .map(|values| {
                JointProbabilityTable::from_unique_parts(
                    self.rows.clone(),
                    self.columns.clone(),
                    values,
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_ensemble() -> BootstrapEnsemble<char, u32> {
        // Two cells per row; each resample sums to n = 4
        BootstrapEnsemble::new(
            vec!['A', 'B'],
            vec![1, 2],
            4,
            vec![
                DMatrix::from_row_slice(2, 2, &[4, 0, 0, 0]),
                DMatrix::from_row_slice(2, 2, &[1, 1, 1, 1]),
                DMatrix::from_row_slice(2, 2, &[2, 0, 2, 0]),
            ],
        )
    }

    #[test]
    fn test_cell_counts_in_resample_order() {
        let ensemble = tiny_ensemble();
        assert_eq!(ensemble.cell_counts(&'A', &1), Some(vec![4, 1, 2]));
        assert_eq!(ensemble.cell_counts(&'B', &1), Some(vec![0, 1, 2]));
        assert_eq!(ensemble.cell_counts(&'C', &1), None);
    }

    #[test]
    fn test_resample_table() {
        let ensemble = tiny_ensemble();
        let second = ensemble.resample(1).unwrap();
        assert_eq!(second.sum(), 4);
        assert_eq!(second.get(&'B', &2), Some(&1));
        assert!(ensemble.resample(3).is_none());
    }

    #[test]
    fn test_quantile_tables_match_single_level() {
        let ensemble = tiny_ensemble();
        let levels = [0.1, 0.5, 0.9];
        let tables = ensemble.quantile_tables(&levels);

        assert_eq!(tables.len(), 3);
        for (&level, table) in levels.iter().zip(&tables) {
            assert_eq!(*table, ensemble.quantile_table(level));
        }
        // Cell (A, 1) sorted: [1, 2, 4]; median is 2
        assert_eq!(tables[1].get(&'A', &1), Some(&2.0));
    }
}
