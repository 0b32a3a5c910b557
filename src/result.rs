//! Result types of a significance run.

use serde::{Deserialize, Serialize};

use crate::distribution::{JointCountTable, JointProbabilityTable, SignificanceTable};
use crate::types::Category;

/// Significance bands for every cell of a joint count table.
#[derive(Debug, Clone, Serialize)]
pub struct SignificanceResult<A, B> {
    /// `p_1 .. p_k, 0.0, 1 - p_k .. 1 - p_1`.
    pub quantile_levels: Vec<f64>,

    /// `-k ..= k`, aligned with `quantile_levels`.
    pub labels: Vec<i32>,

    /// One band label per cell; `0` inside the non-significant band.
    pub significance: SignificanceTable<A, B>,

    /// Joint counts of the real samples, laid out like `significance`.
    pub observed: JointCountTable<A, B>,

    /// Per-cell null quantile at each entry of `quantile_levels`.
    pub thresholds: Vec<JointProbabilityTable<A, B>>,

    /// Run parameters for reproduction.
    pub metadata: Metadata,
}

/// Parameters and bookkeeping of a significance run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Number of independent resamples.
    pub n_bootstraps: usize,

    /// Observations per resample.
    pub sample_size: usize,

    /// Base seed, when the run was counter-seeded.
    pub seed: Option<u64>,

    /// Wall-clock time of the run in seconds.
    pub runtime_secs: f64,
}

impl<A: Category, B: Category> SignificanceResult<A, B> {
    /// Number of bands `k` on each tail.
    pub fn n_levels(&self) -> usize {
        self.labels.len() / 2
    }

    /// Band of one cell.
    pub fn label(&self, row: &A, column: &B) -> Option<i32> {
        self.significance.get(row, column).copied()
    }

    /// Quantile level associated with a band label.
    ///
    /// Label `0` maps to the placeholder level `0.0`.
    pub fn level_for_label(&self, label: i32) -> Option<f64> {
        self.labels
            .iter()
            .position(|&l| l == label)
            .map(|i| self.quantile_levels[i])
    }

    /// Cells outside the non-significant band, row-major.
    pub fn significant_cells(&self) -> impl Iterator<Item = (&A, &B, i32)> + '_ {
        self.significance
            .iter()
            .filter(|(_, _, label)| **label != 0)
            .map(|(a, b, label)| (a, b, *label))
    }
}
