//! Two-tailed quantile levels and their integer band labels.

use serde::{Deserialize, Serialize};

use crate::error::{CopulaError, Result};

/// Validated low-tail probabilities `p_1 < ... < p_k`, each in `(0, 0.5)`.
///
/// The full level sequence is `p_1 .. p_k, 0.0, 1 - p_k .. 1 - p_1` with
/// labels `-k .. -1, 0, 1 .. k`. The middle `0.0` is a placeholder for the
/// non-significant band and is never used as a threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLevels")]
pub struct SignificanceLevels {
    low: Vec<f64>,
}

/// Unchecked serialized form; deserialization goes through [`SignificanceLevels::new`].
#[derive(Deserialize)]
struct RawLevels {
    low: Vec<f64>,
}

impl TryFrom<RawLevels> for SignificanceLevels {
    type Error = CopulaError;

    fn try_from(raw: RawLevels) -> Result<Self> {
        Self::new(&raw.low)
    }
}

impl SignificanceLevels {
    /// Validate `p_levels_low`.
    ///
    /// # Errors
    ///
    /// [`CopulaError::InvalidSignificanceLevels`] if the list is empty, not
    /// strictly increasing, or has a value outside `(0, 0.5)`.
    pub fn new(p_levels_low: &[f64]) -> Result<Self> {
        if p_levels_low.is_empty() {
            return Err(CopulaError::InvalidSignificanceLevels(
                "at least one low-tail level is required".to_string(),
            ));
        }
        if let Some(p) = p_levels_low.iter().find(|&&p| !(p > 0.0 && p < 0.5)) {
            return Err(CopulaError::InvalidSignificanceLevels(format!(
                "level {p} is outside (0, 0.5)"
            )));
        }
        if let Some(w) = p_levels_low.windows(2).find(|w| w[1] <= w[0]) {
            return Err(CopulaError::InvalidSignificanceLevels(format!(
                "levels must be strictly increasing, got {} before {}",
                w[0], w[1]
            )));
        }
        Ok(Self {
            low: p_levels_low.to_vec(),
        })
    }

    /// Number of bands `k` on each tail.
    pub fn n_levels(&self) -> usize {
        self.low.len()
    }

    /// The validated low-tail probabilities.
    pub fn low(&self) -> &[f64] {
        &self.low
    }

    /// Full sequence of `2k + 1` levels, symmetric around the `0.0` placeholder.
    pub fn quantile_levels(&self) -> Vec<f64> {
        self.low
            .iter()
            .copied()
            .chain(std::iter::once(0.0))
            .chain(self.low.iter().rev().map(|p| 1.0 - p))
            .collect()
    }

    /// Labels `-k ..= k`, aligned with [`quantile_levels`](Self::quantile_levels).
    pub fn labels(&self) -> Vec<i32> {
        let k = self.low.len() as i32;
        (-k..=k).collect()
    }

    /// `(label, level)` for the high tail, loosest band first: band `i` uses `1 - p_{k-i+1}`.
    pub fn high_tail(&self) -> Vec<(i32, f64)> {
        self.low
            .iter()
            .rev()
            .enumerate()
            .map(|(i, p)| (i as i32 + 1, 1.0 - p))
            .collect()
    }

    /// `(label, level)` for the low tail, loosest band first: band `-i` uses `p_{k-i+1}`.
    pub fn low_tail(&self) -> Vec<(i32, f64)> {
        self.low
            .iter()
            .rev()
            .enumerate()
            .map(|(i, &p)| (-(i as i32 + 1), p))
            .collect()
    }
}
