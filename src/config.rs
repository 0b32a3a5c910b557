//! Configuration for significance runs.

use serde::{Deserialize, Serialize};

use crate::error::{CopulaError, Result};
use crate::significance::SignificanceLevels;

/// Configuration options for [`SignificanceTest`](crate::SignificanceTest).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Independent resamples used to estimate each cell's null distribution
    /// (default: 1,000).
    pub n_bootstraps: usize,

    /// Ascending low-tail probabilities in `(0, 0.5)` (default: `[0.01, 0.05]`).
    ///
    /// High-tail levels are mirrored from these.
    pub p_levels_low: Vec<f64>,

    /// Optional deterministic base seed for resampling.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            n_bootstraps: 1_000,
            p_levels_low: vec![0.01, 0.05],
            seed: None,
        }
    }
}

impl Config {
    /// Check the configuration and return the validated levels.
    pub fn validate(&self) -> Result<SignificanceLevels> {
        if self.n_bootstraps == 0 {
            return Err(CopulaError::InvalidBootstrapCount);
        }
        SignificanceLevels::new(&self.p_levels_low)
    }
}
