//! Bootstrap significance of dependence between two discrete variables.
//!
//! 1. **Levels** ([`SignificanceLevels`]): validated low-tail probabilities
//!    mirrored into a two-tailed level sequence
//! 2. **Estimate** ([`significance_from_bootstrap`]): per-cell null quantiles
//!    from independent resamples
//! 3. **Labelling** ([`label_cell`]): most extreme satisfied band per cell

mod estimate;
mod labeling;
mod levels;

pub use estimate::{significance_from_bootstrap, significance_from_ensemble};
pub use labeling::{label_cell, label_table};
pub use levels::SignificanceLevels;
