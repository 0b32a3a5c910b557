//! Statistical machinery behind the significance estimate.
//!
//! - Quantiles with linear interpolation
//! - Independence resampling with replacement, per column
//! - The stacked per-cell null distribution ([`BootstrapEnsemble`])

mod bootstrap;
mod ensemble;
mod quantile;

pub use bootstrap::{
    bootstrap_independently, bootstrap_independently_seeded, counter_rng_seed,
    resample_with_replacement_into,
};
pub use ensemble::BootstrapEnsemble;
pub use quantile::{compute_quantile, compute_quantile_sorted, compute_quantiles_with_buffer};
