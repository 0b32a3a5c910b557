//! # empirical-copula
//!
//! Empirical copulas for pairs of discrete variables, with bootstrap
//! significance under the hypothesis of independence.
//!
//! Given paired observations `(a, b)`, this crate estimates:
//! - The marginal pmf of each variable
//! - The joint frequency table and its ratio to the independence baseline
//!   (the empirical copula)
//! - Per-cell significance bands: how extreme each observed joint count is
//!   against counts obtained by resampling each variable on its own
//!
//! ## Quick Start
//!
//! ```
//! use empirical_copula::{empirical_joint_pmf, PairedSamples, SignificanceTest};
//!
//! let samples: PairedSamples<char, u32> = vec![
//!     ('A', 100), ('A', 100), ('A', 200),
//!     ('B', 100), ('B', 300), ('F', 300),
//! ]
//! .into();
//!
//! let (pmf1, pmf2, copula) = empirical_joint_pmf(&samples).unwrap();
//! assert_eq!(pmf1.len(), 3);
//! assert_eq!(copula.shape(), (3, 3));
//!
//! let result = SignificanceTest::quick().seed(7).run(&samples).unwrap();
//! for (row, column, label) in result.significant_cells() {
//!     println!("{row} x {column}: {label:+}");
//! }
//! # let _ = pmf2;
//! ```
//!
//! ## Significance bands
//!
//! For low-tail levels `p_1 < ... < p_k` the quantile levels are
//! `p_1..p_k, 0.0, 1-p_k..1-p_1`, labelled `-k..k`. A cell is labelled
//! `+i` when its observed count reaches the `1-p_i` bootstrap quantile and
//! `-i` when it falls to the `p_i` quantile; the most extreme band wins and
//! the high tail wins when both hold.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
mod config;
mod error;
mod result;
mod significance_test;
#[cfg(feature = "parallel")]
mod thread_pool;
mod types;

// Functional modules
pub mod distribution;
pub mod output;
pub mod significance;
pub mod statistics;

// Re-exports for public API
pub use config::Config;
pub use error::{CopulaError, Result};
pub use result::{Metadata, SignificanceResult};
pub use significance_test::SignificanceTest;
pub use types::{Axis, Category, PairedSamples};

pub use distribution::{
    empirical_copula, empirical_joint_pmf, empirical_joint_pmf_details, empirical_marginal_pmf,
    independent_pmf, joint_counts, joint_frequencies, order_pmf, JointCountTable, JointPmfDetails,
    JointProbabilityTable, JointTable, MarginalPmf, SignificanceTable,
};
pub use significance::{
    label_cell, significance_from_bootstrap, significance_from_ensemble, SignificanceLevels,
};
pub use statistics::{bootstrap_independently, bootstrap_independently_seeded, BootstrapEnsemble};
