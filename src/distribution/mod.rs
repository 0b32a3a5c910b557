//! Empirical discrete distributions.
//!
//! Marginal pmfs, dense joint tables, and the empirical copula (joint
//! frequency over the independence baseline) for two discrete variables.

mod joint;
mod pmf;
mod table;

pub(crate) use joint::{count_codes, EncodedSamples};
pub use joint::{
    empirical_copula, empirical_joint_pmf, empirical_joint_pmf_details, joint_counts,
    joint_frequencies, JointPmfDetails,
};
pub use pmf::{empirical_marginal_pmf, independent_pmf, order_pmf, MarginalPmf};
pub use table::{JointCountTable, JointProbabilityTable, JointTable, SignificanceTable};
