//! Significance of observed joint counts under the independence null.

use std::time::Instant;

use rand::Rng;

use crate::distribution::joint_counts;
use crate::error::{CopulaError, Result};
use crate::result::{Metadata, SignificanceResult};
use crate::significance::labeling::label_table;
use crate::significance::levels::SignificanceLevels;
use crate::statistics::{bootstrap_independently, BootstrapEnsemble};
use crate::types::{Category, PairedSamples};

/// Label every cell of the joint count table with a two-tailed significance band.
///
/// The null distribution of each cell is estimated from `n_bootstraps`
/// independent resamples drawn from `rng`. Thresholds are the per-cell
/// quantiles at `p_levels_low` (low tail) and their complements (high tail).
///
/// # Errors
///
/// [`CopulaError::InvalidBootstrapCount`], then
/// [`CopulaError::InvalidSignificanceLevels`], then
/// [`CopulaError::EmptyInput`]; all are checked before any resampling.
pub fn significance_from_bootstrap<A, B, R>(
    samples: &PairedSamples<A, B>,
    n_bootstraps: usize,
    p_levels_low: &[f64],
    rng: &mut R,
) -> Result<SignificanceResult<A, B>>
where
    A: Category,
    B: Category,
    R: Rng,
{
    let start = Instant::now();
    if n_bootstraps == 0 {
        return Err(CopulaError::InvalidBootstrapCount);
    }
    let levels = SignificanceLevels::new(p_levels_low)?;
    if samples.is_empty() {
        return Err(CopulaError::EmptyInput);
    }

    let ensemble = bootstrap_independently(samples, n_bootstraps, rng)?;
    let mut result = significance_from_ensemble(samples, &ensemble, &levels)?;
    result.metadata.runtime_secs = start.elapsed().as_secs_f64();
    Ok(result)
}

/// Label the real joint counts of `samples` against an existing ensemble.
///
/// The ensemble must have been built from the same samples; its axes define
/// the layout of every returned table.
pub fn significance_from_ensemble<A: Category, B: Category>(
    samples: &PairedSamples<A, B>,
    ensemble: &BootstrapEnsemble<A, B>,
    levels: &SignificanceLevels,
) -> Result<SignificanceResult<A, B>> {
    let quantile_levels = levels.quantile_levels();
    let labels = levels.labels();
    let k = levels.n_levels();

    let thresholds = ensemble.quantile_tables(&quantile_levels);
    let observed = joint_counts(samples, Some(ensemble.rows()), Some(ensemble.columns()))?;

    // Position k holds the placeholder; bands move outwards from it
    let low: Vec<_> = thresholds[..k].iter().rev().cloned().collect();
    let high: Vec<_> = thresholds[k + 1..].to_vec();
    let significance = label_table(&observed, &low, &high)?;

    for (level, table) in quantile_levels.iter().zip(&thresholds) {
        tracing::trace!(
            quantile_level = *level,
            thresholds = ?table.values().as_slice(),
            "per-cell quantile thresholds"
        );
    }
    tracing::debug!(
        n_bootstraps = ensemble.n_bootstraps(),
        levels = ?quantile_levels,
        significant_cells = significance.iter().filter(|(_, _, l)| **l != 0).count(),
        "labelled joint counts"
    );

    Ok(SignificanceResult {
        quantile_levels,
        labels,
        significance,
        observed,
        thresholds,
        metadata: Metadata {
            n_bootstraps: ensemble.n_bootstraps(),
            sample_size: ensemble.sample_size(),
            seed: None,
            runtime_secs: 0.0,
        },
    })
}
