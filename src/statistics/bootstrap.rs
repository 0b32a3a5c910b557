//! Independence resampling of paired categorical samples.
//!
//! Each column is resampled with replacement on its own, so a synthetic
//! dataset keeps both empirical marginals but loses any dependence between
//! the columns. Stacking the joint counts of many such datasets gives the
//! null distribution of every cell under independence.

use nalgebra::DMatrix;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::distribution::{count_codes, EncodedSamples};
use crate::error::{CopulaError, Result};
use crate::statistics::ensemble::BootstrapEnsemble;
use crate::types::{Category, PairedSamples};

/// Counter-based RNG seed generation using SplitMix64.
///
/// This is a stateless PRF that generates deterministic, well-distributed
/// seeds from a base seed and counter. Using this instead of simple addition
/// avoids sequential correlation between neighbouring iterations.
#[inline]
pub fn counter_rng_seed(base_seed: u64, counter: u64) -> u64 {
    // SplitMix64: https://xoshiro.di.unimi.it/splitmix64.c
    let mut z = base_seed.wrapping_add(counter.wrapping_mul(0x9e3779b97f4a7c15));
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

/// Draw `out.len()` values from `codes` uniformly with replacement.
///
/// # Panics
///
/// Panics if `codes` is empty while `out` is not.
pub fn resample_with_replacement_into<T: Copy, R: Rng>(
    codes: &[T],
    rng: &mut R,
    out: &mut [T],
) {
    if out.is_empty() {
        return;
    }
    assert!(!codes.is_empty(), "Cannot resample from an empty slice");

    for slot in out.iter_mut() {
        *slot = codes[rng.random_range(0..codes.len())];
    }
}

/// Resample one synthetic independent dataset and count it.
///
/// The first column is drawn in full before the second, so the draw order on
/// `rng` is fixed.
fn independent_resample<R: Rng>(
    row_codes: &[usize],
    column_codes: &[usize],
    shape: (usize, usize),
    rng: &mut R,
    row_buf: &mut [usize],
    column_buf: &mut [usize],
) -> DMatrix<u64> {
    resample_with_replacement_into(row_codes, rng, row_buf);
    resample_with_replacement_into(column_codes, rng, column_buf);
    count_codes(shape, row_buf, column_buf)
}

/// Build `n_bootstraps` independent resamples from a single RNG stream.
///
/// For each iteration, `n` draws with replacement are taken from the first
/// column and then `n` from the second; the synthetic pairs are counted over
/// the full grid of observed values. The same seed and samples always give a
/// bit-identical ensemble.
///
/// # Errors
///
/// [`CopulaError::InvalidBootstrapCount`] if `n_bootstraps` is zero,
/// [`CopulaError::EmptyInput`] for an empty sample set.
pub fn bootstrap_independently<A, B, R>(
    samples: &PairedSamples<A, B>,
    n_bootstraps: usize,
    rng: &mut R,
) -> Result<BootstrapEnsemble<A, B>>
where
    A: Category,
    B: Category,
    R: Rng,
{
    if n_bootstraps == 0 {
        return Err(CopulaError::InvalidBootstrapCount);
    }
    let encoded = EncodedSamples::new(samples)?;
    let n = encoded.sample_size();
    let shape = encoded.shape();

    let mut row_buf = vec![0usize; n];
    let mut column_buf = vec![0usize; n];
    let mut resamples = Vec::with_capacity(n_bootstraps);
    for _ in 0..n_bootstraps {
        resamples.push(independent_resample(
            &encoded.row_codes,
            &encoded.column_codes,
            shape,
            rng,
            &mut row_buf,
            &mut column_buf,
        ));
    }

    tracing::debug!(
        n_bootstraps,
        sample_size = n,
        rows = shape.0,
        columns = shape.1,
        "built independent bootstrap ensemble"
    );

    Ok(BootstrapEnsemble::new(
        encoded.rows,
        encoded.columns,
        n,
        resamples,
    ))
}

/// Build `n_bootstraps` independent resamples with one RNG stream per iteration.
///
/// Iteration `i` draws from a `Xoshiro256PlusPlus` seeded with
/// [`counter_rng_seed`]`(seed, i)`, so iterations share no state. With the
/// `parallel` feature they run on the shared rayon pool; the ensemble is
/// identical either way.
///
/// # Errors
///
/// Same as [`bootstrap_independently`].
pub fn bootstrap_independently_seeded<A, B>(
    samples: &PairedSamples<A, B>,
    n_bootstraps: usize,
    seed: u64,
) -> Result<BootstrapEnsemble<A, B>>
where
    A: Category,
    B: Category,
{
    if n_bootstraps == 0 {
        return Err(CopulaError::InvalidBootstrapCount);
    }
    let encoded = EncodedSamples::new(samples)?;
    let n = encoded.sample_size();
    let shape = encoded.shape();
    let row_codes = encoded.row_codes.as_slice();
    let column_codes = encoded.column_codes.as_slice();

    #[cfg(feature = "parallel")]
    let resamples: Vec<DMatrix<u64>> = crate::thread_pool::install(|| {
        (0..n_bootstraps)
            .into_par_iter()
            .map_init(
                // Per-thread scratch buffers
                || (vec![0usize; n], vec![0usize; n]),
                |(row_buf, column_buf), i| {
                    let mut rng =
                        Xoshiro256PlusPlus::seed_from_u64(counter_rng_seed(seed, i as u64));
                    independent_resample(
                        row_codes,
                        column_codes,
                        shape,
                        &mut rng,
                        row_buf,
                        column_buf,
                    )
                },
            )
            .collect()
    });

    #[cfg(not(feature = "parallel"))]
    let resamples: Vec<DMatrix<u64>> = {
        let mut row_buf = vec![0usize; n];
        let mut column_buf = vec![0usize; n];
        (0..n_bootstraps)
            .map(|i| {
                let mut rng =
                    Xoshiro256PlusPlus::seed_from_u64(counter_rng_seed(seed, i as u64));
                independent_resample(
                    row_codes,
                    column_codes,
                    shape,
                    &mut rng,
                    &mut row_buf,
                    &mut column_buf,
                )
            })
            .collect()
    };

    tracing::debug!(
        n_bootstraps,
        sample_size = n,
        seed,
        parallel = cfg!(feature = "parallel"),
        "built counter-seeded bootstrap ensemble"
    );

    Ok(BootstrapEnsemble::new(
        encoded.rows,
        encoded.columns,
        n,
        resamples,
    ))
}
