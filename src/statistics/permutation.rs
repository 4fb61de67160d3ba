//! Relabeling enumeration and permutation-distribution construction.
//!
//! Relabelings are addressed by index: exhaustive one-sample relabelings map
//! an integer mask to a sign vector, exhaustive two-sample relabelings unrank
//! a combination in the combinatorial number system, and Monte Carlo
//! relabelings derive a per-iteration PRNG from the base seed via a counter
//! hash. Indexed addressing makes the enumeration lazy, reproducible, and
//! embarrassingly parallel: a distribution is one indexed map over
//! `0..count` feeding a per-relabeling summary, collected in enumeration
//! order.

use nalgebra::{DMatrix, DVector};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::types::Mode;

use super::tstat::{t_statistic_signed, t_statistic_two_sample};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Counter-based RNG seed generation using SplitMix64.
///
/// A stateless PRF that turns a base seed and an iteration counter into a
/// well-distributed 64-bit seed, so Monte Carlo relabeling i is identical in
/// both permutation passes and independent of thread scheduling.
#[inline]
pub fn counter_rng_seed(base_seed: u64, counter: u64) -> u64 {
    // SplitMix64: https://xoshiro.di.unimi.it/splitmix64.c
    let mut z = base_seed.wrapping_add(counter.wrapping_mul(0x9e37_79b9_7f4a_7c15));
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Binomial coefficient C(n, k).
///
/// Exact for every value that fits in u128; the multiplicative form stays
/// integral at each step.
pub fn binomial(n: usize, k: usize) -> u128 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut c: u128 = 1;
    for i in 1..=k {
        c = c * (n - k + i) as u128 / i as u128;
    }
    c
}

/// Unrank a k-combination of {0..n} in lexicographic order.
///
/// Returns a membership mask of length n with exactly k true entries.
/// Rank 0 is the combination {0, 1, ..., k-1}, which is the original group
/// assignment when group A occupies the first k rows.
///
/// # Panics
///
/// Panics if `rank >= C(n, k)`.
pub fn unrank_combination(mut rank: u128, n: usize, k: usize) -> Vec<bool> {
    assert!(rank < binomial(n, k), "combination rank out of range");

    let mut membership = vec![false; n];
    let mut next = 0;
    for slot in 0..k {
        for c in next..n {
            let with_c = binomial(n - 1 - c, k - 1 - slot);
            if rank < with_c {
                membership[c] = true;
                next = c + 1;
                break;
            }
            rank -= with_c;
        }
    }
    membership
}

/// Sign vector for an exhaustive relabeling mask.
///
/// Bit b of `mask` is the label of observation b; `sign = 1 - 2*label`, so
/// mask 0 is the identity (all +1) relabeling.
fn signs_for_mask(mask: u64, n: usize, out: &mut [f64]) {
    debug_assert_eq!(out.len(), n);
    for (b, s) in out.iter_mut().enumerate() {
        *s = 1.0 - 2.0 * ((mask >> b) & 1) as f64;
    }
}

/// Random sign vector for a Monte Carlo relabeling.
fn random_signs(rng: &mut Xoshiro256PlusPlus, out: &mut [f64]) {
    use rand::Rng;
    for s in out.iter_mut() {
        *s = if rng.random::<bool>() { -1.0 } else { 1.0 };
    }
}

/// Random group-A membership mask of k observations out of n.
fn random_membership(rng: &mut Xoshiro256PlusPlus, n: usize, k: usize) -> Vec<bool> {
    let mut membership = vec![false; n];
    for i in rand::seq::index::sample(rng, n, k) {
        membership[i] = true;
    }
    membership
}

/// Number of one-sample relabelings for the given mode.
pub fn sign_relabeling_count(n: usize, mode: Mode, iterations: usize) -> usize {
    match mode {
        Mode::Exhaustive => {
            assert!(n < 64, "exhaustive sign enumeration limited to n < 64");
            1usize << n
        }
        Mode::MonteCarlo => iterations,
    }
}

/// Number of two-sample relabelings for the given mode.
pub fn partition_relabeling_count(n: usize, n_a: usize, mode: Mode, iterations: usize) -> usize {
    match mode {
        Mode::Exhaustive => {
            let count = binomial(n, n_a);
            assert!(
                count <= usize::MAX as u128,
                "exhaustive partition count does not fit in usize"
            );
            count as usize
        }
        Mode::MonteCarlo => iterations,
    }
}

/// Indexed map over `0..count`, collected in enumeration order.
///
/// Parallel when the `parallel` feature is enabled; the collect preserves
/// index order either way, so exhaustive distributions are bit-identical
/// across runs and thread counts.
fn collect_indexed<F>(count: usize, eval: F) -> Vec<f64>
where
    F: Fn(usize) -> f64 + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        crate::thread_pool::install(|| (0..count).into_par_iter().map(eval).collect())
    }

    #[cfg(not(feature = "parallel"))]
    {
        (0..count).map(eval).collect()
    }
}

/// Build a permutation distribution over one-sample sign relabelings.
///
/// Applies each relabeling to the datum-corrected observations `y`,
/// recomputes the statistic field, and records `summarize(field)`. Called
/// once with a max-|t| summary (primary distribution) and once with a
/// max-cluster-integral summary (secondary distribution).
pub fn sign_distribution<F>(
    y: &DMatrix<f64>,
    mode: Mode,
    iterations: usize,
    seed: u64,
    summarize: F,
) -> Vec<f64>
where
    F: Fn(&DVector<f64>) -> f64 + Sync + Send,
{
    let n = y.nrows();
    let count = sign_relabeling_count(n, mode, iterations);

    collect_indexed(count, |i| {
        let mut signs = vec![0.0; n];
        match mode {
            Mode::Exhaustive => signs_for_mask(i as u64, n, &mut signs),
            Mode::MonteCarlo => {
                let mut rng = Xoshiro256PlusPlus::seed_from_u64(counter_rng_seed(seed, i as u64));
                random_signs(&mut rng, &mut signs);
            }
        }
        let t = t_statistic_signed(y, &signs);
        summarize(&t)
    })
}

/// Build a permutation distribution over two-sample group relabelings.
///
/// `y` stacks both groups (group A first); each relabeling reassigns `n_a`
/// rows to group A. Exhaustive mode enumerates every C(n, n_a) assignment,
/// rank 0 being the original grouping.
pub fn partition_distribution<F>(
    y: &DMatrix<f64>,
    n_a: usize,
    mode: Mode,
    iterations: usize,
    seed: u64,
    summarize: F,
) -> Vec<f64>
where
    F: Fn(&DVector<f64>) -> f64 + Sync + Send,
{
    let n = y.nrows();
    let count = partition_relabeling_count(n, n_a, mode, iterations);

    collect_indexed(count, |i| {
        let membership = match mode {
            Mode::Exhaustive => unrank_combination(i as u128, n, n_a),
            Mode::MonteCarlo => {
                let mut rng = Xoshiro256PlusPlus::seed_from_u64(counter_rng_seed(seed, i as u64));
                random_membership(&mut rng, n, n_a)
            }
        };
        let t = t_statistic_two_sample(y, &membership);
        summarize(&t)
    })
}
