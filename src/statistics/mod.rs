//! Statistical core of the field permutation test.
//!
//! Three cooperating pieces:
//! - pointwise t-statistic fields (one- and two-sample)
//! - permutation-distribution construction over sign/group relabelings
//! - supra-threshold cluster detection with trapezoidal integrals

mod cluster;
mod percentile;
mod permutation;
mod tstat;

pub use cluster::{cluster_integral, label_runs, max_cluster_integral, Run};
pub use percentile::percentile;
pub use permutation::{
    binomial, counter_rng_seed, partition_distribution, partition_relabeling_count,
    sign_distribution, sign_relabeling_count, unrank_combination,
};
pub use tstat::{
    first_degenerate_grouped, first_degenerate_position, t_statistic_signed,
    t_statistic_two_sample,
};
