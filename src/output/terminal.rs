//! Terminal output formatting with colors.

use colored::Colorize;

use crate::result::Outcome;
use crate::types::Mode;

/// Format an Outcome for human-readable terminal output.
pub fn format_outcome(outcome: &Outcome) -> String {
    let result = outcome.result();
    let mut output = String::new();
    let sep = "\u{2500}".repeat(62);

    output.push_str("upcross\n");
    output.push_str(&sep);
    output.push('\n');
    output.push('\n');

    output.push_str(&format!(
        "  Observations: {} over {} domain positions\n",
        result.metadata.n_observations, result.metadata.domain_length
    ));
    output.push_str(&format!(
        "  Relabelings:  {} ({})\n",
        result.metadata.n_permutations,
        match result.metadata.mode {
            Mode::Exhaustive => "exhaustive".to_string(),
            Mode::MonteCarlo => format!("Monte Carlo, seed {}", result.metadata.seed),
        }
    ));
    output.push_str(&format!(
        "  Threshold:    |t| > {:.4} at alpha = {}\n",
        result.critical_threshold, result.alpha
    ));
    output.push('\n');

    match outcome {
        Outcome::NoSignificantCluster(_) => {
            output.push_str(&format!(
                "  {}\n",
                "\u{2713} No significant cluster".green().bold()
            ));
        }
        Outcome::Significant(result) => {
            output.push_str(&format!(
                "  {}\n\n",
                format!(
                    "\u{2717} {} significant cluster{} detected",
                    result.clusters.len(),
                    if result.clusters.len() == 1 { "" } else { "s" }
                )
                .red()
                .bold()
            ));
            for cluster in &result.clusters {
                let p = if cluster.p_value <= result.p_floor {
                    format!("p < {:.5}", result.p_floor)
                } else {
                    format!("p = {:.5}", cluster.p_value)
                };
                output.push_str(&format!(
                    "    positions {:>4}..={:<4}  integral {:>9.4}  {}\n",
                    cluster.start, cluster.end, cluster.integral, p
                ));
            }
        }
    }

    output.push('\n');
    output.push_str(&sep);
    output.push('\n');
    output.push_str(&format!(
        "Completed in {:.3} s\n",
        result.metadata.runtime_secs
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::{Cluster, Metadata, TestResult};
    use nalgebra::DVector;

    fn make_result(clusters: Vec<Cluster>) -> TestResult {
        TestResult {
            statistic: DVector::from_vec(vec![0.2, 4.1, 0.3]),
            critical_threshold: 3.5,
            alpha: 0.05,
            clusters,
            p_floor: 0.03125,
            metadata: Metadata {
                n_observations: 5,
                domain_length: 3,
                mode: Mode::Exhaustive,
                n_permutations: 32,
                seed: 0,
                runtime_secs: 0.002,
            },
        }
    }

    #[test]
    fn test_format_no_cluster() {
        let text = format_outcome(&Outcome::NoSignificantCluster(make_result(vec![])));
        assert!(text.contains("No significant cluster"));
        assert!(text.contains("32"));
        assert!(text.contains("exhaustive"));
    }

    #[test]
    fn test_format_significant() {
        let text = format_outcome(&Outcome::Significant(make_result(vec![Cluster {
            start: 1,
            end: 1,
            integral: 0.6,
            p_value: 0.03125,
        }])));
        assert!(text.contains("1 significant cluster detected"));
        assert!(text.contains("p <"));
    }
}
