//! Turns valid replicates into per-forecaster statistics.

use brierboard_core::config::CiMethod;
use brierboard_core::constants::{CONFIDENCE_LEVEL, TOP_PERCENTILE};

use super::types::ForecasterSimulation;
use crate::scoring::{Axis, AxisScores};
use crate::stats;

/// Index of the lowest observed overall score; the first one wins ties.
pub fn observed_best(observed: &[AxisScores]) -> Option<usize> {
    observed
        .iter()
        .enumerate()
        .filter_map(|(i, s)| s.overall.map(|v| (i, v)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

/// Aggregate replicates (each indexed by forecaster) against the observed scores.
pub fn aggregate(
    observed: &[AxisScores],
    replicates: &[Vec<AxisScores>],
    ci_method: CiMethod,
) -> Vec<ForecasterSimulation> {
    let n = observed.len();
    let mut out = vec![ForecasterSimulation::default(); n];
    if replicates.is_empty() {
        return out;
    }
    let total = replicates.len() as f64;
    let best = observed_best(observed);

    let mut first = vec![0usize; n];
    let mut top5 = vec![0usize; n];
    for replicate in replicates {
        let defined: Vec<f64> = replicate.iter().filter_map(|s| s.overall).collect();
        let Some(min) = defined.iter().copied().min_by(f64::total_cmp) else {
            continue;
        };
        let Some(cut) = stats::quantile(&defined, TOP_PERCENTILE) else {
            continue;
        };
        for (f, s) in replicate.iter().enumerate() {
            if let Some(v) = s.overall {
                first[f] += usize::from(v == min);
                top5[f] += usize::from(v <= cut);
            }
        }
    }

    for f in 0..n {
        let row = &mut out[f];
        for axis in Axis::ALL {
            let values: Vec<f64> = replicates.iter().filter_map(|r| r[f].get(axis)).collect();
            let ci = match ci_method {
                CiMethod::Percentile => stats::percentile_interval(&values, CONFIDENCE_LEVEL),
                CiMethod::Bca => observed[f]
                    .get(axis)
                    .and_then(|est| stats::bca_interval(&values, est, CONFIDENCE_LEVEL)),
            };
            match axis {
                Axis::Dataset => row.dataset_ci = ci,
                Axis::Market => row.market_ci = ci,
                Axis::Overall => row.overall_ci = ci,
            }
        }
        if observed[f].overall.is_some() {
            row.pct_first = Some(first[f] as f64 / total * 100.0);
            row.pct_top5 = Some(top5[f] as f64 / total * 100.0);
        }
    }

    if let Some(best) = best {
        for f in (0..n).filter(|&f| f != best && observed[f].overall.is_some()) {
            let (mut not_worse, mut pairs) = (0usize, 0usize);
            for replicate in replicates {
                if let (Some(comp), Some(top)) = (replicate[f].overall, replicate[best].overall) {
                    pairs += 1;
                    not_worse += usize::from(comp <= top);
                }
            }
            if pairs > 0 {
                out[f].p_value = Some(not_worse as f64 / pairs as f64);
            }
        }
        let tested: Vec<usize> = (0..n).filter(|&f| out[f].p_value.is_some()).collect();
        let raw: Vec<f64> = tested.iter().filter_map(|&f| out[f].p_value).collect();
        for (&f, adj) in tested.iter().zip(stats::benjamini_hochberg(&raw)) {
            out[f].p_value_bh = Some(adj);
        }
    }

    out
}
