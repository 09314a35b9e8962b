//! Per-k scan producing the elbow curve.
//!
//! Picking the final cluster count from the curve is a judgment call made by
//! whoever reads the elbow chart; [`scan_k`] only measures. [`suggest_k`] is
//! an optional knee heuristic for callers that ask for one — it is never
//! applied implicitly.

use serde::Serialize;
use tracing::debug;

use crate::cluster::kmeans::{self, KmeansParams};
use crate::error::InvalidInput;
use crate::profile::ZoneHourlyProfile;

/// One point on the elbow curve: candidate k and the within-cluster sum of
/// squares of the converged fit at that k.
#[derive(Debug, Clone, Serialize)]
pub struct ClusterTrial {
    pub k: usize,
    pub wss: f64,
}

/// Fits a seeded k-means model at every k in the inclusive range
/// `[k_min, k_max]` and returns the trials ordered by k.
///
/// Each k is fit independently with the same `params`, so the result for a
/// given k does not depend on which other k values were scanned.
///
/// # Errors
///
/// Returns [`InvalidInput`] if `k_min < 1`, if `k_min > k_max`, or if
/// `k_max` exceeds the number of zones (a cluster count larger than the
/// point count cannot be formed).
pub fn scan_k(
    profiles: &[ZoneHourlyProfile],
    k_min: usize,
    k_max: usize,
    params: &KmeansParams,
) -> Result<Vec<ClusterTrial>, InvalidInput> {
    validate_k_range(profiles.len(), k_min, k_max)?;

    let points: Vec<Vec<f64>> = profiles.iter().map(|p| p.hours.clone()).collect();

    let trials = (k_min..=k_max)
        .map(|k| {
            let fit = kmeans::fit(&points, k, params);
            debug!(k, wss = fit.wss, "Elbow trial complete");
            ClusterTrial { k, wss: fit.wss }
        })
        .collect();

    Ok(trials)
}

/// Optional knee heuristic: the k with the largest positive second
/// difference of the WSS curve (the sharpest flattening).
///
/// Returns `None` when the curve has fewer than three trials, where no
/// interior point exists to compare. This is a convenience policy for
/// non-interactive callers; the curve itself remains the primary output.
pub fn suggest_k(trials: &[ClusterTrial]) -> Option<usize> {
    if trials.len() < 3 {
        return None;
    }

    let mut best_k = None;
    let mut best_drop = f64::NEG_INFINITY;
    for window in trials.windows(3) {
        let drop = window[0].wss - 2.0 * window[1].wss + window[2].wss;
        if drop > best_drop {
            best_drop = drop;
            best_k = Some(window[1].k);
        }
    }
    best_k
}

pub(crate) fn validate_k_range(
    zones: usize,
    k_min: usize,
    k_max: usize,
) -> Result<(), InvalidInput> {
    if k_min < 1 {
        return Err(InvalidInput::KMinTooSmall(k_min));
    }
    if k_min > k_max {
        return Err(InvalidInput::EmptyKRange { k_min, k_max });
    }
    if k_max > zones {
        return Err(InvalidInput::TooManyClusters { k_max, zones });
    }
    Ok(())
}
