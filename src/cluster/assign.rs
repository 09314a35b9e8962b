//! Final clustering pass: fit at the chosen k and label every zone.

use serde::Serialize;

use crate::cluster::kmeans::{self, KmeansParams};
use crate::cluster::selector::validate_k_range;
use crate::error::InvalidInput;
use crate::profile::ZoneHourlyProfile;

/// One zone's cluster membership. Labels run 1..=k.
#[derive(Debug, Clone, Serialize)]
pub struct ZoneCluster {
    pub zone: String,
    pub cluster: usize,
}

/// The final partition of zones into k clusters. Immutable once created.
///
/// Label numbering is arbitrary: re-running with a different k or a
/// different input order may permute labels. Callers must rely on membership
/// (which zones share a label), never on label identity.
#[derive(Debug, Clone, Serialize)]
pub struct ZoneClusterAssignment {
    pub k: usize,
    pub zones: Vec<ZoneCluster>,
}

impl ZoneClusterAssignment {
    /// Looks up the cluster label for a zone, if the zone was clustered.
    pub fn cluster_of(&self, zone: &str) -> Option<usize> {
        self.zones
            .iter()
            .find(|zc| zc.zone == zone)
            .map(|zc| zc.cluster)
    }
}

/// Refits the seeded k-means model at the chosen `k` and attaches a cluster
/// label to every zone in the input.
///
/// Uses the same algorithm and determinism contract as the selector scan:
/// identical profiles, k, and params reproduce the identical partition.
///
/// # Errors
///
/// Returns [`InvalidInput`] if `k < 1` or `k` exceeds the number of zones.
pub fn assign_clusters(
    profiles: &[ZoneHourlyProfile],
    k: usize,
    params: &KmeansParams,
) -> Result<ZoneClusterAssignment, InvalidInput> {
    validate_k_range(profiles.len(), k, k)?;

    let points: Vec<Vec<f64>> = profiles.iter().map(|p| p.hours.clone()).collect();
    let fit = kmeans::fit(&points, k, params);

    let zones = profiles
        .iter()
        .zip(&fit.labels)
        .map(|(profile, &label)| ZoneCluster {
            zone: profile.zone.clone(),
            cluster: label + 1,
        })
        .collect();

    Ok(ZoneClusterAssignment { k, zones })
}
