//! Input validation errors for the profiling and clustering pipeline.
//!
//! Every variant is detected up front, before any aggregation or clustering
//! work runs. The one documented normalization that is *not* an error is the
//! zero-fill of missing (zone, hour) buckets during profile aggregation.

use thiserror::Error;

/// Malformed input to the pipeline: a bad observation record or a k range
/// that cannot be satisfied by the given zones.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidInput {
    /// Observation hour outside the 24 hourly buckets.
    #[error("hour {hour} for zone {zone} is out of range (expected 0..=23)")]
    HourOutOfRange { zone: String, hour: u8 },

    /// Observation with a negative pickup count.
    #[error("negative pickup count {pickups} for zone {zone}")]
    NegativePickups { zone: String, pickups: i64 },

    /// Candidate cluster counts start below 1.
    #[error("k_min must be at least 1 (got {0})")]
    KMinTooSmall(usize),

    /// Lower bound of the k range exceeds the upper bound.
    #[error("empty k range: k_min {k_min} is greater than k_max {k_max}")]
    EmptyKRange { k_min: usize, k_max: usize },

    /// More clusters requested than there are zones to cluster.
    #[error("cannot form {k_max} clusters from {zones} zones")]
    TooManyClusters { k_max: usize, zones: usize },
}
