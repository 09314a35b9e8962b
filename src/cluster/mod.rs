//! Demand profile clustering.
//!
//! This module scans candidate cluster counts over the per-zone hourly
//! profiles, exposes the resulting within-cluster sum-of-squares curve for
//! elbow inspection, and fits the final partition once a cluster count has
//! been chosen. All fits are seeded explicitly so identical inputs reproduce
//! identical results.

pub mod assign;
pub mod kmeans;
pub mod selector;
