//! Output formatting and persistence for pipeline results.
//!
//! Emits profiles, elbow trials, and cluster assignments as headered CSV for
//! the external charting/reporting layer, plus JSON logging helpers.

use anyhow::{Result, bail};
use serde::Serialize;
use tracing::{debug, info};

use crate::cluster::assign::ZoneClusterAssignment;
use crate::cluster::selector::ClusterTrial;
use crate::observation::Observation;
use crate::profile::{HOURS_PER_DAY, ZoneHourlyProfile};

/// Logs any serializable result as pretty-printed JSON.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Writes per-zone hourly profiles as CSV with columns `zone,h00..h23`.
///
/// The hour columns are written explicitly because the profile vector is a
/// sequence, which the csv serde integration cannot turn into headers.
pub fn write_profiles(path: &str, profiles: &[ZoneHourlyProfile]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    let mut header = vec!["zone".to_string()];
    header.extend((0..HOURS_PER_DAY).map(|h| format!("h{h:02}")));
    writer.write_record(&header)?;

    for profile in profiles {
        let mut record = vec![profile.zone.clone()];
        record.extend(profile.hours.iter().map(|h| h.to_string()));
        writer.write_record(&record)?;
    }
    writer.flush()?;

    debug!(path, zones = profiles.len(), "Profiles written");
    Ok(())
}

/// Writes the elbow curve as CSV with columns `k,wss`, ordered by k.
pub fn write_trials(path: &str, trials: &[ClusterTrial]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for trial in trials {
        writer.serialize(trial)?;
    }
    writer.flush()?;

    debug!(path, trials = trials.len(), "Elbow trials written");
    Ok(())
}

/// Writes the final partition as CSV with columns `zone,cluster`.
pub fn write_assignments(path: &str, assignment: &ZoneClusterAssignment) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for zc in &assignment.zones {
        writer.serialize(zc)?;
    }
    writer.flush()?;

    debug!(path, zones = assignment.zones.len(), "Assignments written");
    Ok(())
}

/// An observation row joined with its zone's cluster label, for downstream
/// scatter plots over the original table.
#[derive(Debug, Serialize)]
struct LabeledObservation<'a> {
    zone: &'a str,
    date: chrono::NaiveDate,
    hour: u8,
    pickups: i64,
    cluster: usize,
}

/// Joins cluster labels back onto the raw observation table and writes the
/// result as CSV with columns `zone,date,hour,pickups,cluster`.
pub fn write_labeled_observations(
    path: &str,
    observations: &[Observation],
    assignment: &ZoneClusterAssignment,
) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    for obs in observations {
        let Some(cluster) = assignment.cluster_of(&obs.zone) else {
            bail!("zone {} has no cluster assignment", obs.zone);
        };
        writer.serialize(LabeledObservation {
            zone: &obs.zone,
            date: obs.date,
            hour: obs.hour,
            pickups: obs.pickups,
            cluster,
        })?;
    }
    writer.flush()?;

    debug!(path, rows = observations.len(), "Labeled observations written");
    Ok(())
}
