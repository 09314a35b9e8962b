//! Aggregation of raw pickup observations into per-zone hourly demand
//! profiles, the feature vectors consumed by the clustering stages.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::InvalidInput;
use crate::observation::Observation;

/// Number of hourly buckets in a profile. Profiles always have exactly this
/// many entries; hours with no observations are filled with 0.0.
pub const HOURS_PER_DAY: usize = 24;

/// Mean pickups per hour of day for one zone.
#[derive(Debug, Clone, Serialize)]
pub struct ZoneHourlyProfile {
    pub zone: String,
    pub hours: Vec<f64>,
}

/// Reduces observations to one [`ZoneHourlyProfile`] per distinct zone.
///
/// For each (zone, hour) pair the profile value is the arithmetic mean of
/// pickup counts across all observations matching that pair, taken directly
/// over the raw rows (no intermediate per-date sum). Hours with no
/// observations for a zone fill with 0.0 rather than being omitted, so every
/// profile is a full 24-dimensional vector.
///
/// Output is sorted by zone id, which keeps downstream clustering runs
/// reproducible for the same input set.
///
/// # Errors
///
/// Returns [`InvalidInput`] if any observation has an hour outside 0..=23 or
/// a negative pickup count. All records are validated before any aggregation
/// happens.
pub fn build_profiles(observations: &[Observation]) -> Result<Vec<ZoneHourlyProfile>, InvalidInput> {
    for obs in observations {
        obs.validate()?;
    }

    // (sum, count) per hourly bucket; BTreeMap for sorted zone order.
    let mut buckets: BTreeMap<&str, [(f64, u64); HOURS_PER_DAY]> = BTreeMap::new();

    for obs in observations {
        let zone_buckets = buckets
            .entry(obs.zone.as_str())
            .or_insert([(0.0, 0); HOURS_PER_DAY]);
        let (sum, count) = &mut zone_buckets[obs.hour as usize];
        *sum += obs.pickups as f64;
        *count += 1;
    }

    let profiles = buckets
        .into_iter()
        .map(|(zone, zone_buckets)| ZoneHourlyProfile {
            zone: zone.to_string(),
            hours: zone_buckets
                .iter()
                .map(|&(sum, count)| if count == 0 { 0.0 } else { sum / count as f64 })
                .collect(),
        })
        .collect();

    Ok(profiles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn obs(zone: &str, day: u32, hour: u8, pickups: i64) -> Observation {
        Observation {
            zone: zone.to_string(),
            date: NaiveDate::from_ymd_opt(2015, 1, day).unwrap(),
            hour,
            pickups,
        }
    }

    #[test]
    fn test_profiles_have_24_nonnegative_entries() {
        let observations = vec![obs("a", 1, 8, 120), obs("b", 1, 17, 300)];
        let profiles = build_profiles(&observations).unwrap();

        assert_eq!(profiles.len(), 2);
        for profile in &profiles {
            assert_eq!(profile.hours.len(), HOURS_PER_DAY);
            assert!(profile.hours.iter().all(|&h| h >= 0.0));
        }
    }

    #[test]
    fn test_missing_hours_fill_with_zero() {
        let profiles = build_profiles(&[obs("a", 1, 8, 120)]).unwrap();

        assert_eq!(profiles[0].hours[8], 120.0);
        let zero_hours = profiles[0].hours.iter().filter(|&&h| h == 0.0).count();
        assert_eq!(zero_hours, HOURS_PER_DAY - 1);
    }

    #[test]
    fn test_mean_is_taken_directly_across_observations() {
        // Two dates, same zone and hour: mean over the raw rows.
        let observations = vec![obs("a", 1, 8, 100), obs("a", 2, 8, 200)];
        let profiles = build_profiles(&observations).unwrap();

        assert_eq!(profiles[0].hours[8], 150.0);
    }

    #[test]
    fn test_output_sorted_by_zone() {
        let observations = vec![obs("queens", 1, 0, 1), obs("bronx", 1, 0, 1)];
        let profiles = build_profiles(&observations).unwrap();

        assert_eq!(profiles[0].zone, "bronx");
        assert_eq!(profiles[1].zone, "queens");
    }

    #[test]
    fn test_invalid_hour_fails_before_aggregation() {
        let observations = vec![obs("a", 1, 8, 120), obs("a", 1, 24, 5)];
        assert!(build_profiles(&observations).is_err());
    }

    #[test]
    fn test_empty_input_yields_no_profiles() {
        let profiles = build_profiles(&[]).unwrap();
        assert!(profiles.is_empty());
    }
}
