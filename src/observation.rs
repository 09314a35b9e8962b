use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::InvalidInput;

/// A single raw pickup record: one (zone, date, hour) cell of the source
/// table. Immutable once loaded.
///
/// `pickups` is deserialized as a signed integer so a negative value in the
/// source data surfaces as [`InvalidInput::NegativePickups`] instead of a
/// CSV parse error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    pub zone: String,
    pub date: NaiveDate,
    pub hour: u8,
    pub pickups: i64,
}

impl Observation {
    /// Checks the record against the input contract: hour in 0..=23 and a
    /// non-negative pickup count.
    pub fn validate(&self) -> Result<(), InvalidInput> {
        if self.hour > 23 {
            return Err(InvalidInput::HourOutOfRange {
                zone: self.zone.clone(),
                hour: self.hour,
            });
        }
        if self.pickups < 0 {
            return Err(InvalidInput::NegativePickups {
                zone: self.zone.clone(),
                pickups: self.pickups,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(zone: &str, hour: u8, pickups: i64) -> Observation {
        Observation {
            zone: zone.to_string(),
            date: NaiveDate::from_ymd_opt(2015, 1, 15).unwrap(),
            hour,
            pickups,
        }
    }

    #[test]
    fn test_valid_observation() {
        assert!(obs("midtown", 0, 0).validate().is_ok());
        assert!(obs("midtown", 23, 1500).validate().is_ok());
    }

    #[test]
    fn test_hour_24_is_rejected() {
        let err = obs("midtown", 24, 10).validate().unwrap_err();
        assert_eq!(
            err,
            InvalidInput::HourOutOfRange {
                zone: "midtown".to_string(),
                hour: 24,
            }
        );
    }

    #[test]
    fn test_negative_pickups_rejected() {
        let err = obs("harlem", 5, -3).validate().unwrap_err();
        assert_eq!(
            err,
            InvalidInput::NegativePickups {
                zone: "harlem".to_string(),
                pickups: -3,
            }
        );
    }
}
