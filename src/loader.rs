//! CSV ingest of raw pickup observations.

use anyhow::Result;
use std::fs::File;
use tracing::debug;

use crate::observation::Observation;

/// Reads observations from a headered CSV file with columns
/// `zone,date,hour,pickups` (dates in `YYYY-MM-DD`).
///
/// Parsing alone does not validate the domain contract; the aggregator
/// checks hour ranges and pickup signs before computing anything.
pub fn load_observations(path: &str) -> Result<Vec<Observation>> {
    let file = File::open(path)?;
    let mut rdr = csv::Reader::from_reader(file);

    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let record: Observation = result?;
        rows.push(record);
    }

    debug!(path, rows = rows.len(), "Observations loaded");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    #[test]
    fn test_load_observations_parses_rows() {
        let path = temp_path("taxi_demand_profiler_test_load.csv");
        fs::write(
            &path,
            "zone,date,hour,pickups\n\
             midtown,2015-01-15,8,1200\n\
             midtown,2015-01-15,9,900\n\
             harlem,2015-01-15,8,240\n",
        )
        .unwrap();

        let rows = load_observations(&path).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].zone, "midtown");
        assert_eq!(rows[0].hour, 8);
        assert_eq!(rows[0].pickups, 1200);
        assert_eq!(rows[2].zone, "harlem");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_observations_missing_file_errors() {
        let result = load_observations("/nonexistent/pickups.csv");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_observations_bad_date_errors() {
        let path = temp_path("taxi_demand_profiler_test_bad_date.csv");
        fs::write(&path, "zone,date,hour,pickups\nmidtown,not-a-date,8,12\n").unwrap();

        let result = load_observations(&path);
        assert!(result.is_err());

        fs::remove_file(&path).unwrap();
    }
}
