use crate::error::Rejection;
use crate::model::{NavigationalStatus, PositionReport, Record, TIMESTAMP_FORMAT};
use chrono::NaiveDateTime;

/// Classifies a single raw record. Each record is judged on its own.
#[derive(Debug, Clone)]
pub struct Sanitizer {
    excluded: Vec<NavigationalStatus>,
}

impl Default for Sanitizer {
    fn default() -> Self {
        Sanitizer::new(NavigationalStatus::NOT_UNDERWAY.to_vec())
    }
}

impl Sanitizer {
    pub fn new(excluded: Vec<NavigationalStatus>) -> Self {
        Sanitizer { excluded }
    }

    pub fn sanitize(&self, record: Record) -> Result<PositionReport, Rejection> {
        // exclude moored | anchor | reserved status
        if self.excluded.contains(&record.status) {
            return Err(Rejection::NotUnderway(record.status));
        }

        let mmsi = required(record.mmsi.filter(|m| !m.is_empty()), "mmsi")?;
        let lat = required(record.lat, "latitude")?;
        let lon = required(record.lon, "longitude")?;
        let raw_ts = required(record.timestamp, "timestamp")?;
        let sog = required(record.sog, "sog")?;
        let cog = required(record.cog, "cog")?;

        let timestamp = NaiveDateTime::parse_from_str(&raw_ts, TIMESTAMP_FORMAT)
            .map_err(|_| Rejection::MalformedRecord { field: "timestamp" })?;

        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(Rejection::OutOfRangeCoordinate { lat, lon });
        }

        // NaN fails this too.
        if !(sog > 0.0) {
            return Err(Rejection::NonPositiveSpeed(sog));
        }

        Ok(PositionReport {
            mmsi,
            timestamp,
            lat,
            lon,
            sog,
            cog,
            status: record.status,
        })
    }
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, Rejection> {
    value.ok_or(Rejection::MalformedRecord { field })
}
