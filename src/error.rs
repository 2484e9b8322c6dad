use crate::model::NavigationalStatus;
use thiserror::Error;

/// Why a record or a segment was dropped. None of these abort a run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Rejection {
    #[error("vessel not underway: {0}")]
    NotUnderway(NavigationalStatus),

    #[error("malformed record: missing or unparsable {field}")]
    MalformedRecord { field: &'static str },

    #[error("coordinate out of range: lat {lat}, lon {lon}")]
    OutOfRangeCoordinate { lat: f64, lon: f64 },

    #[error("non-positive speed over ground: {0}")]
    NonPositiveSpeed(f64),

    #[error("non-positive elapsed time: {0}s")]
    NonPositiveElapsedTime(i64),

    #[error("implausible speed: {speed_kmh:.3} km/h exceeds {limit_kmh} km/h")]
    ImplausibleSpeed { speed_kmh: f64, limit_kmh: f64 },
}
