use crate::error::Rejection;
use crate::trajectory::Segment;

/// Mean Earth radius in km.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// 24 knots in km/h.
pub const DEFAULT_MAX_SPEED_KMH: f64 = 44.448;

/// Great-circle distance in km between two points given in degrees.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();
    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    // `1 - a` can dip below zero near antipodal points.
    let c = 2.0 * a.sqrt().atan2((1.0 - a).clamp(0.0, 1.0).sqrt());
    EARTH_RADIUS_KM * c
}

/// Accepts or rejects segments by implied speed.
#[derive(Debug, Clone, Copy)]
pub struct MotionValidator {
    max_speed_kmh: f64,
}

impl Default for MotionValidator {
    fn default() -> Self {
        MotionValidator::new(DEFAULT_MAX_SPEED_KMH)
    }
}

impl MotionValidator {
    pub fn new(max_speed_kmh: f64) -> Self {
        MotionValidator { max_speed_kmh }
    }

    /// Returns the segment's distance in km if it is plausible.
    pub fn validate(&self, segment: &Segment<'_>) -> Result<f64, Rejection> {
        let (prev, curr) = (segment.prev, segment.curr);
        let distance_km = haversine_km(prev.lat, prev.lon, curr.lat, curr.lon);
        self.check(distance_km, segment.elapsed_secs())
    }

    /// The ceiling is inclusive: a speed equal to it passes.
    pub fn check(&self, distance_km: f64, elapsed_secs: i64) -> Result<f64, Rejection> {
        if elapsed_secs <= 0 {
            return Err(Rejection::NonPositiveElapsedTime(elapsed_secs));
        }

        let hours = elapsed_secs as f64 / 3600.0;
        let speed_kmh = distance_km / hours;
        if speed_kmh > self.max_speed_kmh {
            return Err(Rejection::ImplausibleSpeed {
                speed_kmh,
                limit_kmh: self.max_speed_kmh,
            });
        }

        Ok(distance_km)
    }
}
