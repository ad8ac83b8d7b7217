//! Numeric coercion guard and great-circle distance.

use serde_json::Value;

use crate::error::QuakeError;

/// Mean Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Coerce a loosely typed scalar to f64.
///
/// Numbers pass through; strings are trimmed and parsed. Anything else
/// (booleans, nulls, containers) is rejected.
pub fn coerce_f64(raw: &Value) -> Result<f64, QuakeError> {
  match raw {
    Value::Number(n) => n
      .as_f64()
      .ok_or_else(|| QuakeError::not_numeric(n.to_string())),
    Value::String(s) => s
      .trim()
      .parse::<f64>()
      .map_err(|_| QuakeError::not_numeric(s.clone())),
    other => Err(QuakeError::not_numeric(other.to_string())),
  }
}

/// Haversine great-circle distance between two (lat, lon) points, in km.
///
/// Pure and symmetric; the distance between identical points is exactly 0.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
  let dlat = (lat2 - lat1).to_radians();
  let dlon = (lon2 - lon1).to_radians();
  let a = (dlat / 2.0).sin().powi(2)
    + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);
  let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
  EARTH_RADIUS_M * c / 1000.0
}

/// Guarded distance: coerce all four inputs, then compute.
///
/// Fails before any computation if one input is unconvertible.
pub fn distance_km(
  lat1: &Value,
  lon1: &Value,
  lat2: &Value,
  lon2: &Value,
) -> Result<f64, QuakeError> {
  let lat1 = coerce_f64(lat1)?;
  let lon1 = coerce_f64(lon1)?;
  let lat2 = coerce_f64(lat2)?;
  let lon2 = coerce_f64(lon2)?;
  Ok(haversine_km(lat1, lon1, lat2, lon2))
}
