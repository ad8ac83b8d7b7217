//! Validate raw feed records and build Quake entities.

use serde_json::Value;

use crate::error::QuakeError;
use crate::geo::coerce_f64;
use crate::types::Quake;

/// Properties every usable record must carry.
const REQUIRED_PROPS: [&str; 6] = ["mag", "time", "felt", "sig", "type", "magType"];

/// Validate one raw feature and convert it into a Quake.
///
/// Every failure names the offending field; callers building a catalog
/// drop the record and move on (best-effort ingestion).
pub fn validate_feature(raw: &Value) -> Result<Quake, QuakeError> {
  let feature = raw
    .as_object()
    .ok_or_else(|| QuakeError::malformed("feature", "not an object"))?;

  if feature.get("type").and_then(Value::as_str) != Some("Feature") {
    return Err(QuakeError::malformed("type", "expected \"Feature\""));
  }

  let geometry = feature
    .get("geometry")
    .and_then(Value::as_object)
    .ok_or_else(|| QuakeError::malformed("geometry", "missing or not an object"))?;

  if geometry.get("type").and_then(Value::as_str) != Some("Point") {
    return Err(QuakeError::malformed("geometry.type", "expected \"Point\""));
  }

  let coordinates = geometry
    .get("coordinates")
    .and_then(Value::as_array)
    .ok_or_else(|| QuakeError::malformed("geometry.coordinates", "missing or not an array"))?;

  if coordinates.len() != 3 || !coordinates.iter().all(Value::is_number) {
    return Err(QuakeError::malformed(
      "geometry.coordinates",
      "expected exactly 3 numeric elements",
    ));
  }

  let properties = feature
    .get("properties")
    .and_then(Value::as_object)
    .ok_or_else(|| QuakeError::malformed("properties", "missing or not an object"))?;

  for key in REQUIRED_PROPS {
    if !properties.contains_key(key) {
      return Err(QuakeError::malformed(key, "missing property"));
    }
  }

  if !properties["felt"].is_number() {
    return Err(QuakeError::malformed("felt", "not numeric"));
  }

  // Structural checks passed; field conversion can still fail and drops
  // just this record.
  let magnitude = coerce_f64(&properties["mag"])
    .map_err(|_| QuakeError::malformed("mag", "not coercible to a number"))?;
  let time = coerce_f64(&properties["time"])
    .map_err(|_| QuakeError::malformed("time", "not coercible to a number"))? as i64;
  let felt = coerce_f64(&properties["felt"])
    .map_err(|_| QuakeError::malformed("felt", "not coercible to a number"))? as i64;
  let significance = coerce_f64(&properties["sig"])
    .map_err(|_| QuakeError::malformed("sig", "not coercible to a number"))? as i64;
  let kind = properties["type"]
    .as_str()
    .ok_or_else(|| QuakeError::malformed("properties.type", "not a string"))?
    .to_string();

  // GeoJSON convention is [lon, lat, depth], but the feed this engine
  // consumes puts latitude first, and every radius filter downstream is
  // defined against that order. Keep the observed mapping.
  let latitude = coerce_f64(&coordinates[0])
    .map_err(|_| QuakeError::malformed("geometry.coordinates", "not coercible to a number"))?;
  let longitude = coerce_f64(&coordinates[1])
    .map_err(|_| QuakeError::malformed("geometry.coordinates", "not coercible to a number"))?;

  Ok(Quake {
    magnitude,
    time,
    felt,
    significance,
    kind,
    latitude,
    longitude,
  })
}
