//! Core types for the quake engine (JSON contract + internal models).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

// ---------------------------------------------------------------------------
// Inbound types (JSON contract: what the feed supplies)
// ---------------------------------------------------------------------------

/// Top-level GeoJSON-style payload. Individual features stay loosely typed
/// so one malformed record cannot abort decoding of the whole payload;
/// per-record validation happens during catalog construction.
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureCollection {
  #[serde(default)]
  pub features: Vec<Value>,
}

// ---------------------------------------------------------------------------
// Quake entity (immutable, built only from a validated record)
// ---------------------------------------------------------------------------

/// One validated seismic event.
#[derive(Debug, Clone, PartialEq)]
pub struct Quake {
  pub magnitude: f64,
  /// Event time, epoch milliseconds.
  pub time: i64,
  /// Count of "did you feel it" reports.
  pub felt: i64,
  /// Unitless notability score (larger = more notable).
  pub significance: i64,
  /// Event kind from the feed, e.g. "earthquake" or "quarry blast".
  pub kind: String,
  pub latitude: f64,
  pub longitude: f64,
}

impl Quake {
  /// Great-circle distance from this quake's epicenter, in kilometers.
  pub fn distance_from(&self, latitude: f64, longitude: f64) -> f64 {
    crate::geo::haversine_km(self.latitude, self.longitude, latitude, longitude)
  }

  /// Event time as UTC, when the epoch value is representable.
  pub fn time_utc(&self) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(self.time)
  }
}

impl fmt::Display for Quake {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} Magnitude Earthquake, {} Significance, felt by {} people in ({}, {})",
      self.magnitude, self.significance, self.felt, self.latitude, self.longitude
    )
  }
}

// ---------------------------------------------------------------------------
// Aggregation output
// ---------------------------------------------------------------------------

/// Descriptive statistics over the current selection's magnitude column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MagnitudeStats {
  pub count: usize,
  pub mean: f64,
  /// Population standard deviation (divide by N, no Bessel correction).
  pub std_dev: f64,
  pub median: f64,
  /// Most common whole-magnitude bucket; ties resolve to the smallest bucket.
  pub mode: i64,
}
