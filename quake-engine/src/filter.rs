//! Filter slots over an immutable catalog: great-circle radius and
//! property thresholds.

use serde_json::Value;

use crate::catalog::QuakeCatalog;
use crate::error::QuakeError;
use crate::geo::{coerce_f64, haversine_km};

// ---------------------------------------------------------------------------
// Filter values
// ---------------------------------------------------------------------------

/// Keep only quakes within `max_distance_km` of a center point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationFilter {
  pub latitude: f64,
  pub longitude: f64,
  pub max_distance_km: f64,
}

/// Keep only quakes at or above each threshold. Unsupplied thresholds are
/// stored as 0, which restricts nothing in practice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyFilter {
  pub min_magnitude: f64,
  pub min_felt: f64,
  pub min_significance: f64,
}

// ---------------------------------------------------------------------------
// Filter slots
// ---------------------------------------------------------------------------

/// At most one active filter per slot. A set replaces the whole slot, a
/// clear resets both, and a failed set leaves the previous value untouched.
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
  location: Option<LocationFilter>,
  property: Option<PropertyFilter>,
}

impl FilterSet {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn location(&self) -> Option<&LocationFilter> {
    self.location.as_ref()
  }

  pub fn property(&self) -> Option<&PropertyFilter> {
    self.property.as_ref()
  }

  /// Replace the location filter. All three fields are required and must
  /// be numeric (or numeric strings).
  pub fn set_location(
    &mut self,
    latitude: &Value,
    longitude: &Value,
    max_distance_km: &Value,
  ) -> Result<(), QuakeError> {
    let latitude = coerce_f64(latitude)
      .map_err(|_| QuakeError::invalid_filter("latitude must be numeric"))?;
    let longitude = coerce_f64(longitude)
      .map_err(|_| QuakeError::invalid_filter("longitude must be numeric"))?;
    let max_distance_km = coerce_f64(max_distance_km)
      .map_err(|_| QuakeError::invalid_filter("max distance must be numeric"))?;

    self.location = Some(LocationFilter {
      latitude,
      longitude,
      max_distance_km,
    });
    Ok(())
  }

  /// Replace the property filter. Each threshold is optional, and a
  /// supplied but unparseable value counts as unsupplied. At least one
  /// usable threshold is required.
  pub fn set_property(
    &mut self,
    min_magnitude: Option<&Value>,
    min_felt: Option<&Value>,
    min_significance: Option<&Value>,
  ) -> Result<(), QuakeError> {
    let min_magnitude = min_magnitude.and_then(|v| coerce_f64(v).ok());
    let min_felt = min_felt.and_then(|v| coerce_f64(v).ok());
    let min_significance = min_significance.and_then(|v| coerce_f64(v).ok());

    if min_magnitude.is_none() && min_felt.is_none() && min_significance.is_none() {
      return Err(QuakeError::invalid_filter(
        "at least one of magnitude, felt, significance is required",
      ));
    }

    self.property = Some(PropertyFilter {
      min_magnitude: min_magnitude.unwrap_or(0.0),
      min_felt: min_felt.unwrap_or(0.0),
      min_significance: min_significance.unwrap_or(0.0),
    });
    Ok(())
  }

  /// Unset both slots. Always succeeds.
  pub fn clear(&mut self) {
    self.location = None;
    self.property = None;
  }

  /// Row indices satisfying every active filter, recomputed against the
  /// full catalog on each call. With no active filters this is the full
  /// row range.
  pub fn evaluate(&self, catalog: &QuakeCatalog) -> Vec<usize> {
    (0..catalog.len())
      .filter(|&i| self.row_passes(catalog, i))
      .collect()
  }

  fn row_passes(&self, catalog: &QuakeCatalog, index: usize) -> bool {
    if let Some(location) = &self.location {
      let distance = haversine_km(
        catalog.latitudes()[index],
        catalog.longitudes()[index],
        location.latitude,
        location.longitude,
      );
      if distance > location.max_distance_km {
        return false;
      }
    }
    if let Some(property) = &self.property {
      if catalog.magnitudes()[index] < property.min_magnitude
        || (catalog.felts()[index] as f64) < property.min_felt
        || (catalog.significances()[index] as f64) < property.min_significance
      {
        return false;
      }
    }
    true
  }
}
