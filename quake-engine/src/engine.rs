//! Session facade: one immutable catalog, mutable filter slots, config.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::catalog::QuakeCatalog;
use crate::config::Config;
use crate::error::QuakeError;
use crate::filter::FilterSet;
use crate::stats;
use crate::types::{MagnitudeStats, Quake};

/// Drives one analysis session over a loaded catalog.
///
/// The catalog is immutable for the lifetime of the engine; the filter
/// slots are the only mutable state, and every read recomputes the
/// selection from them.
pub struct Engine {
  config: Config,
  catalog: QuakeCatalog,
  filters: FilterSet,
}

impl Engine {
  pub fn new(catalog: QuakeCatalog, config: Config) -> Self {
    Self {
      config,
      catalog,
      filters: FilterSet::new(),
    }
  }

  pub fn with_defaults(catalog: QuakeCatalog) -> Self {
    Self::new(catalog, Config::default())
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  pub fn catalog(&self) -> &QuakeCatalog {
    &self.catalog
  }

  pub fn set_location_filter(
    &mut self,
    latitude: &Value,
    longitude: &Value,
    max_distance_km: &Value,
  ) -> Result<(), QuakeError> {
    self.filters.set_location(latitude, longitude, max_distance_km)
  }

  pub fn set_property_filter(
    &mut self,
    min_magnitude: Option<&Value>,
    min_felt: Option<&Value>,
    min_significance: Option<&Value>,
  ) -> Result<(), QuakeError> {
    self
      .filters
      .set_property(min_magnitude, min_felt, min_significance)
  }

  pub fn clear_filters(&mut self) {
    self.filters.clear();
  }

  /// Row indices of the current selection, recomputed on every call.
  pub fn filtered_indices(&self) -> Vec<usize> {
    self.filters.evaluate(&self.catalog)
  }

  /// Entity references for the current selection, in row order.
  pub fn filtered_quakes(&self) -> Vec<&Quake> {
    self
      .filtered_indices()
      .into_iter()
      .map(|row| self.catalog.quake(row))
      .collect()
  }

  /// (latitude, longitude, magnitude) columns of the current selection,
  /// the only inputs a renderer needs.
  pub fn filtered_columns(&self) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let rows = self.filtered_indices();
    (
      rows.iter().map(|&row| self.catalog.latitudes()[row]).collect(),
      rows.iter().map(|&row| self.catalog.longitudes()[row]).collect(),
      rows.iter().map(|&row| self.catalog.magnitudes()[row]).collect(),
    )
  }

  pub fn magnitude_stats(&self) -> Result<MagnitudeStats, QuakeError> {
    stats::magnitude_stats(&self.catalog, &self.filtered_indices())
  }

  pub fn magnitude_histogram(&self) -> BTreeMap<i64, usize> {
    stats::magnitude_histogram(&self.catalog, &self.filtered_indices())
  }

  /// Quakes in the current selection whose magnitude is more than
  /// `outlier_sigma` standard deviations above the selection mean.
  pub fn exceptional_quakes(&self) -> Vec<&Quake> {
    let rows = self.filtered_indices();
    stats::exceptional_rows(&self.catalog, &rows, &self.config)
      .into_iter()
      .map(|row| self.catalog.quake(row))
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::FeatureCollection;
  use serde_json::json;

  fn feature(mag: f64, felt: i64, sig: i64, lat: f64, lon: f64) -> Value {
    json!({
      "type": "Feature",
      "properties": {
        "mag": mag,
        "time": 1715221312431i64,
        "felt": felt,
        "sig": sig,
        "magType": "ml",
        "type": "earthquake"
      },
      "geometry": {
        "type": "Point",
        "coordinates": [lat, lon, 0.1]
      }
    })
  }

  fn engine() -> Engine {
    let catalog = QuakeCatalog::from_collection(&FeatureCollection {
      features: vec![
        feature(2.9, 20, 129, 61.2, -149.9),
        feature(2.9, 20, 129, 61.3, -150.1),
        feature(5.0, 30, 300, 35.7, -117.5),
      ],
    })
    .unwrap();
    Engine::with_defaults(catalog)
  }

  #[test]
  fn unfiltered_selection_is_the_full_catalog() {
    let engine = engine();
    assert_eq!(engine.filtered_indices(), vec![0, 1, 2]);
    assert_eq!(engine.filtered_quakes().len(), engine.catalog().len());
  }

  #[test]
  fn clear_restores_the_full_selection() {
    let mut engine = engine();
    engine
      .set_location_filter(&json!(61.2), &json!(-149.9), &json!(300))
      .unwrap();
    engine
      .set_property_filter(Some(&json!(2.0)), None, None)
      .unwrap();
    assert!(engine.filtered_indices().len() < engine.catalog().len());

    engine.clear_filters();
    assert_eq!(engine.filtered_indices().len(), engine.catalog().len());
  }

  #[test]
  fn filtered_columns_follow_the_selection() {
    let mut engine = engine();
    engine
      .set_property_filter(Some(&json!(4.0)), None, None)
      .unwrap();
    let (lats, lons, mags) = engine.filtered_columns();
    assert_eq!(lats, vec![35.7]);
    assert_eq!(lons, vec![-117.5]);
    assert_eq!(mags, vec![5.0]);
  }

  #[test]
  fn stats_track_the_active_filters() {
    let mut engine = engine();
    engine
      .set_property_filter(Some(&json!(4.0)), None, None)
      .unwrap();
    let stats = engine.magnitude_stats().unwrap();
    assert_eq!(stats.count, 1);
    assert_eq!(stats.mean, 5.0);
    assert_eq!(stats.std_dev, 0.0);
    assert_eq!(stats.mode, 5);
  }

  #[test]
  fn stats_over_an_empty_selection_fail() {
    let mut engine = engine();
    engine
      .set_property_filter(Some(&json!(99999)), Some(&json!(99999)), Some(&json!(999999)))
      .unwrap();
    assert!(matches!(
      engine.magnitude_stats(),
      Err(QuakeError::EmptyFilter)
    ));
  }

  #[test]
  fn exceptional_quakes_come_from_the_selection() {
    let engine = engine();
    let exceptional = engine.exceptional_quakes();
    assert_eq!(exceptional.len(), 1);
    assert_eq!(exceptional[0].magnitude, 5.0);
  }

  #[test]
  fn histogram_matches_selection_counts() {
    let engine = engine();
    let buckets = engine.magnitude_histogram();
    assert_eq!(buckets.get(&3), Some(&2));
    assert_eq!(buckets.get(&5), Some(&1));
  }
}
