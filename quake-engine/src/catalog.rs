//! Columnar in-memory quake catalog, built once per ingestion.

use log::{debug, info};

use crate::error::QuakeError;
use crate::types::{FeatureCollection, Quake};
use crate::validate;

/// Fixed parallel columns over the valid events of one feed payload.
///
/// All columns have identical length; index i across every column describes
/// the same event, in encounter order. The catalog is never resized or
/// mutated after construction.
#[derive(Debug, Clone)]
pub struct QuakeCatalog {
  magnitudes: Vec<f64>,
  felts: Vec<i64>,
  significances: Vec<i64>,
  latitudes: Vec<f64>,
  longitudes: Vec<f64>,
  quakes: Vec<Quake>,
}

impl QuakeCatalog {
  /// Build a catalog from a decoded payload, dropping malformed records.
  ///
  /// Fails only when zero records survive validation and conversion.
  pub fn from_collection(collection: &FeatureCollection) -> Result<Self, QuakeError> {
    let capacity = collection.features.len();
    let mut catalog = Self {
      magnitudes: Vec::with_capacity(capacity),
      felts: Vec::with_capacity(capacity),
      significances: Vec::with_capacity(capacity),
      latitudes: Vec::with_capacity(capacity),
      longitudes: Vec::with_capacity(capacity),
      quakes: Vec::with_capacity(capacity),
    };

    for (index, raw) in collection.features.iter().enumerate() {
      match validate::validate_feature(raw) {
        Ok(quake) => catalog.push(quake),
        Err(reason) => debug!("dropping record {}: {}", index, reason),
      }
    }

    if catalog.quakes.is_empty() {
      return Err(QuakeError::EmptyCatalog);
    }
    info!(
      "catalog built: {} valid of {} records",
      catalog.len(),
      collection.features.len()
    );
    Ok(catalog)
  }

  /// Decode a raw GeoJSON payload and build a catalog from it.
  pub fn from_json(text: &str) -> Result<Self, QuakeError> {
    let collection: FeatureCollection = serde_json::from_str(text)?;
    Self::from_collection(&collection)
  }

  fn push(&mut self, quake: Quake) {
    self.magnitudes.push(quake.magnitude);
    self.felts.push(quake.felt);
    self.significances.push(quake.significance);
    self.latitudes.push(quake.latitude);
    self.longitudes.push(quake.longitude);
    self.quakes.push(quake);
  }

  pub fn len(&self) -> usize {
    self.quakes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.quakes.is_empty()
  }

  pub fn magnitudes(&self) -> &[f64] {
    &self.magnitudes
  }

  pub fn felts(&self) -> &[i64] {
    &self.felts
  }

  pub fn significances(&self) -> &[i64] {
    &self.significances
  }

  pub fn latitudes(&self) -> &[f64] {
    &self.latitudes
  }

  pub fn longitudes(&self) -> &[f64] {
    &self.longitudes
  }

  pub fn quakes(&self) -> &[Quake] {
    &self.quakes
  }

  pub fn quake(&self, index: usize) -> &Quake {
    &self.quakes[index]
  }
}
