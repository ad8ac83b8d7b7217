//! Structured error types for the quake engine.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuakeError {
  #[error("not numeric: {0}")]
  NotNumeric(String),

  #[error("malformed record: {field}: {reason}")]
  MalformedRecord { field: String, reason: String },

  #[error("no valid earthquakes in the payload")]
  EmptyCatalog,

  #[error("invalid filter: {0}")]
  InvalidFilter(String),

  #[error("no earthquakes match the active filters")]
  EmptyFilter,

  #[error("json: {0}")]
  Json(#[from] serde_json::Error),
}

impl QuakeError {
  pub fn not_numeric(value: impl Into<String>) -> Self {
    Self::NotNumeric(value.into())
  }

  pub fn malformed(field: &str, reason: &str) -> Self {
    Self::MalformedRecord {
      field: field.to_string(),
      reason: reason.to_string(),
    }
  }

  pub fn invalid_filter(reason: impl Into<String>) -> Self {
    Self::InvalidFilter(reason.into())
  }
}
