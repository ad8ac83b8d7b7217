//! Descriptive statistics over a selection's magnitude column.

use std::collections::BTreeMap;

use crate::catalog::QuakeCatalog;
use crate::config::Config;
use crate::error::QuakeError;
use crate::types::MagnitudeStats;

/// Arithmetic mean. Callers guarantee non-empty input.
pub fn mean(values: &[f64]) -> f64 {
  values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divide by N, no Bessel correction).
/// Callers guarantee non-empty input.
pub fn std_dev(values: &[f64]) -> f64 {
  let mean = mean(values);
  let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
  variance.sqrt()
}

/// Median over a sorted copy; even counts average the two middle values.
/// Callers guarantee non-empty input.
pub fn median(values: &[f64]) -> f64 {
  let mut sorted = values.to_vec();
  sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
  let mid = sorted.len() / 2;
  if sorted.len() % 2 == 0 {
    (sorted[mid - 1] + sorted[mid]) / 2.0
  } else {
    sorted[mid]
  }
}

/// Count the given rows per whole-magnitude bucket (rounded to nearest).
pub fn magnitude_histogram(catalog: &QuakeCatalog, rows: &[usize]) -> BTreeMap<i64, usize> {
  let mut buckets = BTreeMap::new();
  for &row in rows {
    let bucket = catalog.magnitudes()[row].round() as i64;
    *buckets.entry(bucket).or_insert(0) += 1;
  }
  buckets
}

/// Bucket with the highest count. Ascending iteration makes ties resolve
/// to the smallest bucket value.
pub fn mode(buckets: &BTreeMap<i64, usize>) -> Option<i64> {
  let mut best: Option<(i64, usize)> = None;
  for (&bucket, &count) in buckets {
    match best {
      Some((_, best_count)) if count <= best_count => {}
      _ => best = Some((bucket, count)),
    }
  }
  best.map(|(bucket, _)| bucket)
}

/// Full descriptive stats for the given rows.
pub fn magnitude_stats(
  catalog: &QuakeCatalog,
  rows: &[usize],
) -> Result<MagnitudeStats, QuakeError> {
  if rows.is_empty() {
    return Err(QuakeError::EmptyFilter);
  }
  let values = magnitudes(catalog, rows);
  let buckets = magnitude_histogram(catalog, rows);
  let mode = mode(&buckets).ok_or(QuakeError::EmptyFilter)?;

  Ok(MagnitudeStats {
    count: rows.len(),
    mean: mean(&values),
    std_dev: std_dev(&values),
    median: median(&values),
    mode,
  })
}

/// Rows whose magnitude is strictly above `mean + sigma * stddev` of the
/// given selection (not of the whole catalog).
pub fn exceptional_rows(catalog: &QuakeCatalog, rows: &[usize], config: &Config) -> Vec<usize> {
  if rows.is_empty() {
    return Vec::new();
  }
  let values = magnitudes(catalog, rows);
  let threshold = mean(&values) + config.outlier_sigma * std_dev(&values);
  rows
    .iter()
    .copied()
    .filter(|&row| catalog.magnitudes()[row] > threshold)
    .collect()
}

/// Magnitudes for the given rows, in row order.
fn magnitudes(catalog: &QuakeCatalog, rows: &[usize]) -> Vec<f64> {
  rows.iter().map(|&row| catalog.magnitudes()[row]).collect()
}
