//! Plain-text rendering of the current selection: a character-grid quake
//! map and a magnitude bar chart.
//!
//! Pure string builders over numeric columns; no I/O and no access to the
//! catalog itself.

use std::collections::BTreeMap;
use std::fmt::Write;

/// Glyph for the strongest magnitude binned into one map cell.
fn magnitude_glyph(magnitude: f64) -> char {
  if magnitude < 2.0 {
    '.'
  } else if magnitude < 4.0 {
    'o'
  } else if magnitude < 6.0 {
    'O'
  } else {
    '@'
  }
}

/// Render the given points onto a cols x rows grid spanning their bounding
/// box. Higher latitudes are at the top; each cell shows the glyph of the
/// strongest quake that lands in it.
///
/// Returns an empty string when there is nothing to draw.
pub fn quake_map(
  latitudes: &[f64],
  longitudes: &[f64],
  magnitudes: &[f64],
  cols: usize,
  rows: usize,
) -> String {
  if latitudes.is_empty() || cols == 0 || rows == 0 {
    return String::new();
  }

  let mut min_lat = f64::INFINITY;
  let mut max_lat = f64::NEG_INFINITY;
  let mut min_lon = f64::INFINITY;
  let mut max_lon = f64::NEG_INFINITY;
  for i in 0..latitudes.len() {
    min_lat = min_lat.min(latitudes[i]);
    max_lat = max_lat.max(latitudes[i]);
    min_lon = min_lon.min(longitudes[i]);
    max_lon = max_lon.max(longitudes[i]);
  }
  // Degenerate spans (single point, one row of points) still need a
  // nonzero divisor.
  let lat_span = (max_lat - min_lat).max(f64::EPSILON);
  let lon_span = (max_lon - min_lon).max(f64::EPSILON);

  let mut grid = vec![vec![' '; cols]; rows];
  let mut strongest = vec![vec![f64::NEG_INFINITY; cols]; rows];
  for i in 0..latitudes.len() {
    let col = ((longitudes[i] - min_lon) / lon_span * (cols - 1) as f64).round() as usize;
    let row = ((max_lat - latitudes[i]) / lat_span * (rows - 1) as f64).round() as usize;
    if magnitudes[i] > strongest[row][col] {
      strongest[row][col] = magnitudes[i];
      grid[row][col] = magnitude_glyph(magnitudes[i]);
    }
  }

  let mut out = String::new();
  let border: String = "-".repeat(cols);
  let _ = writeln!(out, "+{}+", border);
  for row in grid {
    let line: String = row.into_iter().collect();
    let _ = writeln!(out, "|{}|", line);
  }
  let _ = writeln!(out, "+{}+", border);
  let _ = writeln!(
    out,
    "lat [{:.4}, {:.4}]  lon [{:.4}, {:.4}]  ({} quakes)",
    min_lat,
    max_lat,
    min_lon,
    max_lon,
    latitudes.len()
  );
  out
}

/// One bar per whole-magnitude bucket, widths scaled so the largest count
/// fills `width` characters.
///
/// Returns an empty string when there is nothing to chart.
pub fn magnitude_chart(buckets: &BTreeMap<i64, usize>, width: usize) -> String {
  let largest = buckets.values().copied().max().unwrap_or(0);
  if largest == 0 || width == 0 {
    return String::new();
  }

  let mut out = String::new();
  for (bucket, count) in buckets {
    let bar = (count * width / largest).max(1);
    let _ = writeln!(out, "{:>4} | {} {}", bucket, "#".repeat(bar), count);
  }
  out
}
