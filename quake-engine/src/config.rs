//! Engine configuration with sane defaults.

/// Tunable thresholds for catalog analysis and text rendering.
#[derive(Debug, Clone)]
pub struct Config {
  /// Std-dev multiplier above the selection mean for an exceptional quake.
  pub outlier_sigma: f64,
  /// Character grid width of the text quake map.
  pub map_cols: usize,
  /// Character grid height of the text quake map.
  pub map_rows: usize,
  /// Max bar width of the magnitude chart.
  pub chart_width: usize,
  /// Catalog file used when no path is given on the command line.
  pub default_catalog_path: String,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      outlier_sigma: 1.0,
      map_cols: 72,
      map_rows: 24,
      chart_width: 60,
      default_catalog_path: "./earthquakes.geojson".to_string(),
    }
  }
}
