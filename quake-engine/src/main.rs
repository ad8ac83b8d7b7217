//! Binary entrypoint: load a GeoJSON catalog, then drive an interactive
//! analysis session from numbered menu options on stdin.
//!
//! All prompting, parsing of user text, output formatting, and retry
//! behavior lives here; the engine only ever sees already-read values.

use std::fs;
use std::io::{self, BufRead, Write};
use std::process;

use serde_json::Value;

use quake_engine::{render, Config, Engine, QuakeCatalog};

const MENU: &str = "\
   1. Set Location Filter
   2. Set Property Filter
   3. Clear Filters
   4. Display Quakes
   5. Display Exceptional Quakes
   6. Display Magnitude Stats
   7. Plot Quake Map
   8. Plot Magnitude Chart
   9. Quit
Please select an option (1-9)";

type In = io::Lines<io::StdinLock<'static>>;
type Out = io::BufWriter<io::StdoutLock<'static>>;

fn main() {
  env_logger::init();

  let config = Config::default();
  let path = std::env::args()
    .nth(1)
    .unwrap_or_else(|| config.default_catalog_path.clone());

  let engine = match load_engine(&path, config) {
    Ok(engine) => engine,
    Err(reason) => {
      eprintln!("quake-engine: {}: {}", path, reason);
      process::exit(1);
    }
  };
  println!(
    "Loaded {} valid earthquakes from {}",
    engine.catalog().len(),
    path
  );

  let mut lines = io::stdin().lock().lines();
  let mut out = io::BufWriter::new(io::stdout().lock());
  run(engine, &mut lines, &mut out);
  let _ = out.flush();
}

/// Read, decode, and ingest a catalog file. Any failure here means there
/// is nothing to analyze.
fn load_engine(path: &str, config: Config) -> Result<Engine, String> {
  let text = fs::read_to_string(path).map_err(|e| format!("cannot read: {}", e))?;
  let catalog = QuakeCatalog::from_json(&text).map_err(|e| e.to_string())?;
  Ok(Engine::new(catalog, config))
}

fn run(mut engine: Engine, lines: &mut In, out: &mut Out) {
  loop {
    let _ = writeln!(out, "\n{}", MENU);
    let _ = out.flush();
    let Some(choice) = read_line(lines) else { break };

    match choice.as_str() {
      "1" => set_location_filter(&mut engine, lines, out),
      "2" => set_property_filter(&mut engine, lines, out),
      "3" => {
        engine.clear_filters();
        let _ = writeln!(out, "Filters cleared.");
      }
      "4" => display_quakes(&engine, out),
      "5" => display_exceptional(&engine, out),
      "6" => display_stats(&engine, out),
      "7" => plot_map(&engine, out),
      "8" => plot_chart(&engine, out),
      "9" => break,
      other => {
        let _ = writeln!(out, "Unknown option: {}", other);
      }
    }
  }
}

/// Next trimmed stdin line; None on EOF or read error.
fn read_line(lines: &mut In) -> Option<String> {
  lines.next()?.ok().map(|line| line.trim().to_string())
}

/// Prompt for one value and return the raw text.
fn prompt(lines: &mut In, out: &mut Out, label: &str) -> Option<String> {
  let _ = write!(out, "{}: ", label);
  let _ = out.flush();
  read_line(lines)
}

fn set_location_filter(engine: &mut Engine, lines: &mut In, out: &mut Out) {
  let Some(latitude) = prompt(lines, out, "Center latitude") else { return };
  let Some(longitude) = prompt(lines, out, "Center longitude") else { return };
  let Some(distance) = prompt(lines, out, "Max distance (km)") else { return };

  let result = engine.set_location_filter(
    &Value::String(latitude),
    &Value::String(longitude),
    &Value::String(distance),
  );
  match result {
    Ok(()) => {
      let _ = writeln!(out, "Location filter set.");
    }
    Err(e) => {
      let _ = writeln!(out, "{} (previous filter kept)", e);
    }
  }
}

fn set_property_filter(engine: &mut Engine, lines: &mut In, out: &mut Out) {
  let Some(magnitude) = prompt(lines, out, "Minimum magnitude (blank to skip)") else { return };
  let Some(felt) = prompt(lines, out, "Minimum felt reports (blank to skip)") else { return };
  let Some(significance) = prompt(lines, out, "Minimum significance (blank to skip)") else {
    return;
  };

  let magnitude = supplied(magnitude);
  let felt = supplied(felt);
  let significance = supplied(significance);
  let result =
    engine.set_property_filter(magnitude.as_ref(), felt.as_ref(), significance.as_ref());
  match result {
    Ok(()) => {
      let _ = writeln!(out, "Property filter set.");
    }
    Err(e) => {
      let _ = writeln!(out, "{} (previous filter kept)", e);
    }
  }
}

/// Blank input means "skip this threshold".
fn supplied(text: String) -> Option<Value> {
  if text.is_empty() {
    None
  } else {
    Some(Value::String(text))
  }
}

fn display_quakes(engine: &Engine, out: &mut Out) {
  let quakes = engine.filtered_quakes();
  let _ = writeln!(out, "{} quakes in the current selection", quakes.len());
  for quake in quakes {
    let _ = writeln!(out, "  [{}] {}", timestamp(quake.time_utc()), quake);
  }
}

fn display_exceptional(engine: &Engine, out: &mut Out) {
  let quakes = engine.exceptional_quakes();
  if quakes.is_empty() {
    let _ = writeln!(out, "No exceptional quakes in the current selection.");
    return;
  }
  let _ = writeln!(out, "{} exceptional quakes", quakes.len());
  for quake in quakes {
    let _ = writeln!(out, "  [{}] {}", timestamp(quake.time_utc()), quake);
  }
}

fn timestamp(when: Option<chrono::DateTime<chrono::Utc>>) -> String {
  match when {
    Some(t) => t.format("%Y-%m-%d %H:%M UTC").to_string(),
    None => "unknown time".to_string(),
  }
}

fn display_stats(engine: &Engine, out: &mut Out) {
  match engine.magnitude_stats() {
    Ok(stats) => {
      let _ = writeln!(out, "Magnitude stats over {} quakes:", stats.count);
      let _ = writeln!(out, "  mean    {:.2}", stats.mean);
      let _ = writeln!(out, "  std dev {:.2}", stats.std_dev);
      let _ = writeln!(out, "  median  {:.2}", stats.median);
      let _ = writeln!(out, "  mode    {}", stats.mode);
    }
    Err(e) => {
      let _ = writeln!(out, "{}", e);
    }
  }
}

fn plot_map(engine: &Engine, out: &mut Out) {
  let (latitudes, longitudes, magnitudes) = engine.filtered_columns();
  let config = engine.config();
  let map = render::quake_map(
    &latitudes,
    &longitudes,
    &magnitudes,
    config.map_cols,
    config.map_rows,
  );
  if map.is_empty() {
    let _ = writeln!(out, "Nothing to plot.");
  } else {
    let _ = write!(out, "{}", map);
  }
}

fn plot_chart(engine: &Engine, out: &mut Out) {
  let buckets = engine.magnitude_histogram();
  let chart = render::magnitude_chart(&buckets, engine.config().chart_width);
  if chart.is_empty() {
    let _ = writeln!(out, "Nothing to plot.");
  } else {
    let _ = write!(out, "{}", chart);
  }
}
