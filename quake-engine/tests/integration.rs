//! Integration tests: ingestion, filtering, and statistics end to end.

use serde_json::{json, Value};

use quake_engine::{Engine, FeatureCollection, QuakeCatalog, QuakeError};

fn valid_feature(mag: f64, felt: i64, sig: i64, lat: f64, lon: f64) -> Value {
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
    },
    "id": "ak0245z16lhr"
  })
}

/// Ten structurally identical quakes, one stronger distant quake, and one
/// invalid record.
fn fixture_collection() -> FeatureCollection {
  let mut features: Vec<Value> = (0..10).map(|_| valid_feature(2.9, 20, 129, 100.0, 100.0)).collect();
  features.push(valid_feature(5.0, 30, 300, 900.0, 900.0));
  features.push(json!({
    "type": "Feature",
    "properties": {},
    "geometry": {},
    "id": "ak0245z16lhr"
  }));
  FeatureCollection { features }
}

fn fixture_engine() -> Engine {
  Engine::with_defaults(QuakeCatalog::from_collection(&fixture_collection()).unwrap())
}

#[test]
fn invalid_record_is_dropped_and_eleven_survive() {
  let catalog = QuakeCatalog::from_collection(&fixture_collection()).unwrap();
  assert_eq!(catalog.len(), 11);
}

#[test]
fn payload_decodes_from_raw_json_text() {
  // One good record and one truncated garbage record in the same document;
  // decoding must succeed and ingestion must keep only the good one.
  let text = r#"{
    "features": [
      {
        "type": "Feature",
        "properties": {
          "mag": 2.9, "time": 1715221312431, "felt": 20, "sig": 129,
          "magType": "ml", "type": "earthquake"
        },
        "geometry": {"type": "Point", "coordinates": [100, 100, 0.1]}
      },
      {"type": "Feature", "properties": {"mag": 2.9}, "geometry": null}
    ]
  }"#;

  let catalog = QuakeCatalog::from_json(text).unwrap();
  assert_eq!(catalog.len(), 1);
}

#[test]
fn undecodable_payload_surfaces_a_json_error() {
  assert!(matches!(
    QuakeCatalog::from_json("{\"features\": ["),
    Err(QuakeError::Json(_))
  ));
}

#[test]
fn unfiltered_view_equals_the_full_catalog() {
  let engine = fixture_engine();
  let rows = engine.filtered_indices();
  assert_eq!(rows.len(), engine.catalog().len());
  assert_eq!(rows, (0..engine.catalog().len()).collect::<Vec<_>>());
}

#[test]
fn clearing_filters_restores_the_full_view() {
  let mut engine = fixture_engine();
  engine
    .set_location_filter(&json!(100), &json!(100), &json!(5000))
    .unwrap();
  engine
    .set_property_filter(Some(&json!(20)), Some(&json!(30)), Some(&json!(20)))
    .unwrap();
  let narrowed = engine.filtered_indices().len();
  assert!(narrowed < engine.catalog().len());

  engine.clear_filters();
  assert_eq!(engine.filtered_indices().len(), engine.catalog().len());
}

#[test]
fn weak_property_filter_keeps_all_eleven() {
  let mut engine = fixture_engine();
  engine
    .set_property_filter(Some(&json!(0)), Some(&json!(0)), Some(&json!(0)))
    .unwrap();
  assert_eq!(engine.filtered_indices().len(), 11);
}

#[test]
fn extreme_property_filter_keeps_none() {
  let mut engine = fixture_engine();
  engine
    .set_property_filter(Some(&json!(99999)), Some(&json!(99999)), Some(&json!(999999)))
    .unwrap();
  assert_eq!(engine.filtered_indices().len(), 0);
}

#[test]
fn exact_threshold_keeps_the_matching_quake() {
  let mut engine = fixture_engine();
  engine
    .set_property_filter(Some(&json!(5)), Some(&json!(30)), Some(&json!(300)))
    .unwrap();
  let rows = engine.filtered_indices();
  assert_eq!(rows, vec![10]);
  assert_eq!(engine.filtered_quakes()[0].magnitude, 5.0);
}

#[test]
fn property_filter_with_no_usable_field_keeps_previous_state() {
  let mut engine = fixture_engine();
  engine
    .set_property_filter(Some(&json!(5)), Some(&json!(30)), Some(&json!(300)))
    .unwrap();

  let err = engine.set_property_filter(None, None, Some(&json!("lots")));
  assert!(matches!(err, Err(QuakeError::InvalidFilter(_))));
  assert_eq!(engine.filtered_indices(), vec![10]);
}

#[test]
fn location_filter_with_non_numeric_argument_keeps_previous_state() {
  let mut engine = fixture_engine();
  engine
    .set_location_filter(&json!(100), &json!(100), &json!(1))
    .unwrap();
  let before = engine.filtered_indices();

  let err = engine.set_location_filter(&json!("north"), &json!(100), &json!(1));
  assert!(matches!(err, Err(QuakeError::InvalidFilter(_))));
  assert_eq!(engine.filtered_indices(), before);
}

#[test]
fn location_and_property_filters_compose() {
  let mut engine = fixture_engine();
  // Radius 0 around the cluster keeps the ten identical quakes.
  engine
    .set_location_filter(&json!(100), &json!(100), &json!(0))
    .unwrap();
  assert_eq!(engine.filtered_indices().len(), 10);

  // The stronger quake sits outside the radius, so the conjunction is empty.
  engine
    .set_property_filter(Some(&json!(5)), None, None)
    .unwrap();
  assert_eq!(engine.filtered_indices().len(), 0);
}

#[test]
fn filter_arguments_accept_numeric_strings() {
  let mut engine = fixture_engine();
  engine
    .set_location_filter(
      &Value::String("100".into()),
      &Value::String("100".into()),
      &Value::String("5000".into()),
    )
    .unwrap();
  engine
    .set_property_filter(Some(&Value::String("2.9".into())), None, None)
    .unwrap();
  assert_eq!(engine.filtered_indices().len(), 10);
}

#[test]
fn stats_and_outliers_follow_the_selection() {
  let engine = fixture_engine();
  let stats = engine.magnitude_stats().unwrap();
  assert_eq!(stats.count, 11);
  assert!((stats.mean - 3.0909).abs() < 1e-3);
  assert!((stats.std_dev - 0.6038).abs() < 1e-3);
  assert_eq!(stats.median, 2.9);
  assert_eq!(stats.mode, 3);

  let exceptional = engine.exceptional_quakes();
  assert_eq!(exceptional.len(), 1);
  assert_eq!(exceptional[0].magnitude, 5.0);
}

#[test]
fn all_invalid_payload_is_fatal() {
  let collection = FeatureCollection {
    features: vec![json!({"type": "Feature"}), json!(42)],
  };
  assert!(matches!(
    QuakeCatalog::from_collection(&collection),
    Err(QuakeError::EmptyCatalog)
  ));
}
