//! Integration tests for feature loading through `FloorplanPlugin`.
//!
//! Covers the native IO-pool path, the host fetch slot, and the failure
//! states the panel renders.

use std::path::PathBuf;

use crate::features::FeatureLoadError;
use crate::loading::{FeatureData, FeatureSource};
use crate::test_harness::TestMap;

const SMALL_CAMPUS: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {"type": "Feature",
     "geometry": {"type": "Polygon", "coordinates": [[[103.7695,1.3067],[103.7696,1.3067],[103.7696,1.3068],[103.7695,1.3067]]]},
     "properties": {"level": "2", "amenity": "cafe", "name": "Cafe"}},
    {"type": "Feature",
     "geometry": {"type": "Polygon", "coordinates": [[[103.7695,1.3067],[103.7696,1.3067],[103.7696,1.3068],[103.7695,1.3067]]]},
     "properties": {"level": "2-4", "highway": "elevator"}},
    {"type": "Feature",
     "geometry": {"type": "LineString", "coordinates": [[103.7695,1.3067],[103.7697,1.3068]]},
     "properties": {"level": "3", "highway": "service"}}
  ]
}"#;

fn temp_geojson(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "floorplan-{}-{}.geojson",
        name,
        std::process::id()
    ));
    std::fs::write(&path, contents).expect("write temp geojson");
    path
}

#[test]
fn test_file_source_loads_on_io_pool() {
    let path = temp_geojson("load", SMALL_CAMPUS);
    let mut map = TestMap::from_file(&path);

    assert!(map.update_until_loaded(500), "load never settled");
    let collection = map.data().collection().expect("collection loaded");
    assert_eq!(collection.len(), 3);
    assert_eq!(map.floors().floors(), &[2, 3, 4]);
    // Level 1 does not exist, so the view drops to the lowest floor.
    assert_eq!(map.floors().active_floor(), Some(2));

    let _ = std::fs::remove_file(path);
}

#[test]
fn test_missing_file_reports_failure() {
    let mut map = TestMap::from_file("/definitely/not/here/main.geojson");

    assert!(map.update_until_loaded(500));
    assert!(map.data().failure().is_some());
    assert!(!map.floors().has_floors());
    assert_eq!(map.floors().active_floor(), None);
}

#[test]
fn test_fetch_slot_delivers_collection() {
    let mut map = TestMap::with_source(FeatureSource::Remote(
        "https://example.invalid/main.geojson".to_string(),
    ));
    map.update();
    assert!(map.data().is_loading());

    map.deliver_fetch(Ok(SMALL_CAMPUS.to_string()));
    map.update();

    assert!(map.data().is_ready());
    assert_eq!(map.floors().floors(), &[2, 3, 4]);
}

#[test]
fn test_fetch_error_and_bad_json_fail() {
    let mut map = TestMap::with_source(FeatureSource::Remote("u".to_string()));
    map.update();
    map.deliver_fetch(Err("HTTP 404".to_string()));
    map.update();
    assert_eq!(
        map.data().failure(),
        Some("Fetch error: HTTP 404")
    );

    let mut map = TestMap::with_source(FeatureSource::Remote("u".to_string()));
    map.update();
    map.deliver_fetch(Ok("{not json".to_string()));
    map.update();
    assert!(matches!(map.data(), FeatureData::Failed(_)));
}

#[test]
fn test_collection_without_levels_has_no_floors() {
    let mut map = TestMap::new()
        .with_room(&[("amenity", "cafe")])
        .with_room(&[("level", "ground")])
        .load();

    assert!(map.data().is_ready());
    assert!(!map.floors().has_floors());
    assert_eq!(map.floors().active_floor(), None);
    map.update();
    assert_eq!(map.floors().active_floor(), None);
}

#[test]
fn test_io_error_is_a_failure_state() {
    let mut map = TestMap::new();
    map.load_result(Err(FeatureLoadError::Io(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        "gone",
    ))));
    assert!(map.data().failure().is_some());
}
