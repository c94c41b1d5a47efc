//! Shared test fixtures for the CLI and web API tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Builds one verb record in the data file shape.
///
/// Even indices are irregular, odd ones regular; every third record has
/// no meaning.
pub fn verb_json(index: usize) -> Value {
    let verb_type = if index % 2 == 0 { "irregular" } else { "regular" };
    let mut record = json!({
        "verb": format!("verb{index:03}"),
        "past_simple": format!("verb{index:03}ed"),
        "past_participle": format!("verb{index:03}en"),
        "future": format!("will verb{index:03}"),
        "type": verb_type,
    });
    if index % 3 != 0 {
        record["meaning"] = json!(format!("meaning {index}"));
    }
    record
}

/// A catalog document with `count` generated verbs.
pub fn catalog_json(count: usize) -> Value {
    json!({ "verbs": (0..count).map(verb_json).collect::<Vec<_>>() })
}

/// A small hand-written catalog for search and filter tests.
pub fn small_catalog_json() -> Value {
    json!({
        "verbs": [
            {
                "verb": "go",
                "past_simple": "went",
                "past_participle": "gone",
                "future": "will go",
                "type": "irregular",
                "meaning": "ir"
            },
            {
                "verb": "walk",
                "past_simple": "walked",
                "past_participle": "walked",
                "future": "will walk",
                "type": "regular",
                "meaning": "caminar"
            },
            {
                "verb": "eat",
                "past_simple": "ate",
                "past_participle": "eaten",
                "future": "will eat",
                "type": "irregular"
            }
        ]
    })
}

/// Writes `value` as `verbs.json` under `dir` and returns the path.
pub fn write_catalog(dir: &Path, value: &Value) -> PathBuf {
    let path = dir.join("verbs.json");
    fs::write(&path, serde_json::to_string_pretty(value).expect("serialize catalog"))
        .expect("write catalog");
    path
}

/// Temp directory holding a generated catalog of `count` verbs.
pub fn temp_catalog(count: usize) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_catalog(dir.path(), &catalog_json(count));
    (dir, path)
}

/// Temp directory holding the small hand-written catalog.
pub fn temp_small_catalog() -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_catalog(dir.path(), &small_catalog_json());
    (dir, path)
}

/// Temp directory holding a file that is not valid catalog JSON.
pub fn temp_malformed_catalog() -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("verbs.json");
    fs::write(&path, "{ \"verbs\": [ not json").expect("write malformed catalog");
    (dir, path)
}
