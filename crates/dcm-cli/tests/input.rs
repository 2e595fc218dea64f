//! Integration tests for loading exports from disk.

use std::path::PathBuf;

use dcm_cli::input::{load_catalog, load_columns, load_ranker_config};
use dcm_map::{Ranker, TargetKind};
use tempfile::TempDir;

const DICTIONARY: &str = r#"[
    {"id": "df-db-tech", "name": "Database Technology", "entity": "Database",
     "standard_values": [{"value": "Oracle"}, {"value": "MySQL"}, {"value": "PostgreSQL"}]},
    {"id": "df-db-version", "name": "Database Version", "entity": "Database"}
]"#;

const ENTITIES: &str = r#"[
    {"name": "server", "fields": [{"name": "hostname"}, {"name": "ip_address"}]}
]"#;

const COLUMNS: &str = r#"[
    {"column_name": "Database Technology", "sample_values": ["Oracle", null]},
    {"column_name": "Server Name"},
    {"column_name": "xyz123_unrelated", "sample_values": []}
]"#;

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_load_catalog_with_entities() {
    let dir = TempDir::new().unwrap();
    let dictionary = write(&dir, "dictionary.json", DICTIONARY);
    let entities = write(&dir, "entities.json", ENTITIES);

    let catalog = load_catalog(&dictionary, Some(&entities)).unwrap();

    // 2 dictionary fields, 1 entity-only target, 2 entity fields
    assert_eq!(catalog.len(), 5);
    assert_eq!(catalog.targets()[0].kind, TargetKind::Dictionary);
    assert_eq!(catalog.targets()[2].kind, TargetKind::EntityOnly);
}

#[test]
fn test_load_catalog_without_entities() {
    let dir = TempDir::new().unwrap();
    let dictionary = write(&dir, "dictionary.json", DICTIONARY);

    let catalog = load_catalog(&dictionary, None).unwrap();

    assert_eq!(catalog.len(), 2);
}

#[test]
fn test_missing_dictionary_names_the_path() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.json");

    let error = load_catalog(&missing, None).unwrap_err();

    assert!(format!("{error:#}").contains("missing.json"));
}

#[test]
fn test_malformed_columns_are_reported() {
    let dir = TempDir::new().unwrap();
    let columns = write(&dir, "columns.json", r#"{"column_name": "not an array"}"#);

    let error = load_columns(&columns).unwrap_err();

    let message = format!("{error:#}");
    assert!(message.contains("columns.json"));
    assert!(message.contains("source columns"));
}

#[test]
fn test_load_columns_drops_null_samples() {
    let dir = TempDir::new().unwrap();
    let columns = write(&dir, "columns.json", COLUMNS);

    let columns = load_columns(&columns).unwrap();

    assert_eq!(columns.len(), 3);
    assert_eq!(columns[0].sample_values, vec!["Oracle".to_string()]);
    assert!(!columns[1].has_samples());
}

#[test]
fn test_ranker_config_defaults_without_file() {
    let config = load_ranker_config(None, None).unwrap();
    assert_eq!(config.min_score, 40.0);
}

#[test]
fn test_ranker_config_file_overrides_subset() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "ranker.json", r#"{"min_score": 55.0, "overlap_boost": 30.0}"#);

    let config = load_ranker_config(Some(&path), None).unwrap();

    assert_eq!(config.min_score, 55.0);
    assert_eq!(config.overlap_boost, 30.0);
    assert_eq!(config.primary_weight, 85.0);
}

#[test]
fn test_min_score_flag_beats_config_file() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "ranker.json", r#"{"min_score": 55.0}"#);

    let config = load_ranker_config(Some(&path), Some(70.0)).unwrap();

    assert_eq!(config.min_score, 70.0);
}

#[test]
fn test_loaded_exports_rank_end_to_end() {
    let dir = TempDir::new().unwrap();
    let dictionary = write(&dir, "dictionary.json", DICTIONARY);
    let entities = write(&dir, "entities.json", ENTITIES);
    let columns = write(&dir, "columns.json", COLUMNS);

    let ranker = Ranker::new(load_catalog(&dictionary, Some(&entities)).unwrap());
    let mappings = ranker.recommend_all(&load_columns(&columns).unwrap());

    assert_eq!(mappings[0].dictionary_field_id.as_deref(), Some("df-db-tech"));
    assert_eq!(mappings[1].entity.as_deref(), Some("server"));
    assert_eq!(mappings[1].field.as_deref(), Some("hostname"));
    assert_eq!(mappings[2].entity, None);
}
