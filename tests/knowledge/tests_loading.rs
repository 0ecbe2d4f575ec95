#![allow(clippy::unwrap_used)]

use std::fs;

use relevance::knowledge::{IndexFilter, KnowledgeBase, KnowledgeBaseError};
use tempfile::TempDir;

use crate::helpers::{KNOWLEDGE_JSON, knowledge_base};

#[test]
fn test_load_from_path() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("relevance.json");
    fs::write(&path, KNOWLEDGE_JSON).unwrap();

    let kb = KnowledgeBase::from_path(&path).unwrap();
    assert_eq!(kb.snapshot().property_count(), 18);
    assert_eq!(kb.asset().types.len(), 7);
}

#[test]
fn test_load_from_reader() {
    let kb = KnowledgeBase::from_reader(KNOWLEDGE_JSON.as_bytes()).unwrap();
    assert_eq!(kb.snapshot().property_count(), 18);
}

#[test]
fn test_missing_file_reports_path() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("missing.json");
    let err = KnowledgeBase::from_path(&path).unwrap_err();
    assert!(matches!(err, KnowledgeBaseError::Io { .. }));
    assert!(err.to_string().contains("missing.json"));
}

#[test]
fn test_malformed_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.json");
    fs::write(&path, "{\"properties\": [").unwrap();
    assert!(matches!(
        KnowledgeBase::from_path(&path),
        Err(KnowledgeBaseError::Json(_))
    ));
}

#[test]
fn test_keys_and_names_filled_from_map() {
    let kb = knowledge_base();
    let fact = &kb.asset().properties["size of <file>: integer"];
    assert_eq!(fact.key, "size of <file>: integer");
    assert_eq!(fact.index_key(), "size of <file>");
    assert_eq!(kb.asset().types["folder"].name, "folder");
}

#[test]
fn test_rebuild_keeps_asset() {
    let kb = knowledge_base();
    kb.build_index(&IndexFilter::new(Some("1.0"), Some("mac")));
    kb.build_index(&IndexFilter::all());
    assert_eq!(kb.snapshot().property_count(), 18);
    assert_eq!(kb.asset().properties.len(), 19);
}
