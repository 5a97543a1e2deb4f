//! Tests for container scanning and verification
//!
//! These tests verify:
//! - Section listing with offsets and checksums
//! - Shadowed duplicate detection
//! - Truncated payloads and trailing partial headers

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use sectionstore::{SectionContainer, SectionStore};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_store() -> (TempDir, PathBuf, SectionStore) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("scan.dat");
    let store = SectionStore::with_path(&path);
    (temp_dir, path, store)
}

// =============================================================================
// Listing Tests
// =============================================================================

#[test]
fn test_sections_empty_container() {
    let (_temp, _path, mut store) = setup_temp_store();

    assert!(store.sections().unwrap().is_empty());
}

#[test]
fn test_sections_in_file_order() {
    let (_temp, _path, mut store) = setup_temp_store();
    store.save("a", &[1, 2, 3]).unwrap();
    store.save("bb", &[4]).unwrap();

    let sections = store.sections().unwrap();

    assert_eq!(sections.len(), 2);

    assert_eq!(sections[0].name, "a");
    assert_eq!(sections[0].offset, 0);
    assert_eq!(sections[0].payload_offset, 6);
    assert_eq!(sections[0].declared_len, 3);
    assert_eq!(sections[0].available_len, 3);
    assert_eq!(sections[0].crc32, Some(crc32fast::hash(&[1, 2, 3])));
    assert!(!sections[0].shadowed);

    assert_eq!(sections[1].name, "bb");
    assert_eq!(sections[1].offset, 9);
    assert_eq!(sections[1].payload_offset, 16);
    assert_eq!(sections[1].crc32, Some(crc32fast::hash(&[4])));
}

#[test]
fn test_sections_marks_shadowed_duplicates() {
    let (_temp, _path, mut store) = setup_temp_store();
    store.save("cfg", &[1, 2]).unwrap();
    store.save("cfg", &[3]).unwrap();

    let sections = store.sections().unwrap();

    assert_eq!(sections.len(), 2);
    assert!(!sections[0].shadowed);
    assert!(sections[1].shadowed);
}

#[test]
fn test_scan_leaves_cursor_at_eof() {
    let (_temp, path, mut store) = setup_temp_store();
    store.save("a", &[1]).unwrap();

    store.sections().unwrap();

    assert_eq!(store.position().unwrap(), fs::metadata(&path).unwrap().len());
}

// =============================================================================
// Verify Tests
// =============================================================================

#[test]
fn test_verify_clean_container() {
    let (_temp, _path, mut store) = setup_temp_store();
    store.save("a", &[1, 2]).unwrap();
    store.save("b", &[3]).unwrap();

    let report = store.verify().unwrap();

    assert!(report.is_clean());
    assert_eq!(report.sections.len(), 2);
    assert_eq!(report.trailing_bytes, 0);
    assert_eq!(report.file_len, 8 + 7);
}

#[test]
fn test_verify_detects_interrupted_payload() {
    let (_temp, _path, mut store) = setup_temp_store();
    store.save("ok", &[1]).unwrap();
    store.save_section("half", 10).unwrap();
    store.write_payload(&[1, 2, 3, 4]).unwrap();

    let report = store.verify().unwrap();

    assert!(!report.is_clean());
    let truncated: Vec<_> = report.truncated().collect();
    assert_eq!(truncated.len(), 1);
    assert_eq!(truncated[0].name, "half");
    assert_eq!(truncated[0].available_len, 4);
    assert_eq!(truncated[0].declared_len, 10);
    assert_eq!(truncated[0].crc32, None);
    assert_eq!(report.trailing_bytes, 0);
}

#[test]
fn test_verify_detects_trailing_bytes() {
    let (_temp, path, mut store) = setup_temp_store();
    store.save("a", &[1]).unwrap();
    store.close();
    let mut file = OpenOptions::new().append(true).open(&path).unwrap();
    file.write_all(&[3, 0, b'z']).unwrap();
    drop(file);

    let report = store.verify().unwrap();

    assert!(!report.is_clean());
    assert_eq!(report.sections.len(), 1);
    assert_eq!(report.trailing_bytes, 3);
}

#[test]
fn test_verify_reports_shadowed_without_failing() {
    let (_temp, _path, mut store) = setup_temp_store();
    store.save("cfg", &[1, 2]).unwrap();
    store.save("cfg", &[3]).unwrap();

    let report = store.verify().unwrap();

    assert!(report.is_clean());
    assert_eq!(report.shadowed().count(), 1);
}
