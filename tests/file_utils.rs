//! File utility behavior: existence, modification age, line counts,
//! glob reads, and line writes.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use hpot_ops::error::FileError;
use hpot_ops::fileops::{
    append_line, exists, line_count, line_count_glob, modified_age_minutes, read_lines,
    read_lines_glob, write_line,
};

fn write_fixture(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

#[test]
fn exists_is_true_only_for_regular_files() {
    let dir = TempDir::new().unwrap();
    let file = write_fixture(&dir, "events.log", "x\n");

    assert!(exists(&file));
    assert!(!exists(dir.path()));
    assert!(!exists(&dir.path().join("missing.log")));
}

#[test]
fn fresh_file_has_zero_minute_age() {
    let dir = TempDir::new().unwrap();
    let file = write_fixture(&dir, "fresh.log", "x\n");

    assert_eq!(modified_age_minutes(&file).unwrap(), 0);
}

#[test]
fn age_of_missing_file_is_io_failure() {
    let err = modified_age_minutes(Path::new("/nonexistent/hpot-ops-age.log")).unwrap_err();
    assert!(matches!(err, FileError::Io { .. }));
}

#[test]
fn line_count_counts_terminated_lines() {
    let dir = TempDir::new().unwrap();
    let file = write_fixture(&dir, "three.log", "a\nb\nc\n");

    assert_eq!(line_count(&file).unwrap(), 3);
}

#[test]
fn line_count_includes_unterminated_fragment() {
    let dir = TempDir::new().unwrap();
    let file = write_fixture(&dir, "ragged.log", "a\nb\nc");

    assert_eq!(line_count(&file).unwrap(), 3);
}

#[test]
fn line_count_glob_maps_each_matching_file() {
    let dir = TempDir::new().unwrap();
    let one = write_fixture(&dir, "one.log", "a\n");
    let two = write_fixture(&dir, "two.log", "a\nb\n");
    write_fixture(&dir, "ignored.txt", "a\nb\nc\n");

    let pattern = format!("{}/*.log", dir.path().display());
    let counts = line_count_glob(&pattern).unwrap();

    assert_eq!(counts.len(), 2);
    assert_eq!(counts[&one], 1);
    assert_eq!(counts[&two], 2);
}

#[test]
fn line_count_glob_with_no_matches_is_empty() {
    let dir = TempDir::new().unwrap();
    let pattern = format!("{}/*.log", dir.path().display());

    assert!(line_count_glob(&pattern).unwrap().is_empty());
}

#[test]
fn bare_relative_pattern_matches_files_in_cwd() {
    let dir = TempDir::new().unwrap();
    write_fixture(&dir, "a.log", "hello\n");
    write_fixture(&dir, "b.log", "world\n");

    // The only test in this binary that moves the working directory;
    // every other test uses absolute fixture paths.
    let previous = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();
    let lines = read_lines_glob("*.log");
    let counts = line_count_glob("*.log");
    std::env::set_current_dir(previous).unwrap();

    assert_eq!(lines.unwrap(), vec!["hello", "world"]);
    assert_eq!(counts.unwrap().len(), 2);
}

#[test]
fn read_lines_returns_stripped_lines() {
    let dir = TempDir::new().unwrap();
    let file = write_fixture(&dir, "events.log", "first\nsecond\n");

    assert_eq!(read_lines(&file).unwrap(), vec!["first", "second"]);
}

#[test]
fn read_lines_on_missing_file_is_access_denied() {
    let dir = TempDir::new().unwrap();
    let err = read_lines(&dir.path().join("missing.log")).unwrap_err();
    assert!(matches!(err, FileError::AccessDenied { .. }));
}

#[test]
fn read_lines_glob_concatenates_in_path_order() {
    let dir = TempDir::new().unwrap();
    write_fixture(&dir, "a.log", "a1\na2\n");
    write_fixture(&dir, "b.log", "b1\n");

    let pattern = format!("{}/*.log", dir.path().display());
    let lines = read_lines_glob(&pattern).unwrap();

    assert_eq!(lines, vec!["a1", "a2", "b1"]);
}

#[test]
fn write_line_truncates_existing_contents() {
    let dir = TempDir::new().unwrap();
    let file = write_fixture(&dir, "state.log", "old contents\nmore old\n");

    write_line(&file, "fresh start").unwrap();
    assert_eq!(fs::read_to_string(&file).unwrap(), "fresh start\n");
}

#[test]
fn append_line_preserves_existing_contents() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("events.log");

    append_line(&file, "first").unwrap();
    append_line(&file, "second").unwrap();
    assert_eq!(fs::read_to_string(&file).unwrap(), "first\nsecond\n");
}
