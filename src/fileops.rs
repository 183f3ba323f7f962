//! File utilities for honeypot log handling
//!
//! Existence and modification-age checks, line counting, bulk line reads,
//! and single-line writes. Glob variants walk the pattern's literal prefix
//! and match whole paths, with `*` stopping at path separators.

use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use globset::{GlobBuilder, GlobMatcher};
use log::warn;
use walkdir::WalkDir;

use crate::access::{ReadAccess, SystemAccess};
use crate::error::FileError;

/// Reports whether `path` names an existing regular file.
pub fn exists(path: &Path) -> bool {
    path.is_file()
}

/// Whole minutes elapsed since `path` was last modified.
pub fn modified_age_minutes(path: &Path) -> Result<i64, FileError> {
    let meta = std::fs::metadata(path).map_err(|e| FileError::io(path, e))?;
    let modified = meta.modified().map_err(|e| FileError::io(path, e))?;
    let modified: DateTime<Utc> = modified.into();
    Ok((Utc::now() - modified).num_minutes())
}

/// Number of lines in a single file. An unterminated final fragment
/// counts as a line.
pub fn line_count(path: &Path) -> Result<usize, FileError> {
    let file = File::open(path).map_err(|e| FileError::io(path, e))?;
    let mut count = 0;
    for line in BufReader::new(file).split(b'\n') {
        line.map_err(|e| FileError::io(path, e))?;
        count += 1;
    }
    Ok(count)
}

/// Per-file line counts for every file matching `pattern`, keyed by path.
pub fn line_count_glob(pattern: &str) -> Result<BTreeMap<PathBuf, usize>, FileError> {
    let mut counts = BTreeMap::new();
    for path in glob_matches(pattern)? {
        let count = line_count(&path)?;
        counts.insert(path, count);
    }
    Ok(counts)
}

/// Reads every line of a single file, terminators stripped.
///
/// Gated by the same permission check as the tail reader: a denial
/// returns [`FileError::AccessDenied`] without opening the file. Not
/// memory friendly for large logs; use [`crate::tail::tail`] for those.
pub fn read_lines(path: &Path) -> Result<Vec<String>, FileError> {
    read_lines_with_gate(path, &SystemAccess)
}

/// Like [`read_lines`], with a caller-supplied permission gate.
pub fn read_lines_with_gate(
    path: &Path,
    gate: &dyn ReadAccess,
) -> Result<Vec<String>, FileError> {
    if !gate.can_read(path) {
        return Err(FileError::denied(path));
    }
    let file = File::open(path).map_err(|e| FileError::io(path, e))?;
    BufReader::new(file)
        .lines()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| FileError::io(path, e))
}

/// Concatenated lines of every file matching `pattern`, in path order.
/// Unreadable matches are skipped with a warning.
pub fn read_lines_glob(pattern: &str) -> Result<Vec<String>, FileError> {
    let mut lines = Vec::new();
    for path in glob_matches(pattern)? {
        match read_lines(&path) {
            Ok(mut file_lines) => lines.append(&mut file_lines),
            Err(err) => warn!("skipping {}: {err}", path.display()),
        }
    }
    Ok(lines)
}

/// Writes `line` plus a terminator to `path`, creating the file or
/// truncating an existing one.
pub fn write_line(path: &Path, line: &str) -> Result<(), FileError> {
    let mut file = File::create(path).map_err(|e| FileError::io(path, e))?;
    writeln!(file, "{line}").map_err(|e| FileError::io(path, e))
}

/// Appends `line` plus a terminator to `path`, creating the file if
/// necessary.
pub fn append_line(path: &Path, line: &str) -> Result<(), FileError> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| FileError::io(path, e))?;
    writeln!(file, "{line}").map_err(|e| FileError::io(path, e))
}

/// Regular files matching `pattern`, sorted by path.
///
/// Walked entries under a `.` root carry a `./` prefix that the pattern
/// never spells out; it is stripped before matching so bare relative
/// patterns like `*.log` behave the way a shell glob does.
fn glob_matches(pattern: &str) -> Result<Vec<PathBuf>, FileError> {
    let matcher = compile_pattern(pattern)?;
    let mut matches = Vec::new();
    for entry in WalkDir::new(literal_prefix(pattern))
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }
        let candidate = entry.path().strip_prefix("./").unwrap_or(entry.path());
        if matcher.is_match(candidate) {
            matches.push(candidate.to_path_buf());
        }
    }
    matches.sort();
    Ok(matches)
}

fn compile_pattern(pattern: &str) -> Result<GlobMatcher, FileError> {
    Ok(GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()?
        .compile_matcher())
}

/// Directory to walk for a pattern: every leading component free of glob
/// metacharacters. Falls back to the current directory for bare patterns.
fn literal_prefix(pattern: &str) -> PathBuf {
    let mut prefix = PathBuf::new();
    for comp in Path::new(pattern).components() {
        let text = comp.as_os_str().to_string_lossy();
        if text.contains(['*', '?', '[', '{']) {
            break;
        }
        prefix.push(comp);
    }
    if prefix.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        prefix
    }
}
