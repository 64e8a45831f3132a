//! Register verification
//!
//! Re-reads a written register and checks the properties downstream
//! consumers rely on: canonical header, 18 fields per row, ascending unique
//! `EVID ID`, unique `Filename`/`ID`/`file_number`, known categories. With a
//! source directory it also re-hashes every listed file.

use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Component, Path};

use csv::{ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::hash::{hash_content, DEFAULT_CHUNK_SIZE};
use crate::source::{DirectorySource, EvidenceSource};
use crate::types::{Category, COLUMNS};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationIssue {
    HeaderMismatch { found: Vec<String> },
    FieldCount { line: u64, got: usize },
    InvalidEvidId { line: u64, value: String },
    OutOfOrder { line: u64, previous: i64, current: i64 },
    Duplicate { line: u64, column: String, value: String },
    UnknownCategory { line: u64, value: String },
    MissingSource { filename: String },
    UnsafeFilename { filename: String },
    HashMismatch { filename: String, algorithm: String },
}

impl fmt::Display for VerificationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerificationIssue::HeaderMismatch { found } => {
                write!(f, "Header does not match canonical columns: {}", found.join(","))
            }
            VerificationIssue::FieldCount { line, got } => {
                write!(f, "Line {}: expected {} fields, got {}", line, COLUMNS.len(), got)
            }
            VerificationIssue::InvalidEvidId { line, value } => {
                write!(f, "Line {}: EVID ID is not an integer: {}", line, value)
            }
            VerificationIssue::OutOfOrder { line, previous, current } => {
                write!(f, "Line {}: EVID ID {} does not follow {}", line, current, previous)
            }
            VerificationIssue::Duplicate { line, column, value } => {
                write!(f, "Line {}: duplicate {}: {}", line, column, value)
            }
            VerificationIssue::UnknownCategory { line, value } => {
                write!(f, "Line {}: unknown file_category: {}", line, value)
            }
            VerificationIssue::MissingSource { filename } => {
                write!(f, "Source file not found: {}", filename)
            }
            VerificationIssue::UnsafeFilename { filename } => {
                write!(f, "Filename is not a plain file name, not re-hashed: {}", filename)
            }
            VerificationIssue::HashMismatch { filename, algorithm } => {
                write!(f, "{} mismatch for {}", algorithm, filename)
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationReport {
    pub rows: usize,
    pub rehashed: usize,
    pub issues: Vec<VerificationIssue>,
}

impl VerificationReport {
    pub fn passed(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Verifies the register at `csv_path`, re-hashing against `source_dir` if given.
///
/// Only a register that cannot be opened or parsed as CSV is an error;
/// everything else is collected as issues.
pub fn verify_register(csv_path: &Path, source_dir: Option<&Path>) -> Result<VerificationReport> {
    let file = File::open(csv_path)?;
    let report = verify_reader(file, source_dir)?;
    info!(
        path = %csv_path.display(),
        rows = report.rows,
        issues = report.issues.len(),
        "Register verification finished"
    );
    Ok(report)
}

pub fn verify_reader<R: Read>(input: R, source_dir: Option<&Path>) -> Result<VerificationReport> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);
    let mut report = VerificationReport::default();

    let header = reader.headers()?.clone();
    if header.iter().ne(COLUMNS.iter().copied()) {
        report.issues.push(VerificationIssue::HeaderMismatch {
            found: header.iter().map(str::to_string).collect(),
        });
    }

    let source = source_dir.map(|dir| DirectorySource::new(dir, "*"));
    let mut seen = SeenColumns::default();
    let mut previous: Option<i64> = None;

    for row in reader.records() {
        let row = row?;
        report.rows += 1;
        let line = row.position().map_or(report.rows as u64 + 1, |p| p.line());

        if row.len() != COLUMNS.len() {
            report.issues.push(VerificationIssue::FieldCount { line, got: row.len() });
            continue;
        }

        check_row(&row, line, &mut seen, &mut previous, &mut report.issues);

        if let Some(source) = &source {
            if rehash_row(source, &row, &mut report.issues) {
                report.rehashed += 1;
            }
        }
    }

    debug!(rows = report.rows, "Verified register rows");
    Ok(report)
}

#[derive(Default)]
struct SeenColumns {
    evid_ids: HashSet<i64>,
    filenames: HashSet<String>,
    ids: HashSet<String>,
    file_numbers: HashSet<String>,
}

fn field(row: &StringRecord, column: usize) -> &str {
    row.get(column).unwrap_or_default()
}

fn check_row(
    row: &StringRecord,
    line: u64,
    seen: &mut SeenColumns,
    previous: &mut Option<i64>,
    issues: &mut Vec<VerificationIssue>,
) {
    let raw_evid = field(row, 0);
    match raw_evid.trim().parse::<i64>() {
        Ok(evid_id) => {
            if let Some(prev) = *previous {
                if evid_id <= prev {
                    issues.push(VerificationIssue::OutOfOrder { line, previous: prev, current: evid_id });
                }
            }
            if !seen.evid_ids.insert(evid_id) {
                issues.push(duplicate(line, 0, raw_evid));
            }
            *previous = Some(evid_id);
        }
        Err(_) => issues.push(VerificationIssue::InvalidEvidId {
            line,
            value: raw_evid.to_string(),
        }),
    }

    let unique = [
        (1, &mut seen.filenames),
        (13, &mut seen.ids),
        (14, &mut seen.file_numbers),
    ];
    for (column, set) in unique {
        let value = field(row, column);
        if !set.insert(value.to_string()) {
            issues.push(duplicate(line, column, value));
        }
    }

    let category = field(row, 10);
    if category.parse::<Category>().is_err() {
        issues.push(VerificationIssue::UnknownCategory {
            line,
            value: category.to_string(),
        });
    }
}

fn duplicate(line: u64, column: usize, value: &str) -> VerificationIssue {
    VerificationIssue::Duplicate {
        line,
        column: COLUMNS[column].to_string(),
        value: value.to_string(),
    }
}

/// Re-hashes the file a row names; true when both digests were compared.
fn rehash_row(source: &DirectorySource, row: &StringRecord, issues: &mut Vec<VerificationIssue>) -> bool {
    let filename = field(row, 1);
    if !is_plain_file_name(filename) {
        warn!(%filename, "Refusing to re-hash a path outside the source directory");
        issues.push(VerificationIssue::UnsafeFilename {
            filename: filename.to_string(),
        });
        return false;
    }
    let path = source.dir().join(filename);
    let hashes = match source.open(&path).and_then(|r| hash_content(r, DEFAULT_CHUNK_SIZE)) {
        Ok(hashes) => hashes,
        Err(e) => {
            warn!(%filename, "Cannot re-hash source file: {}", e);
            issues.push(VerificationIssue::MissingSource {
                filename: filename.to_string(),
            });
            return false;
        }
    };

    for (algorithm, column, actual) in [("SHA256", 8, &hashes.sha256), ("SHA512", 9, &hashes.sha512)] {
        if !field(row, column).eq_ignore_ascii_case(actual) {
            issues.push(VerificationIssue::HashMismatch {
                filename: filename.to_string(),
                algorithm: algorithm.to_string(),
            });
        }
    }
    true
}

/// True for a single normal path component such as `a.pdf`.
fn is_plain_file_name(filename: &str) -> bool {
    let mut components = Path::new(filename).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
