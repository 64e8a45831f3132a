//! Filesystem-derived fields: size and modification time

use std::time::SystemTime;

use chrono::{DateTime, Local};

/// The two facts the register reads from file metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFacts {
    pub len: u64,
    pub modified: Option<SystemTime>,
}

impl From<&std::fs::Metadata> for FileFacts {
    fn from(meta: &std::fs::Metadata) -> Self {
        Self {
            len: meta.len(),
            modified: meta.modified().ok(),
        }
    }
}

/// Size in whole kilobytes, rounded half away from zero (`f64::round`).
pub fn file_size_kb(facts: &FileFacts) -> u64 {
    (facts.len as f64 / 1024.0).round() as u64
}

/// Local modification time as `YYYY-MM-DDTHH:MM:SS`, or empty if unknown.
pub fn modified_timestamp(facts: &FileFacts) -> String {
    facts
        .modified
        .map(format_local_timestamp)
        .unwrap_or_default()
}

pub fn format_local_timestamp(time: SystemTime) -> String {
    let local: DateTime<Local> = time.into();
    local.format("%Y-%m-%dT%H:%M:%S").to_string()
}
