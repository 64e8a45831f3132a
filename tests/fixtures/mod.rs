use std::fs;
use std::path::{Path, PathBuf};

use filetime::FileTime;
use tempfile::TempDir;

/// 2024-10-15T13:46:40Z, pinned so rendered timestamps are reproducible
pub const FIXED_MTIME: i64 = 1_729_000_000;

pub struct EvidenceDir {
    pub dir: TempDir,
}

impl EvidenceDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `body` to `name` and pins its modification time.
    pub fn add(&self, name: &str, body: &[u8]) -> PathBuf {
        let path = self.path().join(name);
        fs::write(&path, body).expect("write evidence file");
        filetime::set_file_mtime(&path, FileTime::from_unix_time(FIXED_MTIME, 0))
            .expect("set mtime");
        path
    }

    pub fn output(&self, name: &str) -> PathBuf {
        self.path().join(name)
    }
}

/// Header and data rows of a register
pub fn read_rows(path: &Path) -> (Vec<String>, Vec<csv::StringRecord>) {
    let mut reader = csv::Reader::from_path(path).expect("open register");
    let header = reader
        .headers()
        .expect("read header")
        .iter()
        .map(str::to_string)
        .collect();
    let rows = reader.records().map(|r| r.expect("read row")).collect();
    (header, rows)
}
