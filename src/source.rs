//! Evidence sources
//!
//! The register never touches the filesystem directly. It asks an
//! `EvidenceSource` for candidate paths, and for each path a byte stream and
//! the size/mtime facts.

use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::Result;
use crate::metadata::FileFacts;

/// Supplier of candidate files and their content
pub trait EvidenceSource {
    /// Candidate paths, in the order they are to be processed
    fn candidates(&self) -> Result<Vec<PathBuf>>;

    /// Opens `path` for streaming. The handle is dropped by the caller when
    /// it is done with the file.
    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + '_>>;

    /// Size and modification time of `path`
    fn facts(&self, path: &Path) -> io::Result<FileFacts>;
}

/// Files in one directory whose names match a glob
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
    pattern: String,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>, pattern: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            pattern: pattern.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn full_pattern(&self) -> String {
        let escaped_dir = glob::Pattern::escape(&self.dir.to_string_lossy());
        Path::new(&escaped_dir)
            .join(&self.pattern)
            .to_string_lossy()
            .into_owned()
    }
}

impl EvidenceSource for DirectorySource {
    /// Regular files matching the pattern, sorted by path.
    fn candidates(&self) -> Result<Vec<PathBuf>> {
        let pattern = self.full_pattern();
        let mut paths = Vec::new();

        for entry in glob::glob(&pattern)? {
            match entry {
                Ok(path) if path.is_file() => paths.push(path),
                Ok(path) => debug!(path = %path.display(), "Skipping non-file match"),
                Err(e) => warn!("Unreadable glob entry: {}", e),
            }
        }

        paths.sort();
        debug!(pattern = %pattern, count = paths.len(), "Enumerated candidates");
        Ok(paths)
    }

    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + '_>> {
        Ok(Box::new(BufReader::new(File::open(path)?)))
    }

    fn facts(&self, path: &Path) -> io::Result<FileFacts> {
        let meta = fs::metadata(path)?;
        Ok(FileFacts::from(&meta))
    }
}

/// File name component of a path, lossily decoded
pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
