//! Dual-digest streaming hasher

use std::io::{self, Read};

use serde::{Deserialize, Serialize};
use sha2::{Digest as ShaDigest, Sha256, Sha512};

/// Read buffer used when the caller has no preference
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

/// Lowercase hex digests of one piece of content
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentHashes {
    pub sha256: String,
    pub sha512: String,
}

impl ContentHashes {
    /// Both digests empty; stands in for content that could not be read
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.sha256.is_empty() && self.sha512.is_empty()
    }
}

/// Hashes a reader in `chunk_size` pieces, feeding both digests per chunk.
///
/// Peak memory is one chunk regardless of content length. Interrupted reads
/// are retried; any other read error aborts and is returned.
pub fn hash_content<R: Read>(mut reader: R, chunk_size: usize) -> io::Result<ContentHashes> {
    let mut buf = vec![0u8; chunk_size.max(1)];
    let mut sha256 = Sha256::new();
    let mut sha512 = Sha512::new();

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        let chunk = &buf[..n];
        sha256.update(chunk);
        sha512.update(chunk);
    }

    Ok(ContentHashes {
        sha256: hex::encode(sha256.finalize()),
        sha512: hex::encode(sha512.finalize()),
    })
}

/// Hashes an in-memory buffer
pub fn hash_bytes(data: &[u8]) -> ContentHashes {
    ContentHashes {
        sha256: hex::encode(Sha256::digest(data)),
        sha512: hex::encode(Sha512::digest(data)),
    }
}
