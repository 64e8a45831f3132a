//! Hashing subsystem for the evidence register
//! Streams document content once and produces both SHA-256 and SHA-512
//! fingerprints.

pub mod handler;

pub use handler::{hash_bytes, hash_content, ContentHashes, DEFAULT_CHUNK_SIZE};
