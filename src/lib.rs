//! Evidence register for tribunal and litigation document sets
//! Derives structured metadata and content hashes for every document in a
//! directory, validates each row against the rest of the batch, and writes a
//! fixed 18-column RFC4180 CSV register.

// Configuration and errors
pub mod config;
pub mod error;
pub mod types;

// Field extraction and hashing
pub mod hash;
pub mod metadata;

// Batch pipeline
pub mod assembler;
pub mod events;
pub mod register;
pub mod source;
pub mod validation;

// Output and verification
pub mod report;
pub mod verify;

// Shared utilities
pub mod utils;

// Re-exports for crate consumers
pub use assembler::{assemble_record, summarize_record, IdTriple, RowInputs};
pub use config::RegisterConfig;
pub use error::{Error, Rejection, Result};
pub use events::{CollectingSink, EventSink, RegisterEvent, Stage, TracingSink};
pub use hash::{hash_content, ContentHashes};
pub use metadata::FilenameFields;
pub use register::{EvidenceRegister, IdAllocator, ProcessOutcome};
pub use report::{ReportFormat, RunReport};
pub use source::{DirectorySource, EvidenceSource};
pub use types::{Category, EvidenceRecord, COLUMNS};
pub use validation::IdentifierSets;
pub use verify::{verify_register, VerificationIssue, VerificationReport};
