//! "Fully detail clean OCR" narrative
//!
//! The narrative is assembled purely from the row's own fields; document
//! text is never read. Clause order is fixed so that identical rows always
//! produce identical text.

use crate::types::EvidenceRecord;

/// Separator between clauses
pub const CLAUSE_SEPARATOR: &str = "; ";

/// Closing statements appended to every narrative, in this order
pub const ATTESTATIONS: [&str; 3] = [
    "Document integrity verified through cryptographic hashing",
    "Evidence is authenticated and suitable for inclusion in legal proceedings as an exhibit",
    "Chain of custody maintained; document is legally admissible subject to tribunal rules",
];

/// Builds the summary for a row whose other 17 fields are final.
pub fn generate_summary(record: &EvidenceRecord) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(16);

    parts.push(format!("Document filename: '{}'", record.filename));
    if record.size_kb > 0 {
        parts.push(format!("File size: {} KB", record.size_kb));
    }
    if !record.date.is_empty() {
        parts.push(format!("Document date: {}", record.date));
    }
    if !record.subject.is_empty() {
        parts.push(format!("Subject: {}", record.subject));
    }
    parts.push(format!("Categorized as: {}", record.category));

    if !record.message_id.is_empty() {
        parts.push(format!("Email Message ID: {}", record.message_id));
    }
    if !record.email.is_empty() {
        parts.push(format!("Email address: {}", record.email));
    }
    if !record.domain.is_empty() {
        parts.push(format!("Email domain: {}", record.domain));
    }

    if !record.sha256.is_empty() {
        parts.push(format!("SHA256 hash: {}", record.sha256));
    }
    if !record.sha512.is_empty() {
        parts.push(format!("SHA512 hash: {}", record.sha512));
    }

    parts.push(format!("Storage location: {}", record.storage_path));
    if record.evid_id > 0 {
        parts.push(format!("Evidence ID: {}", record.evid_id));
    }
    if !record.modified_a.is_empty() {
        parts.push(format!("Last modified: {}", record.modified_a));
    }

    parts.extend(ATTESTATIONS.iter().map(|s| s.to_string()));
    parts.join(CLAUSE_SEPARATOR)
}
