//! Row assembly
//! Combines extracted fields, file facts, hashes, and assigned identifiers
//! into an `EvidenceRecord`, then writes its narrative once every other
//! field is final.

use crate::hash::ContentHashes;
use crate::metadata::FilenameFields;
use crate::report::generate_summary;
use crate::types::EvidenceRecord;

/// The three identifiers the register assigns to each candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdTriple {
    pub evid_id: u64,
    pub id: u64,
    pub file_number: u64,
}

/// Inputs to one row, gathered before assembly
#[derive(Debug, Clone)]
pub struct RowInputs {
    pub filename: String,
    pub fields: FilenameFields,
    pub size_kb: u64,
    pub modified: String,
    pub hashes: ContentHashes,
    pub storage_path: String,
    pub ids: IdTriple,
}

/// Builds the row; the narrative column is left empty.
pub fn assemble_record(inputs: RowInputs) -> EvidenceRecord {
    let RowInputs {
        filename,
        fields,
        size_kb,
        modified,
        hashes,
        storage_path,
        ids,
    } = inputs;

    EvidenceRecord {
        evid_id: ids.evid_id,
        filename,
        date: fields.date,
        subject: fields.subject,
        message_id: fields.message_id,
        domain: fields.domain,
        email: fields.email,
        size_kb,
        sha256: hashes.sha256,
        sha512: hashes.sha512,
        category: fields.category,
        raw_url: String::new(),
        storage_path,
        id: ids.id,
        file_number: ids.file_number,
        modified_a: modified.clone(),
        modified_b: modified,
        ocr_summary: String::new(),
    }
}

/// Fills the narrative column from the row's other fields.
pub fn summarize_record(mut record: EvidenceRecord) -> EvidenceRecord {
    record.ocr_summary = generate_summary(&record);
    record
}
