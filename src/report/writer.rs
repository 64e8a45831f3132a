//! RFC4180 register writer

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use csv::{QuoteStyle, Terminator, WriterBuilder};
use tracing::{debug, info};

use crate::error::Result;
use crate::types::{EvidenceRecord, COLUMNS};

/// Writes the header and one row per record, ordered by ascending `EVID ID`.
///
/// The sort is stable and does not reorder `records`. Fields are quoted only
/// when they contain a delimiter, quote, or line break; every line ends in
/// `\n`. Returns the number of data rows written.
pub fn write_register<W: Write>(records: &[EvidenceRecord], out: W) -> Result<usize> {
    let mut sorted: Vec<&EvidenceRecord> = records.iter().collect();
    sorted.sort_by_key(|record| record.evid_id);

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(out);

    writer.write_record(COLUMNS)?;
    for record in &sorted {
        writer.write_record(record.to_row())?;
    }
    writer.flush()?;

    debug!(rows = sorted.len(), "Serialized register");
    Ok(sorted.len())
}

/// Renders the register into memory
pub fn render_register(records: &[EvidenceRecord]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_register(records, &mut buf)?;
    Ok(buf)
}

/// Creates or overwrites `path` with the register
pub fn write_to_path(records: &[EvidenceRecord], path: &Path) -> Result<usize> {
    let file = File::create(path)?;
    let rows = write_register(records, BufWriter::new(file))?;
    info!(path = %path.display(), rows, "Wrote evidence register");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    fn record(evid_id: u64, filename: &str) -> EvidenceRecord {
        EvidenceRecord {
            evid_id,
            filename: filename.into(),
            date: String::new(),
            subject: "s".into(),
            message_id: String::new(),
            domain: String::new(),
            email: String::new(),
            size_kb: 1,
            sha256: String::new(),
            sha512: String::new(),
            category: Category::Document,
            raw_url: String::new(),
            storage_path: "Root".into(),
            id: evid_id + 100_000,
            file_number: evid_id - 95_000,
            modified_a: String::new(),
            modified_b: String::new(),
            ocr_summary: "a; b".into(),
        }
    }

    #[test]
    fn test_header_only_when_empty() {
        let out = String::from_utf8(render_register(&[]).unwrap()).unwrap();
        assert_eq!(out, format!("{}\n", COLUMNS.join(",")));
    }

    #[test]
    fn test_rows_sorted_by_evid_id() {
        let records = vec![record(100003, "c.pdf"), record(100001, "a.pdf"), record(100002, "b.pdf")];
        let out = String::from_utf8(render_register(&records).unwrap()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("100001,a.pdf,"));
        assert!(lines[2].starts_with("100002,b.pdf,"));
        assert!(lines[3].starts_with("100003,c.pdf,"));
        assert_eq!(records[0].evid_id, 100003);
    }

    #[test]
    fn test_minimal_quoting() {
        let mut tricky = record(100001, "Receipt, \"final\".pdf");
        tricky.subject = "line one\nline two".into();
        let out = String::from_utf8(render_register(&[tricky]).unwrap()).unwrap();
        assert!(out.contains("\"Receipt, \"\"final\"\".pdf\""));
        assert!(out.contains("\"line one\nline two\""));
        // no delimiter, no quotes
        assert!(out.contains(",Root,"));
        assert!(!out.contains('\r'));
    }
}
