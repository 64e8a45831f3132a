use super::Category;

/// Canonical register columns, in output order
pub const COLUMNS: [&str; 18] = [
    "EVID ID",
    "Filename",
    "Date Formatted",
    "Subject",
    "Message ID",
    "Domain",
    "Email Address",
    "File Size (KB)",
    "SHA256",
    "SHA512",
    "file_category",
    "Raw URL",
    "storage_path",
    "ID",
    "file_number",
    "Modified (A)",
    "Modified (B)",
    "Fully detail clean OCR",
];

/// One row of the evidence register.
///
/// Rows are built by the register and are not mutated once accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvidenceRecord {
    pub evid_id: u64,
    pub filename: String,
    pub date: String,
    pub subject: String,
    pub message_id: String,
    pub domain: String,
    pub email: String,
    pub size_kb: u64,
    pub sha256: String,
    pub sha512: String,
    pub category: Category,
    pub raw_url: String,
    pub storage_path: String,
    pub id: u64,
    pub file_number: u64,
    pub modified_a: String,
    pub modified_b: String,
    pub ocr_summary: String,
}

/// Named view of a row, one `(column, value)` pair per field
pub type RowFields = Vec<(&'static str, String)>;

impl EvidenceRecord {
    /// Column/value pairs in canonical order
    pub fn fields(&self) -> RowFields {
        COLUMNS.iter().copied().zip(self.to_row()).collect()
    }

    /// Values in canonical column order
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.evid_id.to_string(),
            self.filename.clone(),
            self.date.clone(),
            self.subject.clone(),
            self.message_id.clone(),
            self.domain.clone(),
            self.email.clone(),
            self.size_kb.to_string(),
            self.sha256.clone(),
            self.sha512.clone(),
            self.category.label().to_string(),
            self.raw_url.clone(),
            self.storage_path.clone(),
            self.id.to_string(),
            self.file_number.to_string(),
            self.modified_a.clone(),
            self.modified_b.clone(),
            self.ocr_summary.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EvidenceRecord {
        EvidenceRecord {
            evid_id: 100001,
            filename: "241016 - Lease.pdf".into(),
            date: "2024-10-16".into(),
            subject: "Lease".into(),
            message_id: String::new(),
            domain: String::new(),
            email: String::new(),
            size_kb: 3,
            sha256: "a".repeat(64),
            sha512: "b".repeat(128),
            category: Category::Document,
            raw_url: String::new(),
            storage_path: "Root".into(),
            id: 200001,
            file_number: 5001,
            modified_a: "2024-10-16T09:30:00".into(),
            modified_b: "2024-10-16T09:30:00".into(),
            ocr_summary: "summary".into(),
        }
    }

    #[test]
    fn test_fields_follow_column_order() {
        let fields = sample().fields();
        assert_eq!(fields.len(), COLUMNS.len());
        let names: Vec<&str> = fields.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, COLUMNS);
        assert_eq!(fields[0].1, "100001");
        assert_eq!(fields[10].1, "Document");
        assert_eq!(fields[14].1, "5001");
    }
}
