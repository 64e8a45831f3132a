//! Field extraction for register rows
//! Filename-derived fields, category classification, and file metadata.

pub mod category;
pub mod file_info;
pub mod filename;

pub use category::categorize;
pub use file_info::{file_size_kb, modified_timestamp, FileFacts};
pub use filename::{extract_date, extract_domain_and_email, extract_message_id, extract_subject};

use crate::types::Category;

/// Everything the register derives from a filename alone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameFields {
    pub date: String,
    pub subject: String,
    pub message_id: String,
    pub domain: String,
    pub email: String,
    pub category: Category,
}

impl FilenameFields {
    pub fn parse(filename: &str) -> Self {
        let date = extract_date(filename);
        let subject = extract_subject(filename);
        let message_id = extract_message_id(filename);
        let (domain, email) = extract_domain_and_email(&message_id);
        let category = categorize(filename, &subject);

        Self {
            date,
            subject,
            message_id,
            domain,
            email,
            category,
        }
    }
}
