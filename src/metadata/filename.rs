//! Filename Field Extraction
//! Derives register fields from the structured naming convention
//! `YYMMDD - Subject - local@domain.pdf`. Every extractor is total: input that
//! does not follow the convention yields an empty value, never an error.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DATE_PREFIX: Regex = Regex::new(r"^([0-9]{2})([0-9]{2})([0-9]{2})").unwrap();
    static ref SUBJECT_DATE_PREFIX: Regex = Regex::new(r"^[0-9]{6} - ").unwrap();
    static ref SUBJECT_MESSAGE_SUFFIX: Regex = Regex::new(r" - [^-]+@[^@]+$").unwrap();
    static ref MESSAGE_ID: Regex = Regex::new(r" - ([^-]+@[^.]+(?:\.[^.]+)*?)\.pdf$").unwrap();
}

/// Reads a leading `YYMMDD` as a calendar date in 2000-2099.
///
/// Returns `YYYY-MM-DD`, or an empty string when the prefix is absent or is
/// not a real date (month 13, February 30th).
pub fn extract_date(filename: &str) -> String {
    let Some(caps) = DATE_PREFIX.captures(filename) else {
        return String::new();
    };
    let part = |i: usize| caps[i].parse::<u32>().ok();
    let (Some(yy), Some(mm), Some(dd)) = (part(1), part(2), part(3)) else {
        return String::new();
    };

    NaiveDate::from_ymd_opt(2000 + yy as i32, mm, dd)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Subject text between the optional date prefix and message-id suffix.
pub fn extract_subject(filename: &str) -> String {
    let stem = match filename.rsplit_once('.') {
        Some((stem, _ext)) => stem,
        None => filename,
    };
    let without_date = SUBJECT_DATE_PREFIX.replace(stem, "");
    let without_suffix = SUBJECT_MESSAGE_SUFFIX.replace(&without_date, "");
    without_suffix.trim().to_string()
}

/// Message id captured from a trailing ` - local@domain.pdf` segment.
///
/// The value is returned as found: case is preserved and it is not checked
/// against any address grammar.
pub fn extract_message_id(filename: &str) -> String {
    MESSAGE_ID
        .captures(filename)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// Splits a message id into `(domain, email)`.
///
/// The domain is everything after the final `@`; the email is the whole id.
/// Both are empty when the id is empty or has no `@`.
pub fn extract_domain_and_email(message_id: &str) -> (String, String) {
    match message_id.rsplit_once('@') {
        Some((_local, domain)) => (domain.trim().to_string(), message_id.trim().to_string()),
        None => (String::new(), String::new()),
    }
}
