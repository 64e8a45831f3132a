//! Row validation against the identifiers already in the register
//!
//! Checks run in a fixed order and stop at the first failure, so a row is
//! refused with exactly one reason. Nothing is recorded until every check has
//! passed.

use std::collections::HashSet;

use crate::error::Rejection;
use crate::types::COLUMNS;

const EVID_ID: &str = COLUMNS[0];
const FILENAME: &str = COLUMNS[1];
const ID: &str = COLUMNS[13];
const FILE_NUMBER: &str = COLUMNS[14];

/// Identifier values of every accepted row, one set per unique column
#[derive(Debug, Default, Clone)]
pub struct IdentifierSets {
    evid_ids: HashSet<i64>,
    filenames: HashSet<String>,
    ids: HashSet<i64>,
    file_numbers: HashSet<i64>,
}

/// Identifier values of a row that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admission {
    pub evid_id: i64,
    pub filename: String,
    pub id: i64,
    pub file_number: i64,
}

impl IdentifierSets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.evid_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.evid_ids.is_empty()
    }

    pub fn contains_evid_id(&self, evid_id: i64) -> bool {
        self.evid_ids.contains(&evid_id)
    }

    pub fn contains_filename(&self, filename: &str) -> bool {
        self.filenames.contains(filename)
    }

    /// Runs every check without recording anything.
    pub fn check(&self, fields: &[(&str, String)]) -> Result<Admission, Rejection> {
        let evid_id = integer_field(
            fields,
            EVID_ID,
            Rejection::MissingEvidId,
            Rejection::InvalidEvidId,
        )?;
        if self.evid_ids.contains(&evid_id) {
            return Err(Rejection::DuplicateEvidId(evid_id.to_string()));
        }

        let filename = lookup(fields, FILENAME).ok_or(Rejection::MissingFilename)?;
        if self.filenames.contains(filename) {
            return Err(Rejection::DuplicateFilename(filename.to_string()));
        }

        let id = integer_field(fields, ID, Rejection::MissingId, Rejection::InvalidId)?;
        if self.ids.contains(&id) {
            return Err(Rejection::DuplicateId(id.to_string()));
        }

        let file_number = integer_field(
            fields,
            FILE_NUMBER,
            Rejection::MissingFileNumber,
            Rejection::InvalidFileNumber,
        )?;
        if self.file_numbers.contains(&file_number) {
            return Err(Rejection::DuplicateFileNumber(file_number.to_string()));
        }

        if fields.len() != COLUMNS.len() {
            return Err(Rejection::ColumnCount { got: fields.len() });
        }

        Ok(Admission {
            evid_id,
            filename: filename.to_string(),
            id,
            file_number,
        })
    }

    /// Checks `fields` and, if they pass, records all four identifiers.
    pub fn validate(&mut self, fields: &[(&str, String)]) -> Result<Admission, Rejection> {
        let admission = self.check(fields)?;
        self.evid_ids.insert(admission.evid_id);
        self.filenames.insert(admission.filename.clone());
        self.ids.insert(admission.id);
        self.file_numbers.insert(admission.file_number);
        Ok(admission)
    }
}

/// Non-empty value of the first field named `name`
fn lookup<'a>(fields: &'a [(&str, String)], name: &str) -> Option<&'a str> {
    fields
        .iter()
        .find(|(column, _)| *column == name)
        .map(|(_, value)| value.as_str())
        .filter(|value| !value.is_empty())
}

/// Signed integer value of `name`; surrounding whitespace is ignored.
fn integer_field(
    fields: &[(&str, String)],
    name: &str,
    missing: Rejection,
    invalid: fn(String) -> Rejection,
) -> Result<i64, Rejection> {
    let raw = lookup(fields, name).ok_or(missing)?;
    raw.trim().parse::<i64>().map_err(|_| invalid(raw.to_string()))
}
