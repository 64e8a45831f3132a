//! Report generation for the evidence register
//! Register serialization, row narratives, and the end-of-run summary.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub mod summary;
pub mod writer;

pub use summary::generate_summary;
pub use writer::{render_register, write_register, write_to_path};

/// Run report output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    PlainText,
    Json,
}

/// A file the validator refused, and why
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectionEntry {
    pub filename: String,
    pub reason: String,
}

/// End-of-run counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub generated_at: String,
    pub total_candidates: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub warnings: usize,
    pub rejections: Vec<RejectionEntry>,
    pub output: Option<PathBuf>,
}

impl RunReport {
    pub fn new(total_candidates: usize, accepted: usize, rejections: Vec<RejectionEntry>, warnings: usize) -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339(),
            total_candidates,
            accepted,
            rejected: rejections.len(),
            warnings,
            rejections,
            output: None,
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn render(&self, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::PlainText => Ok(self.to_text()),
            ReportFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }

    pub fn write(&self, path: &Path, format: ReportFormat) -> Result<()> {
        fs::write(path, self.render(format)?)?;
        Ok(())
    }

    fn to_text(&self) -> String {
        let mut content = String::new();
        content.push_str("Evidence Register Run Report\n");
        content.push_str("============================\n\n");
        content.push_str(&format!("Generated: {}\n", self.generated_at));
        if let Some(output) = &self.output {
            content.push_str(&format!("Output: {}\n", output.display()));
        }
        content.push('\n');

        content.push_str("Summary:\n");
        content.push_str(&format!("- Candidates: {}\n", self.total_candidates));
        content.push_str(&format!("- Accepted: {}\n", self.accepted));
        content.push_str(&format!("- Rejected: {}\n", self.rejected));
        content.push_str(&format!("- Warnings: {}\n", self.warnings));

        if !self.rejections.is_empty() {
            content.push_str("\nRejections:\n");
            content.push_str("-----------\n");
            for entry in &self.rejections {
                content.push_str(&format!("{}: {}\n", entry.filename, entry.reason));
            }
        }
        content
    }
}
