//! Progress notifications emitted by the register
//!
//! The register reports what happens to each file as `RegisterEvent`s. How
//! they reach a human is up to the sink: `TracingSink` turns them into log
//! records, `CollectingSink` keeps them for later inspection.

use std::fmt;

use tracing::{debug, info, warn};

/// Per-file processing step, in the order the register runs them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Metadata,
    Hashing,
    Categorizing,
    Assembling,
    Summarizing,
    Validating,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Metadata => write!(f, "Collecting metadata"),
            Stage::Hashing => write!(f, "Computing cryptographic hashes"),
            Stage::Categorizing => write!(f, "Determining file category"),
            Stage::Assembling => write!(f, "Verifying critical values"),
            Stage::Summarizing => write!(f, "Generating legal summary"),
            Stage::Validating => write!(f, "Validating row format and compliance"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterEvent {
    RunStarted { candidates: usize },
    FileStarted { filename: String },
    StageEntered { filename: String, stage: Stage },
    Warning { filename: String, message: String },
    Accepted { filename: String, evid_id: u64 },
    Rejected { filename: String, reason: String },
    RunFinished { accepted: usize, rejected: usize },
}

/// Receiver of register notifications
pub trait EventSink {
    fn emit(&mut self, event: RegisterEvent);
}

/// Renders events as `tracing` records
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&mut self, event: RegisterEvent) {
        match event {
            RegisterEvent::RunStarted { candidates } => {
                info!(candidates, "Found {} documents to process", candidates);
            }
            RegisterEvent::FileStarted { filename } => info!(%filename, "Processing"),
            RegisterEvent::StageEntered { filename, stage } => debug!(%filename, "{}", stage),
            RegisterEvent::Warning { filename, message } => warn!(%filename, "{}", message),
            RegisterEvent::Accepted { filename, evid_id } => {
                info!(%filename, evid_id, "Validation passed: row compliant and ready");
            }
            RegisterEvent::Rejected { filename, reason } => {
                warn!(%filename, %reason, "Validation failed");
            }
            RegisterEvent::RunFinished { accepted, rejected } => {
                info!(accepted, rejected, "Processing complete");
            }
        }
    }
}

/// Keeps every event in arrival order
#[derive(Debug, Default, Clone)]
pub struct CollectingSink {
    pub events: Vec<RegisterEvent>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.events.iter().filter_map(|event| match event {
            RegisterEvent::Warning { message, .. } => Some(message.as_str()),
            _ => None,
        })
    }
}

impl EventSink for CollectingSink {
    fn emit(&mut self, event: RegisterEvent) {
        self.events.push(event);
    }
}
