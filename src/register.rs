//! Evidence register orchestration
//!
//! For each candidate file, in enumeration order: assign identifiers, extract
//! fields, hash, assemble, validate, then either store the row or record the
//! rejection. A problem with one file never stops the run.

use std::path::Path;

use tracing::{info, instrument};

use crate::assembler::{assemble_record, summarize_record, IdTriple, RowInputs};
use crate::config::{RegisterConfig, MAX_IDENTIFIER};
use crate::error::{Error, Rejection, Result};
use crate::events::{EventSink, RegisterEvent, Stage, TracingSink};
use crate::hash::{hash_content, ContentHashes};
use crate::metadata::{file_size_kb, modified_timestamp, FilenameFields};
use crate::report::{render_register, write_to_path, RejectionEntry, RunReport};
use crate::source::{file_name_of, EvidenceSource};
use crate::types::EvidenceRecord;
use crate::validation::IdentifierSets;

/// Hands out `base + N` identifiers for the Nth candidate (1-indexed).
///
/// No identifier exceeds `MAX_IDENTIFIER`.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    evid_id_base: u64,
    id_base: u64,
    file_number_base: u64,
    issued: u64,
}

impl IdAllocator {
    pub fn new(config: &RegisterConfig) -> Self {
        Self {
            evid_id_base: config.evid_id_base,
            id_base: config.id_base,
            file_number_base: config.file_number_base,
            issued: 0,
        }
    }

    pub fn next_ids(&mut self) -> Result<IdTriple> {
        let n = self.issued + 1;
        let ids = IdTriple {
            evid_id: offset("evid_id_base", self.evid_id_base, n)?,
            id: offset("id_base", self.id_base, n)?,
            file_number: offset("file_number_base", self.file_number_base, n)?,
        };
        self.issued = n;
        Ok(ids)
    }

    pub fn issued(&self) -> u64 {
        self.issued
    }

    /// How many more triples can be issued
    pub fn remaining(&self) -> u64 {
        [self.evid_id_base, self.id_base, self.file_number_base]
            .into_iter()
            .map(|base| MAX_IDENTIFIER.saturating_sub(base).saturating_sub(self.issued))
            .min()
            .unwrap_or(0)
    }
}

fn offset(name: &str, base: u64, n: u64) -> Result<u64> {
    base.checked_add(n)
        .filter(|id| *id <= MAX_IDENTIFIER)
        .ok_or_else(|| {
            Error::InvalidConfiguration(format!("{} {} has no room for identifier #{}", name, base, n))
        })
}

/// What happened to one candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    Accepted { evid_id: u64 },
    Rejected(Rejection),
}

impl ProcessOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ProcessOutcome::Accepted { .. })
    }
}

/// Owner of the accepted rows and the identifiers they have claimed
pub struct EvidenceRegister<S: EventSink = TracingSink> {
    config: RegisterConfig,
    allocator: IdAllocator,
    identifiers: IdentifierSets,
    records: Vec<EvidenceRecord>,
    rejections: Vec<RejectionEntry>,
    candidates: usize,
    warnings: usize,
    sink: S,
}

impl EvidenceRegister<TracingSink> {
    pub fn new(config: RegisterConfig) -> Self {
        Self::with_sink(config, TracingSink)
    }
}

impl<S: EventSink> EvidenceRegister<S> {
    pub fn with_sink(config: RegisterConfig, sink: S) -> Self {
        Self {
            allocator: IdAllocator::new(&config),
            config,
            identifiers: IdentifierSets::new(),
            records: Vec::new(),
            rejections: Vec::new(),
            candidates: 0,
            warnings: 0,
            sink,
        }
    }

    /// Processes every candidate the source offers and returns the run report.
    ///
    /// Only a failure to enumerate candidates, or identifier bases with too
    /// little room for them, is returned as an error. Nothing is processed in
    /// either case.
    pub fn process_all(&mut self, source: &dyn EvidenceSource) -> Result<RunReport> {
        let paths = source.candidates()?;
        if (paths.len() as u64) > self.allocator.remaining() {
            return Err(Error::InvalidConfiguration(format!(
                "identifier bases leave room for {} files, found {}",
                self.allocator.remaining(),
                paths.len()
            )));
        }
        self.sink.emit(RegisterEvent::RunStarted { candidates: paths.len() });

        for path in &paths {
            self.process_file(source, path)?;
        }

        self.sink.emit(RegisterEvent::RunFinished {
            accepted: self.records.len(),
            rejected: self.rejections.len(),
        });
        Ok(self.report())
    }

    /// Processes one file under the next identifier triple.
    ///
    /// Fails only when the identifier space is exhausted.
    #[instrument(skip(self, source, path), fields(path = %path.display()))]
    pub fn process_file(&mut self, source: &dyn EvidenceSource, path: &Path) -> Result<ProcessOutcome> {
        let ids = self.allocator.next_ids()?;
        let filename = file_name_of(path);
        self.sink.emit(RegisterEvent::FileStarted { filename: filename.clone() });

        self.stage(&filename, Stage::Metadata);
        let (size_kb, modified) = match source.facts(path) {
            Ok(facts) => (file_size_kb(&facts), modified_timestamp(&facts)),
            Err(e) => {
                self.warn(&filename, format!("Could not read file metadata for {}: {}", path.display(), e));
                (0, String::new())
            }
        };

        self.stage(&filename, Stage::Hashing);
        let hashes = self.hash_file(source, path, &filename);

        self.stage(&filename, Stage::Categorizing);
        let fields = FilenameFields::parse(&filename);

        self.stage(&filename, Stage::Assembling);
        let record = assemble_record(RowInputs {
            filename: filename.clone(),
            fields,
            size_kb,
            modified,
            hashes,
            storage_path: self.config.storage_path.clone(),
            ids,
        });

        self.stage(&filename, Stage::Summarizing);
        let record = summarize_record(record);

        Ok(self.submit(record))
    }

    /// Validates a finished row and stores it if it passes.
    pub fn submit(&mut self, record: EvidenceRecord) -> ProcessOutcome {
        self.candidates += 1;
        let filename = record.filename.clone();
        self.stage(&filename, Stage::Validating);

        match self.identifiers.validate(&record.fields()) {
            Ok(_) => {
                let evid_id = record.evid_id;
                self.records.push(record);
                self.sink.emit(RegisterEvent::Accepted { filename, evid_id });
                ProcessOutcome::Accepted { evid_id }
            }
            Err(rejection) => {
                self.rejections.push(RejectionEntry {
                    filename: filename.clone(),
                    reason: rejection.to_string(),
                });
                self.sink.emit(RegisterEvent::Rejected {
                    filename,
                    reason: rejection.to_string(),
                });
                ProcessOutcome::Rejected(rejection)
            }
        }
    }

    fn hash_file(&mut self, source: &dyn EvidenceSource, path: &Path, filename: &str) -> ContentHashes {
        let chunk_size = self.config.chunk_size;
        let result = source
            .open(path)
            .and_then(|reader| hash_content(reader, chunk_size));
        match result {
            Ok(hashes) => hashes,
            Err(e) => {
                self.warn(filename, format!("Could not compute hashes for {}: {}", path.display(), e));
                ContentHashes::empty()
            }
        }
    }

    fn stage(&mut self, filename: &str, stage: Stage) {
        self.sink.emit(RegisterEvent::StageEntered {
            filename: filename.to_string(),
            stage,
        });
    }

    fn warn(&mut self, filename: &str, message: String) {
        self.warnings += 1;
        self.sink.emit(RegisterEvent::Warning {
            filename: filename.to_string(),
            message,
        });
    }

    /// Accepted rows, in acceptance order
    pub fn records(&self) -> &[EvidenceRecord] {
        &self.records
    }

    pub fn rejections(&self) -> &[RejectionEntry] {
        &self.rejections
    }

    pub fn config(&self) -> &RegisterConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn report(&self) -> RunReport {
        RunReport::new(self.candidates, self.records.len(), self.rejections.clone(), self.warnings)
    }

    /// The register as CSV bytes
    pub fn render(&self) -> Result<Vec<u8>> {
        render_register(&self.records)
    }

    pub fn write_csv(&self, path: &Path) -> Result<usize> {
        let rows = write_to_path(&self.records, path)?;
        info!(
            rows,
            columns = crate::types::COLUMNS.len(),
            "Rows sorted by ascending EVID ID"
        );
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::CollectingSink;
    use crate::metadata::FileFacts;
    use std::collections::BTreeMap;
    use std::io::{self, Cursor, Read};
    use std::path::PathBuf;
    use std::time::{Duration, SystemTime};

    /// In-memory source; a `None` body makes `open` fail.
    #[derive(Default)]
    struct MemorySource {
        files: BTreeMap<PathBuf, Option<Vec<u8>>>,
        facts_fail: bool,
    }

    impl MemorySource {
        fn with(mut self, name: &str, body: Option<&[u8]>) -> Self {
            self.files.insert(PathBuf::from(name), body.map(|b| b.to_vec()));
            self
        }
    }

    impl EvidenceSource for MemorySource {
        fn candidates(&self) -> Result<Vec<PathBuf>> {
            Ok(self.files.keys().cloned().collect())
        }

        fn open(&self, path: &Path) -> io::Result<Box<dyn Read + '_>> {
            match self.files.get(path) {
                Some(Some(body)) => Ok(Box::new(Cursor::new(body.as_slice()))),
                _ => Err(io::Error::new(io::ErrorKind::PermissionDenied, "locked")),
            }
        }

        fn facts(&self, path: &Path) -> io::Result<FileFacts> {
            if self.facts_fail {
                return Err(io::Error::new(io::ErrorKind::Other, "stat failed"));
            }
            let len = self.files.get(path).and_then(|b| b.as_ref()).map_or(0, |b| b.len() as u64);
            Ok(FileFacts {
                len,
                modified: Some(SystemTime::UNIX_EPOCH + Duration::from_secs(1_729_000_000)),
            })
        }
    }

    fn register() -> EvidenceRegister<CollectingSink> {
        EvidenceRegister::with_sink(RegisterConfig::default(), CollectingSink::new())
    }

    #[test]
    fn test_allocator_sequence() {
        let mut allocator = IdAllocator::new(&RegisterConfig::default());
        assert_eq!(
            allocator.next_ids().unwrap(),
            IdTriple { evid_id: 100001, id: 200001, file_number: 5001 }
        );
        assert_eq!(
            allocator.next_ids().unwrap(),
            IdTriple { evid_id: 100002, id: 200002, file_number: 5002 }
        );
        assert_eq!(allocator.issued(), 2);
    }

    #[test]
    fn test_allocator_stops_at_identifier_limit() {
        let config = RegisterConfig {
            file_number_base: MAX_IDENTIFIER - 2,
            ..RegisterConfig::default()
        };
        let mut allocator = IdAllocator::new(&config);
        assert_eq!(allocator.remaining(), 2);
        allocator.next_ids().unwrap();
        assert_eq!(allocator.next_ids().unwrap().file_number, MAX_IDENTIFIER);
        assert_eq!(allocator.remaining(), 0);

        let err = allocator.next_ids().unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(ref m) if m.contains("file_number_base")));
        assert_eq!(allocator.issued(), 2);

        // bases that skip validation still never wrap
        let config = RegisterConfig {
            evid_id_base: u64::MAX,
            ..RegisterConfig::default()
        };
        let mut allocator = IdAllocator::new(&config);
        assert_eq!(allocator.remaining(), 0);
        assert!(allocator.next_ids().is_err());
    }

    #[test]
    fn test_process_all_refuses_batch_larger_than_identifier_room() {
        let config = RegisterConfig {
            evid_id_base: MAX_IDENTIFIER - 1,
            ..RegisterConfig::default()
        };
        let source = MemorySource::default()
            .with("a.pdf", Some(b"a"))
            .with("b.pdf", Some(b"b"));
        let mut register = EvidenceRegister::with_sink(config, CollectingSink::new());

        let err = register.process_all(&source).unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
        assert!(register.records().is_empty());
        assert!(register.sink().events.is_empty());
    }

    #[test]
    fn test_process_all_accepts_each_file() {
        let source = MemorySource::default()
            .with("241016 - Contract Agreement.pdf", Some(b"lease"))
            .with("250225 - Receipt - test@example.com.pdf", Some(b"receipt"));
        let mut register = register();
        let report = register.process_all(&source).unwrap();

        assert_eq!(report.total_candidates, 2);
        assert_eq!(report.accepted, 2);
        assert_eq!(report.rejected, 0);

        let records = register.records();
        assert_eq!(records[0].evid_id, 100001);
        assert_eq!(records[0].storage_path, "Root");
        assert_eq!(records[1].message_id, "test@example.com");
        assert_eq!(records[1].file_number, 5002);
    }

    #[test]
    fn test_hash_failure_is_non_fatal() {
        let source = MemorySource::default()
            .with("a.pdf", None)
            .with("b.pdf", Some(b"fine"));
        let mut register = register();
        let report = register.process_all(&source).unwrap();

        assert_eq!(report.accepted, 2);
        assert_eq!(report.warnings, 1);
        let records = register.records();
        assert_eq!(records[0].sha256, "");
        assert_eq!(records[0].sha512, "");
        assert!(!records[0].ocr_summary.contains("SHA256 hash"));
        assert_eq!(records[1].sha256.len(), 64);
        assert!(register.sink().warnings().any(|w| w.contains("Could not compute hashes")));
    }

    #[test]
    fn test_metadata_failure_defaults_fields() {
        let mut source = MemorySource::default().with("a.pdf", Some(b"content"));
        source.facts_fail = true;
        let mut register = register();
        register.process_all(&source).unwrap();

        let record = &register.records()[0];
        assert_eq!(record.size_kb, 0);
        assert_eq!(record.modified_a, "");
        assert_eq!(record.modified_b, "");
        assert_eq!(register.report().warnings, 1);
    }

    #[test]
    fn test_duplicate_submission_is_rejected_and_reported() {
        let source = MemorySource::default().with("a.pdf", Some(b"x"));
        let mut register = register();
        register.process_all(&source).unwrap();

        let duplicate = register.records()[0].clone();
        let outcome = register.submit(duplicate);
        match outcome {
            ProcessOutcome::Rejected(reason) => {
                assert!(reason.to_string().contains("Duplicate EVID ID"));
            }
            other => panic!("expected rejection, got {:?}", other),
        }

        assert_eq!(register.records().len(), 1);
        let report = register.report();
        assert_eq!(report.total_candidates, 2);
        assert_eq!(report.rejected, 1);
        assert_eq!(report.rejections[0].filename, "a.pdf");
        assert!(register
            .sink()
            .events
            .iter()
            .any(|e| matches!(e, RegisterEvent::Rejected { .. })));
    }

    #[test]
    fn test_rejected_file_does_not_stop_later_files() {
        let mut register = register();
        let source = MemorySource::default().with("a.pdf", Some(b"x"));
        register.process_all(&source).unwrap();

        // same filename again under fresh identifiers
        let outcome = register.process_file(&source, Path::new("a.pdf")).unwrap();
        assert_eq!(
            outcome,
            ProcessOutcome::Rejected(Rejection::DuplicateFilename("a.pdf".into()))
        );

        let other = MemorySource::default().with("b.pdf", Some(b"y"));
        let outcome = register.process_file(&other, Path::new("b.pdf")).unwrap();
        assert_eq!(outcome, ProcessOutcome::Accepted { evid_id: 100003 });
        assert_eq!(register.records().len(), 2);
    }

    #[test]
    fn test_events_in_stage_order() {
        let source = MemorySource::default().with("a.pdf", Some(b"x"));
        let mut register = register();
        register.process_all(&source).unwrap();

        let stages: Vec<Stage> = register
            .sink()
            .events
            .iter()
            .filter_map(|e| match e {
                RegisterEvent::StageEntered { stage, .. } => Some(*stage),
                _ => None,
            })
            .collect();
        assert_eq!(
            stages,
            vec![
                Stage::Metadata,
                Stage::Hashing,
                Stage::Categorizing,
                Stage::Assembling,
                Stage::Summarizing,
                Stage::Validating,
            ]
        );
        assert!(matches!(register.sink().events.first(), Some(RegisterEvent::RunStarted { candidates: 1 })));
        assert!(matches!(
            register.sink().events.last(),
            Some(RegisterEvent::RunFinished { accepted: 1, rejected: 0 })
        ));
    }
}
