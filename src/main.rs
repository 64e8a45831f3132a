//! Evidence Register command-line interface
//!
//! Processes every matching document in a directory and writes the
//! hash-authenticated register CSV, optionally with a run report and a
//! verification pass over the written file.

use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use clap::{Arg, ArgAction, ArgMatches, Command};
use evreg::utils::{init_logging, LogLevel};
use evreg::{
    verify_register, DirectorySource, EvidenceRegister, EvidenceSource, IdAllocator, RegisterConfig,
    ReportFormat, Result,
};
use tracing::{error, info, warn};

fn main() {
    let matches = build_cli().get_matches();

    let level = if matches.get_flag("quiet") {
        LogLevel::Error
    } else {
        matches
            .get_one::<String>("verbose")
            .and_then(|name| name.parse().ok())
            .unwrap_or_default()
    };
    init_logging(level);

    match run(&matches) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            error!("❌ {}", e);
            process::exit(1);
        }
    }
}

fn build_cli() -> Command {
    Command::new("evreg")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Evidence register for tribunals and litigation")
        .long_about(
            "Collects metadata and SHA256/SHA512 hashes for every matching document in a \
             directory and writes an RFC4180 CSV register with 18 fixed columns, one row per \
             document, sorted by EVID ID.",
        )
        .arg(
            Arg::new("directory")
                .short('d')
                .long("directory")
                .value_name("DIR")
                .default_value(".")
                .help("Directory containing evidence documents"),
        )
        .arg(
            Arg::new("pattern")
                .short('p')
                .long("pattern")
                .value_name("GLOB")
                .help("File pattern to match [default: *.pdf]"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Output CSV path [default: EVIDENCE_REGISTER_OUTPUT.csv]"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file (JSON/YAML)"),
        )
        .arg(
            Arg::new("report")
                .short('r')
                .long("report")
                .value_name("FILE")
                .help("Write a run report"),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_parser(["text", "json"])
                .default_value("text")
                .requires("report")
                .help("Run report format"),
        )
        .arg(
            Arg::new("verify")
                .long("verify")
                .action(ArgAction::SetTrue)
                .help("Verify the written register and re-hash source files"),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .action(ArgAction::SetTrue)
                .help("List the documents that would be registered without writing anything"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .value_parser(LogLevel::NAMES)
                .default_value("info")
                .help("Set logging verbosity"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Suppress all output except errors"),
        )
}

/// Returns false when verification was requested and found problems.
fn run(matches: &ArgMatches) -> Result<bool> {
    let config = load_config(matches)?;
    let directory = matches
        .get_one::<String>("directory")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let source = DirectorySource::new(&directory, config.pattern.clone());

    info!("📋 Evidence register");
    info!("   Directory: {}", directory.display());
    info!("   Pattern:   {}", config.pattern);
    info!("   Output:    {}", config.output.display());

    if matches.get_flag("dry-run") {
        dry_run(&source, &config)?;
        return Ok(true);
    }

    let start = Instant::now();
    let mut register = EvidenceRegister::new(config.clone());
    let report = register.process_all(&source)?;
    register.write_csv(&config.output)?;
    let report = report.with_output(&config.output);

    info!(
        "✅ Processing complete in {:.2?}: {} candidates, {} accepted, {} rejected",
        start.elapsed(),
        report.total_candidates,
        report.accepted,
        report.rejected
    );
    for rejection in &report.rejections {
        warn!("   Skipped {}: {}", rejection.filename, rejection.reason);
    }

    if let Some(report_path) = matches.get_one::<String>("report") {
        let format = match matches.get_one::<String>("format").map(String::as_str) {
            Some("json") => ReportFormat::Json,
            _ => ReportFormat::PlainText,
        };
        report.write(Path::new(report_path), format)?;
        info!("📊 Run report written to {}", report_path);
    }

    if matches.get_flag("verify") {
        let verification = verify_register(&config.output, Some(directory.as_path()))?;
        if verification.passed() {
            info!(
                "🔍 Verification passed: {} rows, {} files re-hashed",
                verification.rows, verification.rehashed
            );
        } else {
            for issue in &verification.issues {
                error!("   {}", issue);
            }
            error!("❌ Verification found {} problem(s)", verification.issues.len());
            return Ok(false);
        }
    }

    Ok(true)
}

fn load_config(matches: &ArgMatches) -> Result<RegisterConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => RegisterConfig::load(Path::new(path))?,
        None => RegisterConfig::default(),
    };

    if let Some(pattern) = matches.get_one::<String>("pattern") {
        config.pattern = pattern.clone();
    }
    if let Some(output) = matches.get_one::<String>("output") {
        config.output = PathBuf::from(output);
    }
    config.validate()?;
    Ok(config)
}

fn dry_run(source: &DirectorySource, config: &RegisterConfig) -> Result<()> {
    let candidates = source.candidates()?;
    info!("🔍 Dry run: {} documents would be processed", candidates.len());
    let mut allocator = IdAllocator::new(config);
    for path in &candidates {
        let ids = allocator.next_ids()?;
        info!("   EVID {} -> {}", ids.evid_id, path.display());
    }
    Ok(())
}
