//! Complete triage pipeline (file -> classification -> fold -> analysis)

mod error;
mod result;

pub use error::PipelineError;
pub use result::TriageResult;

use crate::classification::ClassificationEngine;
use crate::log_info;
use crate::model::LogBuilder;
use crate::releases;
use std::time::Instant;

/// Process a single crash log through the complete pipeline
pub fn process_file(file_path: &str) -> Result<TriageResult, PipelineError> {
    let start_time = Instant::now();

    log_info!("Starting crash log triage pipeline", "file" => file_path);

    // Stage 1: File ingestion
    let file_result = crate::file_processor::process_file(file_path)?;

    // Stage 2+3: Single pass of classification and fact model folding
    let mut engine = ClassificationEngine::new();
    let mut builder = LogBuilder::new();
    for line in file_result.lines() {
        builder.push(engine.classify_and_construct(line));
    }
    engine.log_completion();

    let mut log = builder.finish();

    // Stage 4: Analysis against the shared release database
    let findings = crate::analysis::analyze(&log, releases::global())?;
    log.findings = findings;

    let result = TriageResult {
        log,
        file_metadata: file_result.metadata,
        classification_metrics: engine.metrics().clone(),
        total_duration: start_time.elapsed(),
    };

    result.log_success(file_path);

    Ok(result)
}

/// Process crash log text already in memory (no file involved)
pub fn process_source(source: &str) -> Result<TriageResult, PipelineError> {
    let start_time = Instant::now();

    let mut engine = ClassificationEngine::new();
    let mut builder = LogBuilder::new();
    for line in source.lines() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        builder.push(engine.classify_and_construct(line));
    }

    let mut log = builder.finish();
    let findings = crate::analysis::analyze(&log, releases::global())?;
    log.findings = findings;

    Ok(TriageResult {
        log,
        file_metadata: crate::file_processor::FileMetadata {
            path: std::path::PathBuf::from("<memory>"),
            size: source.len() as u64,
            line_count: source.lines().count(),
            is_hs_err_name: false,
            modified: None,
        },
        classification_metrics: engine.metrics().clone(),
        total_duration: start_time.elapsed(),
    })
}
