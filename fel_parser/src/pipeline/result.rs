//! Pipeline result and stats

use crate::analysis::{Finding, FindingSeverity};
use crate::classification::ClassificationMetrics;
use crate::file_processor::FileMetadata;
use crate::model::FatalErrorLog;
use crate::log_success;
use std::time::Duration;

/// The completed triage of one crash log
#[derive(Debug)]
pub struct TriageResult {
    /// The fact model, findings attached
    pub log: FatalErrorLog,
    /// File-level metadata from ingestion
    pub file_metadata: FileMetadata,
    /// Classification pass metrics
    pub classification_metrics: ClassificationMetrics,
    /// Wall-clock duration of the full pipeline
    pub total_duration: Duration,
}

impl TriageResult {
    /// Findings of one severity, presentation order preserved
    pub fn findings_with_severity(&self, severity: FindingSeverity) -> Vec<&Finding> {
        self.log
            .findings
            .iter()
            .filter(|f| f.severity == severity)
            .collect()
    }

    pub fn error_count(&self) -> usize {
        self.findings_with_severity(FindingSeverity::Error).len()
    }

    pub fn warning_count(&self) -> usize {
        self.findings_with_severity(FindingSeverity::Warning).len()
    }

    pub fn info_count(&self) -> usize {
        self.findings_with_severity(FindingSeverity::Info).len()
    }

    /// Log a completion summary for the whole pipeline run
    pub fn log_success(&self, file_path: &str) {
        let duration_str = format!("{:.2}", self.total_duration.as_secs_f64() * 1000.0);
        log_success!(
            crate::logging::codes::success::OPERATION_COMPLETED_SUCCESSFULLY,
            "Crash log triage completed",
            "file" => file_path,
            "records" => self.log.record_count,
            "findings" => self.log.findings.len(),
            "errors" => self.error_count(),
            "warnings" => self.warning_count(),
            "duration_ms" => duration_str
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::FindingKey;
    use std::path::PathBuf;

    fn dummy_result(findings: Vec<Finding>) -> TriageResult {
        TriageResult {
            log: FatalErrorLog {
                findings,
                ..Default::default()
            },
            file_metadata: FileMetadata {
                path: PathBuf::from("hs_err_pid1.log"),
                size: 10,
                line_count: 1,
                is_hs_err_name: true,
                modified: None,
            },
            classification_metrics: ClassificationMetrics::default(),
            total_duration: Duration::from_millis(5),
        }
    }

    #[test]
    fn test_severity_counts() {
        let result = dummy_result(vec![
            Finding::new(FindingKey::MissingDebugSymbols),
            Finding::new(FindingKey::UnidentifiedLines),
            Finding::new(FindingKey::SwapDisabled),
        ]);
        assert_eq!(result.error_count(), 1);
        assert_eq!(result.warning_count(), 1);
        assert_eq!(result.info_count(), 1);
    }
}
