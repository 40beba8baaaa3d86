//! Analysis engine: rule-correlation pass over a completed fact model
//!
//! Rules run in a fixed detection order; the resulting findings are grouped
//! into error, warning, info buckets for presentation, preserving detection
//! order inside each bucket. Both orders are user-facing contracts.

use super::findings::{Finding, FindingSeverity};
use super::rules;
use crate::config::constants::compile_time::analysis::MAX_FINDINGS;
use crate::config::runtime::AnalysisPreferences;
use crate::model::FatalErrorLog;
use crate::releases::{DatabaseError, ReleaseDatabase};
use crate::{log_debug, log_success};

/// Analysis errors; only database contract violations can surface here.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AnalysisError {
    #[error("Release database inconsistency: {0}")]
    Database(#[from] DatabaseError),
}

impl AnalysisError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            AnalysisError::Database(_) => {
                crate::logging::codes::analysis::DATABASE_INCONSISTENCY
            }
        }
    }
}

/// The analysis engine
pub struct AnalysisEngine {
    preferences: AnalysisPreferences,
}

impl AnalysisEngine {
    pub fn new() -> Self {
        Self {
            preferences: AnalysisPreferences::default(),
        }
    }

    pub fn with_preferences(preferences: AnalysisPreferences) -> Self {
        Self { preferences }
    }

    /// Run every rule against the model and return the ordered finding list.
    ///
    /// Deterministic: the same model and database always produce the same,
    /// identically ordered findings.
    pub fn analyze(
        &self,
        model: &FatalErrorLog,
        db: &ReleaseDatabase,
    ) -> Result<Vec<Finding>, AnalysisError> {
        let mut detected: Vec<Finding> = Vec::new();

        // Coverage first: missing-coverage stays visible even when the
        // data-dependent rules have nothing to say.
        self.collect(&mut detected, rules::rule_unidentified_lines(model));

        if model.has_usable_data() {
            self.collect(&mut detected, rules::rule_missing_debug_symbols(model));
            self.collect(&mut detected, rules::rule_native_out_of_memory(model));
            self.collect(&mut detected, rules::rule_heap_exceeds_physical(model));
            self.collect(&mut detected, rules::rule_low_physical_memory(model));
            self.collect(&mut detected, rules::rule_swap(model));
            self.collect(&mut detected, rules::rule_signal(model));
            self.collect(&mut detected, rules::rule_small_thread_stack(model));
            self.collect(&mut detected, rules::rule_high_thread_count(model));
            self.collect(&mut detected, rules::rule_unknown_vendor(model));
            self.collect(&mut detected, rules::rule_version_currency(model, db)?);
        } else {
            log_debug!("Skipping data-dependent rules: fact model has no usable data");
        }

        let findings = group_by_severity(detected);

        let errors = findings
            .iter()
            .filter(|f| f.severity == FindingSeverity::Error)
            .count();
        let warnings = findings
            .iter()
            .filter(|f| f.severity == FindingSeverity::Warning)
            .count();
        log_success!(
            crate::logging::codes::success::ANALYSIS_COMPLETE,
            "Analysis completed",
            "findings" => findings.len(),
            "errors" => errors,
            "warnings" => warnings
        );

        Ok(findings)
    }

    fn collect(&self, detected: &mut Vec<Finding>, finding: Option<Finding>) {
        if let Some(finding) = finding {
            if self.preferences.log_rule_evaluation {
                log_debug!("Rule fired", "key" => finding.key, "severity" => finding.severity);
            }
            if detected.len() < MAX_FINDINGS {
                detected.push(finding);
            }
        }
    }
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Stable severity grouping: error, then warning, then info, detection order
/// preserved within each group.
fn group_by_severity(detected: Vec<Finding>) -> Vec<Finding> {
    let mut grouped = Vec::with_capacity(detected.len());
    for severity in [
        FindingSeverity::Error,
        FindingSeverity::Warning,
        FindingSeverity::Info,
    ] {
        grouped.extend(detected.iter().filter(|f| f.severity == severity).cloned());
    }
    grouped
}

/// Convenience entry point with default preferences
pub fn analyze(
    model: &FatalErrorLog,
    db: &ReleaseDatabase,
) -> Result<Vec<Finding>, AnalysisError> {
    AnalysisEngine::new().analyze(model, db)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::FindingKey;
    use crate::model::CrashFrame;
    use crate::releases;

    fn model_with_unidentified_and_error() -> FatalErrorLog {
        FatalErrorLog {
            header_lines: vec!["# A fatal error has been detected".to_string()],
            unidentified_lines: vec!["???".to_string()],
            problematic_frame: Some(CrashFrame {
                marker: 'C',
                text: "[libc.so.6+0x18e6e1]".to_string(),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_severity_grouping_puts_errors_first() {
        // Detection order finds the unidentified warning before the debug
        // symbol error; presentation order puts the error bucket first.
        let findings = analyze(&model_with_unidentified_and_error(), releases::global()).unwrap();
        assert_eq!(findings[0].key, FindingKey::MissingDebugSymbols);
        assert_eq!(findings[0].severity, FindingSeverity::Error);
        assert_eq!(findings[1].key, FindingKey::UnidentifiedLines);
    }

    #[test]
    fn test_unidentified_warning_leads_without_errors() {
        let model = FatalErrorLog {
            header_lines: vec!["# banner".to_string()],
            unidentified_lines: vec!["???".to_string(); 5],
            ..Default::default()
        };
        let findings = analyze(&model, releases::global()).unwrap();
        assert_eq!(findings[0].key, FindingKey::UnidentifiedLines);
        assert_eq!(findings[0].detail.as_deref(), Some("5 line(s)"));
    }

    #[test]
    fn test_empty_model_yields_no_findings() {
        let findings = analyze(&FatalErrorLog::default(), releases::global()).unwrap();
        assert!(findings.is_empty());
    }

    #[test]
    fn test_data_rules_skipped_without_usable_data() {
        // Unidentified lines alone do not make the data usable; the debug
        // symbol rule must not run.
        let model = FatalErrorLog {
            unidentified_lines: vec!["???".to_string()],
            problematic_frame: Some(CrashFrame {
                marker: 'C',
                text: "[libc.so.6+0x18e6e1]".to_string(),
            }),
            ..Default::default()
        };
        let findings = analyze(&model, releases::global()).unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].key, FindingKey::UnidentifiedLines);
    }

    #[test]
    fn test_analyze_is_idempotent() {
        let model = model_with_unidentified_and_error();
        let first = analyze(&model, releases::global()).unwrap();
        let second = analyze(&model, releases::global()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_detection_order_within_bucket() {
        let model = FatalErrorLog {
            header_lines: vec!["# banner".to_string()],
            unidentified_lines: vec!["???".to_string()],
            // Low swap fires after the unidentified warning in detection order
            swap_total: Some(8 * 1024 * 1024 * 1024),
            swap_free: Some(1024 * 1024),
            ..Default::default()
        };
        let findings = analyze(&model, releases::global()).unwrap();
        let warning_keys: Vec<FindingKey> = findings
            .iter()
            .filter(|f| f.severity == FindingSeverity::Warning)
            .map(|f| f.key)
            .collect();
        assert_eq!(
            warning_keys,
            vec![FindingKey::UnidentifiedLines, FindingKey::LowSwapFree]
        );
    }
}
