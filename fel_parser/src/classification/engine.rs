//! Core classification engine
//!
//! A single-pass, stateful scanner: each line is tested against the ordered
//! catalog, first applicable entry wins, and the only state carried forward
//! is the kind of the immediately preceding record. Classification is total;
//! any line no entry claims is Unidentified.

use crate::config::constants::compile_time::classification::MAX_CLASSIFIED_LINE_LENGTH;
use crate::config::runtime::ClassificationPreferences;
use crate::records::{catalog, construct, Record, RecordKind};
use crate::{log_debug, log_success};
use std::collections::HashMap;

/// Classification errors
///
/// The engine itself cannot fail on input data; this enum exists for
/// catalog-contract violations surfaced by callers that drive construction
/// by kind name rather than through `classify_and_construct`.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ClassificationError {
    #[error("Record kind {kind} has no constructor in the catalog")]
    MissingConstructor { kind: String },
}

impl ClassificationError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            ClassificationError::MissingConstructor { .. } => {
                crate::logging::codes::classification::MISSING_CONSTRUCTOR
            }
        }
    }
}

/// Essential classification metrics
#[derive(Debug, Default, Clone)]
pub struct ClassificationMetrics {
    pub total_lines: usize,
    pub identified_lines: usize,
    pub unidentified_lines: usize,
    pub blank_lines: usize,
    pub continuation_lines: usize,

    // Preference-controlled metrics
    pub per_kind_counts: HashMap<&'static str, usize>,
}

impl ClassificationMetrics {
    pub(crate) fn record_kind(
        &mut self,
        kind: RecordKind,
        was_continuation: bool,
        preferences: &ClassificationPreferences,
    ) {
        self.total_lines += 1;

        match kind {
            RecordKind::Unidentified => self.unidentified_lines += 1,
            RecordKind::Blank => {
                self.blank_lines += 1;
                self.identified_lines += 1;
            }
            _ => self.identified_lines += 1,
        }

        if was_continuation {
            self.continuation_lines += 1;
        }

        if preferences.collect_detailed_metrics {
            *self.per_kind_counts.entry(kind.as_str()).or_insert(0) += 1;
        }
    }

    /// Identified share of all classified lines, rounded percent
    pub fn identified_percent(&self) -> u64 {
        crate::utils::units::percent(self.identified_lines as u64, self.total_lines as u64)
    }
}

/// Stateful classification engine
///
/// Holds the prior record kind (the sole disambiguation state) and running
/// metrics. One engine per parsed log; engines are never shared.
pub struct ClassificationEngine {
    prior: Option<RecordKind>,
    metrics: ClassificationMetrics,
    preferences: ClassificationPreferences,
    line_number: usize,
}

impl ClassificationEngine {
    pub fn new() -> Self {
        Self {
            prior: None,
            metrics: ClassificationMetrics::default(),
            preferences: ClassificationPreferences::default(),
            line_number: 0,
        }
    }

    pub fn with_preferences(preferences: ClassificationPreferences) -> Self {
        Self {
            prior: None,
            metrics: ClassificationMetrics::default(),
            preferences,
            line_number: 0,
        }
    }

    /// Classify one line against the catalog.
    ///
    /// Pure with respect to the line; the prior-kind cursor advances as a
    /// side effect so the next call sees this line's kind.
    pub fn classify_line(&mut self, line: &str) -> RecordKind {
        self.line_number += 1;

        // Cap the text handed to the matchers; a line this long is not part
        // of any real crash log grammar and classifies as its prefix would.
        let text = if line.len() > MAX_CLASSIFIED_LINE_LENGTH {
            let mut end = MAX_CLASSIFIED_LINE_LENGTH;
            while !line.is_char_boundary(end) {
                end -= 1;
            }
            &line[..end]
        } else {
            line
        };

        let kind = classify(text, self.prior);
        let was_continuation = self.prior == Some(kind) && kind != RecordKind::Blank;

        if kind == RecordKind::Unidentified && self.preferences.log_unidentified_lines {
            if self.preferences.include_line_numbers {
                log_debug!("Unidentified line", "line_number" => self.line_number);
            } else {
                log_debug!("Unidentified line");
            }
        }

        self.metrics
            .record_kind(kind, was_continuation, &self.preferences);
        self.prior = Some(kind);
        kind
    }

    /// Classify one line and construct its record in one step
    pub fn classify_and_construct(&mut self, line: &str) -> Record {
        let kind = self.classify_line(line);
        construct(kind, line)
    }

    /// The kind of the previously classified line
    pub fn prior_kind(&self) -> Option<RecordKind> {
        self.prior
    }

    /// Current metrics
    pub fn metrics(&self) -> &ClassificationMetrics {
        &self.metrics
    }

    /// Log a completion summary for this engine's pass
    pub fn log_completion(&self) {
        log_success!(
            crate::logging::codes::success::CLASSIFICATION_COMPLETE,
            "Line classification completed",
            "total_lines" => self.metrics.total_lines,
            "identified" => self.metrics.identified_lines,
            "unidentified" => self.metrics.unidentified_lines,
            "blank" => self.metrics.blank_lines,
            "continuations" => self.metrics.continuation_lines,
            "identified_percent" => self.metrics.identified_percent()
        );
    }
}

impl Default for ClassificationEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// STATELESS CORE
// ============================================================================

/// Classify a single line given the prior record kind.
///
/// Evaluates the catalog in priority order; the first entry whose shape
/// matches and whose header-or-continuation condition holds wins. Total:
/// falls back to Unidentified.
pub fn classify(line: &str, prior: Option<RecordKind>) -> RecordKind {
    for entry in catalog() {
        if entry.applies(line, prior) {
            return entry.kind;
        }
    }
    RecordKind::Unidentified
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_is_total() {
        // Arbitrary junk always resolves to exactly one kind.
        let long_line = "x".repeat(100_000);
        let inputs = [
            "",
            "   ",
            "complete nonsense \u{1F980} \0\t",
            "0x00 deadbeef",
            "# banner",
            long_line.as_str(),
        ];
        for input in inputs {
            let mut engine = ClassificationEngine::new();
            let _ = engine.classify_line(input);
        }
    }

    #[test]
    fn test_prior_kind_advances() {
        let mut engine = ClassificationEngine::new();
        assert_eq!(engine.prior_kind(), None);

        engine.classify_line("Heap:");
        assert_eq!(engine.prior_kind(), Some(RecordKind::Heap));

        engine.classify_line(" PSYoungGen      total 76288K, used 10240K [0x0,0x0,0x0)");
        assert_eq!(engine.prior_kind(), Some(RecordKind::Heap));
    }

    #[test]
    fn test_continuation_depends_on_prior() {
        // The same body line lands in different kinds depending on which
        // block is open.
        let event_line = "Event: 0.513 Thread 0x00007f8c80013000 Uncommon trap";

        assert_eq!(
            classify(event_line, Some(RecordKind::DeoptimizationEvents)),
            RecordKind::DeoptimizationEvents
        );
        assert_eq!(
            classify(event_line, Some(RecordKind::CompilationEvents)),
            RecordKind::CompilationEvents
        );
        assert_eq!(
            classify(event_line, Some(RecordKind::GcHeapHistory)),
            RecordKind::GcHeapHistory
        );
        // No open event table: nothing claims the line.
        assert_eq!(classify(event_line, None), RecordKind::Unidentified);
    }

    #[test]
    fn test_header_pattern_loses_to_open_block() {
        // "#1: file=..." satisfies the banner prefix, but inside an open
        // Logging block it is a log-output configuration line.
        let line = " #1: file=gc.log all=info";
        assert_eq!(
            classify(line, Some(RecordKind::LogConfiguration)),
            RecordKind::LogConfiguration
        );
    }

    #[test]
    fn test_unidentified_fallback() {
        assert_eq!(
            classify("utterly unknown content", None),
            RecordKind::Unidentified
        );
    }

    #[test]
    fn test_blank_line() {
        assert_eq!(classify("", None), RecordKind::Blank);
        assert_eq!(classify("   \t", Some(RecordKind::Heap)), RecordKind::Blank);
    }

    #[test]
    fn test_metrics_accumulate() {
        let mut engine = ClassificationEngine::new();
        engine.classify_line("Heap:");
        engine.classify_line(" eden space 65536K, 15% used [0x0,0x0,0x0)");
        engine.classify_line("???unknown???");
        engine.classify_line("");

        let metrics = engine.metrics();
        assert_eq!(metrics.total_lines, 4);
        assert_eq!(metrics.unidentified_lines, 1);
        assert_eq!(metrics.blank_lines, 1);
        assert_eq!(metrics.identified_lines, 3);
        assert_eq!(metrics.continuation_lines, 1);
    }

    #[test]
    fn test_classify_and_construct() {
        let mut engine = ClassificationEngine::new();
        let record = engine.classify_and_construct(
            "Memory: 4k page, physical 16266548k(7525296k free), swap 8257532k(8257532k free)",
        );
        assert_eq!(record.kind(), RecordKind::MemoryInfo);
    }

    #[test]
    fn test_oversized_line_classifies_by_prefix() {
        let mut engine = ClassificationEngine::new();
        let long_line = format!("jvm_args: {}", "-Xlog ".repeat(10_000));
        assert_eq!(engine.classify_line(&long_line), RecordKind::JvmArgs);
    }
}
