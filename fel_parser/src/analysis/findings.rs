//! Finding types emitted by the analysis engine
//!
//! A finding is a symbolic key plus severity; human-readable text is the
//! report renderer's concern. The optional detail string carries computed
//! elaborations (counts, deltas) that only the engine can know.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Finding severity, in presentation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FindingSeverity {
    Error = 0,
    Warning = 1,
    Info = 2,
}

impl FindingSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            FindingSeverity::Error => "error",
            FindingSeverity::Warning => "warning",
            FindingSeverity::Info => "info",
        }
    }
}

impl fmt::Display for FindingSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Symbolic keys identifying each diagnostic rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FindingKey {
    UnidentifiedLines,
    MissingDebugSymbols,
    NativeOutOfMemory,
    HeapExceedsPhysicalMemory,
    LowPhysicalMemory,
    SwapDisabled,
    LowSwapFree,
    SigSegv,
    SigBus,
    SigIll,
    SigFpe,
    SmallThreadStack,
    HighJavaThreadCount,
    UnknownVendor,
    NotLatestRelease,
}

impl FindingKey {
    /// Stable symbolic name used by the report renderer and structured output
    pub fn as_str(&self) -> &'static str {
        match self {
            FindingKey::UnidentifiedLines => "unidentified_lines",
            FindingKey::MissingDebugSymbols => "missing_debug_symbols",
            FindingKey::NativeOutOfMemory => "native_out_of_memory",
            FindingKey::HeapExceedsPhysicalMemory => "heap_exceeds_physical_memory",
            FindingKey::LowPhysicalMemory => "low_physical_memory",
            FindingKey::SwapDisabled => "swap_disabled",
            FindingKey::LowSwapFree => "low_swap_free",
            FindingKey::SigSegv => "sigsegv",
            FindingKey::SigBus => "sigbus",
            FindingKey::SigIll => "sigill",
            FindingKey::SigFpe => "sigfpe",
            FindingKey::SmallThreadStack => "small_thread_stack",
            FindingKey::HighJavaThreadCount => "high_java_thread_count",
            FindingKey::UnknownVendor => "unknown_vendor",
            FindingKey::NotLatestRelease => "not_latest_release",
        }
    }

    /// The severity this rule reports at
    pub fn severity(&self) -> FindingSeverity {
        match self {
            FindingKey::MissingDebugSymbols
            | FindingKey::NativeOutOfMemory
            | FindingKey::HeapExceedsPhysicalMemory => FindingSeverity::Error,

            FindingKey::UnidentifiedLines
            | FindingKey::LowPhysicalMemory
            | FindingKey::LowSwapFree
            | FindingKey::SmallThreadStack
            | FindingKey::HighJavaThreadCount
            | FindingKey::NotLatestRelease => FindingSeverity::Warning,

            FindingKey::SwapDisabled
            | FindingKey::SigSegv
            | FindingKey::SigBus
            | FindingKey::SigIll
            | FindingKey::SigFpe
            | FindingKey::UnknownVendor => FindingSeverity::Info,
        }
    }
}

impl fmt::Display for FindingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One diagnostic conclusion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub key: FindingKey,
    pub severity: FindingSeverity,
    /// Computed elaboration, appended to the rendered text when present
    pub detail: Option<String>,
}

impl Finding {
    pub fn new(key: FindingKey) -> Self {
        Self {
            key,
            severity: key.severity(),
            detail: None,
        }
    }

    pub fn with_detail(key: FindingKey, detail: String) -> Self {
        Self {
            key,
            severity: key.severity(),
            detail: Some(detail),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(FindingSeverity::Error < FindingSeverity::Warning);
        assert!(FindingSeverity::Warning < FindingSeverity::Info);
    }

    #[test]
    fn test_key_severities() {
        assert_eq!(
            FindingKey::MissingDebugSymbols.severity(),
            FindingSeverity::Error
        );
        assert_eq!(
            FindingKey::UnidentifiedLines.severity(),
            FindingSeverity::Warning
        );
        assert_eq!(FindingKey::SwapDisabled.severity(), FindingSeverity::Info);
    }

    #[test]
    fn test_finding_construction() {
        let finding = Finding::new(FindingKey::NotLatestRelease);
        assert_eq!(finding.severity, FindingSeverity::Warning);
        assert_eq!(finding.detail, None);

        let finding = Finding::with_detail(
            FindingKey::NotLatestRelease,
            "(newer by 2 versions and 28 days)".to_string(),
        );
        assert!(finding.detail.unwrap().contains("2 versions"));
    }
}
