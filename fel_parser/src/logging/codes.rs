//! Consolidated error codes and classification system
//!
//! Single source of truth for all error codes, their metadata, and
//! classification functions. Code constants and their behavioral metadata
//! live together in this module.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for an error code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
}

impl ErrorMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// File processing error codes
pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const FILE_TOO_LARGE: Code = Code::new("E006");
    pub const EMPTY_FILE: Code = Code::new("E007");
    pub const PERMISSION_DENIED: Code = Code::new("E008");
    pub const INVALID_ENCODING: Code = Code::new("E009");
    pub const IO_ERROR: Code = Code::new("E010");
    pub const INVALID_PATH: Code = Code::new("E011");
}

/// Classification error codes
pub mod classification {
    use super::Code;

    pub const MISSING_CONSTRUCTOR: Code = Code::new("E020");
    pub const UNIDENTIFIED_CAP_REACHED: Code = Code::new("E021");
}

/// Release database error codes
pub mod releases {
    use super::Code;

    pub const MISSING_LATEST_ENTRY: Code = Code::new("E030");
    pub const DATABASE_NOT_INITIALIZED: Code = Code::new("E031");
}

/// Analysis error codes
pub mod analysis {
    use super::Code;

    pub const FINDING_LIMIT_REACHED: Code = Code::new("E040");
    pub const DATABASE_INCONSISTENCY: Code = Code::new("E041");
}

/// Success codes
pub mod success {
    use super::Code;

    pub const OPERATION_COMPLETED_SUCCESSFULLY: Code = Code::new("I001");
    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I002");

    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I010");

    pub const CLASSIFICATION_COMPLETE: Code = Code::new("I020");
    pub const FOLD_COMPLETE: Code = Code::new("I021");

    pub const ANALYSIS_COMPLETE: Code = Code::new("I030");
    pub const RELEASE_DATABASE_READY: Code = Code::new("I031");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

/// Error metadata registry using OnceLock for thread safety
static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

/// Initialize and get the error registry
fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let mut registry = HashMap::new();

        // System errors
        registry.insert(
            "ERR001",
            ErrorMetadata::new(
                "ERR001",
                "System",
                Severity::Critical,
                false,
                true,
                "Critical internal system error",
            ),
        );
        registry.insert(
            "ERR002",
            ErrorMetadata::new(
                "ERR002",
                "System",
                Severity::Critical,
                false,
                true,
                "System initialization failure",
            ),
        );

        // File processing errors
        registry.insert(
            "E005",
            ErrorMetadata::new(
                "E005",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "Crash log not found at specified path",
            ),
        );
        registry.insert(
            "E006",
            ErrorMetadata::new(
                "E006",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "Crash log exceeds maximum file size",
            ),
        );
        registry.insert(
            "E007",
            ErrorMetadata::new(
                "E007",
                "FileProcessing",
                Severity::Low,
                true,
                false,
                "Crash log is empty",
            ),
        );
        registry.insert(
            "E008",
            ErrorMetadata::new(
                "E008",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "Permission denied reading crash log",
            ),
        );
        registry.insert(
            "E009",
            ErrorMetadata::new(
                "E009",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "Crash log is not valid UTF-8",
            ),
        );
        registry.insert(
            "E010",
            ErrorMetadata::new(
                "E010",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "I/O error reading crash log",
            ),
        );
        registry.insert(
            "E011",
            ErrorMetadata::new(
                "E011",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "Invalid crash log path",
            ),
        );

        // Classification errors
        registry.insert(
            "E020",
            ErrorMetadata::new(
                "E020",
                "Classification",
                Severity::Critical,
                false,
                true,
                "Record kind has no constructor (catalog defect)",
            ),
        );
        registry.insert(
            "E021",
            ErrorMetadata::new(
                "E021",
                "Classification",
                Severity::Low,
                true,
                false,
                "Unidentified line retention cap reached",
            ),
        );

        // Release database errors
        registry.insert(
            "E030",
            ErrorMetadata::new(
                "E030",
                "Releases",
                Severity::Critical,
                false,
                true,
                "Release family has no LATEST entry (database defect)",
            ),
        );
        registry.insert(
            "E031",
            ErrorMetadata::new(
                "E031",
                "Releases",
                Severity::Critical,
                false,
                true,
                "Release database queried before initialization",
            ),
        );

        // Analysis errors
        registry.insert(
            "E040",
            ErrorMetadata::new(
                "E040",
                "Analysis",
                Severity::Low,
                true,
                false,
                "Finding collection limit reached",
            ),
        );
        registry.insert(
            "E041",
            ErrorMetadata::new(
                "E041",
                "Analysis",
                Severity::Critical,
                false,
                true,
                "Release database inconsistency detected during analysis",
            ),
        );

        registry
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get complete metadata for an error code
pub fn get_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get the severity of an error code (defaults to Medium for unknown codes)
pub fn get_severity(code: &str) -> Severity {
    get_metadata(code)
        .map(|m| m.severity)
        .unwrap_or(Severity::Medium)
}

/// Get the category of an error code
pub fn get_category(code: &str) -> &'static str {
    get_metadata(code).map(|m| m.category).unwrap_or("Unknown")
}

/// Get the description of an error code
pub fn get_description(code: &str) -> &'static str {
    get_metadata(code)
        .map(|m| m.description)
        .unwrap_or("Unknown error")
}

/// Check whether an error code requires halting the current file
pub fn requires_halt(code: &str) -> bool {
    get_metadata(code).map(|m| m.requires_halt).unwrap_or(false)
}

/// Check whether an error code is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_metadata(code).map(|m| m.recoverable).unwrap_or(true)
}
