//! Crash log file processor with compile-time constants and global logging

use crate::config::constants::compile_time::file_processing::{
    LARGE_FILE_THRESHOLD, MAX_FILE_SIZE, MAX_LINE_COUNT_FOR_ANALYSIS,
};
use crate::config::runtime::FileProcessorPreferences;
use crate::logging::codes;
use crate::{log_debug, log_error, log_success};
use std::fs;
use std::path::{Path, PathBuf};

/// File processor specific errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum FileProcessorError {
    #[error("Crash log not found: {path}")]
    FileNotFound { path: String },

    #[error("Crash log too large: {size} bytes (max: {max_size})")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("Crash log is empty")]
    EmptyFile,

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid UTF-8 encoding in crash log: {path}")]
    InvalidEncoding { path: String },

    #[error("I/O error reading crash log: {message}")]
    IoError { message: String },

    #[error("Invalid crash log path: {path}")]
    InvalidPath { path: String },

    #[error("Crash log exceeds maximum line count: {lines} (max: {max_lines})")]
    TooManyLines { lines: usize, max_lines: usize },
}

impl FileProcessorError {
    /// Get the appropriate error code for this error type
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            FileProcessorError::FileNotFound { .. } => codes::file_processing::FILE_NOT_FOUND,
            FileProcessorError::FileTooLarge { .. } => codes::file_processing::FILE_TOO_LARGE,
            FileProcessorError::EmptyFile => codes::file_processing::EMPTY_FILE,
            FileProcessorError::PermissionDenied { .. } => {
                codes::file_processing::PERMISSION_DENIED
            }
            FileProcessorError::InvalidEncoding { .. } => codes::file_processing::INVALID_ENCODING,
            FileProcessorError::IoError { .. } => codes::file_processing::IO_ERROR,
            FileProcessorError::InvalidPath { .. } => codes::file_processing::INVALID_PATH,
            FileProcessorError::TooManyLines { .. } => codes::file_processing::FILE_TOO_LARGE,
        }
    }

    /// Check if this error should halt processing
    pub fn requires_halt(&self) -> bool {
        crate::logging::codes::requires_halt(self.error_code().as_str())
    }

    /// Get error severity
    pub fn severity(&self) -> &'static str {
        crate::logging::codes::get_severity(self.error_code().as_str()).as_str()
    }

    /// Get error category
    pub fn category(&self) -> &'static str {
        crate::logging::codes::get_category(self.error_code().as_str())
    }
}

/// File metadata collected during processing
#[derive(Debug, Clone)]
pub struct FileMetadata {
    /// Canonical file path
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
    /// Number of lines in file
    pub line_count: usize,
    /// Whether the file name follows the hs_err_pid<N>.log convention
    pub is_hs_err_name: bool,
    /// File modification time (if available)
    pub modified: Option<std::time::SystemTime>,
}

impl FileMetadata {
    /// Get file size in human-readable format
    pub fn human_readable_size(&self) -> String {
        crate::utils::format_bytes(self.size)
    }

    /// Check if file is likely to be large for processing
    pub fn is_large_file(&self) -> bool {
        self.size > LARGE_FILE_THRESHOLD
    }

    /// Check if line count is within safe bounds for analysis
    pub fn is_safe_for_analysis(&self) -> bool {
        self.line_count <= MAX_LINE_COUNT_FOR_ANALYSIS
    }
}

/// File processing result containing source and metadata
#[derive(Debug, Clone)]
pub struct FileProcessingResult {
    /// File contents as UTF-8 string
    pub source: String,
    /// File metadata
    pub metadata: FileMetadata,
    /// Processing duration
    pub processing_duration: std::time::Duration,
}

impl FileProcessingResult {
    /// Iterate the source as trimmed-of-line-ending lines (CRLF tolerated)
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.source.lines().map(|l| l.strip_suffix('\r').unwrap_or(l))
    }

    /// Check if file is empty content-wise (only whitespace)
    pub fn is_effectively_empty(&self) -> bool {
        self.source.trim().is_empty()
    }
}

/// File processor with compile-time limits and runtime preferences
pub struct FileProcessor {
    /// Whether to require an hs_err-style file name (runtime preference)
    pub require_hs_err_name: bool,
    /// Whether to enable detailed performance logging (runtime preference)
    pub enable_performance_logging: bool,
    /// Whether to log debug information for non-hs_err file names
    pub log_foreign_file_names: bool,
}

impl FileProcessor {
    /// Create new file processor with default preferences
    pub fn new() -> Self {
        Self {
            require_hs_err_name: false,
            enable_performance_logging: true,
            log_foreign_file_names: true,
        }
    }

    /// Create file processor from runtime preferences
    pub fn from_preferences(prefs: &FileProcessorPreferences) -> Self {
        Self {
            require_hs_err_name: prefs.require_hs_err_name,
            enable_performance_logging: prefs.enable_performance_logging,
            log_foreign_file_names: prefs.log_foreign_file_names,
        }
    }

    /// Require hs_err-style file names
    pub fn with_hs_err_name_required(mut self, required: bool) -> Self {
        self.require_hs_err_name = required;
        self
    }

    /// Process a crash log and return contents with metadata
    pub fn process_file(
        &self,
        file_path: &str,
    ) -> Result<FileProcessingResult, FileProcessorError> {
        let start_time = std::time::Instant::now();

        log_debug!("Starting crash log processing", "file" => file_path);

        let path = self.validate_path(file_path)?;
        let metadata = self.get_metadata(&path)?;
        self.validate_file(&metadata, file_path)?;
        let source = self.read_file(&path, file_path)?;

        let line_count = source.lines().count();
        if line_count > MAX_LINE_COUNT_FOR_ANALYSIS {
            let error = FileProcessorError::TooManyLines {
                lines: line_count,
                max_lines: MAX_LINE_COUNT_FOR_ANALYSIS,
            };
            log_error!(error.error_code(), "Crash log exceeds maximum line count",
                "file" => file_path,
                "lines" => line_count,
                "max_lines" => MAX_LINE_COUNT_FOR_ANALYSIS);
            return Err(error);
        }

        let mut final_metadata = metadata;
        final_metadata.line_count = line_count;

        let result = FileProcessingResult {
            source,
            metadata: final_metadata,
            processing_duration: start_time.elapsed(),
        };

        self.log_processing_success(&result, file_path);

        if !result.metadata.is_hs_err_name && !self.require_hs_err_name && self.log_foreign_file_names
        {
            log_debug!("Processing file without hs_err naming", "file" => file_path);
        }

        Ok(result)
    }

    /// Log processing success with metrics
    fn log_processing_success(&self, result: &FileProcessingResult, file_path: &str) {
        if self.enable_performance_logging {
            let duration_str =
                format!("{:.2}", result.processing_duration.as_secs_f64() * 1000.0);
            log_success!(
                codes::success::FILE_PROCESSING_SUCCESS,
                "Crash log read successfully",
                "file" => file_path,
                "size_bytes" => result.metadata.size,
                "size_human" => result.metadata.human_readable_size(),
                "lines" => result.metadata.line_count,
                "duration_ms" => duration_str,
                "is_large_file" => result.metadata.is_large_file()
            );
        } else {
            log_success!(
                codes::success::FILE_PROCESSING_SUCCESS,
                "Crash log read successfully",
                "file" => file_path,
                "lines" => result.metadata.line_count
            );
        }
    }

    /// Validate file path and check existence
    fn validate_path(&self, file_path: &str) -> Result<PathBuf, FileProcessorError> {
        if file_path.is_empty() {
            let error = FileProcessorError::InvalidPath {
                path: file_path.to_string(),
            };
            log_error!(error.error_code(), "Empty file path provided");
            return Err(error);
        }

        let path = Path::new(file_path);

        if !path.exists() {
            let error = FileProcessorError::FileNotFound {
                path: file_path.to_string(),
            };
            log_error!(error.error_code(), "Crash log not found", "path" => file_path);
            return Err(error);
        }

        if !path.is_file() {
            let error = FileProcessorError::InvalidPath {
                path: file_path.to_string(),
            };
            log_error!(error.error_code(), "Path is not a file", "path" => file_path);
            return Err(error);
        }

        match path.canonicalize() {
            Ok(canonical_path) => Ok(canonical_path),
            Err(e) => {
                let error = FileProcessorError::IoError {
                    message: format!("Failed to resolve path '{}': {}", file_path, e),
                };
                log_error!(error.error_code(), "Failed to canonicalize path",
                    "path" => file_path,
                    "io_error" => e);
                Err(error)
            }
        }
    }

    /// Get file metadata
    fn get_metadata(&self, path: &Path) -> Result<FileMetadata, FileProcessorError> {
        let metadata = match fs::metadata(path) {
            Ok(meta) => meta,
            Err(e) => {
                let error = match e.kind() {
                    std::io::ErrorKind::PermissionDenied => FileProcessorError::PermissionDenied {
                        path: path.display().to_string(),
                    },
                    _ => FileProcessorError::IoError {
                        message: format!(
                            "Failed to read metadata for '{}': {}",
                            path.display(),
                            e
                        ),
                    },
                };
                log_error!(error.error_code(), "Failed to read file metadata",
                    "path" => path.display(),
                    "io_error" => e);
                return Err(error);
            }
        };

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        let is_hs_err_name = file_name.starts_with("hs_err_pid") && file_name.ends_with(".log");

        Ok(FileMetadata {
            path: path.to_path_buf(),
            size: metadata.len(),
            line_count: 0, // Updated after reading
            is_hs_err_name,
            modified: metadata.modified().ok(),
        })
    }

    /// Validate file properties using compile-time constants
    fn validate_file(
        &self,
        metadata: &FileMetadata,
        file_path: &str,
    ) -> Result<(), FileProcessorError> {
        if metadata.size > MAX_FILE_SIZE {
            let error = FileProcessorError::FileTooLarge {
                size: metadata.size,
                max_size: MAX_FILE_SIZE,
            };
            log_error!(error.error_code(), "Crash log exceeds maximum size limit",
                "file" => file_path,
                "size_bytes" => metadata.size,
                "limit_bytes" => MAX_FILE_SIZE);
            return Err(error);
        }

        if metadata.size == 0 {
            let error = FileProcessorError::EmptyFile;
            log_error!(error.error_code(), "Crash log is empty", "file" => file_path);
            return Err(error);
        }

        if self.require_hs_err_name && !metadata.is_hs_err_name {
            let error = FileProcessorError::InvalidPath {
                path: file_path.to_string(),
            };
            log_error!(error.error_code(), "File does not follow hs_err_pid naming",
                "file" => file_path);
            return Err(error);
        }

        Ok(())
    }

    /// Read file contents with validation
    fn read_file(&self, path: &Path, file_path: &str) -> Result<String, FileProcessorError> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(content),
            Err(e) => {
                let error = match e.kind() {
                    std::io::ErrorKind::PermissionDenied => FileProcessorError::PermissionDenied {
                        path: path.display().to_string(),
                    },
                    std::io::ErrorKind::InvalidData => FileProcessorError::InvalidEncoding {
                        path: path.display().to_string(),
                    },
                    _ => FileProcessorError::IoError {
                        message: format!("Failed to read file '{}': {}", path.display(), e),
                    },
                };
                log_error!(error.error_code(), "Failed to read crash log",
                    "file" => file_path,
                    "io_error" => e);
                Err(error)
            }
        }
    }
}

impl Default for FileProcessor {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// MODULE API FUNCTIONS
// ============================================================================

/// Process a crash log with default settings
pub fn process_file(file_path: &str) -> Result<FileProcessingResult, FileProcessorError> {
    FileProcessor::new().process_file(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_process_valid_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("hs_err_pid1234.log");
        let content = "# A fatal error has been detected\n# SIGSEGV\n";
        fs::write(&file_path, content).unwrap();

        let processor = FileProcessor::new();
        let result = processor.process_file(file_path.to_str().unwrap()).unwrap();

        assert_eq!(result.metadata.line_count, 2);
        assert!(result.metadata.is_hs_err_name);
        assert!(!result.is_effectively_empty());
    }

    #[test]
    fn test_crlf_lines_tolerated() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("crash.log");
        fs::write(&file_path, "line one\r\nline two\r\n").unwrap();

        let processor = FileProcessor::new();
        let result = processor.process_file(file_path.to_str().unwrap()).unwrap();

        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines, vec!["line one", "line two"]);
    }

    #[test]
    fn test_file_not_found() {
        let processor = FileProcessor::new();
        let result = processor.process_file("nonexistent_hs_err.log");

        assert_matches!(result.unwrap_err(), FileProcessorError::FileNotFound { .. });
    }

    #[test]
    fn test_empty_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("empty.log");
        fs::write(&file_path, "").unwrap();

        let processor = FileProcessor::new();
        let result = processor.process_file(file_path.to_str().unwrap());

        assert_matches!(result.unwrap_err(), FileProcessorError::EmptyFile);
    }

    #[test]
    fn test_hs_err_name_requirement() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("notes.txt");
        fs::write(&file_path, "content").unwrap();

        let processor = FileProcessor::new().with_hs_err_name_required(true);
        let result = processor.process_file(file_path.to_str().unwrap());

        assert!(result.is_err());
        match result.unwrap_err() {
            FileProcessorError::InvalidPath { .. } => {}
            _ => panic!("Expected InvalidPath error"),
        }
    }

    #[test]
    fn test_error_methods() {
        let error = FileProcessorError::FileNotFound {
            path: "hs_err_pid1.log".to_string(),
        };

        assert_eq!(error.error_code().as_str(), "E005");
        assert_eq!(error.category(), "FileProcessing");
        assert!(error.requires_halt());
    }
}
