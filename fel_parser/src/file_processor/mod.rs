//! Crash log file ingestion with compile-time limits and global logging

mod processor;

use crate::config::runtime::FileProcessorPreferences;
pub use processor::{FileMetadata, FileProcessingResult, FileProcessor, FileProcessorError};

/// Process a crash log file with default settings
pub fn process_file(file_path: &str) -> Result<FileProcessingResult, FileProcessorError> {
    processor::process_file(file_path)
}

/// Create a file processor with default settings
pub fn create_processor() -> FileProcessor {
    FileProcessor::new()
}

/// Create a file processor from runtime preferences structure
pub fn create_processor_from_preferences(prefs: &FileProcessorPreferences) -> FileProcessor {
    FileProcessor::from_preferences(prefs)
}

/// Check if an error should halt processing
pub fn should_halt_on_error(error: &FileProcessorError) -> bool {
    error.requires_halt()
}

/// Get the compile-time maximum file size limit
pub fn get_max_file_size() -> u64 {
    crate::config::constants::compile_time::file_processing::MAX_FILE_SIZE
}
