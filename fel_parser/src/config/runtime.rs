// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileProcessorPreferences {
    /// Whether to require an hs_err-style file name (user preference, not security)
    pub require_hs_err_name: bool,

    /// Whether to enable detailed performance logging (user preference)
    pub enable_performance_logging: bool,

    /// Whether to log debug information for non-hs_err file names
    pub log_foreign_file_names: bool,
}

impl Default for FileProcessorPreferences {
    fn default() -> Self {
        Self {
            require_hs_err_name: env::var("FEL_REQUIRE_HS_ERR_NAME")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_performance_logging: env::var("FEL_ENABLE_PERFORMANCE_LOGGING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            log_foreign_file_names: env::var("FEL_LOG_FOREIGN_FILE_NAMES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationPreferences {
    /// Whether to collect per-kind classification metrics
    pub collect_detailed_metrics: bool,

    /// Whether to log every unidentified line at debug level
    pub log_unidentified_lines: bool,

    /// Whether to include line numbers in classification log context
    pub include_line_numbers: bool,
}

impl Default for ClassificationPreferences {
    fn default() -> Self {
        Self {
            collect_detailed_metrics: env::var("FEL_CLASSIFY_DETAILED_METRICS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            log_unidentified_lines: env::var("FEL_CLASSIFY_LOG_UNIDENTIFIED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            include_line_numbers: env::var("FEL_CLASSIFY_INCLUDE_LINE_NUMBERS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisPreferences {
    /// Whether to log each rule evaluation at debug level
    pub log_rule_evaluation: bool,

    /// Whether to include release database statistics in completion logs
    pub log_release_database_stats: bool,
}

impl Default for AnalysisPreferences {
    fn default() -> Self {
        Self {
            log_rule_evaluation: env::var("FEL_ANALYSIS_LOG_RULES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_release_database_stats: env::var("FEL_ANALYSIS_LOG_DB_STATS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

/// Runtime log level preference (maps onto logging::LogLevel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn to_events_log_level(self) -> crate::logging::LogLevel {
        match self {
            LogLevel::Error => crate::logging::LogLevel::Error,
            LogLevel::Warning => crate::logging::LogLevel::Warning,
            LogLevel::Info => crate::logging::LogLevel::Info,
            LogLevel::Debug => crate::logging::LogLevel::Debug,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingPreferences {
    /// Minimum log level emitted to the console
    pub min_log_level: LogLevel,

    /// Whether to emit JSON events instead of plain text
    pub use_structured_logging: bool,

    /// Whether console logging is enabled at all
    pub enable_console_logging: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        let min_log_level = match env::var("FEL_LOG_LEVEL").ok().as_deref() {
            Some("error") => LogLevel::Error,
            Some("warning") => LogLevel::Warning,
            Some("debug") => LogLevel::Debug,
            _ => LogLevel::Info,
        };

        Self {
            min_log_level,
            use_structured_logging: env::var("FEL_STRUCTURED_LOGGING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_console_logging: env::var("FEL_CONSOLE_LOGGING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_preferences() {
        let prefs = FileProcessorPreferences::default();
        assert!(!prefs.require_hs_err_name);

        let prefs = ClassificationPreferences::default();
        assert!(prefs.collect_detailed_metrics);
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            LogLevel::Warning.to_events_log_level(),
            crate::logging::LogLevel::Warning
        );
        assert_eq!(
            LogLevel::Debug.to_events_log_level(),
            crate::logging::LogLevel::Debug
        );
    }
}
