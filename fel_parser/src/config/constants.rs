pub mod compile_time {
    pub mod file_processing {
        /// Maximum crash log size allowed for processing (50MB)
        /// SECURITY: Prevents DoS attacks via oversized input files
        pub const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

        /// Threshold for considering a crash log "large" (2MB)
        /// PERFORMANCE: Affects logging verbosity only, never correctness
        pub const LARGE_FILE_THRESHOLD: u64 = 2 * 1024 * 1024;

        /// Maximum line count accepted from a single crash log
        /// SECURITY: Prevents algorithmic complexity attacks
        pub const MAX_LINE_COUNT_FOR_ANALYSIS: usize = 500_000;
    }

    pub mod classification {
        /// Maximum unidentified lines retained in the fact model
        /// RESOURCE: Bounds memory on adversarial or corrupted input;
        /// classification continues past the cap, retention stops
        pub const MAX_UNIDENTIFIED_LINES: usize = 1000;

        /// Maximum line length examined by the matcher table (bytes)
        /// SECURITY: Caps per-line regex work on pathological input
        pub const MAX_CLASSIFIED_LINE_LENGTH: usize = 16_384;
    }

    pub mod analysis {
        /// Maximum findings collected for a single crash log
        /// RESOURCE: Far above what the rule set can emit; a backstop only
        pub const MAX_FINDINGS: usize = 100;

        /// Java thread count above which the thread-pressure rule fires
        pub const JAVA_THREAD_WARNING_THRESHOLD: usize = 4_000;

        /// Thread stack size below which the stack-size rule fires (bytes)
        pub const THREAD_STACK_SIZE_FLOOR: u64 = 128 * 1024;

        /// Free physical memory percentage below which the low-memory
        /// rule fires
        pub const LOW_PHYSICAL_MEMORY_PERCENT: u64 = 2;

        /// Free swap percentage below which the low-swap rule fires
        pub const LOW_SWAP_PERCENT: u64 = 10;
    }

    pub mod logging {
        /// Maximum log events buffered by the in-memory logger
        /// RESOURCE: Controls memory usage for captured events in tests
        pub const ERROR_BUFFER_SIZE: usize = 1000;

        /// Security-relevant events are never logged below this level
        /// (0 = Error, 1 = Warning)
        pub const SECURITY_MIN_LOG_LEVEL: u8 = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::compile_time::*;

    #[test]
    fn test_limits_are_positive() {
        assert!(file_processing::MAX_FILE_SIZE > 0);
        assert!(file_processing::MAX_LINE_COUNT_FOR_ANALYSIS > 0);
        assert!(classification::MAX_UNIDENTIFIED_LINES > 0);
        assert!(analysis::MAX_FINDINGS > 0);
    }

    #[test]
    fn test_unidentified_cap_matches_contract() {
        // The cap is a user-facing contract, not a tuning knob.
        assert_eq!(classification::MAX_UNIDENTIFIED_LINES, 1000);
    }

    #[test]
    fn test_large_threshold_below_max() {
        assert!(file_processing::LARGE_FILE_THRESHOLD < file_processing::MAX_FILE_SIZE);
    }
}
