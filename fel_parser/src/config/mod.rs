//! Configuration module for the fatal error log parser
//!
//! Compile-time limits live in `constants`; user-tunable behavior lives in
//! `runtime` and defaults from FEL_* environment variables.

pub mod constants;
pub mod runtime;

/// Build information and configuration metadata
pub mod build_info {
    /// Returns the configuration profile used during build
    pub fn profile() -> &'static str {
        option_env!("FEL_BUILD_PROFILE").unwrap_or("development")
    }

    /// Returns the crate version baked into the binary
    pub fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}
