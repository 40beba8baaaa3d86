//! Small shared utilities for crash log parsing

pub mod dates;
pub mod units;

pub use dates::{day_diff, parse_build_timestamp, parse_crash_time};
pub use units::{format_bytes, parse_size_token};
