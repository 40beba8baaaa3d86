//! The fact model and its builder

mod builder;
mod fact_model;

pub use builder::{fold, LogBuilder};
pub use fact_model::{CrashFrame, FatalErrorLog};
