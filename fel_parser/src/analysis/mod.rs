//! Diagnostic analysis: rule correlation over the completed fact model

mod engine;
mod findings;
pub mod rules;

pub use engine::{analyze, AnalysisEngine, AnalysisError};
pub use findings::{Finding, FindingKey, FindingSeverity};
