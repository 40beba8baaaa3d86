// Internal modules
pub mod analysis;
pub mod classification;
pub mod config;
pub mod file_processor;
#[macro_use]
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod records;
pub mod releases;
pub mod utils;

// Re-export key types for library consumers
pub use analysis::{Finding, FindingKey, FindingSeverity};
pub use model::FatalErrorLog;
pub use pipeline::{PipelineError, TriageResult};
pub use records::RecordKind;
