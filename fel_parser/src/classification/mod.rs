//! Line classification: stateful single-pass scanner over the record catalog

mod engine;

pub use engine::{classify, ClassificationEngine, ClassificationError, ClassificationMetrics};

use crate::config::runtime::ClassificationPreferences;

/// Create a classification engine with default preferences
pub fn create_engine() -> ClassificationEngine {
    ClassificationEngine::new()
}

/// Create a classification engine with custom preferences
pub fn create_engine_with_preferences(prefs: ClassificationPreferences) -> ClassificationEngine {
    ClassificationEngine::with_preferences(prefs)
}
