use crate::analysis::AnalysisError;
use crate::classification::ClassificationError;
use crate::file_processor::FileProcessorError;
use crate::releases::DatabaseError;

/// Pipeline processing errors
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("File processing failed: {0}")]
    FileProcessing(#[from] FileProcessorError),

    #[error("Classification failed: {0}")]
    Classification(#[from] ClassificationError),

    #[error("Release database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Analysis failed: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("Pipeline error: {message}")]
    Pipeline { message: String },
}

impl PipelineError {
    pub fn pipeline_error(message: &str) -> Self {
        Self::Pipeline {
            message: message.to_string(),
        }
    }
}
