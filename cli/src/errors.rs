// docprep-cli/src/errors.rs

use thiserror::Error;

// Import the engine's error type so wiring errors surface through the same
// channel the application already handles.
use docprep::PipelineError;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Collection Error: {0}")]
  Collection(String),

  #[error("Preprocessing Error: {0}")]
  Preprocessing(String),

  #[error("External Service Preparation Error: {0}")]
  ExternalPrep(String),

  #[error("I/O Error: {0}")]
  Io(#[from] std::io::Error),

  #[error("Serialization Error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("Pipeline Error: {source}")]
  Pipeline {
    #[from] // Allows conversion from docprep::PipelineError
    source: PipelineError,
  },

  #[error("Internal Error: {0}")]
  Internal(String), // For miscellaneous errors
}

// Allow anyhow::Error to be converted into AppError::Internal for convenience
// in collaborators that use `?` on functions returning anyhow::Result.
impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    AppError::Internal(err.to_string())
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
