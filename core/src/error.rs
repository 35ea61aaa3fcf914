// docprep/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Collaborator missing for stage: {stage_name}")]
    CollaboratorMissing { stage_name: String },

    #[error("Error in a collaborator or external operation. Source: {source}")]
    CollaboratorError {
        #[source]
        source: AnyhowError,
    },

    #[error("Configuration error for stage '{stage_name}': {message}")]
    ConfigurationError { stage_name: String, message: String },

    #[error("Internal docprep error: {0}")]
    Internal(String),
}

// This is the key conversion docprep provides for external errors: anything a
// collaborator surfaces through anyhow lands in the CollaboratorError variant.
impl From<AnyhowError> for PipelineError {
  fn from(err: AnyhowError) -> Self {
    PipelineError::CollaboratorError { source: err }
  }
}

pub type PipelineResult<T, E = PipelineError> = std::result::Result<T, E>;
