// docprep-cli/src/pipelines/contexts.rs

use crate::config::AppConfig;
use std::path::PathBuf;
use std::sync::Arc;

/// Shared run context for the document-preparation pipeline.
///
/// Collaborators read the configuration from here and record the artifacts
/// they produced; the skip conditions also evaluate against this context.
#[derive(Debug, Clone)]
pub struct PrepCtx {
  pub config: Arc<AppConfig>,

  /// Number of documents the collection stage cataloged.
  pub cataloged_documents: usize,
  /// Number of images the preprocessing stage produced.
  pub preprocessed_images: usize,
  /// Number of images validated for the external service.
  pub azure_ready_images: usize,
  /// Path of the generated batch configuration artifact, once written.
  pub batch_config_path: Option<PathBuf>,
}

impl PrepCtx {
  pub fn new(config: Arc<AppConfig>) -> Self {
    Self {
      config,
      cataloged_documents: 0,
      preprocessed_images: 0,
      azure_ready_images: 0,
      batch_config_path: None,
    }
  }
}
