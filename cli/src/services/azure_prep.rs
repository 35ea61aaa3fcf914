// docprep-cli/src/services/azure_prep.rs

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::pipelines::contexts::PrepCtx;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use docprep::{ContextData, StageCollaborator, StageYield};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Formats the external document-intelligence service accepts.
const AZURE_SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "png", "jpg", "jpeg", "tif", "tiff", "bmp"];

/// Per-file size cap enforced by the service tier in use.
const MAX_FILE_SIZE_BYTES: u64 = 50 * 1024 * 1024;

/// Batch configuration artifact handed to the external service tooling.
#[derive(Debug, Serialize)]
pub struct BatchConfig {
  pub generated_at: DateTime<Utc>,
  pub model: String,
  pub source_dir: String,
  pub files: Vec<String>,
}

/// External-prep collaborator: validates preprocessed images against the
/// service constraints, stages conforming files into the azure-ready
/// directory, and generates the batch configuration artifact.
pub struct AzurePrep {
  preprocessed_dir: PathBuf,
  azure_ready_dir: PathBuf,
}

impl AzurePrep {
  pub fn new(config: &Arc<AppConfig>) -> Self {
    Self {
      preprocessed_dir: config.preprocessed_dir.clone(),
      azure_ready_dir: config.azure_ready_dir.clone(),
    }
  }

  /// Validates and stages the preprocessed images, returning the names of
  /// the files that passed.
  pub fn prepare_batch(&self) -> Result<Vec<String>, AppError> {
    if !self.preprocessed_dir.is_dir() {
      return Err(AppError::ExternalPrep(format!(
        "preprocessed directory '{}' does not exist",
        self.preprocessed_dir.display()
      )));
    }
    fs::create_dir_all(&self.azure_ready_dir)?;

    let mut accepted = Vec::new();
    for dir_entry in fs::read_dir(&self.preprocessed_dir)? {
      let path = dir_entry?.path();
      if !path.is_file() {
        continue;
      }
      if let Some(reason) = validation_failure(&path)? {
        warn!("Rejecting '{}': {}", path.display(), reason);
        continue;
      }

      let Some(file_name) = path.file_name() else { continue };
      fs::copy(&path, self.azure_ready_dir.join(file_name))?;
      accepted.push(file_name.to_string_lossy().into_owned());
    }

    accepted.sort();
    Ok(accepted)
  }

  /// Secondary operation: writes the batch configuration artifact and
  /// returns its filesystem path.
  pub fn write_batch_config(&self, files: &[String]) -> Result<PathBuf, AppError> {
    fs::create_dir_all(&self.azure_ready_dir)?;
    let config = BatchConfig {
      generated_at: Utc::now(),
      model: "prebuilt-document".to_string(),
      source_dir: self.azure_ready_dir.display().to_string(),
      files: files.to_vec(),
    };

    let config_path = self.azure_ready_dir.join("azure_batch_config.json");
    let json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, json)?;
    Ok(config_path)
  }
}

/// Returns the reason a file fails the service constraints, or None if it conforms.
fn validation_failure(path: &Path) -> Result<Option<&'static str>, AppError> {
  let supported = path
    .extension()
    .and_then(|e| e.to_str())
    .map(|e| AZURE_SUPPORTED_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
    .unwrap_or(false);
  if !supported {
    return Ok(Some("unsupported format"));
  }

  let size = fs::metadata(path)?.len();
  if size == 0 {
    return Ok(Some("empty file"));
  }
  if size > MAX_FILE_SIZE_BYTES {
    return Ok(Some("exceeds service size limit"));
  }
  Ok(None)
}

#[async_trait]
impl StageCollaborator<PrepCtx, AppError> for AzurePrep {
  async fn execute(&self, ctx: ContextData<PrepCtx>) -> Result<StageYield, AppError> {
    crate::console::print_separator("STEP 3: EXTERNAL SERVICE PREPARATION");
    info!("Starting external service preparation...");
    let accepted = self.prepare_batch()?;
    let config_path = self.write_batch_config(&accepted)?;
    info!("External service preparation completed. {} images validated.", accepted.len());
    info!("Batch config generated: {}", config_path.display());

    {
      let mut guard = ctx.write();
      guard.azure_ready_images = accepted.len();
      guard.batch_config_path = Some(config_path);
    }
    Ok(StageYield::items(accepted.len()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn prep_for(dir: &Path) -> AzurePrep {
    AzurePrep {
      preprocessed_dir: dir.join("preprocessed"),
      azure_ready_dir: dir.join("azure_ready"),
    }
  }

  #[test]
  fn stages_conforming_files_and_rejects_the_rest() {
    let tmp = tempfile::tempdir().unwrap();
    let preprocessed = tmp.path().join("preprocessed");
    fs::create_dir_all(&preprocessed).unwrap();
    fs::write(preprocessed.join("good.png"), b"image bytes").unwrap();
    fs::write(preprocessed.join("empty.png"), b"").unwrap();
    fs::write(preprocessed.join("weird.xyz"), b"bytes").unwrap();

    let prep = prep_for(tmp.path());
    let accepted = prep.prepare_batch().unwrap();

    assert_eq!(accepted, vec!["good.png".to_string()]);
    assert!(tmp.path().join("azure_ready/good.png").is_file());
    assert!(!tmp.path().join("azure_ready/weird.xyz").exists());
  }

  #[test]
  fn batch_config_lists_accepted_files() {
    let tmp = tempfile::tempdir().unwrap();
    let prep = prep_for(tmp.path());
    let path = prep
      .write_batch_config(&["good.png".to_string()])
      .unwrap();

    let json = fs::read_to_string(path).unwrap();
    assert!(json.contains("prebuilt-document"));
    assert!(json.contains("good.png"));
  }

  #[test]
  fn missing_preprocessed_directory_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let prep = prep_for(tmp.path());
    let err = prep.prepare_batch().unwrap_err();
    assert!(matches!(err, AppError::ExternalPrep(_)));
  }
}
