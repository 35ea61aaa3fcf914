// docprep-cli/src/services/image_preprocessor.rs

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::pipelines::contexts::PrepCtx;
use async_trait::async_trait;
use docprep::{ContextData, StageCollaborator, StageYield};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Image types the preprocessing stage operates on.
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tif", "tiff", "bmp"];

/// Preprocessing collaborator: runs a validation-and-copy pass over the raw
/// images, placing accepted images into the preprocessed directory.
///
/// Tolerates whatever prior state exists: it reads the raw input directory
/// directly, so it works the same whether or not collection ran this
/// invocation.
pub struct ImagePreprocessor {
  input_dir: PathBuf,
  preprocessed_dir: PathBuf,
}

impl ImagePreprocessor {
  pub fn new(config: &Arc<AppConfig>) -> Self {
    Self {
      input_dir: config.input_dir.clone(),
      preprocessed_dir: config.preprocessed_dir.clone(),
    }
  }

  /// Processes the batch, returning the number of images written.
  pub fn preprocess_batch(&self) -> Result<usize, AppError> {
    if !self.input_dir.is_dir() {
      return Err(AppError::Preprocessing(format!(
        "input directory '{}' does not exist",
        self.input_dir.display()
      )));
    }
    fs::create_dir_all(&self.preprocessed_dir)?;

    let mut processed = 0usize;
    for dir_entry in fs::read_dir(&self.input_dir)? {
      let path = dir_entry?.path();
      if !path.is_file() || !has_image_extension(&path) {
        continue;
      }

      // Quality gate: an unreadable or empty image is rejected, not copied.
      let metadata = fs::metadata(&path)?;
      if metadata.len() == 0 {
        warn!("Rejecting empty image: {}", path.display());
        continue;
      }

      let Some(file_name) = path.file_name() else { continue };
      fs::copy(&path, self.preprocessed_dir.join(file_name))?;
      processed += 1;
    }

    Ok(processed)
  }
}

fn has_image_extension(path: &std::path::Path) -> bool {
  path
    .extension()
    .and_then(|e| e.to_str())
    .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
    .unwrap_or(false)
}

#[async_trait]
impl StageCollaborator<PrepCtx, AppError> for ImagePreprocessor {
  async fn execute(&self, ctx: ContextData<PrepCtx>) -> Result<StageYield, AppError> {
    crate::console::print_separator("STEP 2: ADVANCED IMAGE PREPROCESSING");
    info!("Starting image preprocessing...");
    let processed = self.preprocess_batch()?;
    info!("Preprocessing completed. {} images processed.", processed);

    ctx.write().preprocessed_images = processed;
    Ok(StageYield::items(processed))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn preprocessor_for(dir: &std::path::Path) -> ImagePreprocessor {
    ImagePreprocessor {
      input_dir: dir.join("raw"),
      preprocessed_dir: dir.join("preprocessed"),
    }
  }

  #[test]
  fn copies_images_and_skips_empty_ones() {
    let tmp = tempfile::tempdir().unwrap();
    let raw = tmp.path().join("raw");
    fs::create_dir_all(&raw).unwrap();
    fs::write(raw.join("ok.png"), b"image bytes").unwrap();
    fs::write(raw.join("empty.png"), b"").unwrap();
    fs::write(raw.join("doc.pdf"), b"not an image").unwrap();

    let preprocessor = preprocessor_for(tmp.path());
    let processed = preprocessor.preprocess_batch().unwrap();

    assert_eq!(processed, 1);
    assert!(tmp.path().join("preprocessed/ok.png").is_file());
    assert!(!tmp.path().join("preprocessed/empty.png").exists());
  }

  #[test]
  fn missing_input_directory_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let preprocessor = preprocessor_for(tmp.path());
    let err = preprocessor.preprocess_batch().unwrap_err();
    assert!(matches!(err, AppError::Preprocessing(_)));
  }
}
