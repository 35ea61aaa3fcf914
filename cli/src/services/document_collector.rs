// docprep-cli/src/services/document_collector.rs

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::pipelines::contexts::PrepCtx;
use async_trait::async_trait;
use docprep::{ContextData, StageCollaborator, StageYield};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Document types the collection stage accepts into the catalog.
const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "png", "jpg", "jpeg", "tif", "tiff", "bmp"];

/// One cataloged input document.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
  pub file_name: String,
  pub relative_path: String,
  pub extension: String,
  pub size_bytes: u64,
}

/// Collection collaborator: walks the input directory, catalogs every
/// supported document, and persists the catalog as JSON into the metadata
/// directory.
pub struct DocumentCollector {
  input_dir: PathBuf,
  metadata_dir: PathBuf,
}

impl DocumentCollector {
  pub fn new(config: &Arc<AppConfig>) -> Self {
    Self {
      input_dir: config.input_dir.clone(),
      metadata_dir: config.metadata_dir.clone(),
    }
  }

  /// Catalogs the input documents. Errors if the input directory is missing
  /// or unreadable; an empty catalog is not an error.
  pub fn collect_documents(&self) -> Result<Vec<CatalogEntry>, AppError> {
    if !self.input_dir.is_dir() {
      return Err(AppError::Collection(format!(
        "input directory '{}' does not exist",
        self.input_dir.display()
      )));
    }

    let mut entries = Vec::new();
    collect_into(&self.input_dir, &self.input_dir, &mut entries)?;
    // Stable catalog order regardless of directory iteration order.
    entries.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    Ok(entries)
  }

  /// Persists the catalog and returns its path.
  pub fn write_catalog(&self, entries: &[CatalogEntry]) -> Result<PathBuf, AppError> {
    fs::create_dir_all(&self.metadata_dir)?;
    let catalog_path = self.metadata_dir.join("document_catalog.json");
    let json = serde_json::to_string_pretty(entries)?;
    fs::write(&catalog_path, json)?;
    Ok(catalog_path)
  }
}

fn collect_into(root: &Path, dir: &Path, entries: &mut Vec<CatalogEntry>) -> Result<(), AppError> {
  for dir_entry in fs::read_dir(dir)? {
    let dir_entry = dir_entry?;
    let path = dir_entry.path();
    if path.is_dir() {
      collect_into(root, &path, entries)?;
      continue;
    }

    let Some(extension) = path
      .extension()
      .and_then(|e| e.to_str())
      .map(|e| e.to_ascii_lowercase())
    else {
      continue;
    };
    if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
      continue;
    }

    let metadata = dir_entry.metadata()?;
    entries.push(CatalogEntry {
      file_name: path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default(),
      relative_path: path
        .strip_prefix(root)
        .unwrap_or(&path)
        .to_string_lossy()
        .into_owned(),
      extension,
      size_bytes: metadata.len(),
    });
  }
  Ok(())
}

#[async_trait]
impl StageCollaborator<PrepCtx, AppError> for DocumentCollector {
  async fn execute(&self, ctx: ContextData<PrepCtx>) -> Result<StageYield, AppError> {
    crate::console::print_separator("STEP 1: DATA COLLECTION AND VALIDATION");
    info!("Starting data collection...");
    let entries = self.collect_documents()?;
    let catalog_path = self.write_catalog(&entries)?;
    info!(
      "Data collection completed. {} documents cataloged to {}.",
      entries.len(),
      catalog_path.display()
    );

    ctx.write().cataloged_documents = entries.len();
    Ok(StageYield::items(entries.len()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn collector_for(dir: &Path) -> DocumentCollector {
    DocumentCollector {
      input_dir: dir.join("raw"),
      metadata_dir: dir.join("metadata"),
    }
  }

  #[test]
  fn catalogs_supported_documents_recursively() {
    let tmp = tempfile::tempdir().unwrap();
    let raw = tmp.path().join("raw");
    fs::create_dir_all(raw.join("nested")).unwrap();
    fs::write(raw.join("a.pdf"), b"pdf bytes").unwrap();
    fs::write(raw.join("nested/b.png"), b"png bytes").unwrap();
    fs::write(raw.join("notes.txt"), b"ignored").unwrap();

    let collector = collector_for(tmp.path());
    let entries = collector.collect_documents().unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].file_name, "a.pdf");
    assert_eq!(entries[1].relative_path, "nested/b.png");
  }

  #[test]
  fn missing_input_directory_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let collector = collector_for(tmp.path());
    let err = collector.collect_documents().unwrap_err();
    assert!(matches!(err, AppError::Collection(_)));
  }

  #[test]
  fn writes_catalog_json() {
    let tmp = tempfile::tempdir().unwrap();
    fs::create_dir_all(tmp.path().join("raw")).unwrap();
    fs::write(tmp.path().join("raw/a.pdf"), b"pdf bytes").unwrap();

    let collector = collector_for(tmp.path());
    let entries = collector.collect_documents().unwrap();
    let path = collector.write_catalog(&entries).unwrap();

    let json = fs::read_to_string(path).unwrap();
    assert!(json.contains("a.pdf"));
  }
}
