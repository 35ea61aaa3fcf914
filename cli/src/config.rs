// docprep-cli/src/config.rs

use crate::cli::Cli;
use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

/// Resolved application configuration: the data directories every stage and
/// the report generator work against, plus the per-stage skip switches.
///
/// Directories come from the environment (with defaults matching the
/// conventional data layout); skip switches come from the CLI flags.
#[derive(Debug, Clone)]
pub struct AppConfig {
  /// Raw input documents to catalog.
  pub input_dir: PathBuf,
  /// Catalogs and extracted document metadata.
  pub metadata_dir: PathBuf,
  /// Preprocessed images.
  pub preprocessed_dir: PathBuf,
  /// Images validated for the external OCR service, plus the batch config.
  pub azure_ready_dir: PathBuf,
  /// Persisted execution reports.
  pub reports_dir: PathBuf,
  /// Pipeline execution logs.
  pub logs_dir: PathBuf,

  pub skip_collection: bool,
  pub skip_preprocessing: bool,
  pub skip_azure: bool,
}

impl AppConfig {
  pub fn load(cli: &Cli) -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let dir_env = |var_name: &str, default: &str| -> Result<PathBuf> {
      match env::var(var_name) {
        Ok(v) if v.trim().is_empty() => Err(AppError::Config(format!(
          "Environment variable '{}' is set but empty",
          var_name
        ))),
        Ok(v) => Ok(PathBuf::from(v)),
        Err(_) => Ok(PathBuf::from(default)),
      }
    };

    let config = Self {
      input_dir: dir_env("DOCPREP_INPUT_DIR", "data/raw")?,
      metadata_dir: dir_env("DOCPREP_METADATA_DIR", "data/metadata")?,
      preprocessed_dir: dir_env("DOCPREP_PREPROCESSED_DIR", "data/preprocessed")?,
      azure_ready_dir: dir_env("DOCPREP_AZURE_READY_DIR", "data/azure_ready")?,
      reports_dir: dir_env("DOCPREP_REPORTS_DIR", "data/validation_reports")?,
      logs_dir: dir_env("DOCPREP_LOGS_DIR", "logs")?,
      skip_collection: cli.skip_collection,
      skip_preprocessing: cli.skip_preprocessing,
      skip_azure: cli.skip_azure,
    };

    tracing::debug!(?config, "Application configuration loaded.");
    Ok(config)
  }
}
