// docprep-cli/src/cli.rs

use clap::Parser;

/// Run the document-preparation pipeline: data collection and validation,
/// image preprocessing, and external OCR-service preparation, with a
/// consolidated execution report at the end.
#[derive(Debug, Parser)]
#[command(
  name = "docprep",
  version,
  about = "Document-preparation batch pipeline",
  long_about = "Runs the fixed document-preparation sequence (collection, \
                preprocessing, external service preparation) and persists a \
                consolidated execution report.\n\n\
                A failed collection stage aborts the run; failures in later \
                stages are recorded and the remaining stages still execute."
)]
pub struct Cli {
  /// Skip the data collection stage (use an existing catalog)
  #[arg(long)]
  pub skip_collection: bool,

  /// Skip the preprocessing stage (use existing processed images)
  #[arg(long)]
  pub skip_preprocessing: bool,

  /// Skip the external service preparation stage
  #[arg(long)]
  pub skip_azure: bool,

  /// Enable verbose logging
  #[arg(short, long)]
  pub verbose: bool,
}
