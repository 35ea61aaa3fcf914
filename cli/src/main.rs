// docprep-cli/src/main.rs

use docprep_cli::cli::Cli;
use docprep_cli::config::AppConfig;
use docprep_cli::console;
use docprep_cli::errors::Result as AppResult;
use docprep_cli::pipelines::{build_prep_pipeline, PrepCtx};
use docprep_cli::report::ReportGenerator;

use chrono::Local;
use clap::Parser;
use docprep::ContextData;
use std::fs::{self, File};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the process-wide subscriber: one console layer, one plain-text
/// file layer under the configured logs directory. Owned by `main`; nothing
/// else in the application touches subscriber state.
fn init_tracing(config: &AppConfig, verbose: bool) -> AppResult<PathBuf> {
  fs::create_dir_all(&config.logs_dir)?;
  let log_path = config
    .logs_dir
    .join(format!("docprep_{}.log", Local::now().format("%Y%m%d_%H%M%S")));
  let log_file = File::create(&log_path)?;

  let default_level = if verbose { "debug" } else { "info" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  tracing_subscriber::registry()
    .with(filter)
    .with(fmt::layer())
    .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(log_file)))
    .init();

  Ok(log_path)
}

#[tokio::main]
async fn main() -> ExitCode {
  let cli_args = Cli::parse();

  // Load application configuration before logging exists; report problems
  // directly on stderr.
  let config = match AppConfig::load(&cli_args) {
    Ok(cfg) => Arc::new(cfg),
    Err(e) => {
      eprintln!("Configuration error: {}", e);
      return ExitCode::FAILURE;
    }
  };

  let log_path = match init_tracing(&config, cli_args.verbose) {
    Ok(path) => path,
    Err(e) => {
      eprintln!("Failed to initialize logging: {}", e);
      return ExitCode::FAILURE;
    }
  };
  tracing::info!("Logging to {}", log_path.display());

  console::print_header();

  let pipeline = build_prep_pipeline(&config);
  let ctx = ContextData::new(PrepCtx::new(config.clone()));

  // Stages run strictly sequentially inside `run`; Ctrl-C tears the whole run
  // down with a distinct log entry, attributed to no stage.
  let run = tokio::select! {
    result = pipeline.run(ctx.clone()) => match result {
      Ok(run) => run,
      Err(e) => {
        tracing::error!(error = %e, "Pipeline execution failed.");
        return ExitCode::FAILURE;
      }
    },
    _ = tokio::signal::ctrl_c() => {
      tracing::info!("Pipeline interrupted by user");
      return ExitCode::FAILURE;
    }
  };

  if run.aborted() {
    tracing::error!("Data collection failed. Aborting pipeline.");
    return ExitCode::FAILURE;
  }

  let generator = ReportGenerator::new(config.clone());
  let report_path = match generator.write(&run) {
    // Report persistence is fail-fast: no retry, no alternate location.
    Ok(path) => path,
    Err(e) => {
      tracing::error!(error = %e, "Failed to persist the final report.");
      return ExitCode::FAILURE;
    }
  };
  generator.print_summary(&run, &report_path);

  if run.overall_success() {
    tracing::info!("[+] Pipeline completed successfully!");
    ExitCode::SUCCESS
  } else {
    tracing::warn!("[!] Pipeline completed with some failures");
    ExitCode::FAILURE
  }
}
