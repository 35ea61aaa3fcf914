// docprep-cli/src/report.rs

//! Renders a finished pipeline run into the persisted execution report and
//! the console summary. Pure presentation: every status it prints was already
//! decided by the orchestrator.

use crate::config::AppConfig;
use crate::errors::Result;
use crate::pipelines::stage_label;
use chrono::{DateTime, Local};
use docprep::{PipelineRun, StageOutcome};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

const HEAVY_RULE: &str =
  "================================================================================";
const LIGHT_RULE: &str =
  "--------------------------------------------------------------------------------";

pub struct ReportGenerator {
  config: Arc<AppConfig>,
}

impl ReportGenerator {
  pub fn new(config: Arc<AppConfig>) -> Self {
    Self { config }
  }

  /// Renders the full report document.
  pub fn render(&self, run: &PipelineRun) -> String {
    let executed_at: DateTime<Local> = run.started_at.into();

    let mut out = String::new();
    let _ = writeln!(out, "{}", HEAVY_RULE);
    let _ = writeln!(out, "DOCUMENT PREPARATION PIPELINE - FINAL EXECUTION REPORT");
    let _ = writeln!(out, "Data Collection, Preprocessing and External Service Preparation");
    let _ = writeln!(out, "{}", HEAVY_RULE);
    let _ = writeln!(out);

    let _ = writeln!(out, "Execution Date: {}", executed_at.format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(out);

    let _ = writeln!(out, "PIPELINE EXECUTION STATUS");
    let _ = writeln!(out, "{}", LIGHT_RULE);
    for (idx, outcome) in run.outcomes.iter().enumerate() {
      let heading = format!("{}. {}:", idx + 1, stage_label(&outcome.name));
      let _ = writeln!(out, "{:<37}{}", heading, status_line(outcome));
    }
    let _ = writeln!(out);

    let overall = if run.overall_success() {
      "[MILESTONE COMPLETED]"
    } else {
      "[PARTIALLY COMPLETED]"
    };
    let _ = writeln!(out, "Overall Status: {}", overall);
    let _ = writeln!(out);

    let _ = writeln!(out, "DELIVERABLES");
    let _ = writeln!(out, "{}", LIGHT_RULE);
    let _ = writeln!(out, "[+] Raw data validated and cataloged");
    let _ = writeln!(out, "[+] Document metadata extracted");
    let _ = writeln!(out, "[+] Images preprocessed with quality checks");
    let _ = writeln!(out, "[+] Service-compatible images prepared");
    let _ = writeln!(out, "[+] Batch configuration generated");
    let _ = writeln!(out, "[+] Comprehensive reports generated");
    let _ = writeln!(out);

    let _ = writeln!(out, "OUTPUT DIRECTORIES");
    let _ = writeln!(out, "{}", LIGHT_RULE);
    let dirs = [
      (&self.config.metadata_dir, "Document catalogs and metadata"),
      (&self.config.preprocessed_dir, "Preprocessed images"),
      (&self.config.azure_ready_dir, "Service-compatible images and batch config"),
      (&self.config.reports_dir, "Validation and execution reports"),
      (&self.config.logs_dir, "Pipeline execution logs"),
    ];
    for (dir, purpose) in dirs {
      let _ = writeln!(out, "  {:<27}- {}", dir.display().to_string(), purpose);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "NEXT STEPS");
    let _ = writeln!(out, "{}", LIGHT_RULE);
    let _ = writeln!(out, "1. Set up document intelligence service credentials");
    let _ = writeln!(out, "2. Implement OCR extraction against the service API");
    let _ = writeln!(out, "3. Implement document verification logic");
    let _ = writeln!(out, "4. Build fraud detection models");
    let _ = writeln!(out, "5. Create API endpoints for document processing");

    out
  }

  /// Persists the report under the configured reports directory and returns
  /// its path. The filename embeds the run's start timestamp, which keeps
  /// reports from successive runs distinct within the same directory.
  pub fn write(&self, run: &PipelineRun) -> Result<PathBuf> {
    fs::create_dir_all(&self.config.reports_dir)?;

    let started_at: DateTime<Local> = run.started_at.into();
    let report_path = self.config.reports_dir.join(format!(
      "docprep_final_report_{}.txt",
      started_at.format("%Y%m%d_%H%M%S")
    ));

    fs::write(&report_path, self.render(run))?;
    info!("Final report saved to: {}", report_path.display());
    Ok(report_path)
  }

  /// Prints the short console restatement of the run, plus the report path.
  pub fn print_summary(&self, run: &PipelineRun, report_path: &Path) {
    println!("\n{}", HEAVY_RULE);
    println!("PIPELINE EXECUTION SUMMARY");
    println!("{}", HEAVY_RULE);
    for outcome in &run.outcomes {
      let heading = format!("{}:", stage_label(&outcome.name));
      println!("{:<37}{}", heading, summary_marker(outcome));
    }
    println!("{}", LIGHT_RULE);

    if run.overall_success() {
      println!("[+] PIPELINE COMPLETED SUCCESSFULLY!");
    } else {
      println!("[!] PIPELINE PARTIALLY COMPLETED - Review logs for details");
    }

    println!("\nFinal Report: {}", report_path.display());
    println!("{}\n", HEAVY_RULE);
  }
}

fn status_line(outcome: &StageOutcome) -> String {
  if outcome.skipped_over() {
    "[SKIPPED]".to_string()
  } else if let Some(error) = outcome.error() {
    format!("[FAILED] - {}", error)
  } else {
    match outcome.item_count() {
      Some(count) => format!("[COMPLETED] ({} items)", count),
      None => "[COMPLETED]".to_string(),
    }
  }
}

fn summary_marker(outcome: &StageOutcome) -> &'static str {
  if outcome.skipped_over() {
    "[~] Skipped"
  } else if outcome.succeeded() {
    "[+] Success"
  } else {
    "[-] Failed"
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::time::{Duration, SystemTime};

  fn config_for(dir: &Path) -> Arc<AppConfig> {
    Arc::new(AppConfig {
      input_dir: dir.join("raw"),
      metadata_dir: dir.join("metadata"),
      preprocessed_dir: dir.join("preprocessed"),
      azure_ready_dir: dir.join("azure_ready"),
      reports_dir: dir.join("reports"),
      logs_dir: dir.join("logs"),
      skip_collection: false,
      skip_preprocessing: false,
      skip_azure: false,
    })
  }

  fn run_at(secs: u64) -> PipelineRun {
    PipelineRun::begin_at(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
  }

  #[test]
  fn all_completed_run_renders_milestone_marker() {
    let tmp = tempfile::tempdir().unwrap();
    let generator = ReportGenerator::new(config_for(tmp.path()));

    let mut run = run_at(1_700_000_000);
    run.record(docprep::StageOutcome::completed("collection", 10));
    run.record(docprep::StageOutcome::completed("preprocessing", 10));
    run.record(docprep::StageOutcome::completed("external_prep", 8));

    let report = generator.render(&run);
    assert_eq!(report.matches("[COMPLETED]").count(), 3);
    assert!(report.contains("[MILESTONE COMPLETED]"));
    assert!(!report.contains("[FAILED]"));
  }

  #[test]
  fn failed_stage_renders_error_and_partial_marker() {
    let tmp = tempfile::tempdir().unwrap();
    let generator = ReportGenerator::new(config_for(tmp.path()));

    let mut run = run_at(1_700_000_000);
    run.record(docprep::StageOutcome::completed("collection", 10));
    run.record(docprep::StageOutcome::failed("preprocessing", "disk full"));
    run.record(docprep::StageOutcome::completed("external_prep", 8));

    let report = generator.render(&run);
    assert!(report.contains("[FAILED] - disk full"));
    assert!(report.contains("[PARTIALLY COMPLETED]"));
    assert!(report.contains("(10 items)"));
    assert!(report.contains("(8 items)"));
  }

  #[test]
  fn skipped_stage_gets_its_own_marker() {
    let tmp = tempfile::tempdir().unwrap();
    let generator = ReportGenerator::new(config_for(tmp.path()));

    let mut run = run_at(1_700_000_000);
    run.record(docprep::StageOutcome::skipped("collection"));
    run.record(docprep::StageOutcome::completed("preprocessing", 10));
    run.record(docprep::StageOutcome::completed("external_prep", 8));

    let report = generator.render(&run);
    assert!(report.contains("[SKIPPED]"));
    // A skipped stage is neutral, not failed: the run still counts as complete.
    assert!(report.contains("[MILESTONE COMPLETED]"));
  }

  #[test]
  fn successive_runs_persist_to_distinct_files_with_identical_content() {
    let tmp = tempfile::tempdir().unwrap();
    let generator = ReportGenerator::new(config_for(tmp.path()));

    let mut first = run_at(1_700_000_000);
    first.record(docprep::StageOutcome::completed("collection", 10));
    let mut second = run_at(1_700_000_001);
    second.record(docprep::StageOutcome::completed("collection", 10));

    let first_path = generator.write(&first).unwrap();
    let second_path = generator.write(&second).unwrap();

    assert_ne!(first_path, second_path);
    let strip_date = |s: String| {
      s.lines()
        .filter(|l| !l.starts_with("Execution Date:"))
        .collect::<Vec<_>>()
        .join("\n")
    };
    assert_eq!(
      strip_date(fs::read_to_string(first_path).unwrap()),
      strip_date(fs::read_to_string(second_path).unwrap())
    );
  }

  #[test]
  fn writing_creates_the_reports_directory_idempotently() {
    let tmp = tempfile::tempdir().unwrap();
    let generator = ReportGenerator::new(config_for(tmp.path()));

    let mut run = run_at(1_700_000_000);
    run.record(docprep::StageOutcome::completed("collection", 1));

    // Twice: once creating the directory, once with it already present.
    generator.write(&run).unwrap();
    generator.write(&run).unwrap();
    assert!(tmp.path().join("reports").is_dir());
  }
}
