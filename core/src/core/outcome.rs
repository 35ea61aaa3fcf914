// docprep/src/core/outcome.rs

//! Per-stage outcomes and the accumulated record of a full pipeline run.

use std::time::SystemTime;

use super::control::RunStatus;

/// Value returned by a collaborator whose primary operation succeeded.
///
/// Collaborators produce a finite, sized result set; the orchestrator only
/// carries the size forward for reporting, never the records themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageYield {
  pub item_count: usize,
}

impl StageYield {
  pub fn items(item_count: usize) -> Self {
    Self { item_count }
  }
}

/// How a single stage ended.
///
/// Exactly one variant applies per stage; a failure message exists only on
/// the `Failed` variant, which is what keeps the "error is set iff the stage
/// failed" invariant out of reach of misuse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageStatus {
  /// The collaborator returned normally.
  Completed { item_count: usize },
  /// The collaborator raised; the error was absorbed at the runner boundary.
  Failed { error: String },
  /// The stage was bypassed by configuration. The collaborator was never invoked.
  Skipped,
}

/// Outcome of one stage, in the order the pipeline declared it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageOutcome {
  pub name: String,
  pub status: StageStatus,
}

impl StageOutcome {
  pub fn completed(name: impl Into<String>, item_count: usize) -> Self {
    Self {
      name: name.into(),
      status: StageStatus::Completed { item_count },
    }
  }

  pub fn failed(name: impl Into<String>, error: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      status: StageStatus::Failed { error: error.into() },
    }
  }

  pub fn skipped(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      status: StageStatus::Skipped,
    }
  }

  pub fn succeeded(&self) -> bool {
    matches!(self.status, StageStatus::Completed { .. })
  }

  pub fn skipped_over(&self) -> bool {
    matches!(self.status, StageStatus::Skipped)
  }

  pub fn item_count(&self) -> Option<usize> {
    match self.status {
      StageStatus::Completed { item_count } => Some(item_count),
      _ => None,
    }
  }

  pub fn error(&self) -> Option<&str> {
    match &self.status {
      StageStatus::Failed { error } => Some(error.as_str()),
      _ => None,
    }
  }
}

/// Accumulated record of one pipeline invocation.
///
/// Created once per invocation, appended to as stages finish, and treated as
/// immutable once handed to a report renderer. Runs are independent; nothing
/// here is persisted across invocations.
#[derive(Debug, Clone)]
pub struct PipelineRun {
  /// One outcome per declared stage, insertion order = execution order.
  /// An aborted run stops short of the full stage list.
  pub outcomes: Vec<StageOutcome>,
  pub status: RunStatus,
  /// Fixed at run start, before the first stage executes.
  pub started_at: SystemTime,
}

impl PipelineRun {
  pub fn begin() -> Self {
    Self::begin_at(SystemTime::now())
  }

  pub fn begin_at(started_at: SystemTime) -> Self {
    Self {
      outcomes: Vec::new(),
      status: RunStatus::Completed,
      started_at,
    }
  }

  pub fn record(&mut self, outcome: StageOutcome) {
    self.outcomes.push(outcome);
  }

  pub fn mark_aborted(&mut self) {
    self.status = RunStatus::Aborted;
  }

  pub fn aborted(&self) -> bool {
    self.status == RunStatus::Aborted
  }

  /// Looks up the recorded outcome for a stage by name.
  pub fn outcome(&self, name: &str) -> Option<&StageOutcome> {
    self.outcomes.iter().find(|o| o.name == name)
  }

  /// Aggregation rule: AND over the success flags of every executed,
  /// non-skipped stage. Skipped stages are vacuously satisfied, so a run
  /// where every stage was skipped counts as successful.
  pub fn overall_success(&self) -> bool {
    self
      .outcomes
      .iter()
      .filter(|o| !o.skipped_over())
      .all(|o| o.succeeded())
  }
}
