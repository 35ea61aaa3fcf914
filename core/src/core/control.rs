// docprep/src/core/control.rs

//! Defines signals for controlling pipeline flow and the terminal status of a run.

/// Per-stage policy applied when that stage's collaborator fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
  /// Halt the pipeline immediately. No further stages are attempted and the
  /// run is marked [`RunStatus::Aborted`].
  Abort,
  /// Record the failure and proceed to the next stage. The failure still
  /// counts against the run's overall success.
  Continue,
}

impl FailurePolicy {
  /// The flow signal this policy resolves to once a failure has been recorded.
  pub(crate) fn on_failure(self) -> PipelineControl {
    match self {
      FailurePolicy::Abort => PipelineControl::Stop,
      FailurePolicy::Continue => PipelineControl::Continue,
    }
  }
}

/// Signal indicating whether the pipeline should continue or stop after a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineControl {
  /// Continue with the next stage in declared order.
  Continue,
  /// Stop processing immediately and halt the pipeline.
  /// No further stages will be executed.
  Stop,
}

/// Terminal status of a full pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
  /// Every stage was either executed to an outcome or skipped.
  Completed,
  /// A stage governed by [`FailurePolicy::Abort`] failed and the remaining
  /// stages were never attempted.
  Aborted,
}
