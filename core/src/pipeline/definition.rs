// docprep/src/pipeline/definition.rs

//! Contains the `Pipeline<TData, Err>` struct definition and methods for its
//! construction and wiring.

use crate::core::collaborator::{FnCollaborator, StageCollaborator};
use crate::core::context_data::ContextData;
use crate::core::control::FailurePolicy;
use crate::core::outcome::StageYield;
use crate::core::stage::{SkipCondition, StageDef};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

/// The core Pipeline type, generic over a shared run context `TData` and an
/// error type `Err` that its collaborators return.
///
/// `TData` must be `'static + Send + Sync`.
/// `Err` must be `std::error::Error + Send + Sync + 'static` and additionally
/// `From<crate::error::PipelineError>`, so that wiring mistakes detected at
/// run time (a declared stage with no collaborator) can surface through the
/// same error channel the application already handles.
pub struct Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<crate::error::PipelineError> + Send + Sync + 'static,
{
  /// Ordered list of stage definitions for this pipeline.
  pub(crate) stages: Vec<StageDef<TData>>,

  /// One collaborator per stage, keyed by stage name.
  pub(crate) collaborators: HashMap<String, Arc<dyn StageCollaborator<TData, Err>>>,
}

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<crate::error::PipelineError> + Send + Sync + 'static,
{
  /// Creates a new `Pipeline` with an ordered set of stage definitions.
  pub fn new(stage_defs: &[(&str, FailurePolicy, Option<SkipCondition<TData>>)]) -> Self {
    let stages = stage_defs
      .iter()
      .map(|(name, policy, skip_cond_opt)| StageDef {
        name: (*name).to_string(),
        policy: *policy,
        skip_if: skip_cond_opt.clone(),
      })
      .collect();

    Self {
      stages,
      collaborators: HashMap::new(),
    }
  }

  /// Ensures that a stage with the given name exists in the pipeline. Panics if not found.
  /// This method is typically used internally before operating on a stage.
  pub(crate) fn ensure_stage_exists(&self, stage_name: &str) {
    if !self.stages.iter().any(|s| s.name == stage_name) {
      // This panic is a programming error indicator (e.g., typo in stage name).
      // It's not a PipelineError because it's a setup issue, not a run issue.
      panic!(
        "docprep setup error: Stage '{}' not found in pipeline definition.",
        stage_name
      );
    }
  }

  /// Registers the collaborator that implements a declared stage.
  ///
  /// Each stage carries exactly one collaborator; registering a second one
  /// for the same stage replaces the first.
  pub fn on_stage(&mut self, stage_name: &str, collaborator: Arc<dyn StageCollaborator<TData, Err>>) {
    self.ensure_stage_exists(stage_name);
    self.collaborators.insert(stage_name.to_string(), collaborator);
  }

  /// Registers a plain async closure as a stage's collaborator.
  pub fn on_stage_fn<F, Fut>(&mut self, stage_name: &str, f: F)
  where
    F: Fn(ContextData<TData>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<StageYield, Err>> + Send + 'static,
  {
    self.on_stage(stage_name, Arc::new(FnCollaborator::new(f)));
  }

  /// Replaces a stage's failure policy.
  pub fn set_policy(&mut self, stage_name: &str, policy: FailurePolicy) {
    self.ensure_stage_exists(stage_name);
    self.stages.iter_mut().find(|s| s.name == stage_name).unwrap().policy = policy;
  }

  /// Replaces (or clears) a stage's skip condition.
  pub fn set_skip_condition(&mut self, stage_name: &str, skip_if: Option<SkipCondition<TData>>) {
    self.ensure_stage_exists(stage_name);
    self.stages.iter_mut().find(|s| s.name == stage_name).unwrap().skip_if = skip_if;
  }

  /// Declared stage names, in execution order.
  pub fn stage_names(&self) -> impl Iterator<Item = &str> {
    self.stages.iter().map(|s| s.name.as_str())
  }
}
