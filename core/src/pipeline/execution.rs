// docprep/src/pipeline/execution.rs

//! Contains the `Pipeline::run()` method, responsible for executing the
//! pipeline's stages in declared order and applying each stage's failure
//! policy to decide between aborting and continuing.

use crate::core::context_data::ContextData;
use crate::core::control::PipelineControl;
use crate::core::outcome::{PipelineRun, StageOutcome};
use crate::error::PipelineError;
use crate::pipeline::definition::Pipeline;
use crate::pipeline::runner::StageRunner;
use tracing::{event, instrument, span, Level};

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  /// Executes the pipeline against the given shared run context.
  ///
  /// Stage failures never surface through the returned `Result`: they are
  /// absorbed by the [`StageRunner`] and recorded in the returned
  /// [`PipelineRun`], with the stage's [`FailurePolicy`] deciding whether the
  /// remaining stages still execute. The `Err` channel is reserved for wiring
  /// mistakes: a declared, non-skipped stage with no registered collaborator.
  ///
  /// [`FailurePolicy`]: crate::FailurePolicy
  #[instrument(
        name = "Pipeline::run",
        skip_all,
        fields(
            pipeline_context_data_type = %std::any::type_name::<TData>(),
            num_stages = self.stages.len(),
        ),
        err(Display)
    )]
  pub async fn run(&self, ctx_data: ContextData<TData>) -> Result<PipelineRun, Err> {
    event!(Level::DEBUG, "Pipeline execution starting.");
    let mut run = PipelineRun::begin();

    for (stage_idx, stage_def) in self.stages.iter().enumerate() {
      let stage_name_str = stage_def.name.as_str();

      let stage_span = span!(
        Level::INFO,
        "pipeline_stage",
        stage_name = stage_name_str,
        stage_index = stage_idx,
        policy = ?stage_def.policy
      );
      let _stage_span_guard = stage_span.enter();
      event!(Level::DEBUG, "Processing stage.");

      if let Some(skip_cond_fn) = &stage_def.skip_if {
        // Clone the context handle for the closure; it is used again below.
        if skip_cond_fn(ctx_data.clone()) {
          event!(Level::INFO, "Stage skipped due to 'skip_if' condition.");
          run.record(StageOutcome::skipped(stage_name_str));
          continue;
        }
      }

      let Some(collaborator) = self.collaborators.get(stage_name_str) else {
        event!(Level::ERROR, "Declared stage has no registered collaborator.");
        return Err(Err::from(PipelineError::CollaboratorMissing {
          stage_name: stage_def.name.clone(),
        }));
      };

      drop(_stage_span_guard);
      let outcome = StageRunner::run(stage_name_str, collaborator.as_ref(), ctx_data.clone()).await;
      let _stage_span_guard = stage_span.enter();

      let stage_failed = !outcome.succeeded();
      run.record(outcome);

      if stage_failed {
        match stage_def.policy.on_failure() {
          PipelineControl::Continue => {
            event!(Level::WARN, "Stage failed; policy is Continue, proceeding with remaining stages.");
          }
          PipelineControl::Stop => {
            event!(Level::ERROR, "Stage failed; policy is Abort, halting the pipeline.");
            run.mark_aborted();
            break;
          }
        }
      }
      event!(Level::DEBUG, "Stage processing finished.");
    } // End of loop over stages

    event!(Level::DEBUG, run_status = ?run.status, "Pipeline execution finished.");
    Ok(run)
  }
}
