// docprep/src/pipeline/runner.rs

//! Contains the `StageRunner`: the boundary at which collaborator failures
//! stop being errors and become outcome data.

use tracing::{event, span, Instrument, Level};

use crate::core::collaborator::StageCollaborator;
use crate::core::context_data::ContextData;
use crate::core::outcome::StageOutcome;

/// Invokes one collaborator and converts whatever happens into a
/// [`StageOutcome`]. Stateless; one logical runner per stage invocation.
///
/// A collaborator error is fully absorbed here: it is logged, rendered via
/// `Display` into the failed outcome, and never re-raised. Whether a failed
/// outcome halts the pipeline is the orchestrator's decision, made from the
/// recorded outcome, not from an error value.
pub struct StageRunner;

impl StageRunner {
  pub async fn run<TData, Err>(
    stage_name: &str,
    collaborator: &dyn StageCollaborator<TData, Err>,
    ctx_data: ContextData<TData>,
  ) -> StageOutcome
  where
    TData: 'static + Send + Sync,
    Err: std::error::Error + Send + Sync + 'static,
  {
    let stage_span = span!(Level::INFO, "stage_execution", stage = stage_name);

    async move {
      event!(Level::INFO, "Stage starting.");
      match collaborator.execute(ctx_data).await {
        Ok(stage_yield) => {
          event!(Level::INFO, item_count = stage_yield.item_count, "Stage completed.");
          StageOutcome::completed(stage_name, stage_yield.item_count)
        }
        Err(e) => {
          event!(Level::ERROR, error = %e, "Stage failed.");
          StageOutcome::failed(stage_name, e.to_string())
        }
      }
    }
    .instrument(stage_span)
    .await
  }
}
