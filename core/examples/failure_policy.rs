// docprep/examples/failure_policy.rs

//! Demonstrates the difference between the Abort and Continue failure
//! policies: the same failing stage either halts the run or is carried as a
//! failed outcome while the rest of the sequence executes.

use docprep::{ContextData, FailurePolicy, Pipeline, PipelineError, StageYield};
use tracing::info;

#[derive(Clone, Debug, Default)]
struct BatchContext {
  downstream_ran: bool,
}

fn build_pipeline(middle_policy: FailurePolicy) -> Pipeline<BatchContext, PipelineError> {
  let mut pipeline = Pipeline::<BatchContext, PipelineError>::new(&[
    ("collect", FailurePolicy::Abort, None),
    ("transform", middle_policy, None),
    ("publish", FailurePolicy::Continue, None),
  ]);

  pipeline.on_stage_fn("collect", |_ctx: ContextData<BatchContext>| async move {
    Ok::<_, PipelineError>(StageYield::items(5))
  });

  pipeline.on_stage_fn("transform", |_ctx: ContextData<BatchContext>| async move {
    Err::<StageYield, _>(PipelineError::Internal("transform blew up".to_string()))
  });

  pipeline.on_stage_fn("publish", |ctx: ContextData<BatchContext>| async move {
    ctx.write().downstream_ran = true;
    Ok::<_, PipelineError>(StageYield::items(5))
  });

  pipeline
}

#[tokio::main]
async fn main() -> Result<(), PipelineError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  // Continue: the failure is recorded, the tail of the sequence still runs.
  let ctx = ContextData::new(BatchContext::default());
  let run = build_pipeline(FailurePolicy::Continue).run(ctx.clone()).await?;
  info!(
    "Continue policy: aborted={}, overall_success={}, downstream_ran={}",
    run.aborted(),
    run.overall_success(),
    ctx.read().downstream_ran
  );
  assert!(!run.aborted());
  assert!(!run.overall_success());
  assert!(ctx.read().downstream_ran);

  // Abort: the failure halts the run; nothing after the failed stage executes.
  let ctx = ContextData::new(BatchContext::default());
  let run = build_pipeline(FailurePolicy::Abort).run(ctx.clone()).await?;
  info!(
    "Abort policy: aborted={}, recorded_outcomes={}, downstream_ran={}",
    run.aborted(),
    run.outcomes.len(),
    ctx.read().downstream_ran
  );
  assert!(run.aborted());
  assert_eq!(run.outcomes.len(), 2);
  assert!(!ctx.read().downstream_ran);

  Ok(())
}
