// docprep/examples/basic_pipeline.rs

use docprep::{ContextData, FailurePolicy, Pipeline, PipelineError, RunStatus, StageYield};
use tracing::info;

// 1. Define the shared run context for the pipeline
#[derive(Clone, Debug, Default)]
struct BatchContext {
  cataloged: usize,
  prepared: usize,
}

// 2. This example uses PipelineError directly for its collaborators.
//    In real applications, you'd typically define a custom error:
//    #[derive(Debug, thiserror::Error)]
//    enum MyError { #[error("docprep: {0}")] Pipeline(#[from] PipelineError), /* ... */ }

#[tokio::main]
async fn main() -> Result<(), PipelineError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Basic Pipeline Example ---");

  // 3. Declare the stages in order, each with a failure policy
  let mut pipeline = Pipeline::<BatchContext, PipelineError>::new(&[
    ("catalog", FailurePolicy::Abort, None),
    ("prepare", FailurePolicy::Continue, None),
  ]);

  // 4. Register a collaborator per stage
  pipeline.on_stage_fn("catalog", |ctx: ContextData<BatchContext>| async move {
    let mut data = ctx.write();
    data.cataloged = 10;
    info!("Cataloged {} documents", data.cataloged);
    Ok::<_, PipelineError>(StageYield::items(data.cataloged))
  });

  pipeline.on_stage_fn("prepare", |ctx: ContextData<BatchContext>| async move {
    let mut data = ctx.write();
    data.prepared = data.cataloged - 2;
    info!("Prepared {} documents", data.prepared);
    Ok::<_, PipelineError>(StageYield::items(data.prepared))
  });

  // 5. Run against a fresh context
  let ctx = ContextData::new(BatchContext::default());
  info!("Starting pipeline execution...");
  let run = pipeline.run(ctx.clone()).await?;

  // 6. Inspect the accumulated record
  match run.status {
    RunStatus::Completed => info!("Pipeline ran to completion."),
    RunStatus::Aborted => info!("Pipeline was aborted early."),
  }
  for outcome in &run.outcomes {
    info!("- {}: {:?}", outcome.name, outcome.status);
  }
  info!("Overall success: {}", run.overall_success());

  assert!(run.overall_success());
  assert_eq!(run.outcome("prepare").and_then(|o| o.item_count()), Some(8));

  Ok(())
}
