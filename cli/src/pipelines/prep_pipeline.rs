// docprep-cli/src/pipelines/prep_pipeline.rs

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::pipelines::contexts::PrepCtx;
use crate::services::{AzurePrep, DocumentCollector, ImagePreprocessor};
use docprep::{ContextData, FailurePolicy, Pipeline, SkipCondition};
use std::sync::Arc;

/// Stage names of the fixed document-preparation sequence.
pub mod stages {
  pub const COLLECTION: &str = "collection";
  pub const PREPROCESSING: &str = "preprocessing";
  pub const EXTERNAL_PREP: &str = "external_prep";
}

/// Human-readable label for a stage, as used by the report and the console summary.
pub fn stage_label(name: &str) -> &'static str {
  match name {
    stages::COLLECTION => "Data Collection & Validation",
    stages::PREPROCESSING => "Advanced Preprocessing",
    stages::EXTERNAL_PREP => "External Service Preparation",
    _ => "Unknown Stage",
  }
}

fn skip_when(flag: fn(&AppConfig) -> bool) -> Option<SkipCondition<PrepCtx>> {
  Some(Arc::new(move |ctx: ContextData<PrepCtx>| flag(&ctx.read().config)))
}

/// Builds the fixed three-stage document-preparation pipeline.
///
/// Collection aborts the run on failure; the two downstream stages record
/// their failure and let the rest of the sequence execute. Each stage can be
/// independently skipped via the corresponding configuration switch, in which
/// case its collaborator is never invoked.
pub fn build_prep_pipeline(config: &Arc<AppConfig>) -> Pipeline<PrepCtx, AppError> {
  let mut p = Pipeline::<PrepCtx, AppError>::new(&[
    (stages::COLLECTION, FailurePolicy::Abort, skip_when(|c| c.skip_collection)),
    (stages::PREPROCESSING, FailurePolicy::Continue, skip_when(|c| c.skip_preprocessing)),
    (stages::EXTERNAL_PREP, FailurePolicy::Continue, skip_when(|c| c.skip_azure)),
  ]);

  p.on_stage(stages::COLLECTION, Arc::new(DocumentCollector::new(config)));
  p.on_stage(stages::PREPROCESSING, Arc::new(ImagePreprocessor::new(config)));
  p.on_stage(stages::EXTERNAL_PREP, Arc::new(AzurePrep::new(config)));

  p
}
