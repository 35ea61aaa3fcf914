// docprep-cli/src/pipelines/mod.rs

pub mod contexts;
pub mod prep_pipeline;

pub use contexts::PrepCtx;
pub use prep_pipeline::{build_prep_pipeline, stage_label, stages};
