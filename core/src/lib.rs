// src/lib.rs

//! docprep: a sequential batch-pipeline orchestrator for document-preparation
//! workflows.
//!
//! docprep runs a fixed, ordered sequence of named stages, each implemented by
//! an independent collaborator, and accumulates a consolidated record of the
//! run:
//!  - Named stages with a per-stage failure policy (abort vs continue).
//!  - Per-stage skip conditions evaluated against the shared run context.
//!  - Collaborator failures absorbed at the runner boundary and turned into
//!    outcome data, never re-raised across the orchestration boundary.
//!  - A `PipelineRun` value recording every outcome in execution order, with
//!    the overall-success aggregation rule derived from it.

// Declare modules according to the planned structure
pub mod core;
pub mod pipeline;
pub mod error;

// --- Re-exports for the Public API ---

// Core types that users will interact with frequently
pub use crate::core::collaborator::StageCollaborator;
pub use crate::core::context_data::ContextData;
pub use crate::core::control::{FailurePolicy, PipelineControl, RunStatus};
pub use crate::core::outcome::{PipelineRun, StageOutcome, StageStatus, StageYield};
pub use crate::core::stage::{SkipCondition, StageDef};

// The main Pipeline struct and the runner that guards the collaborator boundary
pub use crate::pipeline::definition::Pipeline;
pub use crate::pipeline::runner::StageRunner;

pub use crate::error::{PipelineError, PipelineResult};

/*
    Core Workflow:
    1. Define a context struct `MyCtx` shared by all stages of your run.
    2. Create a `Pipeline<MyCtx, MyErr>`, declaring its stages in order with a
       `FailurePolicy` and an optional skip condition each.
    3. Register one collaborator per stage with `.on_stage()` (or a closure
       with `.on_stage_fn()`).
    4. Create a `ContextData::new(MyCtx { .. })` and call `pipeline.run(ctx).await`.
    5. Inspect the returned `PipelineRun`: per-stage outcomes in execution
       order, the run status, and `overall_success()`.
*/
