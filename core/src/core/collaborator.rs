// docprep/src/core/collaborator.rs

//! The collaborator seam: the trait every stage implementation plugs in
//! behind, plus a closure adapter for lightweight collaborators.

use std::future::Future;

use async_trait::async_trait;

use super::context_data::ContextData;
use super::outcome::StageYield;

/// A stage's entry point as seen by the orchestrator.
///
/// Collaborators communicate failure solely by returning `Err`; there is no
/// partial-result convention at this boundary. A returned error is absorbed
/// by the stage runner and turned into outcome data, so implementations are
/// free to use `?` liberally on their internal operations.
///
/// `TData` is the shared run context; implementations may read or update it
/// (dropping any lock guard before the next `.await`), but the sized result
/// summary they hand back is the only value the orchestrator itself inspects.
#[async_trait]
pub trait StageCollaborator<TData, Err>: Send + Sync
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + Send + Sync + 'static,
{
  /// Runs the collaborator's primary operation to completion.
  async fn execute(&self, ctx: ContextData<TData>) -> Result<StageYield, Err>;
}

/// Adapter so a plain async closure can act as a collaborator.
///
/// Used by [`Pipeline::on_stage_fn`](crate::Pipeline::on_stage_fn); tests and
/// examples lean on this where a full collaborator struct would be noise.
pub(crate) struct FnCollaborator<F> {
  f: F,
}

impl<F> FnCollaborator<F> {
  pub(crate) fn new(f: F) -> Self {
    Self { f }
  }
}

#[async_trait]
impl<TData, Err, F, Fut> StageCollaborator<TData, Err> for FnCollaborator<F>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + Send + Sync + 'static,
  F: Fn(ContextData<TData>) -> Fut + Send + Sync,
  Fut: Future<Output = Result<StageYield, Err>> + Send + 'static,
{
  async fn execute(&self, ctx: ContextData<TData>) -> Result<StageYield, Err> {
    (self.f)(ctx).await
  }
}
