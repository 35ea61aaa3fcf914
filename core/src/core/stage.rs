// docprep/src/core/stage.rs

//! Defines the structure for a single stage within a pipeline.

use super::control::FailurePolicy;
use super::ContextData;

// Type alias for the skip condition closure.
// It takes a read-only view of the shared run context TData.
// Uses Arc to be easily cloneable and shareable.
pub type SkipCondition<TData> = std::sync::Arc<dyn Fn(ContextData<TData>) -> bool + Send + Sync + 'static>;

/// Definition of a pipeline stage: its name, its failure policy, and an
/// optional skip condition evaluated against the shared run context.
///
/// This struct is generic over `TData` because the `skip_if` condition
/// operates on the run context `TData`. A stage whose skip condition holds is
/// bypassed entirely: its collaborator is never invoked and a skipped outcome
/// is recorded in its place.
#[derive(Clone)]
pub struct StageDef<TData: 'static + Send + Sync> {
  pub name: String,
  pub policy: FailurePolicy,
  // Condition to evaluate before executing the stage. If true, the stage is skipped.
  pub skip_if: Option<SkipCondition<TData>>,
}

// SkipCondition (Arc<dyn Fn...>) doesn't implement Debug, so provide a
// placeholder debug output for the closure slot.
impl<TData: 'static + Send + Sync> std::fmt::Debug for StageDef<TData> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("StageDef")
      .field("name", &self.name)
      .field("policy", &self.policy)
      .field("skip_if_present", &self.skip_if.is_some())
      .finish()
  }
}
