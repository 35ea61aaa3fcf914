// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use docprep::{ContextData, PipelineError, StageCollaborator, StageYield};
use async_trait::async_trait;
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use tracing::Level;

// --- Common Context Struct ---
#[derive(Clone, Debug, Default)]
pub struct TestContext {
  pub stages_executed: Vec<String>,
  pub skip_middle: bool,
}

// --- Common Error Type for Tests ---
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)] // Clone, PartialEq, Eq for assertions
pub enum TestError {
  #[error("docprep framework error: {0:?}")] // Stored as String for Eq comparison
  Framework(String),

  #[error("Test collaborator failed: {0}")]
  Collaborator(String),
}

impl From<PipelineError> for TestError {
  fn from(pe: PipelineError) -> Self {
    // Simple conversion for testing, might lose some detail but good for Eq.
    TestError::Framework(format!("{:?}", pe))
  }
}

// --- Mock Collaborators ---

/// Succeeds with a fixed item count, recording every invocation.
pub struct CountingCollaborator {
  pub stage_name: &'static str,
  pub item_count: usize,
  pub calls: Arc<AtomicUsize>,
}

impl CountingCollaborator {
  pub fn new(stage_name: &'static str, item_count: usize) -> Self {
    Self {
      stage_name,
      item_count,
      calls: Arc::new(AtomicUsize::new(0)),
    }
  }
}

#[async_trait]
impl StageCollaborator<TestContext, TestError> for CountingCollaborator {
  async fn execute(&self, ctx: ContextData<TestContext>) -> Result<StageYield, TestError> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    ctx.write().stages_executed.push(self.stage_name.to_string());
    tracing::debug!(target: "test_collaborators", stage = %self.stage_name, "executed");
    Ok(StageYield::items(self.item_count))
  }
}

/// Fails with a fixed message, recording every invocation.
pub struct FailingCollaborator {
  pub stage_name: &'static str,
  pub message: &'static str,
  pub calls: Arc<AtomicUsize>,
}

impl FailingCollaborator {
  pub fn new(stage_name: &'static str, message: &'static str) -> Self {
    Self {
      stage_name,
      message,
      calls: Arc::new(AtomicUsize::new(0)),
    }
  }
}

#[async_trait]
impl StageCollaborator<TestContext, TestError> for FailingCollaborator {
  async fn execute(&self, ctx: ContextData<TestContext>) -> Result<StageYield, TestError> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    ctx.write().stages_executed.push(self.stage_name.to_string());
    tracing::warn!(target: "test_collaborators", stage = %self.stage_name, "failing with: '{}'", self.message);
    Err(TestError::Collaborator(self.message.to_string()))
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
