//! Record store contract and its backends.
//!
//! The service only talks to `dyn ProblemStore`. Each backend assigns ids and
//! timestamps and applies updates atomically on its side, so handlers never
//! read-modify-write in application memory.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{NewProblem, ProblemPatch, ProblemRecord};

pub mod memory;
pub mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

#[derive(Debug, Error)]
pub enum StoreError {
  /// Connection, query, or driver failure.
  #[error("store backend error: {0}")]
  Backend(String),

  /// A stored document could not be mapped to a record.
  #[error("corrupt document {id}: {reason}")]
  Corrupt { id: String, reason: String },
}

#[async_trait]
pub trait ProblemStore: Send + Sync {
  /// Short backend name for logs and `/health`.
  fn backend(&self) -> &'static str;

  /// Every record, newest `created_at` first.
  async fn list(&self) -> Result<Vec<ProblemRecord>, StoreError>;

  async fn count(&self) -> Result<u64, StoreError>;

  /// `Ok(None)` when no record has this id.
  async fn get(&self, id: &str) -> Result<Option<ProblemRecord>, StoreError>;

  /// Persist a new record; the store assigns `id`, `created_at`, `updated_at`.
  async fn insert(&self, problem: NewProblem) -> Result<ProblemRecord, StoreError>;

  /// Merge `patch` into the record, bump `updated_at`, return the result.
  /// `Ok(None)` when no record has this id.
  async fn update(&self, id: &str, patch: ProblemPatch) -> Result<Option<ProblemRecord>, StoreError>;

  /// Permanently remove the record. `Ok(false)` when it did not exist.
  async fn delete(&self, id: &str) -> Result<bool, StoreError>;
}
