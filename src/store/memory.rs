//! In-process store. Default backend, and what the tests run against.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::instrument;

use crate::domain::{new_problem_id, NewProblem, ProblemPatch, ProblemRecord};
use crate::store::{ProblemStore, StoreError};

#[derive(Default)]
struct Inner {
  by_id: HashMap<String, ProblemRecord>,
  /// Ids in insertion order, oldest first.
  order: Vec<String>,
}

#[derive(Default)]
pub struct MemoryStore {
  inner: RwLock<Inner>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }
}

#[async_trait]
impl ProblemStore for MemoryStore {
  fn backend(&self) -> &'static str { "memory" }

  #[instrument(level = "debug", skip(self))]
  async fn list(&self) -> Result<Vec<ProblemRecord>, StoreError> {
    let inner = self.inner.read().await;
    // Insertion order is creation order; ties on the timestamp keep it stable.
    let mut out: Vec<ProblemRecord> = inner
      .order
      .iter()
      .rev()
      .filter_map(|id| inner.by_id.get(id).cloned())
      .collect();
    out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(out)
  }

  async fn count(&self) -> Result<u64, StoreError> {
    Ok(self.inner.read().await.by_id.len() as u64)
  }

  #[instrument(level = "debug", skip(self))]
  async fn get(&self, id: &str) -> Result<Option<ProblemRecord>, StoreError> {
    Ok(self.inner.read().await.by_id.get(id).cloned())
  }

  #[instrument(level = "debug", skip(self, problem), fields(category = %problem.category))]
  async fn insert(&self, problem: NewProblem) -> Result<ProblemRecord, StoreError> {
    let now = Utc::now();
    let rec = ProblemRecord {
      id: new_problem_id(),
      category: problem.category.as_str().to_string(),
      problem_name: problem.problem_name,
      difficulty: problem.difficulty.as_str().to_string(),
      leetcode_number: problem.leetcode_number,
      video_url: problem.video_url,
      problem_url: problem.problem_url,
      summary_notes: problem.summary_notes,
      solved: problem.solved,
      created_at: now,
      updated_at: now,
    };
    let mut inner = self.inner.write().await;
    inner.order.push(rec.id.clone());
    inner.by_id.insert(rec.id.clone(), rec.clone());
    Ok(rec)
  }

  #[instrument(level = "debug", skip(self, patch))]
  async fn update(&self, id: &str, patch: ProblemPatch) -> Result<Option<ProblemRecord>, StoreError> {
    let mut inner = self.inner.write().await;
    let Some(rec) = inner.by_id.get_mut(id) else { return Ok(None) };
    patch.apply_to(rec);
    rec.updated_at = Utc::now();
    Ok(Some(rec.clone()))
  }

  #[instrument(level = "debug", skip(self))]
  async fn delete(&self, id: &str) -> Result<bool, StoreError> {
    let mut inner = self.inner.write().await;
    if inner.by_id.remove(id).is_none() {
      return Ok(false);
    }
    inner.order.retain(|x| x != id);
    Ok(true)
  }
}
