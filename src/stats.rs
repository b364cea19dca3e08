//! Completion statistics derived from the full problem set.
//!
//! Nothing here is persisted: `/stats` re-reads every record and calls
//! [`aggregate`] each time.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::ProblemRecord;
use crate::taxonomy::{all_categories, Category, Difficulty};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CategoryStats {
  pub total: usize,
  pub solved: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
  pub total: usize,
  pub solved: usize,
  pub easy: usize,
  pub medium: usize,
  pub hard: usize,
  pub easy_solved: usize,
  pub medium_solved: usize,
  pub hard_solved: usize,
  /// Always holds all 18 categories, empty ones as zeros.
  pub by_category: BTreeMap<Category, CategoryStats>,
}

impl Stats {
  fn empty() -> Self {
    Self {
      total: 0,
      solved: 0,
      easy: 0,
      medium: 0,
      hard: 0,
      easy_solved: 0,
      medium_solved: 0,
      hard_solved: 0,
      by_category: all_categories().iter().map(|c| (*c, CategoryStats::default())).collect(),
    }
  }
}

/// Single pass over `records`.
///
/// A record whose stored category is outside the taxonomy still counts toward
/// `total`/`solved` (and its difficulty bucket) but lands in no `by_category`
/// entry; likewise an unknown difficulty label only affects the overall counts.
pub fn aggregate(records: &[ProblemRecord]) -> Stats {
  let mut stats = Stats::empty();

  for r in records {
    stats.total += 1;
    if r.solved {
      stats.solved += 1;
    }

    let slot = match r.difficulty_kind() {
      Some(Difficulty::Easy) => Some((&mut stats.easy, &mut stats.easy_solved)),
      Some(Difficulty::Medium) => Some((&mut stats.medium, &mut stats.medium_solved)),
      Some(Difficulty::Hard) => Some((&mut stats.hard, &mut stats.hard_solved)),
      None => None,
    };
    if let Some((count, solved)) = slot {
      *count += 1;
      if r.solved {
        *solved += 1;
      }
    }

    if let Some(bucket) = r.category_kind().and_then(|c| stats.by_category.get_mut(&c)) {
      bucket.total += 1;
      if r.solved {
        bucket.solved += 1;
      }
    }
  }

  stats
}
