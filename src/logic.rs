//! Problem API operations shared by the HTTP handlers and the startup seeding.
//!
//! This is the write boundary: every label is checked against the taxonomy
//! here before anything reaches the store, and optional fields get their
//! defaults here rather than in any store schema.

use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::domain::{parse_problem_id, NewProblem, ProblemPatch, ProblemRecord, SummaryNote};
use crate::error::ApiError;
use crate::protocol::{ListQuery, NoteIn, ProblemIn};
use crate::state::AppState;
use crate::stats::{aggregate, Stats};
use crate::taxonomy::{Category, Difficulty};
use crate::util::trunc_for_log;

const MISSING_REQUIRED: &str = "Missing required fields: category, problemName, difficulty";

fn parse_category(s: &str) -> Result<Category, ApiError> {
  s.parse().map_err(|_| ApiError::validation(format!("Invalid category: {}", s)))
}

fn parse_difficulty(s: &str) -> Result<Difficulty, ApiError> {
  s.parse().map_err(|_| ApiError::validation(format!("Invalid difficulty: {}", s)))
}

/// Present and not blank.
fn required(v: Option<String>) -> Option<String> { v.filter(|s| !s.trim().is_empty()) }

/// Give every note an id and timestamp, drop empty ones, keep order.
pub fn normalize_notes(notes: Vec<NoteIn>) -> Vec<SummaryNote> {
  let now = Utc::now();
  notes
    .into_iter()
    .filter_map(|n| {
      let (id, content, created_at) = match n {
        NoteIn::Text(content) => (None, content, None),
        NoteIn::Full(o) => (o.id, o.content.unwrap_or_default(), o.created_at),
      };
      if content.trim().is_empty() {
        return None;
      }
      Some(SummaryNote {
        id: id.filter(|s| !s.is_empty()).unwrap_or_else(|| Uuid::new_v4().to_string()),
        content,
        created_at: created_at.unwrap_or(now),
      })
    })
    .collect()
}

/// Create rules: three required fields, taxonomy membership, explicit defaults.
pub fn validate_new(body: ProblemIn) -> Result<NewProblem, ApiError> {
  let (Some(category), Some(problem_name), Some(difficulty)) =
    (required(body.category), required(body.problem_name), required(body.difficulty))
  else {
    return Err(ApiError::validation(MISSING_REQUIRED));
  };

  Ok(NewProblem {
    category: parse_category(&category)?,
    problem_name,
    difficulty: parse_difficulty(&difficulty)?,
    leetcode_number: body.leetcode_number.unwrap_or_default(),
    video_url: body.video_url.unwrap_or_default(),
    problem_url: body.problem_url.unwrap_or_default(),
    summary_notes: normalize_notes(body.summary_notes.unwrap_or_default()),
    solved: body.solved.unwrap_or(false),
  })
}

/// Update rules: only supplied keys are validated and carried over.
pub fn validate_patch(body: ProblemIn) -> Result<ProblemPatch, ApiError> {
  let problem_name = match body.problem_name {
    Some(n) if n.trim().is_empty() => return Err(ApiError::validation("problemName must not be empty")),
    other => other,
  };
  Ok(ProblemPatch {
    category: body.category.as_deref().map(parse_category).transpose()?,
    problem_name,
    difficulty: body.difficulty.as_deref().map(parse_difficulty).transpose()?,
    leetcode_number: body.leetcode_number,
    video_url: body.video_url,
    problem_url: body.problem_url,
    summary_notes: body.summary_notes.map(normalize_notes),
    solved: body.solved,
  })
}

/// Canonical (lowercase hex) form of a well-formed id; stores are keyed by it.
fn checked_id(id: &str) -> Result<String, ApiError> {
  parse_problem_id(id)
    .map(|oid| oid.to_hex())
    .ok_or_else(|| ApiError::MalformedId(id.to_string()))
}

#[instrument(level = "info", skip(state))]
pub async fn list_problems(state: &AppState, q: &ListQuery) -> Result<Vec<ProblemRecord>, ApiError> {
  let category = q.category.as_deref().map(parse_category).transpose()?;
  let difficulty = q.difficulty.as_deref().map(parse_difficulty).transpose()?;

  let mut problems = state.store.list().await.map_err(ApiError::store("fetch problems"))?;
  problems.retain(|p| {
    category.map_or(true, |c| p.category == c.as_str())
      && difficulty.map_or(true, |d| p.difficulty == d.as_str())
      && q.solved.map_or(true, |s| p.solved == s)
  });
  info!(target: "tracker", count = problems.len(), "Fetched problems");
  Ok(problems)
}

#[instrument(level = "info", skip(state))]
pub async fn get_problem(state: &AppState, id: &str) -> Result<ProblemRecord, ApiError> {
  let id = checked_id(id)?;
  let found = state.store.get(&id).await.map_err(ApiError::store("fetch problem"))?;
  found.ok_or(ApiError::NotFound(id))
}

#[instrument(level = "info", skip(state, body))]
pub async fn create_problem(state: &AppState, body: ProblemIn) -> Result<ProblemRecord, ApiError> {
  let draft = validate_new(body)?;
  let rec = state.store.insert(draft).await.map_err(ApiError::store("create problem"))?;
  info!(
    target: "tracker",
    id = %rec.id,
    category = %rec.category,
    difficulty = %rec.difficulty,
    name = %trunc_for_log(&rec.problem_name, 80),
    "Problem created"
  );
  Ok(rec)
}

#[instrument(level = "info", skip(state, body))]
pub async fn update_problem(state: &AppState, id: &str, body: ProblemIn) -> Result<ProblemRecord, ApiError> {
  let id = checked_id(id)?;
  let patch = validate_patch(body)?;
  let updated = state.store.update(&id, patch).await.map_err(ApiError::store("update problem"))?;
  let rec = updated.ok_or(ApiError::NotFound(id))?;
  info!(target: "tracker", id = %rec.id, solved = rec.solved, "Problem updated");
  Ok(rec)
}

#[instrument(level = "info", skip(state))]
pub async fn delete_problem(state: &AppState, id: &str) -> Result<(), ApiError> {
  let id = checked_id(id)?;
  if !state.store.delete(&id).await.map_err(ApiError::store("delete problem"))? {
    return Err(ApiError::NotFound(id));
  }
  info!(target: "tracker", %id, "Problem deleted");
  Ok(())
}

#[instrument(level = "info", skip(state))]
pub async fn compute_stats(state: &AppState) -> Result<Stats, ApiError> {
  let problems = state.store.list().await.map_err(ApiError::store("fetch stats"))?;
  let stats = aggregate(&problems);
  info!(target: "tracker", total = stats.total, solved = stats.solved, "Stats calculated");
  Ok(stats)
}
