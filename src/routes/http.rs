//! HTTP endpoint handlers. These are thin wrappers that forward to `logic`.
//! Each handler is instrumented; failures become JSON error bodies via `ApiError`.

use std::sync::Arc;
use axum::{
  extract::{
    rejection::{JsonRejection, QueryRejection},
    Path, Query, State,
  },
  http::StatusCode,
  response::IntoResponse,
  Json,
};
use tracing::instrument;

use crate::domain::ProblemRecord;
use crate::error::ApiError;
use crate::logic::*;
use crate::protocol::*;
use crate::state::AppState;
use crate::stats::Stats;
use crate::taxonomy::{all_categories, Difficulty};

#[instrument(level = "info", skip(state))]
pub async fn http_health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(HealthOut { ok: true, store: state.store.backend() })
}

#[instrument(level = "info")]
pub async fn http_get_taxonomy() -> Json<TaxonomyOut> {
  Json(TaxonomyOut {
    categories: all_categories().iter().map(|c| c.as_str()).collect(),
    difficulties: Difficulty::ALL.iter().map(|d| d.as_str()).collect(),
  })
}

#[instrument(level = "info", skip(state, query))]
pub async fn http_list_problems(
  State(state): State<Arc<AppState>>,
  query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<ProblemRecord>>, ApiError> {
  let Query(q) = query?;
  Ok(Json(list_problems(&state, &q).await?))
}

#[instrument(level = "info", skip(state, payload))]
pub async fn http_create_problem(
  State(state): State<Arc<AppState>>,
  payload: Result<Json<ProblemIn>, JsonRejection>,
) -> Result<(StatusCode, Json<ProblemRecord>), ApiError> {
  let Json(body) = payload?;
  let rec = create_problem(&state, body).await?;
  Ok((StatusCode::CREATED, Json(rec)))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_problem(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<ProblemRecord>, ApiError> {
  Ok(Json(get_problem(&state, &id).await?))
}

#[instrument(level = "info", skip(state, payload))]
pub async fn http_update_problem(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
  payload: Result<Json<ProblemIn>, JsonRejection>,
) -> Result<Json<ProblemRecord>, ApiError> {
  let Json(body) = payload?;
  Ok(Json(update_problem(&state, &id, body).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_delete_problem(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<DeleteOut>, ApiError> {
  delete_problem(&state, &id).await?;
  Ok(Json(DeleteOut { message: "Problem deleted successfully".into() }))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_stats(State(state): State<Arc<AppState>>) -> Result<Json<Stats>, ApiError> {
  Ok(Json(compute_stats(&state).await?))
}
