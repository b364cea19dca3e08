//! Importing the optional `[[problems]]` bank from the config file.

use tracing::{error, info, instrument};

use crate::logic::create_problem;
use crate::protocol::ProblemIn;
use crate::state::AppState;

/// Insert `bank` into the store when it is empty; a non-empty store is left
/// untouched so restarts never duplicate records. Returns how many were inserted.
#[instrument(level = "info", skip_all, fields(bank = bank.len()))]
pub async fn seed_if_empty(state: &AppState, bank: &[ProblemIn]) -> usize {
  if bank.is_empty() {
    return 0;
  }
  match state.store.count().await {
    Ok(0) => {}
    Ok(existing) => {
      info!(target: "tracker", existing, "Store already populated; skipping seed bank");
      return 0;
    }
    Err(e) => {
      error!(target: "tracker", error = %e, "Could not count records; skipping seed bank");
      return 0;
    }
  }

  let mut inserted = 0;
  for (idx, item) in bank.iter().enumerate() {
    match create_problem(state, item.clone()).await {
      Ok(_) => inserted += 1,
      Err(e) => {
        error!(target: "tracker", idx, name = ?item.problem_name, error = %e, "Skipping seed item");
      }
    }
  }
  info!(target: "tracker", inserted, "Seed bank imported");
  inserted
}
