//! Loading service configuration from TOML plus environment overrides.
//!
//! File path comes from `TRACKER_CONFIG_PATH`. Every key is optional; see
//! `AppConfig` for the schema. Env vars always win over the file.

use serde::Deserialize;
use tracing::{error, info, warn};

use crate::protocol::ProblemIn;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
  #[serde(default)]
  pub server: ServerConfig,
  #[serde(default)]
  pub store: StoreConfig,
  /// Seed bank, imported only into an empty store.
  #[serde(default)]
  pub problems: Vec<ProblemIn>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_port")]
  pub port: u16,
  #[serde(default = "default_static_dir")]
  pub static_dir: String,
}

impl Default for ServerConfig {
  fn default() -> Self { Self { port: default_port(), static_dir: default_static_dir() } }
}

#[derive(Clone, Copy, Debug, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
  #[default]
  Memory,
  Mongo,
}

#[derive(Clone, Debug, Deserialize)]
pub struct StoreConfig {
  #[serde(default)]
  pub backend: StoreBackend,
  #[serde(default)]
  pub mongodb_uri: Option<String>,
  #[serde(default = "default_database")]
  pub database: String,
  #[serde(default = "default_collection")]
  pub collection: String,
}

impl Default for StoreConfig {
  fn default() -> Self {
    Self {
      backend: StoreBackend::default(),
      mongodb_uri: None,
      database: default_database(),
      collection: default_collection(),
    }
  }
}

fn default_port() -> u16 { 3000 }
fn default_static_dir() -> String { "./static".into() }
fn default_database() -> String { "neetcode".into() }
fn default_collection() -> String { "problems".into() }

impl AppConfig {
  /// File (if any) + env overrides. Never fails: broken files are logged and ignored.
  pub fn load() -> Self {
    let mut cfg = load_config_file_from_env().unwrap_or_default();
    cfg.apply_env(|k| std::env::var(k).ok());
    cfg
  }

  /// Apply overrides from a key lookup (the process env in production).
  pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
    if let Some(p) = var("PORT") {
      match p.parse::<u16>() {
        Ok(port) => self.server.port = port,
        Err(e) => warn!(target: "tracker", value = %p, error = %e, "Ignoring invalid PORT"),
      }
    }
    if let Some(dir) = var("STATIC_DIR") {
      self.server.static_dir = dir;
    }
    if let Some(uri) = var("MONGODB_URI").filter(|s| !s.is_empty()) {
      self.store.mongodb_uri = Some(uri);
      self.store.backend = StoreBackend::Mongo;
    }
    if let Some(b) = var("STORE_BACKEND") {
      match b.to_ascii_lowercase().as_str() {
        "memory" => self.store.backend = StoreBackend::Memory,
        "mongo" | "mongodb" => self.store.backend = StoreBackend::Mongo,
        other => warn!(target: "tracker", value = %other, "Ignoring unknown STORE_BACKEND"),
      }
    }
    if let Some(db) = var("MONGODB_DB") {
      self.store.database = db;
    }
    if let Some(c) = var("MONGODB_COLLECTION") {
      self.store.collection = c;
    }
  }
}

/// Attempt to load `AppConfig` from TRACKER_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_config_file_from_env() -> Option<AppConfig> {
  let path = std::env::var("TRACKER_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<AppConfig>(&s) {
      Ok(cfg) => {
        info!(target: "tracker", %path, seeds = cfg.problems.len(), "Loaded config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "tracker", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "tracker", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}
