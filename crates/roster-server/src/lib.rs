//! HTTP layer for Roster.
//!
//! Exposes an axum [`Router`] implementing the `/api/record` endpoints,
//! backed by any [`RecordStore`].
//!
//! | Method   | Path               | Success |
//! |----------|--------------------|---------|
//! | `POST`   | `/api/record`      | 201 `Record is created` |
//! | `PUT`    | `/api/record`      | 200 `Record is updated` (id in body) |
//! | `PUT`    | `/api/record/{id}` | 200 `Record is updated` |
//! | `DELETE` | `/api/record/{id}` | 202 `Record is deleted` |
//! | `GET`    | `/api/record/{id}` | 200 record JSON |
//! | `GET`    | `/api/record`      | 200 JSON array |

pub mod auth;
pub mod error;
pub mod handlers;
pub mod translate;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{Router, routing};
use roster_core::store::RecordStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use handlers::{create, delete, get, update};

/// Collection path.
pub const PATH_RECORD: &str = "/api/record";
/// Single-record path.
pub const PATH_RECORD_ID: &str = "/api/record/{id}";

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `ROSTER_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

impl ServerConfig {
  /// `store_path` with a leading `~/` replaced by `$HOME`.
  pub fn resolved_store_path(&self) -> PathBuf {
    let home = std::env::var_os("HOME");
    match (self.store_path.strip_prefix("~"), home) {
      (Ok(rest), Some(home)) => PathBuf::from(home).join(rest),
      _ => self.store_path.clone(),
    }
  }

  /// `host:port`, ready for binding.
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: RecordStore> {
  pub store: Arc<S>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build an axum [`Router`] for the record API.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: RecordStore + Clone + 'static,
{
  Router::new()
    .route(
      PATH_RECORD,
      routing::get(get::all::<S>)
        .post(create::handler::<S>)
        .put(update::by_body::<S>),
    )
    .route(
      PATH_RECORD_ID,
      routing::get(get::one::<S>)
        .put(update::by_path::<S>)
        .delete(delete::handler::<S>),
    )
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
