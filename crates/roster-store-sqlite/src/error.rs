//! Error type for `roster-store-sqlite`.

use roster_core::store::StoreFailure;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// A write tripped a `UNIQUE` index. Carries SQLite's own message, e.g.
  /// `UNIQUE constraint failed: records.mail`.
  #[error("{0}")]
  UniqueViolation(String),

  #[error("date/time parse error: {0}")]
  DateParse(String),
}

impl Error {
  /// Classify a failed write, pulling uniqueness violations out of the
  /// generic database error.
  pub(crate) fn from_write(err: tokio_rusqlite::Error) -> Self {
    match err {
      tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(
        code,
        Some(message),
      )) if code.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE => {
        Self::UniqueViolation(message)
      }
      other => Self::Database(other),
    }
  }
}

impl StoreFailure for Error {
  fn unique_violation(&self) -> Option<&str> {
    match self {
      Self::UniqueViolation(message) => Some(message),
      _ => None,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
