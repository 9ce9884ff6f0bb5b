//! Error types for `roster-core`.

use thiserror::Error;

use crate::{record::RecordId, rules::RuleViolation};

#[derive(Debug, Error)]
pub enum Error {
  #[error("No record with id = {0}")]
  NotFound(RecordId),

  #[error(transparent)]
  RuleViolation(#[from] RuleViolation),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
