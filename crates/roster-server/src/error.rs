//! Error types and axum `IntoResponse` implementation.
//!
//! Every variant maps to exactly one status code and a plain-text body the
//! caller can show as-is.

use axum::{
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use roster_core::record::{RecordId, RequiredField};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unauthorized")]
  Unauthorized,

  #[error("No record with id = {0}")]
  NotFound(RecordId),

  /// A business rule rejected an otherwise well-formed patch.
  #[error("{0}")]
  RuleViolation(String),

  /// The store refused a write because of a unique index.
  #[error("{}", conflict_message(.cause, .disclosure.as_deref()))]
  UniquenessConflict {
    /// The store's message, passed through untouched.
    cause:      String,
    /// Extra line shown only to the owner of the targeted record.
    disclosure: Option<String>,
  },

  /// Required creation fields were missing, one line per field.
  #[error("{}", missing_lines(.0))]
  MalformedPayload(Vec<RequiredField>),

  #[error("{0}")]
  BadRequest(String),

  /// A write failed for a reason other than a unique index. The cause is
  /// logged, never shown.
  #[error("Record was passed incorrectly")]
  WriteRejected(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("credential error: {0}")]
  Credentials(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

fn conflict_message(cause: &str, disclosure: Option<&str>) -> String {
  match disclosure {
    Some(line) => format!("{cause}\n{line}"),
    None => cause.to_owned(),
  }
}

fn missing_lines(fields: &[RequiredField]) -> String {
  fields
    .iter()
    .map(ToString::to_string)
    .collect::<Vec<_>>()
    .join("\n")
}

impl From<roster_core::Error> for Error {
  fn from(err: roster_core::Error) -> Self {
    match err {
      roster_core::Error::NotFound(id) => Self::NotFound(id),
      roster_core::Error::RuleViolation(v) => Self::RuleViolation(v.to_string()),
      roster_core::Error::Store(e) => Self::Store(e),
    }
  }
}

impl Error {
  pub fn status(&self) -> StatusCode {
    match self {
      Self::Unauthorized => StatusCode::UNAUTHORIZED,
      Self::NotFound(_) => StatusCode::NOT_FOUND,
      Self::UniquenessConflict { .. }
      | Self::WriteRejected(_)
      | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
      // Policy and missing-field failures are flagged server-side so they can
      // be told apart from plain bad input.
      Self::RuleViolation(_)
      | Self::MalformedPayload(_)
      | Self::Credentials(_)
      | Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    match self {
      Error::Unauthorized => {
        let mut res =
          (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
        res.headers_mut().insert(
          header::WWW_AUTHENTICATE,
          HeaderValue::from_static("Basic realm=\"roster\""),
        );
        res
      }
      Error::WriteRejected(ref e) => {
        tracing::error!(error = %e, "write rejected by store");
        (self.status(), self.to_string()).into_response()
      }
      Error::Store(ref e) => {
        tracing::error!(error = %e, "store failure");
        (self.status(), self.to_string()).into_response()
      }
      other => (other.status(), other.to_string()).into_response(),
    }
  }
}
