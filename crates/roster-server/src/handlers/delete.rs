//! DELETE handler: remove a record for good.

use axum::{
  extract::{Path, State},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use roster_core::{record::RecordId, store::RecordStore};

use crate::{AppState, error::Error};

/// `DELETE /api/record/{id}`
pub async fn handler<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<RecordId>,
) -> Result<Response, Error>
where
  S: RecordStore + Clone + 'static,
{
  let deleted = state
    .store
    .delete(id)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;

  if !deleted {
    return Err(Error::NotFound(id));
  }

  tracing::info!(id, "record deleted");
  Ok((StatusCode::ACCEPTED, "Record is deleted").into_response())
}
