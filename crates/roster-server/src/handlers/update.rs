//! PUT handlers: apply a partial update to an existing record.
//!
//! The target id comes from the URL when present, otherwise from the body.

use axum::{
  extract::{Path, State},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use bytes::Bytes;
use roster_core::{
  identity::Principal,
  merge,
  record::{Patch, RecordId},
  store::RecordStore,
};

use crate::{
  AppState,
  auth::{CurrentUser, hash_password},
  error::Error,
  translate::translate_write,
};

/// `PUT /api/record`; the body must carry `id`.
pub async fn by_body<S>(
  State(state): State<AppState<S>>,
  CurrentUser(caller): CurrentUser,
  body: Bytes,
) -> Result<Response, Error>
where
  S: RecordStore + Clone + 'static,
{
  update(&state, caller, None, &body).await
}

/// `PUT /api/record/{id}`
pub async fn by_path<S>(
  State(state): State<AppState<S>>,
  CurrentUser(caller): CurrentUser,
  Path(id): Path<RecordId>,
  body: Bytes,
) -> Result<Response, Error>
where
  S: RecordStore + Clone + 'static,
{
  update(&state, caller, Some(id), &body).await
}

async fn update<S>(
  state: &AppState<S>,
  caller: Option<Principal>,
  path_id: Option<RecordId>,
  body: &[u8],
) -> Result<Response, Error>
where
  S: RecordStore + Clone + 'static,
{
  let patch: Patch = serde_json::from_slice(body)
    .map_err(|_| Error::BadRequest("Record payload is malformed".to_owned()))?;

  let id = path_id
    .or(patch.id)
    .ok_or_else(|| Error::BadRequest("Record id is required".to_owned()))?;

  let store = state.store.as_ref();
  let mut merged = merge::merge(store, id, &patch).await?;

  // Hashed only once the record exists and the rules have passed.
  if let Some(password) = &patch.password {
    merged.password = hash_password(password)?;
  }

  // No lock is held between the read above and this write. A concurrent
  // writer shows up here as a uniqueness conflict.
  let written =
    translate_write(store, Some(id), caller.as_ref(), store.update(merged)).await?;

  if !written {
    return Err(Error::NotFound(id));
  }

  tracing::info!(id, "record updated");
  Ok((StatusCode::OK, "Record is updated").into_response())
}
