//! GET handlers: a single record or the whole collection.

use axum::{
  Json,
  extract::{Path, State},
};
use roster_core::{
  record::{Record, RecordId},
  store::RecordStore,
};

use crate::{AppState, error::Error};

/// `GET /api/record/{id}`
pub async fn one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<RecordId>,
) -> Result<Json<Record>, Error>
where
  S: RecordStore + Clone + 'static,
{
  let record = state
    .store
    .get(id)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?
    .ok_or(Error::NotFound(id))?;
  Ok(Json(record))
}

/// `GET /api/record`
pub async fn all<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<Record>>, Error>
where
  S: RecordStore + Clone + 'static,
{
  let records = state
    .store
    .list()
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;
  Ok(Json(records))
}
