//! POST handler: create a record from a full payload.

use axum::{
  extract::State,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use bytes::Bytes;
use roster_core::{record::NewRecord, store::RecordStore};

use crate::{
  AppState,
  auth::{CurrentUser, hash_password},
  error::Error,
  translate::{parse_new_record, translate_write},
};

/// `POST /api/record`
///
/// The body is taken raw so missing fields can be reported all together
/// rather than by the first deserialisation failure.
pub async fn handler<S>(
  State(state): State<AppState<S>>,
  CurrentUser(caller): CurrentUser,
  body: Bytes,
) -> Result<Response, Error>
where
  S: RecordStore + Clone + 'static,
{
  let (target, input) = parse_new_record(&body, caller.as_ref())?;

  tracing::info!(
    username = %input.username,
    mail = %input.mail,
    "start of new record save"
  );

  let input = NewRecord {
    password: hash_password(&input.password)?,
    ..input
  };

  let store = state.store.as_ref();
  let record = translate_write(store, target, caller.as_ref(), store.insert(input)).await?;

  tracing::info!(id = record.id, "record created");
  Ok((StatusCode::CREATED, "Record is created").into_response())
}
