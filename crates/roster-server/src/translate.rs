//! Failure translation for the write paths.
//!
//! Handlers wrap their store writes in [`translate_write`], which turns a
//! store failure into a caller-facing [`Error`]. Uniqueness conflicts keep
//! the store's message verbatim and, when the caller owns the record the
//! write targeted, gain a line disclosing that record's current e-mail. Any
//! other write failure is answered with a fixed message.
//!
//! Creation bodies go through [`parse_new_record`], which reports every
//! missing required field at once and hands back the payload's `id`, the
//! target of a failed creation.

use std::future::Future;

use roster_core::{
  identity::Principal,
  record::{NewRecord, RecordId, RecordInput},
  store::{RecordStore, StoreFailure},
};

use crate::error::Error;

/// Prefix of the line disclosed to the owner of a conflicting record.
pub const DISCLOSURE_PREFIX: &str = "Your current e-mail = ";

/// Await `write` and translate its failure, if any.
///
/// `target` is the record the write was aimed at: the update id, or the id
/// carried by a creation payload. `caller` is the authenticated principal,
/// if any.
pub async fn translate_write<S, T, F>(
  store: &S,
  target: Option<RecordId>,
  caller: Option<&Principal>,
  write: F,
) -> Result<T, Error>
where
  S: RecordStore,
  F: Future<Output = Result<T, S::Error>>,
{
  let err = match write.await {
    Ok(value) => return Ok(value),
    Err(err) => err,
  };

  tracing::info!(error = %err, ?target, "translating failed write");

  let Some(cause) = err.unique_violation().map(str::to_owned) else {
    return Err(Error::WriteRejected(Box::new(err)));
  };

  Err(Error::UniquenessConflict {
    cause,
    disclosure: disclosure(store, target, caller).await,
  })
}

/// The disclosure line for `caller`, if they own record `target`.
///
/// Best-effort and read-only: a failed or empty lookup means no disclosure.
async fn disclosure<S>(
  store: &S,
  target: Option<RecordId>,
  caller: Option<&Principal>,
) -> Option<String>
where
  S: RecordStore,
{
  let id = target?;
  let caller = caller?;

  let record = match store.get(id).await {
    Ok(record) => record?,
    Err(e) => {
      tracing::warn!(error = %e, id, "conflict enrichment lookup failed");
      return None;
    }
  };

  caller
    .owns(&record)
    .then(|| format!("{DISCLOSURE_PREFIX}{}", record.mail))
}

/// Parse a creation body into the payload's `id` (if any) and the record to
/// insert, listing every missing required field on failure.
///
/// A rejection is logged on behalf of `caller` when the request carries an
/// identity.
pub fn parse_new_record(
  body: &[u8],
  caller: Option<&Principal>,
) -> Result<(Option<RecordId>, NewRecord), Error> {
  let input: RecordInput = serde_json::from_slice(body).map_err(|e| {
    tracing::info!(error = %e, "unparseable record payload");
    Error::BadRequest("Record payload is malformed".to_owned())
  })?;

  let target = input.id;
  let record = input.validate().map_err(|missing| {
    match caller {
      Some(principal) => tracing::warn!(
        username = principal.username(),
        ?missing,
        "record rejected: required fields missing"
      ),
      None => tracing::warn!(?missing, "record rejected: required fields missing"),
    }
    Error::MalformedPayload(missing)
  })?;

  Ok((target, record))
}

#[cfg(test)]
mod tests {
  use roster_core::record::RequiredField;
  use roster_store_sqlite::SqliteStore;

  use super::*;

  async fn seeded() -> (SqliteStore, RecordId, RecordId) {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let mut ids = Vec::new();
    for username in ["alice", "bob"] {
      let record = store
        .insert(NewRecord {
          firstname: "F".into(),
          lastname:  "L".into(),
          mail:      format!("{username}@example.com"),
          username:  username.into(),
          password:  "hash".into(),
          active:    true,
        })
        .await
        .unwrap();
      ids.push(record.id);
    }
    (store, ids[0], ids[1])
  }

  async fn collide(
    store: &SqliteStore,
    target: RecordId,
    caller: Option<&Principal>,
  ) -> Error {
    let mut record = store.get(target).await.unwrap().unwrap();
    let taken = if record.username == "alice" { "bob" } else { "alice" };
    record.mail = format!("{taken}@example.com");
    translate_write(store, Some(target), caller, store.update(record))
      .await
      .unwrap_err()
  }

  #[tokio::test]
  async fn success_passes_through() {
    let (store, alice, _) = seeded().await;
    let found = translate_write(&store, Some(alice), None, store.get(alice))
      .await
      .unwrap();
    assert!(found.is_some());
  }

  #[tokio::test]
  async fn owner_gets_disclosure() {
    let (store, _, bob) = seeded().await;
    let caller = Principal::new("bob", true);

    let err = collide(&store, bob, Some(&caller)).await;
    let Error::UniquenessConflict { cause, disclosure } = err else {
      panic!("expected a uniqueness conflict");
    };
    assert_eq!(cause, "UNIQUE constraint failed: records.mail");
    assert_eq!(disclosure.as_deref(), Some("Your current e-mail = bob@example.com"));
  }

  #[tokio::test]
  async fn non_owner_gets_raw_cause_only() {
    let (store, _, bob) = seeded().await;
    let caller = Principal::new("alice", true);

    let err = collide(&store, bob, Some(&caller)).await;
    assert!(matches!(err, Error::UniquenessConflict { disclosure: None, .. }));
    assert_eq!(err.to_string(), "UNIQUE constraint failed: records.mail");
  }

  #[tokio::test]
  async fn anonymous_gets_raw_cause_only() {
    let (store, _, bob) = seeded().await;
    let err = collide(&store, bob, None).await;
    assert!(matches!(err, Error::UniquenessConflict { disclosure: None, .. }));
  }

  #[tokio::test]
  async fn vanished_target_falls_back_to_raw_cause() {
    let (store, _, bob) = seeded().await;
    let caller = Principal::new("bob", true);
    store.delete(bob).await.unwrap();

    let dup = NewRecord {
      firstname: "F".into(),
      lastname:  "L".into(),
      mail:      "alice@example.com".into(),
      username:  "bob".into(),
      password:  "hash".into(),
      active:    true,
    };
    let err = translate_write(&store, Some(bob), Some(&caller), store.insert(dup))
      .await
      .unwrap_err();
    assert!(matches!(err, Error::UniquenessConflict { disclosure: None, .. }));
    assert_eq!(err.to_string(), "UNIQUE constraint failed: records.mail");
  }

  #[tokio::test]
  async fn creation_conflict_without_payload_id() {
    let (store, _, _) = seeded().await;
    let caller = Principal::new("alice", true);
    let input = NewRecord {
      firstname: "F".into(),
      lastname:  "L".into(),
      mail:      "alice@example.com".into(),
      username:  "carol".into(),
      password:  "hash".into(),
      active:    true,
    };

    let err = translate_write(&store, None, Some(&caller), store.insert(input))
      .await
      .unwrap_err();
    assert_eq!(err.to_string(), "UNIQUE constraint failed: records.mail");
  }

  #[test]
  fn parse_lists_missing_fields() {
    let err = parse_new_record(br#"{"id": 1}"#, None).unwrap_err();
    let Error::MalformedPayload(missing) = err else {
      panic!("expected missing fields");
    };
    assert_eq!(&missing[..2], &[RequiredField::Firstname, RequiredField::Lastname]);
  }

  #[test]
  fn parse_rejects_non_json() {
    let err = parse_new_record(b"not json", None).unwrap_err();
    assert!(matches!(err, Error::BadRequest(_)));
  }

  #[test]
  fn parse_accepts_complete_record() {
    let body = br#"{"firstname":"A","lastname":"B","mail":"a@b.c","username":"ab","password":"pw"}"#;
    let (target, input) = parse_new_record(body, None).unwrap();
    assert_eq!(target, None);
    assert_eq!(input.username, "ab");
    assert!(input.active);
  }

  #[test]
  fn parse_keeps_payload_id() {
    let body = br#"{"id":7,"firstname":"A","lastname":"B","mail":"a@b.c","username":"ab","password":"pw"}"#;
    let (target, _) = parse_new_record(body, None).unwrap();
    assert_eq!(target, Some(7));
  }

  #[tokio::test]
  async fn other_write_failures_get_fixed_message() {
    let (store, alice, _) = seeded().await;
    let failing = async { Err::<bool, _>(roster_store_sqlite::Error::DateParse("bad".into())) };

    let err = translate_write(&store, Some(alice), None, failing).await.unwrap_err();
    assert!(matches!(err, Error::WriteRejected(_)));
    assert_eq!(err.to_string(), "Record was passed incorrectly");
  }
}
