//! Patch merging: overlay a [`Patch`] onto the stored [`Record`].
//!
//! [`merge`] never writes: it hands back the merged record so the caller can
//! persist it and deal with whatever the store says about it.

use crate::{
  Error, Result,
  record::{Patch, Record, RecordId},
  rules,
  store::RecordStore,
};

/// Overlay every present field of `patch` onto `record`.
///
/// `id`, `username` and `created_at` are never touched.
pub fn apply(mut record: Record, patch: &Patch) -> Record {
  if let Some(firstname) = &patch.firstname {
    record.firstname = firstname.clone();
  }
  if let Some(lastname) = &patch.lastname {
    record.lastname = lastname.clone();
  }
  if let Some(mail) = &patch.mail {
    record.mail = mail.clone();
  }
  if let Some(password) = &patch.password {
    record.password = password.clone();
  }
  if let Some(active) = patch.active {
    record.active = active;
  }
  record
}

/// Load record `id`, check `patch` against the business rules, and return the
/// merged (not yet persisted) record.
pub async fn merge<S>(store: &S, id: RecordId, patch: &Patch) -> Result<Record>
where
  S: RecordStore,
{
  let original = store
    .get(id)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?
    .ok_or(Error::NotFound(id))?;

  rules::check(&original, patch)?;

  Ok(apply(original, patch))
}

#[cfg(test)]
mod tests {
  use std::{collections::BTreeMap, sync::Mutex};

  use chrono::Utc;

  use super::*;
  use crate::{record::NewRecord, store::StoreFailure};

  #[derive(Debug, thiserror::Error)]
  #[error("unreachable")]
  struct Never;

  impl StoreFailure for Never {
    fn unique_violation(&self) -> Option<&str> { None }
  }

  /// Map-backed store; only `get` matters to the merge.
  #[derive(Default)]
  struct MemoryStore {
    rows: Mutex<BTreeMap<RecordId, Record>>,
  }

  impl MemoryStore {
    fn with(record: Record) -> Self {
      let store = Self::default();
      store.rows.lock().unwrap().insert(record.id, record);
      store
    }
  }

  impl RecordStore for MemoryStore {
    type Error = Never;

    async fn insert(&self, _: NewRecord) -> Result<Record, Never> { unimplemented!() }

    async fn get(&self, id: RecordId) -> Result<Option<Record>, Never> {
      Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_username<'a>(&'a self, _: &'a str) -> Result<Option<Record>, Never> {
      unimplemented!()
    }

    async fn list(&self) -> Result<Vec<Record>, Never> { unimplemented!() }

    async fn update(&self, _: Record) -> Result<bool, Never> { unimplemented!() }

    async fn delete(&self, _: RecordId) -> Result<bool, Never> { unimplemented!() }
  }

  fn current(store: &MemoryStore) -> Record {
    store.rows.lock().unwrap().get(&42).cloned().unwrap()
  }

  fn stored() -> Record {
    Record {
      id:         42,
      firstname:  "Alan".into(),
      lastname:   "Turing".into(),
      mail:       "alan@example.com".into(),
      username:   "alan".into(),
      password:   "hash-1".into(),
      active:     true,
      created_at: Utc::now(),
    }
  }

  #[tokio::test]
  async fn id_only_patch_leaves_record_unchanged() {
    let store = MemoryStore::with(stored());
    let patch = Patch { id: Some(42), ..Patch::default() };

    let merged = merge(&store, 42, &patch).await.unwrap();
    assert_eq!(merged, current(&store));
  }

  #[tokio::test]
  async fn present_fields_overwrite_absent_fields_keep() {
    let store = MemoryStore::with(stored());
    let before = current(&store);
    let patch = Patch {
      firstname: Some("Alonzo".into()),
      mail: Some("alonzo@example.com".into()),
      active: Some(false),
      ..Patch::default()
    };

    let merged = merge(&store, 42, &patch).await.unwrap();
    assert_eq!(merged.firstname, "Alonzo");
    assert_eq!(merged.mail, "alonzo@example.com");
    assert!(!merged.active);
    assert_eq!(merged.lastname, before.lastname);
    assert_eq!(merged.password, before.password);
    assert_eq!(merged.username, before.username);
    assert_eq!(merged.created_at, before.created_at);
  }

  #[tokio::test]
  async fn merge_does_not_write() {
    let store = MemoryStore::with(stored());
    let patch = Patch { lastname: Some("Church".into()), ..Patch::default() };

    merge(&store, 42, &patch).await.unwrap();
    assert_eq!(current(&store).lastname, "Turing");
  }

  #[tokio::test]
  async fn patch_id_is_never_merged() {
    let store = MemoryStore::with(stored());
    let patch = Patch { id: Some(7), ..Patch::default() };

    let merged = merge(&store, 42, &patch).await.unwrap();
    assert_eq!(merged.id, 42);
  }

  #[tokio::test]
  async fn missing_record_is_not_found() {
    let store = MemoryStore::default();
    let err = merge(&store, 9, &Patch::default()).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(9)));
    assert_eq!(err.to_string(), "No record with id = 9");
  }

  #[tokio::test]
  async fn rule_violation_stops_the_merge() {
    let mut record = stored();
    record.active = false;
    let store = MemoryStore::with(record);
    let patch = Patch { password: Some("hash-2".into()), ..Patch::default() };

    let err = merge(&store, 42, &patch).await.unwrap_err();
    assert!(matches!(err, Error::RuleViolation(ref v) if v.rule == "inactive-password"));
    assert_eq!(err.to_string(), "Cannot update password because account is expired");
  }

  #[test]
  fn apply_ignores_username() {
    let patch = Patch { username: Some("mallory".into()), ..Patch::default() };
    assert_eq!(apply(stored(), &patch).username, "alan");
  }
}
