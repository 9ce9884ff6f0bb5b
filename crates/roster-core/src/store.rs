//! The `RecordStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `roster-store-sqlite`).
//! The HTTP layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::record::{NewRecord, Record, RecordId};

// ─── Failure classification ──────────────────────────────────────────────────

/// Lets callers recognise constraint failures without knowing the backend.
pub trait StoreFailure: std::error::Error + Send + Sync + 'static {
  /// The backend's own message when this failure is a uniqueness-constraint
  /// violation, `None` for every other kind of failure.
  fn unique_violation(&self) -> Option<&str>;
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Durable keyed storage for records.
///
/// The store, not the caller, enforces uniqueness of `mail` and `username`;
/// a conflicting write fails with an error whose
/// [`StoreFailure::unique_violation`] is `Some`.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait RecordStore: Send + Sync {
  type Error: StoreFailure;

  /// Persist a new record and return it with its assigned id.
  fn insert(
    &self,
    input: NewRecord,
  ) -> impl Future<Output = Result<Record, Self::Error>> + Send + '_;

  /// Retrieve a record by id. Returns `None` if not found.
  fn get(
    &self,
    id: RecordId,
  ) -> impl Future<Output = Result<Option<Record>, Self::Error>> + Send + '_;

  /// Retrieve the record owned by `username`. Returns `None` if not found.
  fn find_by_username<'a>(
    &'a self,
    username: &'a str,
  ) -> impl Future<Output = Result<Option<Record>, Self::Error>> + Send + 'a;

  /// List every record, ordered by id.
  fn list(&self) -> impl Future<Output = Result<Vec<Record>, Self::Error>> + Send + '_;

  /// Overwrite the stored row with the same id as `record`.
  ///
  /// Returns `false` if no such row exists any more.
  fn update(
    &self,
    record: Record,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Delete a record. Returns `false` if it did not exist.
  fn delete(
    &self,
    id: RecordId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
