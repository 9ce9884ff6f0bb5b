//! [`SqliteStore`]: the SQLite implementation of [`RecordStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use roster_core::{
  record::{NewRecord, Record, RecordId},
  store::RecordStore,
};

use crate::{
  Error, Result,
  encode::{RECORD_COLUMNS, RawRecord, encode_dt},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Roster record store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store: useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Fetch at most one record matching `filter` (a `WHERE` clause with a
  /// single `?1` placeholder).
  async fn get_where(
    &self,
    filter: &'static str,
    param: rusqlite::types::Value,
  ) -> Result<Option<Record>> {
    let raw: Option<RawRecord> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {RECORD_COLUMNS} FROM records WHERE {filter}"),
              rusqlite::params![param],
              RawRecord::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawRecord::into_record).transpose()
  }
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for SqliteStore {
  type Error = Error;

  async fn insert(&self, input: NewRecord) -> Result<Record> {
    let created_at = Utc::now();
    let at_str     = encode_dt(created_at);
    let row        = input.clone();

    let id: RecordId = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO records (
             firstname, lastname, mail, username, password, active, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            row.firstname,
            row.lastname,
            row.mail,
            row.username,
            row.password,
            row.active,
            at_str,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await
      .map_err(Error::from_write)?;

    Ok(Record {
      id,
      firstname: input.firstname,
      lastname: input.lastname,
      mail: input.mail,
      username: input.username,
      password: input.password,
      active: input.active,
      created_at,
    })
  }

  async fn get(&self, id: RecordId) -> Result<Option<Record>> {
    self.get_where("id = ?1", id.into()).await
  }

  async fn find_by_username<'a>(&'a self, username: &'a str) -> Result<Option<Record>> {
    self.get_where("username = ?1", username.to_owned().into()).await
  }

  async fn list(&self) -> Result<Vec<Record>> {
    let raws: Vec<RawRecord> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare(&format!("SELECT {RECORD_COLUMNS} FROM records ORDER BY id"))?;
        let rows = stmt
          .query_map([], RawRecord::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawRecord::into_record).collect()
  }

  async fn update(&self, record: Record) -> Result<bool> {
    // `username` and `created_at` are immutable; they are never written here.
    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE records
              SET firstname = ?2, lastname = ?3, mail = ?4,
                  password  = ?5, active   = ?6
            WHERE id = ?1",
          rusqlite::params![
            record.id,
            record.firstname,
            record.lastname,
            record.mail,
            record.password,
            record.active,
          ],
        )?)
      })
      .await
      .map_err(Error::from_write)?;

    Ok(changed > 0)
  }

  async fn delete(&self, id: RecordId) -> Result<bool> {
    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM records WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;

    Ok(changed > 0)
  }
}
