//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings.

use chrono::{DateTime, Utc};
use roster_core::record::{Record, RecordId};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching [`RawRecord::from_row`].
pub const RECORD_COLUMNS: &str =
  "id, firstname, lastname, mail, username, password, active, created_at";

/// Raw values read directly from a `records` row.
pub struct RawRecord {
  pub id:         RecordId,
  pub firstname:  String,
  pub lastname:   String,
  pub mail:       String,
  pub username:   String,
  pub password:   String,
  pub active:     bool,
  pub created_at: String,
}

impl RawRecord {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      firstname:  row.get(1)?,
      lastname:   row.get(2)?,
      mail:       row.get(3)?,
      username:   row.get(4)?,
      password:   row.get(5)?,
      active:     row.get(6)?,
      created_at: row.get(7)?,
    })
  }

  pub fn into_record(self) -> Result<Record> {
    Ok(Record {
      id:         self.id,
      firstname:  self.firstname,
      lastname:   self.lastname,
      mail:       self.mail,
      username:   self.username,
      password:   self.password,
      active:     self.active,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}
