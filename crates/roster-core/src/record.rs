//! Record types: the single entity managed by Roster.
//!
//! A [`Record`] is what the store holds. [`NewRecord`] is the validated input
//! for creation and [`Patch`] is a partial update in which every field is
//! optional.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned identifier. Never reused once handed out.
pub type RecordId = i64;

// ─── Record ──────────────────────────────────────────────────────────────────

/// A person record as persisted by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
  pub id:         RecordId,
  pub firstname:  String,
  pub lastname:   String,
  /// Unique across all records.
  pub mail:       String,
  /// Owning principal; immutable after creation.
  pub username:   String,
  /// Argon2 PHC string. Never leaves the server.
  #[serde(skip_serializing)]
  pub password:   String,
  /// Once `false`, the password can no longer be changed.
  pub active:     bool,
  /// Server-assigned timestamp; never changes after creation.
  pub created_at: DateTime<Utc>,
}

// ─── NewRecord ───────────────────────────────────────────────────────────────

/// Input to [`crate::store::RecordStore::insert`].
/// `id` and `created_at` are always set by the store.
#[derive(Debug, Clone)]
pub struct NewRecord {
  pub firstname: String,
  pub lastname:  String,
  pub mail:      String,
  pub username:  String,
  pub password:  String,
  pub active:    bool,
}

// ─── Creation payload ────────────────────────────────────────────────────────

/// A required creation field, listed in the order missing fields are
/// reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
  Firstname,
  Lastname,
  Mail,
  Username,
  Password,
}

impl RequiredField {
  fn label(self) -> &'static str {
    match self {
      Self::Firstname => "Firstname",
      Self::Lastname => "Lastname",
      Self::Mail => "Mail",
      Self::Username => "Username",
      Self::Password => "Password",
    }
  }
}

impl fmt::Display for RequiredField {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Parameter {} must be filled", self.label())
  }
}

/// The lenient shape of a creation body: any field may be missing.
///
/// Parsing into this first lets every missing field be reported at once
/// instead of failing on the first one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordInput {
  /// Never stored; names the record a failed creation is reported against.
  pub id:        Option<RecordId>,
  pub firstname: Option<String>,
  pub lastname:  Option<String>,
  pub mail:      Option<String>,
  pub username:  Option<String>,
  pub password:  Option<String>,
  pub active:    Option<bool>,
}

impl RecordInput {
  /// Promote to a [`NewRecord`], or list every required field that is
  /// missing or empty.
  pub fn validate(self) -> Result<NewRecord, Vec<RequiredField>> {
    let mut missing = Vec::new();
    let mut take = |value: Option<String>, field: RequiredField| {
      match value.filter(|v| !v.trim().is_empty()) {
        Some(v) => v,
        None => {
          missing.push(field);
          String::new()
        }
      }
    };

    let firstname = take(self.firstname, RequiredField::Firstname);
    let lastname = take(self.lastname, RequiredField::Lastname);
    let mail = take(self.mail, RequiredField::Mail);
    let username = take(self.username, RequiredField::Username);
    let password = take(self.password, RequiredField::Password);

    if !missing.is_empty() {
      return Err(missing);
    }

    Ok(NewRecord {
      firstname,
      lastname,
      mail,
      username,
      password,
      active: self.active.unwrap_or(true),
    })
  }
}

// ─── Patch ───────────────────────────────────────────────────────────────────

/// A partial update. `None` leaves the stored value alone; `Some(v)` sets it.
///
/// `id` selects the record to update when it is not given in the URL; it is
/// never merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Patch {
  pub id:        Option<RecordId>,
  pub firstname: Option<String>,
  pub lastname:  Option<String>,
  pub mail:      Option<String>,
  /// Present only to be rejected when it differs; see [`crate::rules`].
  pub username:  Option<String>,
  pub password:  Option<String>,
  pub active:    Option<bool>,
}
