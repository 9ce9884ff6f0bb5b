//! Principal: the read-only identity view of a record.
//!
//! Authentication and disclosure checks work against this projection rather
//! than the stored [`Record`], so the persistence shape can change without
//! touching authorisation.

use crate::record::Record;

/// The authenticated caller, as far as Roster cares about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
  username: String,
  active:   bool,
}

impl Principal {
  pub fn new(username: impl Into<String>, active: bool) -> Self {
    Self { username: username.into(), active }
  }

  pub fn username(&self) -> &str { &self.username }

  pub fn is_active(&self) -> bool { self.active }

  /// Whether `record` belongs to this principal.
  pub fn owns(&self, record: &Record) -> bool { record.username == self.username }
}

impl From<&Record> for Principal {
  fn from(record: &Record) -> Self {
    Self::new(record.username.clone(), record.active)
  }
}
