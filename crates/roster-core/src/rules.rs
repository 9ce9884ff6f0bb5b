//! Business rules evaluated before a merged record is written.
//!
//! Each rule is an independent predicate over the stored record and the
//! incoming patch. Rules run in declaration order and the first violation
//! wins.

use thiserror::Error;

use crate::record::{Patch, Record};

/// A patch was rejected by a business rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct RuleViolation {
  /// Name of the rule that fired.
  pub rule:   &'static str,
  /// Message surfaced to the caller verbatim.
  pub reason: &'static str,
}

/// A named predicate over `(original, patch)`.
#[derive(Clone, Copy)]
pub struct Rule {
  pub name:     &'static str,
  pub reason:   &'static str,
  /// Returns `true` when the patch breaks the rule.
  pub violated: fn(&Record, &Patch) -> bool,
}

impl Rule {
  fn violation(&self) -> RuleViolation {
    RuleViolation { rule: self.name, reason: self.reason }
  }
}

/// Rules applied to every update.
pub const RULES: &[Rule] = &[
  Rule {
    name:     "inactive-password",
    reason:   "Cannot update password because account is expired",
    // Judged on the stored flag: a patch cannot reactivate and change the
    // password in one call.
    violated: |original, patch| patch.password.is_some() && !original.active,
  },
  Rule {
    name:     "immutable-username",
    reason:   "Cannot change the username of an existing record",
    violated: |original, patch| {
      patch
        .username
        .as_deref()
        .is_some_and(|username| username != original.username)
    },
  },
];

/// Check `patch` against the default [`RULES`].
pub fn check(original: &Record, patch: &Patch) -> Result<(), RuleViolation> {
  check_with(RULES, original, patch)
}

/// Check `patch` against an explicit rule set.
pub fn check_with(
  rules: &[Rule],
  original: &Record,
  patch: &Patch,
) -> Result<(), RuleViolation> {
  match rules.iter().find(|rule| (rule.violated)(original, patch)) {
    Some(rule) => Err(rule.violation()),
    None => Ok(()),
  }
}
