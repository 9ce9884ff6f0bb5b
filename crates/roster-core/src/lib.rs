//! Core types and trait definitions for the Roster record service.
//!
//! Owns the record model, the patch merge and the business rules guarding
//! it. Has no HTTP or database dependencies.

pub mod error;
pub mod identity;
pub mod merge;
pub mod record;
pub mod rules;
pub mod store;

pub use error::{Error, Result};
