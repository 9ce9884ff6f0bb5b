//! HTTP Basic-auth identity extractor and password hashing.
//!
//! Credentials are checked against the stored record with the given
//! username. Requests without an `Authorization` header are anonymous; they
//! are allowed, but never see disclosed values.

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::SaltString,
};
use axum::{extract::FromRequestParts, http::{HeaderMap, header, request::Parts}};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use rand_core::OsRng;
use roster_core::{identity::Principal, store::RecordStore};

use crate::{AppState, error::Error};

/// The caller of the current request, if it authenticated.
pub struct CurrentUser(pub Option<Principal>);

/// Hash `password` into an argon2 PHC string for storage.
pub fn hash_password(password: &str) -> Result<String, Error> {
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|hash| hash.to_string())
    .map_err(|e| Error::Credentials(e.to_string()))
}

/// Check `password` against a stored PHC string.
pub fn verify_password(password: &str, phc: &str) -> bool {
  PasswordHash::new(phc).is_ok_and(|hash| {
    Argon2::default()
      .verify_password(password.as_bytes(), &hash)
      .is_ok()
  })
}

/// Split a `Basic` authorization header into username and password.
///
/// `Ok(None)` when the header is absent.
fn basic_credentials(headers: &HeaderMap) -> Result<Option<(String, String)>, Error> {
  let Some(value) = headers.get(header::AUTHORIZATION) else {
    return Ok(None);
  };

  let encoded = value
    .to_str()
    .ok()
    .and_then(|v| v.strip_prefix("Basic "))
    .ok_or(Error::Unauthorized)?;

  let decoded = B64.decode(encoded).map_err(|_| Error::Unauthorized)?;
  let creds   = String::from_utf8(decoded).map_err(|_| Error::Unauthorized)?;

  let (username, password) = creds.split_once(':').ok_or(Error::Unauthorized)?;
  Ok(Some((username.to_owned(), password.to_owned())))
}

/// Resolve the request's identity against the store.
pub async fn authenticate<S>(headers: &HeaderMap, store: &S) -> Result<Option<Principal>, Error>
where
  S: RecordStore,
{
  let Some((username, password)) = basic_credentials(headers)? else {
    return Ok(None);
  };

  let record = store
    .find_by_username(&username)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;

  let Some(record) = record else {
    tracing::warn!(%username, "authentication failed: unknown user");
    return Err(Error::Unauthorized);
  };

  if !verify_password(&password, &record.password) {
    tracing::warn!(%username, "authentication failed: bad password");
    return Err(Error::Unauthorized);
  }

  let principal = Principal::from(&record);
  if !principal.is_active() {
    tracing::warn!(%username, "authentication failed: account expired");
    return Err(Error::Unauthorized);
  }

  Ok(Some(principal))
}

impl<S> FromRequestParts<AppState<S>> for CurrentUser
where
  S: RecordStore + Clone + 'static,
{
  type Rejection = Error;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    authenticate(&parts.headers, state.store.as_ref())
      .await
      .map(CurrentUser)
  }
}
