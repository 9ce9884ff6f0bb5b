//! SQL schema for the Roster SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- AUTOINCREMENT keeps ids of deleted rows from ever being handed out again.
CREATE TABLE IF NOT EXISTS records (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    firstname   TEXT    NOT NULL,
    lastname    TEXT    NOT NULL,
    mail        TEXT    NOT NULL,
    username    TEXT    NOT NULL,
    password    TEXT    NOT NULL,   -- argon2 PHC string
    active      INTEGER NOT NULL DEFAULT 1,
    created_at  TEXT    NOT NULL,   -- ISO 8601 UTC; server-assigned
    CONSTRAINT unique_mail     UNIQUE (mail),
    CONSTRAINT unique_username UNIQUE (username)
);

PRAGMA user_version = 1;
";
