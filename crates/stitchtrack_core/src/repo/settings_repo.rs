//! Key/value settings persistence.
//!
//! Holds user preferences that are not project records, currently only the
//! selected theme identifier.

use super::project_repo::RepoResult;
use rusqlite::{params, Connection, OptionalExtension};

/// Reads a setting value by key.
pub fn get_setting(conn: &Connection, key: &str) -> RepoResult<Option<String>> {
    let value = conn
        .query_row(
            "SELECT value FROM settings WHERE key = ?1;",
            [key],
            |row| row.get::<_, String>(0),
        )
        .optional()?;
    Ok(value)
}

/// Writes a setting value, replacing any previous one.
pub fn put_setting(conn: &Connection, key: &str, value: &str) -> RepoResult<()> {
    conn.execute(
        "INSERT INTO settings (key, value) VALUES (?1, ?2)
         ON CONFLICT (key) DO UPDATE SET value = excluded.value;",
        params![key, value],
    )?;
    Ok(())
}
