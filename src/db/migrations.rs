// src/db/migrations.rs
//
// Versioned schema setup for the catalog database.
//
// PRINCIPLES:
// - Each step runs once, inside its own transaction
// - A database newer than this build is refused, never touched
// - Safe to call on every startup

use rusqlite::{Connection, OptionalExtension};

use crate::error::{AppError, AppResult};

/// Ordered schema steps; the last entry is the version this build writes
const MIGRATIONS: &[(i32, &str)] = &[(1, include_str!("../../schema.sql"))];

/// Bring the schema up to the newest known version
pub fn initialize_database(conn: &Connection) -> AppResult<()> {
    let current = schema_version(conn)?;
    let latest = MIGRATIONS.last().map(|(version, _)| *version).unwrap_or(0);

    if current > latest {
        return Err(AppError::Other(format!(
            "Database schema v{} is newer than this build (v{}). Update the application.",
            current, latest
        )));
    }

    for (version, sql) in MIGRATIONS.iter().filter(|(version, _)| *version > current) {
        apply_migration(conn, *version, sql)?;
        log::info!("Applied catalog schema v{}", version);
    }

    Ok(())
}

/// 0 for a fresh database
fn schema_version(conn: &Connection) -> AppResult<i32> {
    let has_table = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'schema_version'",
            [],
            |_| Ok(()),
        )
        .optional()?
        .is_some();

    if !has_table {
        return Ok(0);
    }

    let version: Option<i32> =
        conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(version.unwrap_or(0))
}

fn apply_migration(conn: &Connection, version: i32, sql: &str) -> AppResult<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(sql)
        .map_err(|e| AppError::Other(format!("Schema v{} failed: {}", version, e)))?;
    record_version(&tx, version)?;
    tx.commit()?;
    Ok(())
}

fn record_version(conn: &Connection, version: i32) -> AppResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?1, datetime('now'))",
        [version],
    )?;
    Ok(())
}

/// `PRAGMA integrity_check`; anything but "ok" is an error
pub fn verify_database_integrity(conn: &Connection) -> AppResult<()> {
    let result: String = conn.query_row("PRAGMA integrity_check", [], |row| row.get(0))?;

    if result != "ok" {
        return Err(AppError::Other(format!(
            "Database integrity check failed: {}",
            result
        )));
    }

    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseStats {
    pub schema_version: i32,
    pub size_bytes: i64,
    pub movie_count: i64,
    pub web_series_count: i64,
}

pub fn get_database_stats(conn: &Connection) -> AppResult<DatabaseStats> {
    let page_count: i64 = conn.query_row("PRAGMA page_count", [], |row| row.get(0))?;
    let page_size: i64 = conn.query_row("PRAGMA page_size", [], |row| row.get(0))?;

    let (movie_count, web_series_count): (i64, i64) = conn.query_row(
        "SELECT COALESCE(SUM(content_type = 'Movie'), 0),
                COALESCE(SUM(content_type = 'Web Series'), 0)
         FROM content",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;

    Ok(DatabaseStats {
        schema_version: schema_version(conn)?,
        size_bytes: page_count * page_size,
        movie_count,
        web_series_count,
    })
}
