//! On-disk response cache
//!
//! Each cached API response is a row in `cache.db`. Bodies up to
//! [`SPILL_THRESHOLD`] bytes live in the row itself; larger ones (statewide
//! assessment and enrollment listings) spill to `bodies/<key>.json` and the
//! row keeps the file name.

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::CacheError;

/// Bumped whenever the `responses` table changes; older databases are discarded
const SCHEMA_VERSION: i32 = 3;

/// Bodies above this size are written to their own file
const SPILL_THRESHOLD: usize = 16 * 1024;

/// Overrides the cache directory
pub const CACHE_DIR_ENV: &str = "NHSCHOOLS_CACHE_DIR";

const DB_FILE: &str = "cache.db";
const BODIES_DIR: &str = "bodies";

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS responses (
    key        TEXT PRIMARY KEY NOT NULL,
    endpoint   TEXT NOT NULL,
    query      TEXT NOT NULL,
    body       BLOB,
    spill_file TEXT,
    stored_at  INTEGER NOT NULL,
    expires_at INTEGER NOT NULL,
    bytes      INTEGER NOT NULL,
    CHECK ((body IS NULL) <> (spill_file IS NULL))
);
CREATE INDEX IF NOT EXISTS responses_endpoint ON responses(endpoint);
"#;

type Result<T> = std::result::Result<T, CacheError>;

fn io_error(action: &str, path: &Path, err: std::io::Error) -> CacheError {
    CacheError::Io(format!("{} {}: {}", action, path.display(), err))
}

/// SQLite database of cached responses plus the directory of spilled bodies
pub struct CacheStorage {
    conn: Connection,
    bodies: PathBuf,
}

impl CacheStorage {
    /// Open the cache in [`CacheStorage::cache_dir`]
    pub fn open() -> Result<Self> {
        Self::open_at(&Self::cache_dir()?)
    }

    /// `$NHSCHOOLS_CACHE_DIR` when set and non-empty, else `nhschools` under
    /// the platform cache directory
    pub fn cache_dir() -> Result<PathBuf> {
        match std::env::var_os(CACHE_DIR_ENV) {
            Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
            _ => dirs::cache_dir()
                .map(|base| base.join("nhschools"))
                .ok_or(CacheError::NoHome),
        }
    }

    /// Open the cache rooted at `dir`, creating it when missing
    pub fn open_at(dir: &Path) -> Result<Self> {
        let bodies = dir.join(BODIES_DIR);
        fs::create_dir_all(&bodies).map_err(|e| io_error("Failed to create", &bodies, e))?;

        let db_path = dir.join(DB_FILE);
        let mut conn = Connection::open(&db_path)?;
        let found: i32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

        if found != 0 && found != SCHEMA_VERSION {
            log::info!(
                "Discarding cache with schema {} (current is {})",
                found,
                SCHEMA_VERSION
            );
            drop(conn);
            fs::remove_file(&db_path).map_err(|e| io_error("Failed to remove", &db_path, e))?;
            reset_dir(&bodies)?;
            conn = Connection::open(&db_path)?;
        }

        conn.execute_batch(SCHEMA)?;
        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;

        Ok(Self { conn, bodies })
    }

    /// Body stored under `key`, unless it has expired.
    ///
    /// A row whose spilled file has gone missing is dropped and reads as a miss.
    pub fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let row: Option<(Option<Vec<u8>>, Option<String>)> = self
            .conn
            .query_row(
                "SELECT body, spill_file FROM responses WHERE key = ?1 AND expires_at > ?2",
                params![key, Utc::now().timestamp()],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let Some((body, spill_file)) = row else {
            return Ok(None);
        };
        if let Some(body) = body {
            return Ok(Some(body));
        }
        let Some(file) = spill_file else {
            return Ok(None);
        };

        match fs::read(self.bodies.join(&file)) {
            Ok(body) => Ok(Some(body)),
            Err(e) => {
                log::warn!("Dropping cache entry {}: {}", key, e);
                self.conn
                    .execute("DELETE FROM responses WHERE key = ?1", [key])?;
                Ok(None)
            }
        }
    }

    /// Store `body` for `ttl`, replacing whatever `key` held before
    pub fn put(
        &self,
        key: &str,
        body: &[u8],
        endpoint: &str,
        query: &str,
        ttl: Duration,
    ) -> Result<()> {
        let (inline, spill_file) = if body.len() > SPILL_THRESHOLD {
            let file = format!("{}.json", key);
            let path = self.bodies.join(&file);
            fs::write(&path, body).map_err(|e| io_error("Failed to write", &path, e))?;
            (None, Some(file))
        } else {
            (Some(body), None)
        };

        let now = Utc::now().timestamp();
        let expires_at = now.saturating_add(i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX));
        let replaced = self.spill_files("key = ?1", key)?;

        self.conn.execute(
            "INSERT OR REPLACE INTO responses
             (key, endpoint, query, body, spill_file, stored_at, expires_at, bytes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![key, endpoint, query, inline, spill_file, now, expires_at, body.len()],
        )?;

        if spill_file.is_none() {
            self.remove_files(replaced);
        }
        Ok(())
    }

    /// Remove every entry
    pub fn clear_all(&self) -> Result<ClearStats> {
        let entries_removed = self.conn.execute("DELETE FROM responses", [])?;
        reset_dir(&self.bodies)?;
        Ok(ClearStats { entries_removed })
    }

    /// Remove the entries of every endpoint starting with `prefix`.
    ///
    /// `delete_by_endpoint("assessments")` drops subjects, subgroups and all
    /// leveled assessment responses.
    pub fn delete_by_endpoint(&self, prefix: &str) -> Result<ClearStats> {
        let pattern = format!("{}%", prefix.trim_start_matches('/'));
        let files = self.spill_files("endpoint LIKE ?1", &pattern)?;
        let entries_removed = self
            .conn
            .execute("DELETE FROM responses WHERE endpoint LIKE ?1", [&pattern])?;
        self.remove_files(files);
        Ok(ClearStats { entries_removed })
    }

    /// Entry counts, size and age range, split by endpoint
    pub fn stats(&self) -> Result<CacheStats> {
        let now = Utc::now().timestamp();

        let (total, valid, bytes, oldest, newest): (i64, i64, i64, Option<i64>, Option<i64>) =
            self.conn.query_row(
                "SELECT COUNT(*),
                        COALESCE(SUM(expires_at > ?1), 0),
                        COALESCE(SUM(bytes), 0),
                        MIN(CASE WHEN expires_at > ?1 THEN stored_at END),
                        MAX(CASE WHEN expires_at > ?1 THEN stored_at END)
                 FROM responses",
                [now],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?)),
            )?;

        let mut stmt = self.conn.prepare(
            "SELECT endpoint, COUNT(*) FROM responses
             WHERE expires_at > ?1 GROUP BY endpoint ORDER BY endpoint",
        )?;
        let endpoints = stmt
            .query_map([now], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
            })?
            .map(|row| row.map(|(endpoint, count)| (endpoint, to_usize(count))))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(CacheStats {
            total_entries: to_usize(total),
            valid_entries: to_usize(valid),
            expired_entries: to_usize(total - valid),
            total_size_bytes: to_usize(bytes),
            oldest_entry: oldest,
            newest_entry: newest,
            endpoints,
        })
    }

    /// Spilled file names of the rows matching `filter`
    fn spill_files(&self, filter: &str, arg: &str) -> Result<Vec<String>> {
        let sql = format!(
            "SELECT spill_file FROM responses WHERE spill_file IS NOT NULL AND {}",
            filter
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let files = stmt
            .query_map([arg], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;
        Ok(files)
    }

    fn remove_files(&self, files: Vec<String>) {
        for file in files {
            if let Err(e) = fs::remove_file(self.bodies.join(&file)) {
                log::debug!("Could not remove cached body {}: {}", file, e);
            }
        }
    }
}

/// Empty `dir`, leaving the directory itself in place
fn reset_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        fs::remove_dir_all(dir).map_err(|e| io_error("Failed to remove", dir, e))?;
    }
    fs::create_dir_all(dir).map_err(|e| io_error("Failed to create", dir, e))
}

fn to_usize(count: i64) -> usize {
    usize::try_from(count).unwrap_or(0)
}

/// Outcome of [`CacheStorage::clear_all`] or [`CacheStorage::delete_by_endpoint`]
#[derive(Debug)]
pub struct ClearStats {
    pub entries_removed: usize,
}

/// Snapshot reported by `cache status`
#[derive(Debug)]
pub struct CacheStats {
    pub total_entries: usize,
    pub valid_entries: usize,
    pub expired_entries: usize,
    pub total_size_bytes: usize,
    /// Unix timestamps of the oldest and newest unexpired entries
    pub oldest_entry: Option<i64>,
    pub newest_entry: Option<i64>,
    /// Valid entry count per endpoint, ordered by endpoint
    pub endpoints: Vec<(String, usize)>,
}
