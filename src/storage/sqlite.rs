//! `SQLite`-backed candidate store.
//!
//! Stores one row per influencer profile with the feature vector serialized
//! as JSON text. A single file replaces the original deployment's hosted
//! document store; the bundled `SQLite` keeps the binary self-contained.

use crate::models::{Candidate, CandidateRecord, Platform};
use crate::storage::CandidateStore;
use crate::{Error, Result};
use rusqlite::{Connection, params};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

/// `SQLite`-backed candidate store.
///
/// # Concurrency Model
///
/// Uses a `Mutex<Connection>` because `rusqlite::Connection` is not `Sync`.
/// WAL mode and a busy timeout keep concurrent access graceful:
///
/// - **WAL mode**: concurrent readers with a single writer
/// - **`busy_timeout`**: waits up to 5 seconds for locks instead of failing
///
/// # Boundary Validation
///
/// `fetch` returns only rows whose vector parses to a finite `f32` sequence.
/// Rows that fail validation are skipped with a warning; a corrupt record
/// must not abort a ranking call.
pub struct SqliteStore {
    /// Connection to the `SQLite` database.
    conn: Mutex<Connection>,
    /// Path to the database file (None for in-memory).
    db_path: Option<PathBuf>,
}

impl SqliteStore {
    /// Opens (or creates) a store at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new(db_path: impl Into<PathBuf>) -> Result<Self> {
        let db_path = db_path.into();
        let conn = Connection::open(&db_path).map_err(|e| Error::OperationFailed {
            operation: "open_sqlite".to_string(),
            cause: e.to_string(),
        })?;

        let store = Self {
            conn: Mutex::new(conn),
            db_path: Some(db_path),
        };
        store.initialize()?;
        Ok(store)
    }

    /// Creates an in-memory store (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| Error::OperationFailed {
            operation: "open_sqlite_in_memory".to_string(),
            cause: e.to_string(),
        })?;

        let store = Self {
            conn: Mutex::new(conn),
            db_path: None,
        };
        store.initialize()?;
        Ok(store)
    }

    /// Returns the database path (None for in-memory).
    #[must_use]
    pub const fn db_path(&self) -> Option<&PathBuf> {
        self.db_path.as_ref()
    }

    /// Initializes pragmas and the schema.
    fn initialize(&self) -> Result<()> {
        let conn = self.lock("initialize_sqlite")?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA busy_timeout = 5000;

             CREATE TABLE IF NOT EXISTS influencers (
                 platform TEXT NOT NULL,
                 id TEXT NOT NULL,
                 name TEXT,
                 vector TEXT NOT NULL,
                 PRIMARY KEY (platform, id)
             );

             CREATE INDEX IF NOT EXISTS idx_influencers_platform
                 ON influencers(platform);",
        )
        .map_err(|e| Error::OperationFailed {
            operation: "initialize_sqlite".to_string(),
            cause: e.to_string(),
        })
    }

    /// Acquires the connection lock.
    fn lock(&self, operation: &str) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| Error::OperationFailed {
            operation: operation.to_string(),
            cause: "connection lock poisoned".to_string(),
        })
    }
}

impl CandidateStore for SqliteStore {
    fn fetch(&self, platform: Platform) -> Result<Vec<Candidate>> {
        let conn = self.lock("fetch_candidates")?;

        let mut stmt = conn
            .prepare(
                "SELECT id, name, vector FROM influencers
                 WHERE platform = ?1 ORDER BY rowid",
            )
            .map_err(|e| Error::OperationFailed {
                operation: "prepare_fetch".to_string(),
                cause: e.to_string(),
            })?;

        let rows = stmt
            .query_map(params![platform.as_str()], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, Option<String>>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })
            .map_err(|e| Error::OperationFailed {
                operation: "query_candidates".to_string(),
                cause: e.to_string(),
            })?;

        let mut candidates = Vec::new();
        for row in rows {
            let (id, name, vector_json) = row.map_err(|e| Error::OperationFailed {
                operation: "read_candidate_row".to_string(),
                cause: e.to_string(),
            })?;

            // Validate at the boundary: a corrupt row is skipped, not fatal.
            let record = CandidateRecord {
                id,
                name,
                vector: serde_json::from_str::<Vec<f32>>(&vector_json).ok(),
            };
            match record.into_candidate() {
                Ok(candidate) => candidates.push(candidate),
                Err(e) => {
                    tracing::warn!(platform = %platform, error = %e, "skipping stored row");
                },
            }
        }

        Ok(candidates)
    }

    fn upsert(&self, platform: Platform, candidate: Candidate) -> Result<()> {
        let vector_json =
            serde_json::to_string(&candidate.vector).map_err(|e| Error::OperationFailed {
                operation: "serialize_vector".to_string(),
                cause: e.to_string(),
            })?;

        let conn = self.lock("upsert_candidate")?;
        conn.execute(
            "INSERT INTO influencers (platform, id, name, vector)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(platform, id) DO UPDATE SET
                 name = excluded.name,
                 vector = excluded.vector",
            params![
                platform.as_str(),
                candidate.id.as_str(),
                candidate.name,
                vector_json
            ],
        )
        .map_err(|e| Error::OperationFailed {
            operation: "upsert_candidate".to_string(),
            cause: e.to_string(),
        })?;

        Ok(())
    }

    fn count(&self, platform: Platform) -> Result<usize> {
        let conn = self.lock("count_candidates")?;
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM influencers WHERE platform = ?1",
                params![platform.as_str()],
                |row| row.get(0),
            )
            .map_err(|e| Error::OperationFailed {
                operation: "count_candidates".to_string(),
                cause: e.to_string(),
            })?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    fn clear(&self, platform: Platform) -> Result<()> {
        let conn = self.lock("clear_candidates")?;
        conn.execute(
            "DELETE FROM influencers WHERE platform = ?1",
            params![platform.as_str()],
        )
        .map_err(|e| Error::OperationFailed {
            operation: "clear_candidates".to_string(),
            cause: e.to_string(),
        })?;
        Ok(())
    }
}
