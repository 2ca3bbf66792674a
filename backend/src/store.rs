//! SQLite persistence for submissions, the course roster and staff cohort
//! preferences.
//!
//! A single connection is shared behind a `tokio::sync::Mutex`; every method
//! takes the lock, runs its statements and releases it before returning.
//! Errors are flattened to `String`, the same way the handlers report them.

use common::model::submission::SubmissionRecord;
use rusqlite::{params, Connection, OptionalExtension};
use tokio::sync::Mutex;

use crate::config::RosterEntry;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS roster (
        user_id TEXT PRIMARY KEY,
        name    TEXT NOT NULL DEFAULT '',
        cohort  TEXT NOT NULL DEFAULT ''
    );
    CREATE TABLE IF NOT EXISTS submissions (
        id           TEXT PRIMARY KEY,
        block_id     TEXT NOT NULL,
        user_id      TEXT NOT NULL,
        link         TEXT NOT NULL,
        submitted_at TEXT NOT NULL DEFAULT (datetime('now')),
        validated_by TEXT,
        UNIQUE (block_id, user_id)
    );
    CREATE TABLE IF NOT EXISTS preferences (
        block_id TEXT NOT NULL,
        user_id  TEXT NOT NULL,
        cohort   TEXT NOT NULL,
        PRIMARY KEY (block_id, user_id)
    );
";

const SUBMISSION_COLUMNS: &str =
    "id, user_id, strftime('%d/%m/%Y %H:%M:%S', submitted_at), link, validated_by";

/// Result of trying to validate a learner's submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOutcome {
    Validated,
    AlreadyValidated,
    Missing,
}

pub struct Store {
    conn: Mutex<Connection>,
}

impl Store {
    pub fn open(path: &str) -> Result<Self, String> {
        let conn = Connection::open(path).map_err(|e| e.to_string())?;
        Self::with_connection(conn)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self, String> {
        let conn = Connection::open_in_memory().map_err(|e| e.to_string())?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, String> {
        conn.execute_batch(SCHEMA).map_err(|e| e.to_string())?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub async fn seed_roster(&self, roster: &[RosterEntry]) -> Result<(), String> {
        let conn = self.conn.lock().await;
        for entry in roster {
            conn.execute(
                "INSERT OR REPLACE INTO roster (user_id, name, cohort) VALUES (?1, ?2, ?3)",
                params![&entry.user_id, &entry.name, &entry.cohort],
            )
            .map_err(|e| e.to_string())?;
        }
        Ok(())
    }

    /// Enrolled learners, restricted to `cohort` when given.
    pub async fn roster(&self, cohort: Option<&str>) -> Result<Vec<RosterEntry>, String> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare(
                "SELECT user_id, name, cohort FROM roster
                 WHERE ?1 IS NULL OR cohort = ?1
                 ORDER BY name, user_id",
            )
            .map_err(|e| e.to_string())?;
        let rows = stmt
            .query_map(params![cohort], |row| {
                Ok(RosterEntry {
                    user_id: row.get(0)?,
                    name: row.get(1)?,
                    cohort: row.get(2)?,
                })
            })
            .map_err(|e| e.to_string())?;
        rows.collect::<Result<Vec<_>, _>>().map_err(|e| e.to_string())
    }

    pub async fn cohorts(&self) -> Result<Vec<String>, String> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare("SELECT DISTINCT cohort FROM roster WHERE cohort <> '' ORDER BY cohort")
            .map_err(|e| e.to_string())?;
        let rows = stmt
            .query_map([], |row| row.get(0))
            .map_err(|e| e.to_string())?;
        rows.collect::<Result<Vec<String>, _>>().map_err(|e| e.to_string())
    }

    pub async fn cohort_of(&self, user_id: &str) -> Result<Option<String>, String> {
        let conn = self.conn.lock().await;
        conn.query_row(
            "SELECT cohort FROM roster WHERE user_id = ?1 AND cohort <> ''",
            params![user_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| e.to_string())
    }

    pub async fn submission(
        &self,
        block_id: &str,
        user_id: &str,
    ) -> Result<Option<SubmissionRecord>, String> {
        let conn = self.conn.lock().await;
        conn.query_row(
            &format!(
                "SELECT {} FROM submissions WHERE block_id = ?1 AND user_id = ?2",
                SUBMISSION_COLUMNS
            ),
            params![block_id, user_id],
            submission_from_row,
        )
        .optional()
        .map_err(|e| e.to_string())
    }

    pub async fn submissions(&self, block_id: &str) -> Result<Vec<SubmissionRecord>, String> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM submissions WHERE block_id = ?1 ORDER BY submitted_at, user_id",
                SUBMISSION_COLUMNS
            ))
            .map_err(|e| e.to_string())?;
        let rows = stmt
            .query_map(params![block_id], submission_from_row)
            .map_err(|e| e.to_string())?;
        rows.collect::<Result<Vec<_>, _>>().map_err(|e| e.to_string())
    }

    /// Stores a learner's link. Returns `false` when the learner already has a
    /// submission for this block.
    pub async fn insert_submission(
        &self,
        block_id: &str,
        user_id: &str,
        link: &str,
    ) -> Result<bool, String> {
        let conn = self.conn.lock().await;
        let id = uuid::Uuid::new_v4().to_string();
        let inserted = conn
            .execute(
                "INSERT OR IGNORE INTO submissions (id, block_id, user_id, link)
                 VALUES (?1, ?2, ?3, ?4)",
                params![id, block_id, user_id, link],
            )
            .map_err(|e| e.to_string())?;
        Ok(inserted == 1)
    }

    pub async fn mark_validated(
        &self,
        block_id: &str,
        user_id: &str,
        validated_by: &str,
    ) -> Result<ValidationOutcome, String> {
        let conn = self.conn.lock().await;
        let updated = conn
            .execute(
                "UPDATE submissions SET validated_by = ?3
                 WHERE block_id = ?1 AND user_id = ?2 AND validated_by IS NULL",
                params![block_id, user_id, validated_by],
            )
            .map_err(|e| e.to_string())?;
        if updated == 1 {
            return Ok(ValidationOutcome::Validated);
        }

        let exists = conn
            .query_row(
                "SELECT 1 FROM submissions WHERE block_id = ?1 AND user_id = ?2",
                params![block_id, user_id],
                |_| Ok(()),
            )
            .optional()
            .map_err(|e| e.to_string())?
            .is_some();
        Ok(if exists {
            ValidationOutcome::AlreadyValidated
        } else {
            ValidationOutcome::Missing
        })
    }

    pub async fn cohort_preference(
        &self,
        block_id: &str,
        user_id: &str,
    ) -> Result<Option<String>, String> {
        let conn = self.conn.lock().await;
        conn.query_row(
            "SELECT cohort FROM preferences WHERE block_id = ?1 AND user_id = ?2",
            params![block_id, user_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| e.to_string())
    }

    pub async fn set_cohort_preference(
        &self,
        block_id: &str,
        user_id: &str,
        cohort: &str,
    ) -> Result<(), String> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO preferences (block_id, user_id, cohort) VALUES (?1, ?2, ?3)
             ON CONFLICT (block_id, user_id) DO UPDATE SET cohort = excluded.cohort",
            params![block_id, user_id, cohort],
        )
        .map_err(|e| e.to_string())?;
        Ok(())
    }
}

fn submission_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<SubmissionRecord> {
    let validated_by: Option<String> = row.get(4)?;
    Ok(SubmissionRecord {
        submission_id: row.get(0)?,
        user_id: row.get(1)?,
        timestamp: row.get(2)?,
        link: row.get(3)?,
        validated: validated_by.is_some(),
        validated_by,
    })
}
