// Workspace store: one row per workspace, sources kept as a JSON document.
//
// Every write to `sources` bumps `version`. Writers must present the
// version they read, so two batches submitted against the same snapshot
// cannot silently overwrite each other.

use crate::error::{Result, StoreError};
use crate::model::PersistedSourceEntry;
use rusqlite::{Connection, OptionalExtension, params};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

pub const DEFAULT_DB_FILE: &str = "sift.db";

pub struct Database {
    conn: Connection,
}

/// Snapshot of a workspace configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    pub name: String,
    pub version: i64,
    pub created_at: i64,
    pub updated_at: i64,
    pub sources: Vec<PersistedSourceEntry>,
    /// Fields owned by other tools, never touched by source writes
    pub settings: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceSummary {
    pub name: String,
    pub source_count: usize,
    pub version: i64,
    pub updated_at: i64,
}

fn current_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}

impl Database {
    pub fn drop(path: &Path) -> std::io::Result<()> {
        fs::remove_file(path)
    }

    pub fn exists(path: &Path) -> bool {
        path.exists()
    }

    pub fn new(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            ",
        )?;

        let db = Database { conn };
        db.init_schema()?;
        Ok(db)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS workspaces (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT UNIQUE NOT NULL,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL,
    version INTEGER NOT NULL DEFAULT 0,
    sources TEXT NOT NULL DEFAULT '[]',   -- JSON array of source entries
    settings TEXT NOT NULL DEFAULT '{}'   -- JSON object
);

CREATE INDEX IF NOT EXISTS idx_workspaces_name ON workspaces(name);
            ",
        )?;
        Ok(())
    }

    fn current_version(&self, name: &str) -> Result<Option<i64>> {
        let version = self
            .conn
            .query_row(
                "SELECT version FROM workspaces WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()?;
        Ok(version)
    }

    // Workspace management
    pub fn create_workspace(&self, name: &str) -> Result<WorkspaceConfig> {
        if self.current_version(name)?.is_some() {
            return Err(StoreError::WorkspaceExists(name.to_string()));
        }

        let timestamp = current_timestamp();
        self.conn.execute(
            "INSERT INTO workspaces (name, created_at, updated_at) VALUES (?1, ?2, ?3)",
            params![name, timestamp, timestamp],
        )?;
        info!("Created workspace {}", name);

        self.load_workspace(name)
    }

    pub fn list_workspaces(&self) -> Result<Vec<WorkspaceSummary>> {
        let mut stmt = self.conn.prepare(
            "SELECT name, json_array_length(sources), version, updated_at
             FROM workspaces ORDER BY name",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(WorkspaceSummary {
                name: row.get(0)?,
                source_count: row.get::<_, i64>(1)? as usize,
                version: row.get(2)?,
                updated_at: row.get(3)?,
            })
        })?;

        let mut summaries = Vec::new();
        for row in rows {
            summaries.push(row?);
        }
        Ok(summaries)
    }

    pub fn remove_workspace(&self, name: &str) -> Result<()> {
        let removed = self
            .conn
            .execute("DELETE FROM workspaces WHERE name = ?1", params![name])?;
        if removed == 0 {
            return Err(StoreError::WorkspaceNotFound(name.to_string()));
        }
        info!("Removed workspace {}", name);
        Ok(())
    }

    pub fn rename_workspace(&self, old_name: &str, new_name: &str) -> Result<()> {
        if self.current_version(new_name)?.is_some() {
            return Err(StoreError::WorkspaceExists(new_name.to_string()));
        }
        let renamed = self.conn.execute(
            "UPDATE workspaces SET name = ?1, updated_at = ?2 WHERE name = ?3",
            params![new_name, current_timestamp(), old_name],
        )?;
        if renamed == 0 {
            return Err(StoreError::WorkspaceNotFound(old_name.to_string()));
        }
        Ok(())
    }

    pub fn load_workspace(&self, name: &str) -> Result<WorkspaceConfig> {
        let row = self
            .conn
            .query_row(
                "SELECT name, version, created_at, updated_at, sources, settings
                 FROM workspaces WHERE name = ?1",
                params![name],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, i64>(1)?,
                        row.get::<_, i64>(2)?,
                        row.get::<_, i64>(3)?,
                        row.get::<_, String>(4)?,
                        row.get::<_, String>(5)?,
                    ))
                },
            )
            .optional()?;

        let Some((name, version, created_at, updated_at, sources, settings)) = row else {
            return Err(StoreError::WorkspaceNotFound(name.to_string()));
        };

        Ok(WorkspaceConfig {
            name,
            version,
            created_at,
            updated_at,
            sources: serde_json::from_str(&sources)?,
            settings: serde_json::from_str(&settings)?,
        })
    }

    /// Replace the source list if the workspace is still at
    /// `expected_version`. Returns the new version.
    pub fn save_sources(
        &self,
        name: &str,
        expected_version: i64,
        sources: &[PersistedSourceEntry],
    ) -> Result<i64> {
        let json = serde_json::to_string(sources)?;
        let updated = self.conn.execute(
            "UPDATE workspaces SET sources = ?1, version = version + 1, updated_at = ?2
             WHERE name = ?3 AND version = ?4",
            params![json, current_timestamp(), name, expected_version],
        )?;

        if updated == 0 {
            return match self.current_version(name)? {
                None => Err(StoreError::WorkspaceNotFound(name.to_string())),
                Some(found) => {
                    warn!(
                        "Version conflict on workspace {}: expected {}, found {}",
                        name, expected_version, found
                    );
                    Err(StoreError::VersionConflict {
                        name: name.to_string(),
                        expected: expected_version,
                        found,
                    })
                }
            };
        }

        debug!("Saved {} sources to workspace {}", sources.len(), name);
        Ok(expected_version + 1)
    }

    pub fn save_settings(&self, name: &str, settings: &Value) -> Result<()> {
        let updated = self.conn.execute(
            "UPDATE workspaces SET settings = ?1, updated_at = ?2 WHERE name = ?3",
            params![serde_json::to_string(settings)?, current_timestamp(), name],
        )?;
        if updated == 0 {
            return Err(StoreError::WorkspaceNotFound(name.to_string()));
        }
        Ok(())
    }
}
