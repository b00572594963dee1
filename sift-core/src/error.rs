use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid pattern file: {0}")]
    ParseError(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    #[error("Corrupt source list: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Workspace not found: {0}")]
    WorkspaceNotFound(String),

    #[error("Workspace already exists: {0}")]
    WorkspaceExists(String),

    #[error("Workspace '{name}' was modified concurrently (expected version {expected}, found {found})")]
    VersionConflict {
        name: String,
        expected: i64,
        found: i64,
    },
}

pub type Result<T> = std::result::Result<T, StoreError>;
