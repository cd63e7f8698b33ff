use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MediatagError {
    // Index errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] rusqlite_migration::Error),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Directory walker error: {0}")]
    Walkdir(#[from] walkdir::Error),

    // Lookup errors
    #[error("No media with id {0} in the index")]
    NotFound(i64),

    // Import errors
    #[error("Cannot classify '{0}': unknown media type")]
    Classification(PathBuf),

    // Configuration errors
    #[error("Cannot determine home directory")]
    NoHomeDir,
}

/// Result type for mediatag operations.
pub type Result<T> = std::result::Result<T, MediatagError>;
