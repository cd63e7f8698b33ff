use crate::mediatag_core::error::{MediatagError, Result};
use crate::mediatag_core::library::DB_FILE_NAME;
use std::path::PathBuf;

/// Process-wide paths, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory holding all copied media, sharded by classification.
    pub content_root: PathBuf,
    /// The index database file.
    pub index_path: PathBuf,
}

impl Settings {
    /// Resolve the content root and index path from command-line overrides,
    /// falling back to `~/media` and `<root>/library.db`.
    pub fn resolve(root: Option<PathBuf>, db: Option<PathBuf>) -> Result<Self> {
        let content_root = match root {
            Some(dir) => dir,
            None => dirs::home_dir()
                .ok_or(MediatagError::NoHomeDir)?
                .join("media"),
        };
        let index_path = db.unwrap_or_else(|| content_root.join(DB_FILE_NAME));

        Ok(Settings {
            content_root,
            index_path,
        })
    }
}
