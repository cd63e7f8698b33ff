pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod library;
pub mod media;
pub mod metadata;
pub mod preview;

pub use cli::{Cli, Commands, OutputFormat};
pub use config::Settings;
pub use database::Database;
pub use error::{MediatagError, Result};
pub use library::{DB_FILE_NAME, ImportStats, Library};
pub use media::{MediaItem, MediaKind, classify};
pub use metadata::{EntryMetadata, MetadataSource, PresetSource, PromptSource};
