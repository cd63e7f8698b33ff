use clap::{Parser, Subcommand, ValueEnum};
use simplelog::LevelFilter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "A tag-indexed media library manager")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Content root directory (defaults to ~/media)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Index database path (defaults to <root>/library.db)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Enable file logging to mediatag.log
    #[arg(long = "log", global = true)]
    pub log: bool,

    /// Log level for file logging (debug, info, warn, error)
    #[arg(long, default_value_t = LevelFilter::Debug, global = true)]
    pub log_level: LevelFilter,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Import media files into the library
    Import {
        /// Files to import
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Title applied to every imported file (skips the interactive prompt)
        #[arg(long)]
        title: Option<String>,

        /// Space-separated tags applied to every imported file (skips the
        /// interactive prompt)
        #[arg(long)]
        tags: Option<String>,

        /// Never offer to launch a preview viewer
        #[arg(long)]
        no_preview: bool,
    },

    /// Search the library for media carrying any of the given tags
    Search {
        /// Tags to match (logical OR, exact match)
        #[arg(required = true)]
        tags: Vec<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Paths)]
        output: OutputFormat,
    },

    /// Show everything known about one media item
    Info {
        /// Media id
        id: i64,

        /// Print as JSON instead of the field listing
        #[arg(long)]
        json: bool,
    },

    /// Change the title of a media item
    Modify {
        /// Media id
        id: i64,

        /// New title (prompted for interactively when omitted)
        #[arg(long)]
        title: Option<String>,
    },

    /// Remove a media item from the index
    Delete {
        /// Media id
        id: i64,
    },

    /// Delete the index and every file under the content root
    Wipe {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// One file path per line
    Paths,
    /// JSON array of file paths
    Json,
}
