use anyhow::Result;
use clap::Parser;
use mediatag::mediatag_core::metadata::prompt_line;
use mediatag::mediatag_core::{
    Cli, Commands, Library, OutputFormat, PresetSource, PromptSource, Settings,
};
use simplelog::{CombinedLogger, Config, LevelFilter, SharedLogger, TermLogger, WriteLogger};
use std::fs::File;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize loggers
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        LevelFilter::Warn,
        Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )];

    if cli.log {
        loggers.push(WriteLogger::new(
            cli.log_level,
            Config::default(),
            File::create("mediatag.log")?,
        ));
    }

    CombinedLogger::init(loggers)?;

    let settings = Settings::resolve(cli.root, cli.db)?;
    let library = Library::open(&settings)?;

    match cli.command {
        Commands::Import {
            paths,
            title,
            tags,
            no_preview,
        } => {
            let stats = if title.is_some() || tags.is_some() {
                let tags: Vec<String> = tags
                    .unwrap_or_default()
                    .split_whitespace()
                    .map(str::to_string)
                    .collect();
                let mut source = PresetSource::new(title.unwrap_or_default(), tags);
                library.import(&paths, &mut source)?
            } else {
                let mut source = PromptSource::new(!no_preview);
                library.import(&paths, &mut source)?
            };
            println!("\n{stats}");
        }

        Commands::Search { tags, output } => {
            let paths = library.database().find_by_any_tag(&tags)?;
            match output {
                OutputFormat::Paths => {
                    for path in &paths {
                        println!("{path}");
                    }
                }
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&paths)?),
            }
        }

        Commands::Info { id, json } => {
            let item = library.database().get_item(id)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&item)?);
            } else {
                println!("ID:    {}", item.id);
                println!("TYPE:  {}", item.media_type);
                println!("TITLE: {}", item.title);
                println!("TAGS:  {}", item.tags.join(" "));
                println!("PATH:  {}", item.file_path);
            }
        }

        Commands::Modify { id, title } => {
            let new_title = match title {
                Some(title) => title,
                None => {
                    let item = library.database().get_item(id)?;
                    println!("Old title: {}", item.title);
                    prompt_line("New title: ")?
                }
            };
            library.database().rename_title(id, &new_title)?;
            println!("Title updated for media {id}");
        }

        Commands::Delete { id } => {
            library.database().delete_item(id)?;
            println!("Deleted media {id}");
        }

        Commands::Wipe { yes } => {
            if !yes {
                let answer = prompt_line(&format!(
                    "This deletes the index and everything under {}. Continue? [y/N]: ",
                    library.root().display()
                ))?;
                if !matches!(answer.to_lowercase().as_str(), "y" | "yes") {
                    println!("Aborted");
                    return Ok(());
                }
            }
            library.wipe()?;
        }
    }

    Ok(())
}
