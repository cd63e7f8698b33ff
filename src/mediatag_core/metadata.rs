use crate::mediatag_core::error::Result;
use crate::mediatag_core::media::MediaKind;
use crate::mediatag_core::preview;
use std::io::{self, Write};
use std::path::Path;

/// Title and tags for one item about to be cataloged.
#[derive(Debug, Clone)]
pub struct EntryMetadata {
    pub title: String,
    pub tags: Vec<String>,
}

/// Where the import pipeline gets its `(title, tags)` pair from.
///
/// `Ok(None)` means the user declined to catalog the file; the pipeline
/// skips it and moves on.
pub trait MetadataSource {
    fn acquire(&mut self, path: &Path, kind: MediaKind) -> Result<Option<EntryMetadata>>;
}

/// Fixed metadata applied to every file in a batch. Used for
/// non-interactive imports and in tests.
pub struct PresetSource {
    title: String,
    tags: Vec<String>,
}

impl PresetSource {
    pub fn new(title: impl Into<String>, tags: Vec<String>) -> Self {
        PresetSource {
            title: title.into(),
            tags,
        }
    }
}

impl MetadataSource for PresetSource {
    fn acquire(&mut self, _path: &Path, _kind: MediaKind) -> Result<Option<EntryMetadata>> {
        Ok(Some(EntryMetadata {
            title: self.title.clone(),
            tags: self.tags.clone(),
        }))
    }
}

/// Interactive stdin prompts, with an optional preview viewer running while
/// the user types.
pub struct PromptSource {
    offer_preview: bool,
}

impl PromptSource {
    pub fn new(offer_preview: bool) -> Self {
        PromptSource { offer_preview }
    }
}

impl MetadataSource for PromptSource {
    fn acquire(&mut self, path: &Path, kind: MediaKind) -> Result<Option<EntryMetadata>> {
        // Held until every return below so the viewer is torn down whichever
        // way this function exits.
        let _viewer = if self.offer_preview
            && answers_yes(&prompt_line("Preview media before providing info? [y/n]: ")?)
        {
            preview::spawn(kind, path)
        } else {
            None
        };

        println!();
        println!("Provide info for '{}'", path.display());
        let title = prompt_line("Title: ")?;
        let tags: Vec<String> = prompt_line("Tags (separated by spaces): ")?
            .split_whitespace()
            .map(str::to_string)
            .collect();
        println!();

        if title.is_empty() {
            let answer = prompt_line("You didn't provide a title, continue? [y/n]: ")?;
            if answers_no(&answer) {
                return Ok(None);
            }
        }
        if tags.is_empty() {
            let answer = prompt_line("You didn't provide any tags, continue? [y/n]: ")?;
            if answers_no(&answer) {
                return Ok(None);
            }
        }

        Ok(Some(EntryMetadata { title, tags }))
    }
}

/// Print a label and read one trimmed line from stdin.
pub fn prompt_line(label: &str) -> Result<String> {
    print!("{label}");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

fn answers_yes(answer: &str) -> bool {
    matches!(answer.to_lowercase().as_str(), "y" | "yes")
}

fn answers_no(answer: &str) -> bool {
    matches!(answer.to_lowercase().as_str(), "n" | "no")
}
