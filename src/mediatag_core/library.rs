use crate::mediatag_core::config::Settings;
use crate::mediatag_core::database::Database;
use crate::mediatag_core::error::Result;
use crate::mediatag_core::media::classify;
use crate::mediatag_core::metadata::MetadataSource;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;
use walkdir::WalkDir;

/// Default index file name inside the content root.
pub const DB_FILE_NAME: &str = "library.db";

/// A content root plus its tag index.
pub struct Library {
    root: PathBuf,
    db: Database,
}

impl Library {
    /// Open the library described by the settings, creating the content
    /// root and the index schema when they do not exist yet.
    pub fn open(settings: &Settings) -> Result<Self> {
        if !settings.content_root.exists() {
            fs::create_dir_all(&settings.content_root)?;
        }
        // Stored file paths must be absolute regardless of how the root was
        // spelled on the command line.
        let root = settings.content_root.canonicalize()?;

        if let Some(parent) = settings.index_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let db = Database::new(&settings.index_path);
        db.initialize()?;

        Ok(Library { root, db })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Import a batch of source files.
    ///
    /// Each file is classified, copied to `<root>/<classification>/` under a
    /// fresh 128-bit hex name, and registered in the index with the metadata
    /// the source provides. Missing sources and unclassifiable or uncopyable
    /// files are reported and skipped; the batch keeps going. Only an index
    /// failure aborts the batch.
    pub fn import(
        &self,
        sources: &[PathBuf],
        metadata: &mut dyn MetadataSource,
    ) -> Result<ImportStats> {
        let mut stats = ImportStats::default();

        for source in sources {
            if source.as_os_str().is_empty() || !source.exists() {
                log::warn!("Skipping missing source path '{}'", source.display());
                stats.skipped += 1;
                continue;
            }

            let kind = match classify(source) {
                Ok(kind) => kind,
                Err(e) => {
                    log::error!("{e}, skipping");
                    stats.errors += 1;
                    continue;
                }
            };

            let entry = match metadata.acquire(source, kind)? {
                Some(entry) => entry,
                None => {
                    log::info!("Skipping '{}' at the user's request", source.display());
                    stats.skipped += 1;
                    continue;
                }
            };

            let token = Uuid::new_v4().simple().to_string();
            let filename = match source.extension().and_then(|e| e.to_str()) {
                Some(ext) => format!("{token}.{ext}"),
                None => token,
            };
            let dest_dir = self.root.join(kind.folder_name());
            let destination = dest_dir.join(filename);

            if let Err(e) = fs::create_dir_all(&dest_dir) {
                log::error!("Failed to create '{}': {}", dest_dir.display(), e);
                stats.errors += 1;
                continue;
            }
            if let Err(e) = fs::copy(source, &destination) {
                log::error!(
                    "Failed to copy '{}' -> '{}': {}",
                    source.display(),
                    destination.display(),
                    e
                );
                stats.errors += 1;
                continue;
            }

            self.db
                .register(&entry.title, &destination.to_string_lossy(), kind, &entry.tags)?;

            println!(
                "COPIED: '{}' -> '{}'",
                source.display(),
                destination.display()
            );
            stats.imported += 1;
        }

        Ok(stats)
    }

    /// Delete the index file and everything under the content root, files
    /// before the directories holding them. Irreversible.
    pub fn wipe(&self) -> Result<()> {
        if self.db.path().exists() {
            fs::remove_file(self.db.path())?;
            println!("DELETED: {}", self.db.path().display());
        }

        if self.root.exists() {
            for entry in WalkDir::new(&self.root).contents_first(true) {
                let entry = entry?;
                if entry.file_type().is_dir() {
                    fs::remove_dir(entry.path())?;
                } else {
                    fs::remove_file(entry.path())?;
                }
                println!("DELETED: {}", entry.path().display());
            }
        }

        Ok(())
    }
}

/// Outcome counts for one import batch.
#[derive(Debug, Default)]
pub struct ImportStats {
    pub imported: usize,
    pub skipped: usize,
    pub errors: usize,
}

impl std::fmt::Display for ImportStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} files imported ({} skipped, {} failed)",
            self.imported, self.skipped, self.errors
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mediatag_core::error::MediatagError;
    use crate::mediatag_core::media::MediaKind;
    use crate::mediatag_core::metadata::{EntryMetadata, PresetSource};
    use assert_fs::TempDir;
    use assert_fs::prelude::*;

    fn open_library(temp: &TempDir) -> Library {
        let settings = Settings::resolve(Some(temp.path().join("media")), None).unwrap();
        Library::open(&settings).unwrap()
    }

    fn preset(tags: &[&str]) -> PresetSource {
        PresetSource::new("test title", tags.iter().map(|t| t.to_string()).collect())
    }

    #[test]
    fn import_shards_by_classification() {
        let temp = TempDir::new().unwrap();
        let lib = open_library(&temp);
        let photo = temp.child("in/photo.jpg");
        photo.write_binary(b"p").unwrap();
        let clip = temp.child("in/clip.mp4");
        clip.write_binary(b"c").unwrap();
        let anim = temp.child("in/anim.gif");
        anim.write_binary(b"g").unwrap();

        let stats = lib
            .import(
                &[photo.path().into(), clip.path().into(), anim.path().into()],
                &mut preset(&["x"]),
            )
            .unwrap();
        assert_eq!(stats.imported, 3);

        for dir in ["image", "video", "gif"] {
            assert_eq!(fs::read_dir(lib.root().join(dir)).unwrap().count(), 1);
        }

        let paths = lib.database().find_by_any_tag(&["x".into()]).unwrap();
        assert_eq!(paths.len(), 3);
        assert!(paths.iter().all(|p| Path::new(p).is_absolute()));

        // A gif is cataloged as gif, not image
        let kinds: Vec<String> = (1..=3)
            .map(|id| lib.database().get_item(id).unwrap().media_type)
            .collect();
        assert!(kinds.contains(&"gif".to_string()));
    }

    #[test]
    fn identical_source_names_never_collide() {
        let temp = TempDir::new().unwrap();
        let lib = open_library(&temp);
        let one = temp.child("one/photo.jpg");
        one.write_binary(b"one").unwrap();
        let two = temp.child("two/photo.jpg");
        two.write_binary(b"two").unwrap();

        let stats = lib
            .import(&[one.path().into(), two.path().into()], &mut preset(&["dup"]))
            .unwrap();
        assert_eq!(stats.imported, 2);

        let first = lib.database().get_item(1).unwrap();
        let second = lib.database().get_item(2).unwrap();
        assert_ne!(first.file_path, second.file_path);

        // Sources are copied, never moved
        assert!(one.path().exists());
        assert!(two.path().exists());
    }

    #[test]
    fn missing_and_unclassifiable_sources_do_not_stop_the_batch() {
        let temp = TempDir::new().unwrap();
        let lib = open_library(&temp);
        let unknown = temp.child("in/file.xyz");
        unknown.write_binary(b"?").unwrap();
        let good = temp.child("in/good.png");
        good.write_binary(b"g").unwrap();

        let stats = lib
            .import(
                &[
                    PathBuf::from(""),
                    temp.path().join("in/never-written.jpg"),
                    unknown.path().into(),
                    good.path().into(),
                ],
                &mut preset(&["x"]),
            )
            .unwrap();

        assert_eq!(stats.imported, 1);
        assert_eq!(stats.skipped, 2);
        assert_eq!(stats.errors, 1);
        assert_eq!(lib.database().find_by_any_tag(&["x".into()]).unwrap().len(), 1);
    }

    #[test]
    fn declined_files_are_skipped_without_copying() {
        struct Decline;
        impl MetadataSource for Decline {
            fn acquire(&mut self, _path: &Path, _kind: MediaKind) -> Result<Option<EntryMetadata>> {
                Ok(None)
            }
        }

        let temp = TempDir::new().unwrap();
        let lib = open_library(&temp);
        let photo = temp.child("in/photo.jpg");
        photo.write_binary(b"p").unwrap();

        let stats = lib.import(&[photo.path().into()], &mut Decline).unwrap();

        assert_eq!(stats.imported, 0);
        assert_eq!(stats.skipped, 1);
        assert!(!lib.root().join("image").exists());
    }

    #[test]
    fn wipe_leaves_no_residue_and_reinitializes() {
        let temp = TempDir::new().unwrap();
        let lib = open_library(&temp);
        let photo = temp.child("in/photo.jpg");
        photo.write_binary(b"p").unwrap();
        lib.import(&[photo.path().into()], &mut preset(&["x"])).unwrap();

        let root = lib.root().to_path_buf();
        lib.wipe().unwrap();
        assert!(!root.exists());

        // A fresh open recreates an empty, usable index
        let lib = open_library(&temp);
        assert!(lib.database().find_by_any_tag(&["x".into()]).unwrap().is_empty());
        assert!(matches!(
            lib.database().get_item(1),
            Err(MediatagError::NotFound(1))
        ));
    }
}
