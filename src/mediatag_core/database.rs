use crate::mediatag_core::error::{MediatagError, Result};
use crate::mediatag_core::media::{MediaItem, MediaKind};
use rusqlite::{Connection, OptionalExtension, params};
use rusqlite_migration::{M, Migrations};
use std::path::{Path, PathBuf};

/// The tag index: media items, tags, and their many-to-many associations.
///
/// Holds only the index path. Every operation opens its own connection,
/// runs its statements as one transaction, and closes — there is no
/// long-lived connection and no cross-call transaction.
pub struct Database {
    path: PathBuf,
}

fn migrations() -> Migrations<'static> {
    Migrations::new(vec![M::up(
        r#"
        CREATE TABLE IF NOT EXISTS media (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            file_path TEXT NOT NULL,
            media_type TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS tags (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            tag_name TEXT NOT NULL UNIQUE
        );
        CREATE TABLE IF NOT EXISTS media_tags (
            media_id INTEGER NOT NULL,
            tag_id INTEGER NOT NULL,
            PRIMARY KEY (media_id, tag_id),
            FOREIGN KEY (media_id) REFERENCES media(id) ON DELETE CASCADE,
            FOREIGN KEY (tag_id) REFERENCES tags(id)
        );
        "#,
    )])
}

impl Database {
    /// Point at an index file. The schema is created by `initialize`.
    pub fn new(path: &Path) -> Self {
        Database {
            path: path.to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the schema if it is missing. Safe to call on every process
    /// start; existing data is never touched.
    pub fn initialize(&self) -> Result<()> {
        let mut conn = self.open()?;
        migrations().to_latest(&mut conn)?;
        Ok(())
    }

    fn open(&self) -> Result<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(conn)
    }

    /// Insert one media row and return its id.
    pub fn create_media_item(&self, title: &str, file_path: &str, kind: MediaKind) -> Result<i64> {
        let conn = self.open()?;
        insert_media(&conn, title, file_path, kind)
    }

    /// Return the id of the tag with this exact name, creating the row on
    /// first use.
    pub fn resolve_or_create_tag(&self, name: &str) -> Result<i64> {
        let conn = self.open()?;
        resolve_tag(&conn, name)
    }

    /// Associate a tag with a media item. Linking an already-linked pair is
    /// a no-op.
    pub fn link_tag(&self, media_id: i64, tag_id: i64) -> Result<()> {
        let conn = self.open()?;
        insert_link(&conn, media_id, tag_id)
    }

    /// Catalog a freshly copied file together with its tags, atomically:
    /// either the media row and every association commit, or nothing does.
    pub fn register(
        &self,
        title: &str,
        file_path: &str,
        kind: MediaKind,
        tags: &[String],
    ) -> Result<i64> {
        if title.is_empty() {
            log::warn!("Cataloging '{}' with an empty title", file_path);
        }

        let mut conn = self.open()?;
        let tx = conn.transaction()?;

        let media_id = insert_media(&tx, title, file_path, kind)?;
        for name in tags {
            let tag_id = resolve_tag(&tx, name)?;
            insert_link(&tx, media_id, tag_id)?;
        }

        tx.commit()?;
        Ok(media_id)
    }

    /// File paths of every item carrying at least one of the given tags.
    /// Exact match, logical OR, duplicates suppressed. No tags, no results.
    pub fn find_by_any_tag(&self, names: &[String]) -> Result<Vec<String>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let conn = self.open()?;
        let placeholders: Vec<&str> = names.iter().map(|_| "?").collect();
        let sql = format!(
            "SELECT DISTINCT media.file_path FROM media
             JOIN media_tags ON media_tags.media_id = media.id
             JOIN tags ON media_tags.tag_id = tags.id
             WHERE tags.tag_name IN ({})",
            placeholders.join(",")
        );

        let mut stmt = conn.prepare(&sql)?;
        let param_refs: Vec<&dyn rusqlite::ToSql> =
            names.iter().map(|n| n as &dyn rusqlite::ToSql).collect();
        let rows = stmt.query_map(param_refs.as_slice(), |row| row.get::<_, String>(0))?;

        let mut paths = Vec::new();
        for row in rows {
            paths.push(row?);
        }
        Ok(paths)
    }

    /// Fetch one item with its tag names. Tag order follows association
    /// insertion but is not part of the contract.
    pub fn get_item(&self, id: i64) -> Result<MediaItem> {
        let conn = self.open()?;
        let row = conn
            .query_row(
                "SELECT title, file_path, media_type FROM media WHERE id = ?1",
                params![id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                    ))
                },
            )
            .optional()?;

        let (title, file_path, media_type) = row.ok_or(MediatagError::NotFound(id))?;

        let mut stmt = conn.prepare(
            "SELECT tags.tag_name FROM media_tags
             JOIN tags ON media_tags.tag_id = tags.id
             WHERE media_tags.media_id = ?1",
        )?;
        let rows = stmt.query_map(params![id], |row| row.get::<_, String>(0))?;

        let mut tag_names = Vec::new();
        for row in rows {
            tag_names.push(row?);
        }

        Ok(MediaItem {
            id,
            title,
            file_path,
            media_type,
            tags: tag_names,
        })
    }

    /// Replace an item's title.
    pub fn rename_title(&self, id: i64, new_title: &str) -> Result<()> {
        let conn = self.open()?;
        let changed = conn.execute(
            "UPDATE media SET title = ?1 WHERE id = ?2",
            params![new_title, id],
        )?;
        if changed == 0 {
            return Err(MediatagError::NotFound(id));
        }
        Ok(())
    }

    /// Remove an item; its associations go with it. Tag rows are kept even
    /// when orphaned.
    pub fn delete_item(&self, id: i64) -> Result<()> {
        let conn = self.open()?;
        let deleted = conn.execute("DELETE FROM media WHERE id = ?1", params![id])?;
        if deleted == 0 {
            return Err(MediatagError::NotFound(id));
        }
        Ok(())
    }
}

fn insert_media(conn: &Connection, title: &str, file_path: &str, kind: MediaKind) -> Result<i64> {
    conn.execute(
        "INSERT INTO media (title, file_path, media_type) VALUES (?1, ?2, ?3)",
        params![title, file_path, kind.as_str()],
    )?;
    Ok(conn.last_insert_rowid())
}

fn resolve_tag(conn: &Connection, name: &str) -> Result<i64> {
    let existing = conn
        .query_row(
            "SELECT id FROM tags WHERE tag_name = ?1",
            params![name],
            |row| row.get(0),
        )
        .optional()?;
    if let Some(id) = existing {
        return Ok(id);
    }

    conn.execute("INSERT INTO tags (tag_name) VALUES (?1)", params![name])?;
    Ok(conn.last_insert_rowid())
}

fn insert_link(conn: &Connection, media_id: i64, tag_id: i64) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO media_tags (media_id, tag_id) VALUES (?1, ?2)",
        params![media_id, tag_id],
    )?;
    Ok(())
}
