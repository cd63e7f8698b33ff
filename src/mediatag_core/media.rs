use crate::mediatag_core::error::{MediatagError, Result};
use serde::Serialize;
use std::path::Path;

/// One cataloged media file with its tags, as read back from the index.
#[derive(Debug, Clone, Serialize)]
pub struct MediaItem {
    pub id: i64,
    pub title: String,
    pub file_path: String,
    pub media_type: String,
    pub tags: Vec<String>,
}

/// The classification bucket a file is assigned at import time. Drives both
/// the destination subdirectory and the stored media type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    Gif,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
            MediaKind::Gif => "gif",
        }
    }

    pub fn folder_name(&self) -> &'static str {
        self.as_str()
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Image file extensions (lowercase).
const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp", "heic", "heif", "avif",
];

/// Video file extensions (lowercase).
const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "mov", "m4v", "avi", "mkv", "webm", "mts", "m2ts", "3gp", "wmv", "flv",
];

/// Classify a file by its extension. Gifs outrank the image bucket because
/// they get their own shard directory.
pub fn classify(path: &Path) -> Result<MediaKind> {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return Err(MediatagError::Classification(path.to_path_buf()));
    };
    let ext = ext.to_lowercase();

    if ext == "gif" {
        return Ok(MediaKind::Gif);
    }
    if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        return Ok(MediaKind::Image);
    }
    if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        return Ok(MediaKind::Video);
    }

    Err(MediatagError::Classification(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_images_and_videos() {
        assert_eq!(classify(Path::new("photo.jpg")).unwrap(), MediaKind::Image);
        assert_eq!(classify(Path::new("photo.PNG")).unwrap(), MediaKind::Image);
        assert_eq!(classify(Path::new("clip.mp4")).unwrap(), MediaKind::Video);
        assert_eq!(classify(Path::new("clip.MOV")).unwrap(), MediaKind::Video);
    }

    #[test]
    fn gif_outranks_the_image_bucket() {
        assert_eq!(classify(Path::new("anim.gif")).unwrap(), MediaKind::Gif);
        assert_eq!(classify(Path::new("anim.GIF")).unwrap(), MediaKind::Gif);
    }

    #[test]
    fn unknown_types_are_an_error() {
        assert!(classify(Path::new("file.xyz")).is_err());
        assert!(classify(Path::new("no-extension")).is_err());
    }

    #[test]
    fn kind_names_match_shard_directories() {
        assert_eq!(MediaKind::Image.as_str(), "image");
        assert_eq!(MediaKind::Video.as_str(), "video");
        assert_eq!(MediaKind::Gif.as_str(), "gif");
        assert_eq!(MediaKind::Gif.folder_name(), "gif");
    }
}
