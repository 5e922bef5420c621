/// Audio file discovery
use crate::error::{MetadataError, Result};
use std::path::{Path, PathBuf};

/// Extensions picked up by `discover_audio_files`
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "flac", "ogg", "opus", "wav", "m4a", "aac"];

/// Collect importable audio files under `path`
///
/// A file path yields itself if it has an audio extension. Directories are
/// walked recursively without following links; results are sorted so
/// imports happen in a stable order.
pub fn discover_audio_files(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.exists() {
        return Err(MetadataError::FileNotFound(path.display().to_string()));
    }

    if path.is_file() {
        return Ok(if is_audio_file(path) {
            vec![path.to_path_buf()]
        } else {
            Vec::new()
        });
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(walkdir::DirEntry::into_path)
        .filter(|p| p.is_file() && is_audio_file(p))
        .collect();
    files.sort();
    Ok(files)
}

/// Whether the path has a supported audio extension (case-insensitive)
pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| AUDIO_EXTENSIONS.contains(&e.to_lowercase().as_str()))
}
