use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::config::SUPPORTED_EXTENSIONS;
use crate::error::{BrowseError, BrowseResult};

/// Check if a path carries one of the supported image extensions.
/// The comparison ignores case, so `IMG.JPG` and `img.jpg` both match.
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}

/// Order entries by lower-cased file name
fn by_lowercase_name(a: &DirEntry, b: &DirEntry) -> Ordering {
    let a = a.file_name().to_string_lossy().to_lowercase();
    let b = b.file_name().to_string_lossy().to_lowercase();
    a.cmp(&b)
}

/// Read the immediate children of `path`, sorted case-insensitively.
///
/// Links are not followed by the walk itself; callers use `Path::is_dir`
/// and `Path::is_file` which resolve them.
fn read_entries(path: &Path) -> BrowseResult<Vec<PathBuf>> {
    WalkDir::new(path)
        .min_depth(1)
        .max_depth(1)
        .sort_by(by_lowercase_name)
        .into_iter()
        .map(|entry| entry.map(DirEntry::into_path))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| BrowseError::ReadDir {
            path: path.to_path_buf(),
            source,
        })
}

/// List immediate subdirectories of `path`
pub fn read_subdirectories(path: &Path) -> BrowseResult<Vec<PathBuf>> {
    let mut entries = read_entries(path)?;
    entries.retain(|p| p.is_dir());
    Ok(entries)
}

/// List immediate image files of `path`
pub fn read_images(path: &Path) -> BrowseResult<Vec<PathBuf>> {
    let mut entries = read_entries(path)?;
    entries.retain(|p| p.is_file() && is_supported_image(p));
    Ok(entries)
}

/// Like [`read_subdirectories`], but an unreadable folder is just empty
pub fn list_subdirectories(path: &Path) -> Vec<PathBuf> {
    read_subdirectories(path).unwrap_or_else(|err| {
        log::warn!("{}", err);
        Vec::new()
    })
}

/// Like [`read_images`], but an unreadable folder is just empty
pub fn list_images(path: &Path) -> Vec<PathBuf> {
    read_images(path).unwrap_or_else(|err| {
        log::warn!("{}", err);
        Vec::new()
    })
}
