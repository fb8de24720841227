/// Shared data structures for the browser state
///
/// These structs represent the data model that flows between
/// the filesystem layer and the UI layer.
use std::path::{Path, PathBuf};

/// Represents a single image file in the current folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    /// Full path to the image file
    pub path: PathBuf,
    /// Filename only (e.g., "IMG_0001.jpg")
    pub filename: String,
}

impl ImageEntry {
    pub fn new(path: PathBuf) -> Self {
        let filename = display_name(&path);
        Self { path, filename }
    }
}

/// One folder in the sidebar tree
///
/// `children` stays `None` until the node is expanded for the first time,
/// after that it holds exactly one level of subfolders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryNode {
    pub path: PathBuf,
    /// Label shown in the sidebar
    pub name: String,
    pub children: Option<Vec<DirectoryNode>>,
    pub expanded: bool,
}

impl DirectoryNode {
    pub fn new(path: PathBuf) -> Self {
        let name = display_name(&path);
        Self::with_name(path, name)
    }

    /// Unloaded, collapsed node with an already computed label
    pub fn with_name(path: PathBuf, name: String) -> Self {
        Self {
            path,
            name,
            children: None,
            expanded: false,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.children.is_some()
    }
}

/// Last path component, or the whole path for roots like `/` or `C:\`
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
