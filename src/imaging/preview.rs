/// Full-size preview for the single-image viewer
/// Decodes the image once, shrunk to the viewer's bounding box
use iced::widget::image::Handle;
use std::path::{Path, PathBuf};

use super::decode_fitted;
use crate::config::{VIEWER_MAX_IMAGE, VIEWER_MAX_WINDOW};
use crate::error::BrowseResult;

/// An image ready to be shown by the viewer window
#[derive(Debug, Clone)]
pub struct Preview {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub handle: Handle,
}

impl Preview {
    /// Decode `path` into a preview no larger than the viewer limits
    pub fn load(path: &Path) -> BrowseResult<Self> {
        let (max_width, max_height) = VIEWER_MAX_IMAGE;
        let decoded = decode_fitted(path, max_width, max_height)?;

        log::info!("Loaded preview {}x{}: {}", decoded.width, decoded.height, path.display());

        Ok(Self {
            path: path.to_path_buf(),
            width: decoded.width,
            height: decoded.height,
            handle: Handle::from_rgba(decoded.width, decoded.height, decoded.pixels),
        })
    }

    /// Window size that frames the image with a small margin
    pub fn window_size(&self) -> (u32, u32) {
        viewer_window_size(self.width, self.height)
    }
}

/// Image plus margins, capped at the maximum viewer window
pub fn viewer_window_size(width: u32, height: u32) -> (u32, u32) {
    let (max_width, max_height) = VIEWER_MAX_WINDOW;
    ((width + 40).min(max_width), (height + 100).min(max_height))
}
