use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while browsing.
///
/// None of these are fatal: callers either fall back to an empty result,
/// a placeholder tile, or the OS opener.
#[derive(Debug, Error)]
pub enum BrowseError {
    /// Directory missing, not readable, or vanished mid-scan
    #[error("cannot read directory {}: {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// File could not be opened or decoded as an image
    #[error("cannot decode image {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Thumbnails were turned off on the command line
    #[error("thumbnail support is disabled")]
    ImagingDisabled,

    /// The bundled viewer process could not be started
    #[error("cannot launch viewer for {}: {source}", .path.display())]
    Launch {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The OS default application could not be started
    #[error("cannot open {} with the system handler: {source}", .path.display())]
    SystemOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type BrowseResult<T> = Result<T, BrowseError>;
