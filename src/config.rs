/// Fixed layout constants and the runtime configuration built from the
/// command line.
use clap::Parser;
use std::path::{Path, PathBuf};

/// Edge length of the square box a thumbnail is fitted into
pub const THUMB_SIZE: u32 = 192;

/// Gap reserved around each tile in the grid
pub const THUMB_PADDING: u32 = 8;

/// Width of the folder tree on the left
pub const SIDEBAR_WIDTH: f32 = 320.0;

/// Horizontal space eaten by borders, scrollbar and spacing around the grid
pub const GRID_CHROME: f32 = 40.0;

/// Grid width assumed before the window reported its size
pub const DEFAULT_GRID_WIDTH: u32 = 800;

/// Initial browser window size
pub const WINDOW_SIZE: (f32, f32) = (1200.0, 820.0);

/// Box the full-size viewer shrinks images into
pub const VIEWER_MAX_IMAGE: (u32, u32) = (1600, 1000);

/// Upper bound of the viewer window itself
pub const VIEWER_MAX_WINDOW: (u32, u32) = (1800, 1200);

/// Lower-case extensions the scanner accepts
pub const SUPPORTED_EXTENSIONS: [&str; 8] = ["jpg", "jpeg", "png", "bmp", "gif", "tif", "tiff", "webp"];

/// Command line of the browser
#[derive(Parser, Debug)]
#[command(version, about = "Browse folders of images as thumbnails", long_about = None)]
pub struct Args {
    /// Folder to start browsing in (defaults to the home directory)
    #[arg(value_name = "ROOT")]
    pub root: Option<PathBuf>,

    /// Show a single image in a viewer window and exit when it is closed
    #[arg(long, value_name = "IMAGE")]
    pub view: Option<PathBuf>,

    /// Do not decode thumbnails, show plain open buttons instead
    #[arg(long, default_value_t = false)]
    pub no_thumbnails: bool,

    /// Keep at most this many decoded thumbnails in memory
    #[arg(long, value_name = "COUNT")]
    pub max_thumbnails: Option<usize>,
}

/// Browser settings derived from [`Args`]
#[derive(Debug, Clone, PartialEq)]
pub struct BrowserConfig {
    pub root: PathBuf,
    pub thumbnails: bool,
    pub max_thumbnails: Option<usize>,
}

impl BrowserConfig {
    pub fn from_args(args: &Args) -> Self {
        let root = args.root.as_deref().map(absolute_root).unwrap_or_else(default_root);
        Self {
            root,
            thumbnails: !args.no_thumbnails,
            // a limit of zero would make every thumbnail evict itself
            max_thumbnails: args.max_thumbnails.filter(|&max| max > 0),
        }
    }
}

/// `root` resolved against the working directory; left as typed if that fails
fn absolute_root(root: &Path) -> PathBuf {
    std::path::absolute(root).unwrap_or_else(|err| {
        log::warn!("Cannot resolve {}: {}", root.display(), err);
        root.to_path_buf()
    })
}

/// Home directory, or the working directory when there is none
pub fn default_root() -> PathBuf {
    dirs::home_dir()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}
