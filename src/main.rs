use clap::Parser;
use flexi_logger::{Logger, LoggerHandle};
use iced::widget::{button, column, container, row, text};
use iced::{window, Alignment, Element, Length, Size, Subscription, Task, Theme};
use rfd::FileDialog;
use std::path::PathBuf;
use std::time::Instant;

mod config;
mod error;
mod imaging;
mod launcher;
mod state;
mod ui;

use config::{Args, BrowserConfig, GRID_CHROME, SIDEBAR_WIDTH, WINDOW_SIZE};
use imaging::thumbnail::ThumbnailCache;
use state::data::ImageEntry;
use state::layout::{GridCell, LayoutState};
use state::scanner::list_images;
use state::tree::SidebarTree;
use ui::grid::{build_tiles, placeholder_notice, ClickTracker, Tile};

/// Default log filter, `RUST_LOG` overrides it
const LOG_SPEC: &str = "info, iced=error, wgpu_hal=error, wgpu_core=error, naga=warn";

/// Main application state
struct ImageBrowser {
    config: BrowserConfig,
    /// Folder the sidebar tree starts at
    root: PathBuf,
    /// Folder whose images are in the grid
    current_dir: PathBuf,
    images: Vec<ImageEntry>,
    tree: SidebarTree,
    thumbnails: ThumbnailCache,
    layout: LayoutState,
    /// Rows as last built; replaced wholesale, never patched
    grid: Vec<Vec<GridCell<Tile>>>,
    clicks: ClickTracker,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User clicked "Choose Root…"
    ChooseRoot,
    /// User clicked "Open folder"
    OpenCurrentFolder,
    /// A folder label in the sidebar was clicked
    FolderSelected(PathBuf),
    /// A sidebar arrow was clicked
    FolderToggled(PathBuf),
    /// A thumbnail was pressed (two quick presses open the viewer)
    TilePressed(PathBuf),
    /// The window changed size
    WindowResized(Size),
}

/// Width left for the grid in a window `window_width` pixels wide
fn grid_width(window_width: f32) -> u32 {
    (window_width - SIDEBAR_WIDTH - GRID_CHROME).max(0.0) as u32
}

impl ImageBrowser {
    /// Create a new instance of the application
    fn new(config: BrowserConfig) -> (Self, Task<Message>) {
        let root = config.root.clone();
        let mut browser = ImageBrowser {
            thumbnails: ThumbnailCache::new(config.thumbnails, config.max_thumbnails),
            tree: SidebarTree::new(root.clone()),
            current_dir: root.clone(),
            root: root.clone(),
            images: Vec::new(),
            layout: LayoutState::default(),
            grid: Vec::new(),
            clicks: ClickTracker::default(),
            config,
        };

        if !browser.thumbnails.is_enabled() {
            log::info!("Thumbnails disabled, showing open buttons only");
        }
        log::info!("Browsing {}", root.display());
        browser.load_directory(root);

        (browser, Task::none())
    }

    /// Replace the root: new tree, and the root's own images in the grid
    fn set_root(&mut self, root: PathBuf) {
        log::info!("Browsing {}", root.display());
        self.tree = SidebarTree::new(root.clone());
        self.root = root.clone();
        self.load_directory(root);
    }

    fn load_directory(&mut self, path: PathBuf) {
        self.images = list_images(&path).into_iter().map(ImageEntry::new).collect();
        log::info!("{} images in {}", self.images.len(), path.display());
        self.current_dir = path;
        self.rebuild_grid();
    }

    fn rebuild_grid(&mut self) {
        self.grid = build_tiles(&self.images, &mut self.thumbnails, self.layout.columns());
        log::debug!("{} rows built, {} thumbnails cached", self.grid.len(), self.thumbnails.len());
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ChooseRoot => {
                // Show the native folder picker dialog
                let folder = FileDialog::new()
                    .set_title("Choose Root Folder")
                    .set_directory(&self.root)
                    .pick_folder();

                if let Some(folder) = folder.filter(|f| f.is_dir()) {
                    self.set_root(folder);
                }
            }
            Message::OpenCurrentFolder => {
                if let Err(err) = launcher::open_with_system(&self.current_dir) {
                    log::error!("{}", err);
                }
            }
            Message::FolderSelected(path) => {
                self.load_directory(path);
            }
            Message::FolderToggled(path) => {
                if !self.tree.toggle(&path) {
                    log::warn!("Folder {} is not in the tree", path.display());
                }
            }
            Message::TilePressed(path) => {
                if self.clicks.register(&path, Instant::now()) {
                    let launch = launcher::open_viewer(&path);
                    log::debug!("Viewer for {}: {:?}", path.display(), launch);
                }
            }
            // a minimised window reports zero width
            Message::WindowResized(size) if size.width == 0.0 => {}
            Message::WindowResized(size) => {
                if self.layout.observe_width(grid_width(size.width)) {
                    log::debug!("Grid is {} px, {} columns", self.layout.width(), self.layout.columns());
                    self.rebuild_grid();
                }
            }
        }

        Task::none()
    }

    fn toolbar(&self) -> Element<Message> {
        let count = match self.images.len() {
            1 => "1 image".to_string(),
            n => format!("{} images", n),
        };

        row![
            button("Choose Root…").on_press(Message::ChooseRoot),
            button("Open folder").on_press(Message::OpenCurrentFolder),
            text("Path:"),
            text(self.current_dir.display().to_string()),
            text(count).size(14),
        ]
        .spacing(12)
        .align_y(Alignment::Center)
        .into()
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let notice = placeholder_notice(self.config.thumbnails);

        let body = row![
            ui::sidebar::view(&self.tree, &self.current_dir),
            container(ui::grid::view(&self.grid, notice))
                .width(Length::Fill)
                .height(Length::Fill)
                .style(container::bordered_box),
        ]
        .spacing(8);

        column![self.toolbar(), body]
            .spacing(10)
            .padding(10)
            .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        window::resize_events().map(|(_id, size)| Message::WindowResized(size))
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Log to stderr; the browser never writes files
fn init_logger() -> Option<LoggerHandle> {
    match Logger::try_with_env_or_str(LOG_SPEC).and_then(|logger| logger.log_to_stderr().start()) {
        Ok(handle) => Some(handle),
        Err(err) => {
            eprintln!("Failed to start logger: {}", err);
            None
        }
    }
}

fn main() -> iced::Result {
    let args = Args::parse();
    let _logger = init_logger();

    if let Some(image) = &args.view {
        log::info!("Viewing {}", image.display());
        return ui::viewer::run(image);
    }

    let config = BrowserConfig::from_args(&args);
    log::info!("Starting image browser {}", env!("CARGO_PKG_VERSION"));

    iced::application("Image Browser", ImageBrowser::update, ImageBrowser::view)
        .subscription(ImageBrowser::subscription)
        .theme(ImageBrowser::theme)
        .window_size(WINDOW_SIZE)
        .run_with(move || ImageBrowser::new(config))
}
