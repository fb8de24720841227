use iced::widget::image::Handle;
use iced::widget::{button, container, scrollable, text, Column, Image, Row};
use iced::{Alignment, Element, Length};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::config::{THUMB_PADDING, THUMB_SIZE};
use crate::imaging::thumbnail::ThumbnailCache;
use crate::state::data::ImageEntry;
use crate::state::layout::{build_grid, GridCell};
use crate::Message;

/// Two presses on the same tile closer together than this open the viewer
const DOUBLE_CLICK: Duration = Duration::from_millis(400);

/// One image as the grid shows it
#[derive(Debug, Clone)]
pub struct Tile {
    pub entry: ImageEntry,
    /// `None` if the image could not be decoded or thumbnails are off
    pub thumbnail: Option<Handle>,
}

/// Fresh grid for `images`, asking the cache for every thumbnail
pub fn build_tiles(images: &[ImageEntry], cache: &mut ThumbnailCache, columns: usize) -> Vec<Vec<GridCell<Tile>>> {
    let tiles: Vec<Tile> = images
        .iter()
        .map(|entry| Tile {
            entry: entry.clone(),
            thumbnail: cache.get_thumbnail(&entry.path).map(|thumb| thumb.handle.clone()),
        })
        .collect();

    build_grid(&tiles, columns)
}

/// Text shown in place of an empty grid
pub fn placeholder_notice(thumbnails_enabled: bool) -> &'static str {
    if thumbnails_enabled {
        "No images in this folder."
    } else {
        "Thumbnails disabled. Use Open to view images."
    }
}

/// Turns single presses into double clicks
#[derive(Debug, Default)]
pub struct ClickTracker {
    last: Option<(PathBuf, Instant)>,
}

impl ClickTracker {
    /// Register a press on `path`; `true` when it completes a double click
    pub fn register(&mut self, path: &Path, now: Instant) -> bool {
        let double = matches!(
            &self.last,
            Some((previous, at)) if previous == path && now.duration_since(*at) <= DOUBLE_CLICK
        );
        self.last = if double { None } else { Some((path.to_path_buf(), now)) };
        double
    }
}

fn tile_view(tile: &Tile) -> Element<'_, Message> {
    let size = Length::Fixed(THUMB_SIZE as f32);

    let face: Element<Message> = match &tile.thumbnail {
        Some(handle) => Image::new(handle.clone()).width(size).height(size).into(),
        None => container(text("Open")).center_x(size).center_y(size).into(),
    };

    let label = text(&tile.entry.filename).size(12).width(size);

    Column::new()
        .push(
            button(face)
                .padding(0)
                .style(button::text)
                .on_press(Message::TilePressed(tile.entry.path.clone())),
        )
        .push(label)
        .spacing(4)
        .align_x(Alignment::Center)
        .into()
}

/// The scrollable thumbnail table
pub fn view<'a>(grid: &'a [Vec<GridCell<Tile>>], notice: &'a str) -> Element<'a, Message> {
    let rows = grid.iter().map(|cells| -> Element<'a, Message> {
        Row::with_children(cells.iter().map(|cell| match cell {
            GridCell::Item(tile) => tile_view(tile),
            GridCell::Placeholder => text(notice).size(16).into(),
        }))
        .spacing(THUMB_PADDING as f32)
        .into()
    });

    scrollable(
        Column::with_children(rows)
            .spacing(THUMB_PADDING as f32)
            .padding(THUMB_PADDING as u16),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;
    use tempfile::TempDir;

    #[test]
    fn second_press_within_window_is_double_click() {
        let mut clicks = ClickTracker::default();
        let start = Instant::now();
        let path = Path::new("/photos/a.jpg");

        assert!(!clicks.register(path, start));
        assert!(clicks.register(path, start + Duration::from_millis(200)));
        // the pair is consumed, a third press starts over
        assert!(!clicks.register(path, start + Duration::from_millis(300)));
    }

    #[test]
    fn slow_presses_are_single_clicks() {
        let mut clicks = ClickTracker::default();
        let start = Instant::now();
        let path = Path::new("/photos/a.jpg");

        assert!(!clicks.register(path, start));
        assert!(!clicks.register(path, start + Duration::from_millis(900)));
    }

    #[test]
    fn presses_on_different_tiles_do_not_combine() {
        let mut clicks = ClickTracker::default();
        let start = Instant::now();

        assert!(!clicks.register(Path::new("a.jpg"), start));
        assert!(!clicks.register(Path::new("b.jpg"), start + Duration::from_millis(50)));
        assert!(clicks.register(Path::new("b.jpg"), start + Duration::from_millis(100)));
    }

    #[test]
    fn broken_image_becomes_open_tile() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.png");
        RgbImage::new(50, 50).save(&good).unwrap();
        let bad = dir.path().join("bad.png");
        std::fs::write(&bad, b"??").unwrap();

        let images = vec![ImageEntry::new(bad), ImageEntry::new(good)];
        let mut cache = ThumbnailCache::new(true, None);
        let grid = build_tiles(&images, &mut cache, 4);

        assert_eq!(grid.len(), 1);
        let thumbs: Vec<bool> = grid[0]
            .iter()
            .map(|cell| match cell {
                GridCell::Item(tile) => tile.thumbnail.is_some(),
                GridCell::Placeholder => panic!("unexpected placeholder"),
            })
            .collect();
        assert_eq!(thumbs, vec![false, true]);
    }

    #[test]
    fn rebuilding_reuses_cached_handles() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("one.png");
        RgbImage::new(20, 20).save(&path).unwrap();
        let images = vec![ImageEntry::new(path)];
        let mut cache = ThumbnailCache::new(true, None);

        let id_of = |grid: &[Vec<GridCell<Tile>>]| match &grid[0][0] {
            GridCell::Item(tile) => tile.thumbnail.as_ref().map(Handle::id),
            GridCell::Placeholder => None,
        };

        let first = build_tiles(&images, &mut cache, 2);
        let second = build_tiles(&images, &mut cache, 5);
        assert!(id_of(&first).is_some());
        assert_eq!(id_of(&first), id_of(&second));
    }

    #[test]
    fn empty_folder_notice_depends_on_imaging() {
        let mut cache = ThumbnailCache::new(false, None);
        let grid = build_tiles(&[], &mut cache, 3);
        assert!(matches!(grid.as_slice(), [row] if matches!(row.as_slice(), [GridCell::Placeholder])));
        assert_eq!(placeholder_notice(true), "No images in this folder.");
        assert_ne!(placeholder_notice(false), placeholder_notice(true));
    }
}
