use iced::widget::image::Handle;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};

use super::decode_fitted;
use crate::config::THUMB_SIZE;
use crate::error::{BrowseError, BrowseResult};

/// A decoded thumbnail registered with the renderer
#[derive(Debug, Clone)]
pub struct Thumbnail {
    pub width: u32,
    pub height: u32,
    /// RGBA pixels, shared by every clone of the handle
    pub handle: Handle,
}

/// Thumbnails keyed by image path.
///
/// Decoding happens on the first request for a path; later requests get the
/// very same handle back. Entries are never refreshed, so a file edited on
/// disk keeps its old thumbnail for the rest of the session. Failed decodes
/// are not remembered and are retried on the next request.
///
/// Without a limit the cache only grows. With a limit the entry inserted
/// first is dropped to make room.
#[derive(Debug, Default)]
pub struct ThumbnailCache {
    entries: HashMap<PathBuf, Thumbnail>,
    /// Insertion order, used for eviction when `limit` is set
    order: VecDeque<PathBuf>,
    limit: Option<usize>,
    disabled: bool,
}

impl ThumbnailCache {
    pub fn new(enabled: bool, limit: Option<usize>) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            limit,
            disabled: !enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.disabled
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    /// Cached thumbnail for `path`, decoding it on a miss
    pub fn try_thumbnail(&mut self, path: &Path) -> BrowseResult<&Thumbnail> {
        if self.disabled {
            return Err(BrowseError::ImagingDisabled);
        }
        if self.entries.contains_key(path) {
            return Ok(&self.entries[path]);
        }

        let decoded = decode_fitted(path, THUMB_SIZE, THUMB_SIZE)?;
        let thumbnail = Thumbnail {
            width: decoded.width,
            height: decoded.height,
            handle: Handle::from_rgba(decoded.width, decoded.height, decoded.pixels),
        };
        log::debug!("Thumbnail {}x{} for {}", thumbnail.width, thumbnail.height, path.display());

        self.make_room();
        self.order.push_back(path.to_path_buf());
        Ok(self.entries.entry(path.to_path_buf()).or_insert(thumbnail))
    }

    /// Like [`Self::try_thumbnail`], failures are logged and become `None`
    pub fn get_thumbnail(&mut self, path: &Path) -> Option<&Thumbnail> {
        match self.try_thumbnail(path) {
            Ok(thumbnail) => Some(thumbnail),
            Err(BrowseError::ImagingDisabled) => None,
            Err(err) => {
                log::warn!("{}", err);
                None
            }
        }
    }

    fn make_room(&mut self) {
        let Some(limit) = self.limit else {
            return;
        };
        while self.entries.len() >= limit {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
            log::debug!("Evicted thumbnail for {}", oldest.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::fs;
    use tempfile::TempDir;

    fn write_image(dir: &TempDir, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.path().join(name);
        RgbImage::from_pixel(width, height, Rgb([200, 40, 40])).save(&path).unwrap();
        path
    }

    #[test]
    fn same_path_returns_same_handle() {
        let dir = TempDir::new().unwrap();
        let path = write_image(&dir, "red.png", 300, 300);
        let mut cache = ThumbnailCache::new(true, None);

        let first = cache.get_thumbnail(&path).unwrap().handle.id();
        let second = cache.get_thumbnail(&path).unwrap().handle.id();
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn thumbnail_fits_bounding_box() {
        let dir = TempDir::new().unwrap();
        let path = write_image(&dir, "wide.jpg", 640, 480);
        let mut cache = ThumbnailCache::new(true, None);

        let thumbnail = cache.get_thumbnail(&path).unwrap();
        assert_eq!((thumbnail.width, thumbnail.height), (192, 144));
    }

    #[test]
    fn stale_entries_are_kept() {
        let dir = TempDir::new().unwrap();
        let path = write_image(&dir, "photo.png", 100, 50);
        let mut cache = ThumbnailCache::new(true, None);

        let before = cache.get_thumbnail(&path).unwrap().handle.id();
        fs::write(&path, b"garbage").unwrap();
        let after = cache.get_thumbnail(&path).unwrap();
        assert_eq!(before, after.handle.id());
        assert_eq!((after.width, after.height), (100, 50));
    }

    #[test]
    fn failed_decode_is_not_cached_and_retried() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("later.png");
        fs::write(&path, b"half written").unwrap();
        let mut cache = ThumbnailCache::new(true, None);

        assert!(cache.get_thumbnail(&path).is_none());
        assert!(!cache.contains(&path));

        RgbImage::new(20, 10).save(&path).unwrap();
        assert!(cache.get_thumbnail(&path).is_some());
        assert!(cache.contains(&path));
    }

    #[test]
    fn one_broken_file_does_not_affect_others() {
        let dir = TempDir::new().unwrap();
        let good_a = write_image(&dir, "a.png", 30, 30);
        let broken = dir.path().join("b.png");
        fs::write(&broken, b"nope").unwrap();
        let good_c = write_image(&dir, "c.bmp", 30, 30);
        let mut cache = ThumbnailCache::new(true, None);

        let rendered: Vec<bool> = [&good_a, &broken, &good_c]
            .iter()
            .map(|path| cache.get_thumbnail(path).is_some())
            .collect();
        assert_eq!(rendered, vec![true, false, true]);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn missing_file_reports_decode_error() {
        let dir = TempDir::new().unwrap();
        let mut cache = ThumbnailCache::new(true, None);
        let result = cache.try_thumbnail(&dir.path().join("gone.png"));
        assert!(matches!(result, Err(BrowseError::Decode { .. })));
    }

    #[test]
    fn disabled_cache_never_decodes() {
        let dir = TempDir::new().unwrap();
        let path = write_image(&dir, "red.png", 10, 10);
        let mut cache = ThumbnailCache::new(false, None);

        assert!(!cache.is_enabled());
        assert!(matches!(cache.try_thumbnail(&path), Err(BrowseError::ImagingDisabled)));
        assert!(cache.get_thumbnail(&path).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn limit_evicts_oldest_entry() {
        let dir = TempDir::new().unwrap();
        let a = write_image(&dir, "a.png", 10, 10);
        let b = write_image(&dir, "b.png", 10, 10);
        let c = write_image(&dir, "c.png", 10, 10);
        let mut cache = ThumbnailCache::new(true, Some(2));

        let b_id = {
            cache.get_thumbnail(&a).unwrap();
            cache.get_thumbnail(&b).unwrap().handle.id()
        };
        cache.get_thumbnail(&c).unwrap();

        assert_eq!(cache.len(), 2);
        assert!(!cache.contains(&a));
        assert_eq!(cache.get_thumbnail(&b).unwrap().handle.id(), b_id);
        assert!(cache.contains(&c));
    }
}
