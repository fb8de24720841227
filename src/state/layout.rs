/// Thumbnail grid layout
///
/// The grid is a plain table: a fixed tile width, as many columns as fit
/// into the measured width, and rows filled left to right.
use crate::config::{DEFAULT_GRID_WIDTH, THUMB_PADDING, THUMB_SIZE};

/// One slot in the grid
#[derive(Debug, Clone, PartialEq)]
pub enum GridCell<T> {
    Item(T),
    /// Shown alone when the folder has nothing to display
    Placeholder,
}

/// Number of columns that fit into `available_width`, never less than one
pub fn compute_columns(available_width: u32) -> usize {
    columns_for(available_width, THUMB_SIZE, THUMB_PADDING)
}

fn columns_for(available_width: u32, tile_size: u32, padding: u32) -> usize {
    let tile = (tile_size + padding).max(1);
    (available_width / tile).max(1) as usize
}

/// Split `items` into rows of `columns` cells; the last row may be shorter.
/// An empty list becomes a single row holding one placeholder.
pub fn build_grid<T: Clone>(items: &[T], columns: usize) -> Vec<Vec<GridCell<T>>> {
    if items.is_empty() {
        return vec![vec![GridCell::Placeholder]];
    }

    items
        .chunks(columns.max(1))
        .map(|row| row.iter().cloned().map(GridCell::Item).collect())
        .collect()
}

/// Column count plus the width it was derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutState {
    width: u32,
    columns: usize,
}

impl Default for LayoutState {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_WIDTH)
    }
}

impl LayoutState {
    pub fn new(width: u32) -> Self {
        Self {
            width,
            columns: compute_columns(width),
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// Record a measured width. Returns `true` when it differs from the
    /// previous measurement, which is the signal to rebuild the grid.
    /// A width of zero is a real measurement and gives one column.
    pub fn observe_width(&mut self, width: u32) -> bool {
        if width == self.width {
            return false;
        }
        self.width = width;
        self.columns = compute_columns(width);
        true
    }
}
