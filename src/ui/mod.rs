/// Widgets of the browser window plus the standalone viewer

pub mod grid;
pub mod sidebar;
pub mod viewer;
