/// State management module
///
/// This module handles all browser state, including:
/// - Listing folders and images on disk (scanner.rs)
/// - Shared data structures (data.rs)
/// - The lazily expanded folder tree (tree.rs)
/// - Column count and grid rows (layout.rs)

pub mod data;
pub mod layout;
pub mod scanner;
pub mod tree;
