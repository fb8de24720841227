use std::path::{Path, PathBuf};

use super::data::{display_name, DirectoryNode};
use super::scanner::list_subdirectories;

/// One level of subfolders as `(label, path)` pairs, ready for the sidebar
pub fn render_children(directory: &Path) -> Vec<(String, PathBuf)> {
    list_subdirectories(directory)
        .into_iter()
        .map(|path| (display_name(&path), path))
        .collect()
}

fn load_children(directory: &Path) -> Vec<DirectoryNode> {
    render_children(directory)
        .into_iter()
        .map(|(name, path)| DirectoryNode::with_name(path, name))
        .collect()
}

/// A row of the flattened tree as the sidebar draws it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub depth: usize,
    pub label: String,
    pub path: PathBuf,
    pub expanded: bool,
}

/// Folder tree below the chosen root.
///
/// Children are read from disk the first time a node is expanded and
/// kept afterwards; collapsing only hides them. Changing the root throws
/// the whole tree away.
#[derive(Debug, Clone)]
pub struct SidebarTree {
    root: DirectoryNode,
}

impl SidebarTree {
    /// Build the tree with the root already expanded one level
    pub fn new(root: PathBuf) -> Self {
        let mut root = DirectoryNode::new(root);
        root.children = Some(load_children(&root.path));
        root.expanded = true;
        Self { root }
    }

    pub fn root(&self) -> &DirectoryNode {
        &self.root
    }

    /// Expand or collapse the node at `path`.
    /// Returns `false` if no such node is currently in the tree.
    pub fn toggle(&mut self, path: &Path) -> bool {
        let Some(node) = find_mut(&mut self.root, path) else {
            return false;
        };

        if node.expanded {
            node.expanded = false;
        } else {
            if !node.is_loaded() {
                log::debug!("Expanding {}", node.path.display());
                node.children = Some(load_children(&node.path));
            }
            node.expanded = true;
        }
        true
    }

    /// Root plus every child of an expanded node, depth first
    pub fn visible(&self) -> Vec<TreeRow> {
        let mut rows = Vec::new();
        collect_visible(&self.root, 0, &mut rows);
        rows
    }
}

fn find_mut<'a>(node: &'a mut DirectoryNode, path: &Path) -> Option<&'a mut DirectoryNode> {
    if node.path == path {
        return Some(node);
    }
    if !path.starts_with(&node.path) {
        return None;
    }
    node.children
        .as_mut()?
        .iter_mut()
        .find_map(|child| find_mut(child, path))
}

fn collect_visible(node: &DirectoryNode, depth: usize, rows: &mut Vec<TreeRow>) {
    rows.push(TreeRow {
        depth,
        label: node.name.clone(),
        path: node.path.clone(),
        expanded: node.expanded,
    });

    if !node.expanded {
        return;
    }
    if let Some(children) = &node.children {
        for child in children {
            collect_visible(child, depth + 1, rows);
        }
    }
}
