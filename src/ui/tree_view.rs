use fltk::{
    prelude::*,
    tree::{Tree, TreeItem, TreeSelect},
};

use crate::app::services::outline::OutlineNode;

/// Expandable view of the document structure.
pub struct TreeView {
    tree: Tree,
}

impl TreeView {
    /// Create the tree inside the current group.
    pub fn new() -> Self {
        let mut tree = Tree::default_fill();
        tree.set_root_label("XML Tree View");
        tree.set_show_root(false);
        tree.set_select_mode(TreeSelect::Single);
        Self { tree }
    }

    pub fn widget_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    /// Replace all nodes with a flattened outline.
    ///
    /// Each row is attached to the latest row one level above it.
    pub fn render(&mut self, outline: &[OutlineNode]) {
        let Some(root) = self.tree.root() else {
            log::error!("tree view has no root item");
            return;
        };
        self.tree.clear_children(&root);

        let mut parents: Vec<TreeItem> = vec![root];
        for node in outline {
            parents.truncate(node.depth + 1);
            let Some(parent) = parents.last() else {
                continue;
            };
            let pos = parent.children();
            match self.tree.insert(parent, &node.label, pos) {
                Some(mut item) => {
                    if node.open {
                        item.open();
                    } else {
                        item.close();
                    }
                    parents.push(item);
                }
                None => log::warn!("could not add tree item {:?}", node.label),
            }
        }

        log::debug!("number of items in the tree view: {}", outline.len());
        self.tree.redraw();
    }
}

impl Default for TreeView {
    fn default() -> Self {
        Self::new()
    }
}
