//! Rendering of nested mappings as ASCII trees.

use std::fmt;

use termtree::Tree;

use crate::domain::{Map, Node};
use crate::trict::Trict;

pub trait TreeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

fn build_tree<V: fmt::Display>(map: &Map<V>, parent_tree: &mut Tree<String>) {
    for (key, node) in map {
        match node {
            Node::Map(child) => {
                let mut child_tree = Tree::new(key.clone());
                build_tree(child, &mut child_tree);
                parent_tree.push(child_tree);
            }
            Node::Leaf(value) => {
                parent_tree.push(Tree::new(format!("{}: {}", key, value)));
            }
        }
    }
}

impl<V: fmt::Display> TreeConvert for Map<V> {
    fn to_tree_string(&self) -> Tree<String> {
        let mut tree = Tree::new(".".to_string());
        build_tree(self, &mut tree);
        tree
    }
}

impl<V: fmt::Display> TreeConvert for Trict<V> {
    fn to_tree_string(&self) -> Tree<String> {
        let mut tree = Tree::new("Trict".to_string());
        build_tree(self.data(), &mut tree);
        tree
    }
}

impl<V: fmt::Display> fmt::Display for Trict<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_tree_string())
    }
}
