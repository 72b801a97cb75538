//! Projection of a coverage tree onto the parallel arrays consumed by a
//! treemap renderer.

use serde::Serialize;

use crate::builder::ROOT_FALLBACK_NAME;
use crate::tree::{HierarchicalReport, NodeId, NodeKind, Tree, TreeNode};

/// Area given to a directory without any lines so it stays visible.
pub const EMPTY_DIRECTORY_VALUE: u64 = 1;
/// Color metric for a directory without any lines ("no coverage").
pub const EMPTY_DIRECTORY_COLOR: f64 = 0.0;

/// Six equal-length arrays, one entry per tree node in pre-order.
///
/// `parents[i]` is the id of an entry emitted before `i`, or `""` for the
/// root. `colors` holds coverage percentages in `0..=100`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TreemapArrays {
    pub ids: Vec<String>,
    pub labels: Vec<String>,
    pub parents: Vec<String>,
    pub values: Vec<u64>,
    pub colors: Vec<f64>,
    pub text: Vec<String>,
}

impl TreemapArrays {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Position of the entry with the given id.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.ids.iter().position(|i| i == id)
    }

    fn push(&mut self, id: String, label: &str, parent: &str, value: u64, color: f64, text: String) {
        self.ids.push(id);
        self.labels.push(label.to_string());
        self.parents.push(parent.to_string());
        self.values.push(value);
        self.colors.push(color);
        self.text.push(text);
    }
}

/// Flatten `report` depth-first, emitting every node before its children.
pub fn flatten(report: &HierarchicalReport) -> TreemapArrays {
    let mut data = TreemapArrays::default();
    let tree = report.tree();
    add_node(tree, tree.root_id(), "", &[], &mut data);
    data
}

fn add_node<'a>(
    tree: &'a Tree,
    id: NodeId,
    parent_id: &str,
    path_parts: &[&'a str],
    data: &mut TreemapArrays,
) {
    let node = tree.node(id);
    let name = node.name();

    let mut current_path = path_parts.to_vec();
    current_path.push(name);
    let unique_id = unique_id(&current_path);

    let (value, color) = value_and_color(node);
    data.push(unique_id.clone(), name, parent_id, value, color, tooltip(node));

    for &child in node.children() {
        add_node(tree, child, &unique_id, &current_path, data);
    }
}

/// Join the path with `/`, dropping a leading synthetic root segment.
fn unique_id(path: &[&str]) -> String {
    match path.split_first() {
        Some((first, rest)) if *first == ROOT_FALLBACK_NAME => {
            if rest.is_empty() {
                ROOT_FALLBACK_NAME.to_string()
            } else {
                rest.join("/")
            }
        }
        _ => path.join("/"),
    }
}

fn value_and_color(node: &TreeNode) -> (u64, f64) {
    match node.kind() {
        NodeKind::Directory { .. } if node.total_lines() == 0 => {
            (EMPTY_DIRECTORY_VALUE, EMPTY_DIRECTORY_COLOR)
        }
        _ => (node.total_lines(), node.coverage_rate() * 100.0),
    }
}

fn tooltip(node: &TreeNode) -> String {
    let name = node.name();
    let pct = node.coverage_rate() * 100.0;
    let covered = node.covered_lines();
    let total = node.total_lines();
    match node.kind() {
        NodeKind::File(_) => format!("{name}<br>Coverage: {pct:.1}%<br>Lines: {covered}/{total}"),
        NodeKind::Directory { .. } if total == 0 => format!("{name}<br>Directory"),
        NodeKind::Directory { .. } => {
            format!("{name}<br>Directory<br>Coverage: {pct:.1}%<br>Lines: {covered}/{total}")
        }
    }
}
