//! Directory tree of coverage records.
//!
//! Nodes live in an arena owned by [`Tree`]; children are held by id and the
//! parent link is an id as well, so ownership only ever flows from the tree
//! to its nodes. Directory totals are accumulated when a file is attached and
//! are never written through any other path.

use crate::model::{rate, CoverageRecord};

/// Index of a node inside its [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    /// Children in discovery order.
    Directory { children: Vec<NodeId> },
    File(CoverageRecord),
}

#[derive(Debug, Clone)]
pub struct TreeNode {
    name: String,
    path: String,
    parent: Option<NodeId>,
    kind: NodeKind,
    total_lines: u64,
    covered_lines: u64,
}

impl TreeNode {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Forward-slash separated path. Files keep the filename exactly as it
    /// appeared in the coverage report.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_file(&self) -> bool {
        matches!(self.kind, NodeKind::File(_))
    }

    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Directory { children } => children,
            NodeKind::File(_) => &[],
        }
    }

    pub fn total_lines(&self) -> u64 {
        self.total_lines
    }

    pub fn covered_lines(&self) -> u64 {
        self.covered_lines
    }

    #[must_use]
    pub fn coverage_rate(&self) -> f64 {
        rate(self.covered_lines, self.total_lines)
    }
}

#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<TreeNode>,
}

impl Tree {
    /// Create a tree holding a single, empty root directory.
    pub fn new(root_name: impl Into<String>, root_path: impl Into<String>) -> Self {
        Self {
            nodes: vec![TreeNode {
                name: root_name.into(),
                path: root_path.into(),
                parent: None,
                kind: NodeKind::Directory {
                    children: Vec::new(),
                },
                total_lines: 0,
                covered_lines: 0,
            }],
        }
    }

    pub fn root_id(&self) -> NodeId {
        NodeId(0)
    }

    pub fn root(&self) -> &TreeNode {
        &self.nodes[0]
    }

    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root().children().is_empty()
    }

    /// All nodes in insertion order. Parents always precede their children.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &TreeNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Ids of `id`'s ancestors, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.node(id).parent, |p| self.node(*p).parent)
    }

    pub(crate) fn add_directory(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        path: impl Into<String>,
    ) -> NodeId {
        self.add_child(
            parent,
            name.into(),
            path.into(),
            NodeKind::Directory {
                children: Vec::new(),
            },
        )
    }

    pub(crate) fn add_file(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        record: CoverageRecord,
    ) -> NodeId {
        let path = record.filename().to_string();
        let (total, covered) = (record.total_lines(), record.covered_lines());
        let id = self.add_child(parent, name.into(), path, NodeKind::File(record));

        self.nodes[id.0].total_lines = total;
        self.nodes[id.0].covered_lines = covered;
        let mut cursor = Some(parent);
        while let Some(dir) = cursor {
            let node = &mut self.nodes[dir.0];
            node.total_lines += total;
            node.covered_lines += covered;
            cursor = node.parent;
        }
        id
    }

    /// `parent` must be a directory of this tree.
    fn add_child(&mut self, parent: NodeId, name: String, path: String, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        match &mut self.nodes[parent.0].kind {
            NodeKind::Directory { children } => children.push(id),
            NodeKind::File(_) => unreachable!("files cannot hold children"),
        }
        self.nodes.push(TreeNode {
            name,
            path,
            parent: Some(parent),
            kind,
            total_lines: 0,
            covered_lines: 0,
        });
        id
    }
}

/// A built coverage tree. Read-only once constructed.
#[derive(Debug, Clone)]
pub struct HierarchicalReport {
    tree: Tree,
}

impl HierarchicalReport {
    pub fn new(tree: Tree) -> Self {
        Self { tree }
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn root(&self) -> &TreeNode {
        self.tree.root()
    }
}
