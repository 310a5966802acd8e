//! Interning of raw coordinates into stable node indices.

use std::collections::HashMap;
use std::fmt;

use super::coord::{Coord, CoordKey, Node, Role};

/// Index of a node in a [`LocationRegistry`].
///
/// Only meaningful for the registry that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub usize);

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for NodeIndex {
    fn from(value: usize) -> Self {
        NodeIndex(value)
    }
}

/// Arena of role-tagged nodes for one request.
///
/// Interning the same `(lat, lng, role)` twice returns the same index.
/// The same coordinate with a different role is a different node.
#[derive(Debug, Clone, Default)]
pub struct LocationRegistry {
    nodes: Vec<Node>,
    index: HashMap<(CoordKey, Role), NodeIndex>,
}

impl LocationRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the index for `coord` with `role`, appending a node if unseen.
    pub fn intern(&mut self, coord: Coord, role: Role) -> NodeIndex {
        let key = (coord.key(), role);
        if let Some(&existing) = self.index.get(&key) {
            return existing;
        }

        let idx = NodeIndex(self.nodes.len());
        self.nodes.push(Node::new(coord, role));
        self.index.insert(key, idx);
        idx
    }

    /// Look up an already interned node.
    pub fn lookup(&self, coord: Coord, role: Role) -> Option<NodeIndex> {
        self.index.get(&(coord.key(), role)).copied()
    }

    /// Returns the node at `idx`.
    ///
    /// Panics if `idx` did not come from this registry.
    pub fn node(&self, idx: NodeIndex) -> &Node {
        &self.nodes[idx.0]
    }

    pub fn coord(&self, idx: NodeIndex) -> Coord {
        self.node(idx).coord
    }

    pub fn role(&self, idx: NodeIndex) -> Role {
        self.node(idx).role
    }

    /// Number of distinct nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over `(index, node)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeIndex(i), node))
    }
}
