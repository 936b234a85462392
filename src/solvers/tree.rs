use crate::maze::Coord;

/// Handle of a [`SearchedCell`] inside a [`SearchTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// A node of the search tree: a cell and the node that discovered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchedCell {
    /// Coordinates of the cell in the maze
    pub coord: Coord,
    /// The node from which this cell was reached, `None` for the origin
    pub parent: Option<NodeId>,
}

/// Arena owning every node created during one search run.
///
/// Nodes are append-only and a parent always exists before its children, so parent links
/// can only point backwards and never form a cycle.
#[derive(Debug, Default)]
pub struct SearchTree {
    nodes: Vec<SearchedCell>,
}

impl SearchTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node and returns its handle.
    ///
    /// # Panics
    /// If `parent` does not belong to this tree.
    pub fn insert(&mut self, coord: Coord, parent: Option<NodeId>) -> NodeId {
        if let Some(NodeId(p)) = parent {
            assert!(p < self.nodes.len(), "parent node {} does not exist", p);
        }
        self.nodes.push(SearchedCell { coord, parent });
        NodeId(self.nodes.len() - 1)
    }

    pub fn get(&self, id: NodeId) -> &SearchedCell {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SearchedCell> {
        self.nodes.iter()
    }

    /// Walks the predecessor chain from `id` back to the origin, yielding coordinates
    /// goal first. The iterator can be cloned to restart the walk.
    pub fn path(&self, id: NodeId) -> PathIter<'_> {
        PathIter {
            tree: self,
            next: Some(id),
        }
    }
}

#[derive(Clone)]
pub struct PathIter<'a> {
    tree: &'a SearchTree,
    next: Option<NodeId>,
}

impl Iterator for PathIter<'_> {
    type Item = Coord;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.tree.get(self.next?);
        self.next = node.parent;
        Some(node.coord)
    }
}
