//! Undirected, width-carrying graph edges.

use wh_core::NodeId;

/// An undirected connection between two stored nodes.
///
/// Equality is symmetric — `(a, b)` and `(b, a)` describe the same edge —
/// which is why `Edge` does not derive `PartialEq`; use [`Edge::joins`].
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub a: NodeId,
    pub b: NodeId,
    /// Lane width agents may spread across when travelling this edge.
    pub width: f32,
}

impl Edge {
    #[inline]
    pub fn new(a: NodeId, b: NodeId, width: f32) -> Self {
        Self { a, b, width }
    }

    /// `true` when this edge connects `x` and `y` in either orientation.
    #[inline]
    pub fn joins(&self, x: NodeId, y: NodeId) -> bool {
        (self.a == x && self.b == y) || (self.a == y && self.b == x)
    }

    /// `true` when `node` is one of this edge's endpoints.
    #[inline]
    pub fn touches(&self, node: NodeId) -> bool {
        self.a == node || self.b == node
    }

    /// The endpoint opposite `node`, or `None` if `node` is not an endpoint.
    pub fn opposite(&self, node: NodeId) -> Option<NodeId> {
        if self.a == node {
            Some(self.b)
        } else if self.b == node {
            Some(self.a)
        } else {
            None
        }
    }
}
