//! Graph nodes, implied nodes, and the tagged reference uniting them.

use wh_core::{EdgeId, NodeId, Vec3};

/// A stored graph node: a position plus the lane width agents may use when
/// travelling through it.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub position: Vec3,
    pub width: f32,
}

impl Node {
    #[inline]
    pub fn new(position: Vec3, width: f32) -> Self {
        Self { position, width }
    }
}

/// A point on an edge that is not itself a stored node.
///
/// Its only adjacency is the owning edge's two endpoints; Dijkstra uses it
/// to start or finish a path between arbitrary on-graph positions.  Implied
/// nodes are query results — they are never stored, and the `edge` id they
/// carry is invalidated by graph mutation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ImpliedNode {
    pub position: Vec3,
    /// Width inherited from the edge implying this node.
    pub width: f32,
    pub edge: EdgeId,
}

/// Either a stored node or an implied on-edge point.
///
/// The Dijkstra and adjacency machinery consume both variants uniformly.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum NodeRef {
    Explicit(NodeId),
    Implied(ImpliedNode),
}
