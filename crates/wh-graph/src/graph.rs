//! Graph storage, spatial queries, and dynamic vertex integration.
//!
//! # Data layout
//!
//! Nodes and edges live in plain `Vec`s indexed by `NodeId`/`EdgeId`.  The
//! warehouse graphs are small (tens of nodes), so adjacency is resolved by
//! scanning the edge list; the one query that happens constantly — nearest
//! explicit node — goes through an R-tree over node positions instead.
//!
//! # Mutation
//!
//! [`Graph::integrate_vertices`] splices new positions onto their nearest
//! edge.  Splitting removes the host edge (`swap_remove`), so `EdgeId`s —
//! including the one inside an [`ImpliedNode`] — are invalidated by any
//! mutation and must not be held across one.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use wh_core::{EdgeId, NodeId, Vec3};
use wh_geometry::Segment;

use crate::{Edge, ImpliedNode, Node, NodeRef};

// ── R-tree node entry ─────────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index: a 3-D point with the associated
/// `NodeId`.
#[derive(Clone)]
struct NodeEntry {
    point: [f32; 3],
    id: NodeId,
}

impl NodeEntry {
    fn new(position: Vec3, id: NodeId) -> Self {
        Self { point: [position.x, position.y, position.z], id }
    }
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f32; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    fn distance_2(&self, point: &[f32; 3]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        let dz = self.point[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

// ── Graph ─────────────────────────────────────────────────────────────────────

/// A road graph: stored nodes, undirected edges, and a spatial index.
///
/// Invariant: every edge's endpoints are live indices into the node set.
/// Construct via [`GraphBuilder`].
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    index: RTree<NodeEntry>,
}

impl Graph {
    // ── Dimensions & access ───────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// The edge as a 3-D segment between its endpoint positions.
    pub fn edge_segment(&self, id: EdgeId) -> Segment {
        let e = &self.edges[id.index()];
        Segment::new(self.node(e.a).position, self.node(e.b).position)
    }

    pub fn edge_length(&self, id: EdgeId) -> f32 {
        self.edge_segment(id).length()
    }

    /// All node ids sharing an edge with `node`.
    pub fn neighbors(&self, node: NodeId) -> Vec<NodeId> {
        self.edges
            .iter()
            .filter_map(|e| e.opposite(node))
            .collect()
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// The stored node exactly at `position`, if any.
    pub fn node_at(&self, position: Vec3) -> Option<NodeId> {
        self.index
            .locate_at_point(&[position.x, position.y, position.z])
            .map(|e| e.id)
    }

    /// The stored node nearest to `position` by Euclidean distance.
    ///
    /// Returns `None` only when the graph has no nodes.
    pub fn nearest_explicit_node(&self, position: Vec3) -> Option<NodeId> {
        self.index
            .nearest_neighbor(&[position.x, position.y, position.z])
            .map(|e| e.id)
    }

    /// The nearest on-edge point to `position`, over all edges.
    ///
    /// Ties keep the first-encountered edge (ascending `EdgeId`).  Returns
    /// `None` when the graph has no edges.
    pub fn nearest_implied_node(&self, position: Vec3) -> Option<ImpliedNode> {
        let mut best: Option<(f32, ImpliedNode)> = None;

        for (i, edge) in self.edges.iter().enumerate() {
            let id = EdgeId(i as u32);
            let projected = self.edge_segment(id).nearest_point(position);
            let distance = projected.distance(position);

            if best.is_none_or(|(d, _)| distance < d) {
                best = Some((
                    distance,
                    ImpliedNode { position: projected, width: edge.width, edge: id },
                ));
            }
        }

        best.map(|(_, implied)| implied)
    }

    /// `true` when `position` is a stored node or lies exactly on an edge.
    pub fn implies_node_at(&self, position: Vec3) -> bool {
        self.node_at(position).is_some()
            || self
                .nearest_implied_node(position)
                .is_some_and(|implied| implied.position == position)
    }

    /// Resolve a position to a node reference: a stored node, an implied
    /// on-edge point, or `None` when the position is off-graph.
    pub fn resolve(&self, position: Vec3) -> Option<NodeRef> {
        if let Some(id) = self.node_at(position) {
            return Some(NodeRef::Explicit(id));
        }
        self.nearest_implied_node(position)
            .filter(|implied| implied.position == position)
            .map(NodeRef::Implied)
    }

    /// `position` snapped onto the graph: itself when already on it,
    /// otherwise the nearest on-edge projection.
    pub fn snap(&self, position: Vec3) -> Option<Vec3> {
        if self.node_at(position).is_some() {
            return Some(position);
        }
        self.nearest_implied_node(position).map(|implied| implied.position)
    }

    // ── Vertex integration ────────────────────────────────────────────────

    /// Splice `points` onto their nearest edges.
    ///
    /// For each point that is not already a stored node:
    ///
    /// 1. find the nearest edge and the clamped projection onto it;
    /// 2. if the projection is not a stored node, replace the host edge with
    ///    two edges meeting at a new node there, both inheriting the host's
    ///    width;
    /// 3. unless the point *is* its own projection (it already lay on the
    ///    edge), add a connecting edge from the point to the projection
    ///    carrying the supplied `width`.
    ///
    /// Idempotent: integrating a point twice changes nothing.  Points are
    /// skipped when the graph has no edges to project onto.
    pub fn integrate_vertices(&mut self, points: &[Vec3], width: f32) {
        for &point in points {
            if self.node_at(point).is_some() {
                continue;
            }

            let Some(implied) = self.nearest_implied_node(point) else {
                continue;
            };

            let junction = match self.node_at(implied.position) {
                Some(existing) => existing,
                None => self.split_edge(implied.edge, implied.position),
            };

            if point == implied.position {
                continue; // The split already planted a node at the point.
            }

            let new_node = self.push_node(Node::new(point, width));
            self.edges.push(Edge::new(new_node, junction, width));
        }
    }

    /// Replace `edge` with two edges meeting at a new node at `at`.
    /// Both halves inherit the host edge's width.
    fn split_edge(&mut self, edge: EdgeId, at: Vec3) -> NodeId {
        let host = self.edges.swap_remove(edge.index());
        let junction = self.push_node(Node::new(at, host.width));
        self.edges.push(Edge::new(host.a, junction, host.width));
        self.edges.push(Edge::new(junction, host.b, host.width));
        junction
    }

    fn push_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.index.insert(NodeEntry::new(node.position, id));
        self.nodes.push(node);
        id
    }
}

// ── GraphBuilder ──────────────────────────────────────────────────────────────

/// Construct a [`Graph`] incrementally, then call [`build`](Self::build).
///
/// Nodes are deduplicated by exact position (the first width wins) and
/// symmetric duplicate edges are dropped, so a road layout can be declared
/// as a flat list of position pairs.
///
/// # Example
///
/// ```
/// use wh_core::Vec3;
/// use wh_graph::GraphBuilder;
///
/// let mut b = GraphBuilder::new();
/// let a = b.node(Vec3::new(-6.5, 0.0, 15.0), 2.0);
/// let c = b.node(Vec3::new(0.0, 0.0, 15.0), 2.0);
/// b.link(a, c, 2.0);
/// let graph = b.build();
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.edge_count(), 1);
/// ```
pub struct GraphBuilder {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self { nodes: Vec::new(), edges: Vec::new() }
    }

    /// Add a node at `position`, or return the existing node there.
    pub fn node(&mut self, position: Vec3, width: f32) -> NodeId {
        if let Some(i) = self.nodes.iter().position(|n| n.position == position) {
            return NodeId(i as u32);
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(position, width));
        id
    }

    /// Connect two nodes with an undirected edge of the given width.
    /// Symmetric duplicates are ignored.
    ///
    /// # Panics
    /// Panics if `a == b` — a degenerate edge has no direction to project
    /// onto and would corrupt every nearest-edge query.
    pub fn link(&mut self, a: NodeId, b: NodeId, width: f32) {
        assert_ne!(a, b, "edge endpoints coincide");
        if self.edges.iter().any(|e| e.joins(a, b)) {
            return;
        }
        self.edges.push(Edge::new(a, b, width));
    }

    /// Convenience: add (or reuse) nodes at both positions and link them.
    pub fn road(&mut self, from: Vec3, to: Vec3, width: f32) {
        let a = self.node(from, width);
        let b = self.node(to, width);
        if a != b {
            self.link(a, b, width);
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Consume the builder and produce a [`Graph`] with its spatial index
    /// bulk-loaded (faster than N inserts).
    pub fn build(self) -> Graph {
        let entries: Vec<NodeEntry> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| NodeEntry::new(n.position, NodeId(i as u32)))
            .collect();

        Graph {
            nodes: self.nodes,
            edges: self.edges,
            index: RTree::bulk_load(entries),
        }
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
