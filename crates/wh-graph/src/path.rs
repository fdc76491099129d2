//! Single-source shortest paths over the stored nodes.
//!
//! Costs are Euclidean edge lengths, keyed in the priority queue through
//! `OrderedFloat` with the `NodeId` as a deterministic tie-breaker.  Implied
//! endpoints never enter the queue: an implied source seeds its two adjacent
//! stored nodes with their direct distances, and an implied destination is
//! resolved after the fact by picking whichever of its two adjacent stored
//! nodes ended up closer to the source.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;

use wh_core::{NodeId, Vec3};

use crate::{Graph, GraphError, GraphResult, NodeRef};

/// One step of a computed path: a position plus the lane width in force
/// there (0 for off-graph start/end points added by route planning).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PathNode {
    pub position: Vec3,
    pub width: f32,
}

impl PathNode {
    #[inline]
    pub fn new(position: Vec3, width: f32) -> Self {
        Self { position, width }
    }
}

/// Distance-from-source and predecessor tables produced by [`dijkstra`].
struct ShortestPaths {
    dist: Vec<f32>,
    prev: Vec<Option<NodeId>>,
}

impl Graph {
    /// Shortest path from `source` to `destination` by cumulative edge
    /// length.
    ///
    /// `source` must be a stored node or lie exactly on an edge; anything
    /// else is a caller contract violation reported as
    /// [`GraphError::UnknownSource`].  `destination` may be any position —
    /// when it is not a stored node the path ends at its nearest on-edge
    /// projection, appended as a final implied step.
    ///
    /// The returned sequence starts at (or implies) the source, ends at (or
    /// implies) the destination, and contains no duplicate positions.
    pub fn shortest_path(
        &self,
        source: Vec3,
        destination: Vec3,
    ) -> GraphResult<Vec<PathNode>> {
        if self.is_empty() {
            return Err(GraphError::Empty);
        }

        let source_ref = self
            .resolve(source)
            .ok_or(GraphError::UnknownSource(source))?;

        // A destination resolving onto the source itself is a zero-length
        // path; without this check an implied source/destination pair on the
        // same edge would bounce via the nearer endpoint and back.
        let goal_on_graph = self.snap(destination).ok_or(GraphError::Empty)?;
        if goal_on_graph == source {
            let width = match source_ref {
                NodeRef::Explicit(id) => self.node(id).width,
                NodeRef::Implied(implied) => implied.width,
            };
            return Ok(vec![PathNode::new(source, width)]);
        }

        let tables = self.dijkstra(source_ref);

        // Resolve the destination to the stored node the backtrack starts
        // from, plus an optional trailing implied step.
        let (end, implied_tail) = match self.node_at(destination) {
            Some(id) => (id, None),
            None => {
                let implied = self
                    .nearest_implied_node(destination)
                    .ok_or(GraphError::Empty)?;
                let edge = self.edges()[implied.edge.index()];
                let end = [edge.a, edge.b]
                    .into_iter()
                    .min_by_key(|n| OrderedFloat(tables.dist[n.index()]))
                    .expect("edge has two endpoints");
                (end, Some(PathNode::new(implied.position, implied.width)))
            }
        };

        if tables.dist[end.index()] == f32::INFINITY {
            return Err(GraphError::NoPath { from: source, to: destination });
        }

        // Backtrack predecessors to the source, then reverse.
        let mut path: Vec<PathNode> = Vec::new();
        if let Some(tail) = implied_tail {
            path.push(tail);
        }

        let mut cursor = Some(end);
        while let Some(id) = cursor {
            let node = self.node(id);
            path.push(PathNode::new(node.position, node.width));
            cursor = tables.prev[id.index()];
        }

        // An implied source is not a stored node; close the chain with it.
        if let NodeRef::Implied(implied) = source_ref {
            path.push(PathNode::new(implied.position, implied.width));
        }

        path.reverse();
        path.dedup_by(|a, b| a.position == b.position);
        Ok(path)
    }

    /// Total length of the shortest path between two on-graph positions.
    pub fn path_length(&self, source: Vec3, destination: Vec3) -> GraphResult<f32> {
        let path = self.shortest_path(source, destination)?;
        Ok(path
            .windows(2)
            .map(|pair| pair[0].position.distance(pair[1].position))
            .sum())
    }

    /// Dijkstra over the stored nodes from an explicit or implied source.
    fn dijkstra(&self, source: NodeRef) -> ShortestPaths {
        let n = self.node_count();
        let mut dist = vec![f32::INFINITY; n];
        let mut prev: Vec<Option<NodeId>> = vec![None; n];

        // Min-heap: Reverse makes BinaryHeap (max) behave as min-heap.
        // Secondary key NodeId ensures deterministic tie-breaking.
        let mut heap: BinaryHeap<Reverse<(OrderedFloat<f32>, NodeId)>> = BinaryHeap::new();

        match source {
            NodeRef::Explicit(id) => {
                dist[id.index()] = 0.0;
                heap.push(Reverse((OrderedFloat(0.0), id)));
            }
            NodeRef::Implied(implied) => {
                // Seed the two endpoints of the implying edge with their
                // direct distances from the implied position.
                let edge = self.edges()[implied.edge.index()];
                for id in [edge.a, edge.b] {
                    let d = self.node(id).position.distance(implied.position);
                    if d < dist[id.index()] {
                        dist[id.index()] = d;
                        heap.push(Reverse((OrderedFloat(d), id)));
                    }
                }
            }
        }

        while let Some(Reverse((OrderedFloat(cost), node))) = heap.pop() {
            // Skip stale heap entries.
            if cost > dist[node.index()] {
                continue;
            }

            for edge in self.edges() {
                let Some(neighbor) = edge.opposite(node) else {
                    continue;
                };
                let step = self
                    .node(node)
                    .position
                    .distance(self.node(neighbor).position);
                let candidate = cost + step;

                if candidate < dist[neighbor.index()] {
                    dist[neighbor.index()] = candidate;
                    prev[neighbor.index()] = Some(node);
                    heap.push(Reverse((OrderedFloat(candidate), neighbor)));
                }
            }
        }

        ShortestPaths { dist, prev }
    }
}
