//! Route planning: shortest path → drivable waypoint list.
//!
//! The raw shortest path runs down edge centerlines.  With several agents
//! sharing a lane that guarantees head-on deadlocks, so each interior
//! waypoint is pushed sideways by half the local lane width — agents
//! travelling opposite directions then pass on opposite sides.  The offset
//! at a corner is the clamped sum of the two adjacent edges' offsets, which
//! rounds the turn without ever leaving the band either edge allows.

use std::f32::consts::FRAC_PI_2;

use wh_core::Vec3;

use crate::{Graph, GraphResult, PathNode};

/// Plan a waypoint route from `from` to `to` over `graph`.
///
/// Both endpoints may be anywhere in the world: off-graph positions are
/// connected through their nearest on-edge projection, with the raw start
/// prepended and the exact destination appended so the agent begins and
/// ends precisely where asked.
pub fn plan_route(graph: &Graph, from: Vec3, to: Vec3) -> GraphResult<Vec<Vec3>> {
    if from == to {
        return Ok(vec![to]);
    }

    // Enter the graph at the nearest on-graph point; `shortest_path`
    // requires its source to be defined or implied.
    let entry = graph.snap(from).unwrap_or(from);
    let mut nodes = graph.shortest_path(entry, to)?;

    if !graph.implies_node_at(from) {
        nodes.insert(0, PathNode::new(from, 0.0));
    }
    if !graph.implies_node_at(to) {
        nodes.push(PathNode::new(to, 0.0));
    }

    let mut waypoints: Vec<Vec3> = (0..nodes.len())
        .map(|i| nodes[i].position + corner_offset(&nodes, i))
        .collect();

    // The last adjusted waypoint may sit half a lane off the goal; finish
    // on the exact destination.
    waypoints.push(to);
    waypoints.dedup();
    Ok(waypoints)
}

/// Sideways offset for waypoint `i`, combining the lane offsets of the edge
/// arriving at it and the edge leaving it.
fn corner_offset(nodes: &[PathNode], i: usize) -> Vec3 {
    let arriving = if i > 0 {
        lane_offset(nodes[i - 1], nodes[i])
    } else {
        Vec3::ZERO
    };
    let leaving = if i + 1 < nodes.len() {
        lane_offset(nodes[i], nodes[i + 1])
    } else {
        Vec3::ZERO
    };

    (arriving + leaving).clamp_between(arriving, leaving)
}

/// Half-lane-width offset perpendicular to the travel direction `a → b`.
fn lane_offset(a: PathNode, b: PathNode) -> Vec3 {
    let width = a.width.min(b.width);
    let direction = (b.position - a.position).normalized();
    let right = direction.rotate_y(-FRAC_PI_2);
    right * (width * 0.5)
}
