//! `wh-graph` — pathfinding over the warehouse road graphs.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`node`]    | `Node`, `ImpliedNode`, `NodeRef`                           |
//! | [`edge`]    | `Edge` (undirected, width-carrying)                        |
//! | [`graph`]   | `Graph` (node/edge sets + R-tree), `GraphBuilder`,         |
//! |             | `integrate_vertices` edge splicing                         |
//! | [`path`]    | Dijkstra shortest path with implied endpoints              |
//! | [`route`]   | `plan_route` — waypoint list with lane-width offsets       |
//! | [`error`]   | `GraphError`, `GraphResult<T>`                             |
//!
//! # Implied nodes
//!
//! Agents rarely stand exactly on a graph node, so path queries accept any
//! position that *lies on* an edge: the nearest clamped projection onto the
//! edge acts as a temporary node whose only neighbours are the edge's two
//! endpoints.  `NodeRef` carries this distinction through the Dijkstra
//! machinery as a tagged variant rather than a subclass.

pub mod edge;
pub mod error;
pub mod graph;
pub mod node;
pub mod path;
pub mod route;


pub use edge::Edge;
pub use error::{GraphError, GraphResult};
pub use graph::{Graph, GraphBuilder};
pub use node::{ImpliedNode, Node, NodeRef};
pub use path::PathNode;
pub use route::plan_route;
