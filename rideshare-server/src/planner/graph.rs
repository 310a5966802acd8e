//! Traversal graphs for route search.
//!
//! A graph is a list of outgoing edges per registry node. Nodes that take
//! no part in a search simply have no edges.

use crate::domain::{NodeIndex, RequestContext};

use super::assign::AssignmentPlan;

/// Directed graph over the nodes of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    adjacency: Vec<Vec<NodeIndex>>,
}

impl Graph {
    /// Create a graph over `node_count` nodes with no edges.
    pub fn with_nodes(node_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); node_count],
        }
    }

    /// Add the edge `from → to`.
    pub fn add_edge(&mut self, from: NodeIndex, to: NodeIndex) {
        self.adjacency[from.0].push(to);
    }

    /// Outgoing neighbors of `node`, in insertion order.
    pub fn neighbors(&self, node: NodeIndex) -> &[NodeIndex] {
        self.adjacency.get(node.0).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_edge(&self, from: NodeIndex, to: NodeIndex) -> bool {
        self.neighbors(from).contains(&to)
    }

    /// Number of nodes the graph was created over.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// Iterate over all edges as `(from, to)`.
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex)> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(from, tos)| tos.iter().map(move |&to| (NodeIndex(from), to)))
    }
}

/// A graph to search, where to start, and how many nodes to cover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteQuery {
    pub driver: NodeIndex,
    pub graph: Graph,
    /// Distinct nodes the route must visit, the start included.
    pub cover_count: usize,
}

/// Build the graph for a single driver serving every passenger.
///
/// The driver reaches every pickup; pickups and dropoffs are fully
/// connected among themselves. Nothing leads back to the driver.
pub fn build_global(ctx: &RequestContext, driver: NodeIndex) -> RouteQuery {
    let mut graph = Graph::with_nodes(ctx.node_count());

    for source in ctx.sources() {
        graph.add_edge(driver, source);
    }

    for from in ctx.passenger_nodes() {
        for to in ctx.passenger_nodes() {
            if from != to {
                graph.add_edge(from, to);
            }
        }
    }

    RouteQuery {
        driver,
        graph,
        cover_count: ctx.node_count(),
    }
}

/// Build the subgraph for one driver and its assigned pickups.
///
/// The 2k pickup/dropoff nodes are completely connected and only reachable
/// through the driver.
pub fn build_for_driver(
    ctx: &RequestContext,
    driver: NodeIndex,
    sources: &[NodeIndex],
) -> RouteQuery {
    let mut graph = Graph::with_nodes(ctx.node_count());

    for &source in sources {
        graph.add_edge(driver, source);
    }

    for (i, &source) in sources.iter().enumerate() {
        for (j, &other) in sources.iter().enumerate() {
            if i != j {
                graph.add_edge(source, other);
            }
            graph.add_edge(source, ctx.dest_of(other));
        }
    }

    for (i, &source) in sources.iter().enumerate() {
        let dest = ctx.dest_of(source);
        for (j, &other) in sources.iter().enumerate() {
            if i != j {
                graph.add_edge(dest, ctx.dest_of(other));
            }
            graph.add_edge(dest, other);
        }
    }

    RouteQuery {
        driver,
        graph,
        cover_count: 2 * sources.len() + 1,
    }
}

/// Build every query a plan calls for.
///
/// Drivers without pickups get no query.
pub fn build_queries(ctx: &RequestContext, plan: &AssignmentPlan) -> Vec<RouteQuery> {
    match plan {
        AssignmentPlan::NoAssignmentNeeded => ctx
            .drivers()
            .next()
            .map(|driver| build_global(ctx, driver))
            .into_iter()
            .collect(),
        AssignmentPlan::Assignment(assignment) => assignment
            .iter()
            .filter(|(_, sources)| !sources.is_empty())
            .map(|(driver, sources)| build_for_driver(ctx, driver, sources))
            .collect(),
    }
}
