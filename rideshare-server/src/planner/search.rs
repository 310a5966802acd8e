//! Capacity- and precedence-constrained route search.
//!
//! A Dijkstra-style search over partial routes rather than over nodes. A
//! state is a path from the driver together with the set of nodes it has
//! visited and the number of passengers on board. States are expanded in
//! order of accumulated time, so the first popped state that covers enough
//! nodes is a minimum-time route.
//!
//! A neighbor is skipped when it is already on the path, when it is a
//! pickup and every seat is taken, or when it is a dropoff whose pickup has
//! not happened yet.
//!
//! Equal-time states are ordered by their node sequence, which makes the
//! result deterministic. Once a `(node, visited)` pair has been expanded,
//! later states with the same pair are dropped; they can only finish later
//! or with a larger path under that ordering.

use std::cmp::{Ordering, Reverse};
use std::collections::{BTreeSet, BinaryHeap, HashSet};

use tracing::{debug, trace};

use crate::cache::{EdgeKey, TimeCache, TimeLookupError};
use crate::domain::{NodeIndex, RequestContext, Role};
use crate::oracle::TimeOracle;

use super::graph::RouteQuery;

/// A complete route: total minutes and the nodes in visiting order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Route {
    pub time: u32,
    pub path: Vec<NodeIndex>,
}

/// How a search ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A route covering every required node.
    Found(Route),
    /// The frontier emptied first. Recoverable: the driver has no route.
    Exhausted,
}

/// Result of one search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub outcome: SearchOutcome,
    /// Number of states popped and expanded.
    pub states_expanded: usize,
}

impl SearchResult {
    /// The route, if one was found.
    pub fn route(&self) -> Option<&Route> {
        match &self.outcome {
            SearchOutcome::Found(route) => Some(route),
            SearchOutcome::Exhausted => None,
        }
    }
}

/// Partial route during search.
#[derive(Debug, Clone)]
struct SearchState {
    /// Minutes accumulated along `path`.
    time: u32,

    /// Last node of `path`.
    node: NodeIndex,

    /// Nodes on `path`, for membership tests.
    visited: BTreeSet<NodeIndex>,

    /// Nodes in visiting order, starting with the driver.
    path: Vec<NodeIndex>,

    /// Passengers currently in the vehicle.
    onboard: usize,
}

impl SearchState {
    fn seed(start: NodeIndex) -> Self {
        Self {
            time: 0,
            node: start,
            visited: BTreeSet::from([start]),
            path: vec![start],
            onboard: 0,
        }
    }

    fn extend(&self, next: NodeIndex, minutes: u32, role: Role) -> Self {
        let mut visited = self.visited.clone();
        visited.insert(next);
        let mut path = self.path.clone();
        path.push(next);

        let onboard = match role {
            Role::PassengerSource => self.onboard + 1,
            Role::PassengerDestination => self.onboard.saturating_sub(1),
            Role::Driver => self.onboard,
        };

        Self {
            time: self.time.saturating_add(minutes),
            node: next,
            visited,
            path,
            onboard,
        }
    }

    fn into_route(self) -> Route {
        Route {
            time: self.time,
            path: self.path,
        }
    }
}

// Ordered by (time, path) only; the other fields are derived from the path.
impl PartialEq for SearchState {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SearchState {}

impl PartialOrd for SearchState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SearchState {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time
            .cmp(&other.time)
            .then_with(|| self.path.cmp(&other.path))
    }
}

/// Route search over the graphs of one request.
pub struct RouteSearch<'a> {
    ctx: &'a RequestContext,
    capacity: usize,
}

impl<'a> RouteSearch<'a> {
    /// Create a search for `ctx` with at most `capacity` passengers on board.
    pub fn new(ctx: &'a RequestContext, capacity: usize) -> Self {
        Self { ctx, capacity }
    }

    /// Find the minimum-time route for `query`.
    ///
    /// Edge times come from `cache`; misses trigger oracle lookups, and a
    /// failed lookup aborts the search.
    pub async fn find_route<O: TimeOracle>(
        &self,
        query: &RouteQuery,
        cache: &mut TimeCache<'_, O>,
    ) -> Result<SearchResult, TimeLookupError> {
        let mut queue = BinaryHeap::new();
        queue.push(Reverse(SearchState::seed(query.driver)));

        let mut expanded: HashSet<(NodeIndex, BTreeSet<NodeIndex>)> = HashSet::new();
        let mut states_expanded = 0;

        while let Some(Reverse(state)) = queue.pop() {
            if state.visited.len() >= query.cover_count {
                debug!(
                    driver = %query.driver,
                    time = state.time,
                    states_expanded,
                    "route found"
                );
                return Ok(SearchResult {
                    outcome: SearchOutcome::Found(state.into_route()),
                    states_expanded,
                });
            }

            if !expanded.insert((state.node, state.visited.clone())) {
                continue;
            }
            states_expanded += 1;

            let reachable: Vec<NodeIndex> = query
                .graph
                .neighbors(state.node)
                .iter()
                .copied()
                .filter(|&next| self.can_visit(&state, next))
                .collect();

            let edges: Vec<EdgeKey> = reachable
                .iter()
                .map(|&next| EdgeKey::new(state.node, next))
                .collect();
            cache.prefetch(&edges).await?;

            for next in reachable {
                let minutes = cache.get_time(state.node, next).await?;
                let role = self.ctx.registry.role(next);
                trace!(from = %state.node, to = %next, minutes, "push state");
                queue.push(Reverse(state.extend(next, minutes, role)));
            }
        }

        debug!(driver = %query.driver, states_expanded, "search exhausted");

        Ok(SearchResult {
            outcome: SearchOutcome::Exhausted,
            states_expanded,
        })
    }

    /// Whether `next` may follow the current path.
    fn can_visit(&self, state: &SearchState, next: NodeIndex) -> bool {
        if state.visited.contains(&next) {
            return false;
        }

        match self.ctx.registry.role(next) {
            Role::PassengerSource => state.onboard < self.capacity,
            Role::PassengerDestination => self
                .ctx
                .pairing
                .source_of(next)
                .is_some_and(|pickup| state.visited.contains(&pickup)),
            Role::Driver => true,
        }
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
