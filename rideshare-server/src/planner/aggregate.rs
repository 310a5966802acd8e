//! Collecting search results into the routes returned to the client.

use std::collections::HashSet;

use crate::domain::{Coord, LocationRegistry};

use super::search::Route;

/// A finished route in coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedRoute {
    /// Total travel time in minutes.
    pub time: u32,

    /// Stops in visiting order, starting at the driver.
    pub stops: Vec<Coord>,
}

impl PlannedRoute {
    /// Where the route starts.
    pub fn driver(&self) -> Option<Coord> {
        self.stops.first().copied()
    }

    /// Stops as `[lng, lat]` pairs.
    pub fn lng_lat_path(&self) -> Vec<[f64; 2]> {
        self.stops.iter().map(|c| c.to_lng_lat()).collect()
    }
}

/// Drop exact repeats of `(time, path)`, keeping the first of each.
pub fn deduplicate(routes: Vec<Route>) -> Vec<Route> {
    let mut seen = HashSet::with_capacity(routes.len());
    routes
        .into_iter()
        .filter(|route| seen.insert(route.clone()))
        .collect()
}

/// Deduplicate and resolve node indices to coordinates.
pub fn aggregate(registry: &LocationRegistry, routes: Vec<Route>) -> Vec<PlannedRoute> {
    deduplicate(routes)
        .into_iter()
        .map(|route| PlannedRoute {
            time: route.time,
            stops: route.path.iter().map(|&node| registry.coord(node)).collect(),
        })
        .collect()
}
