//! Greedy driver/passenger assignment.
//!
//! Each passenger's cost for a driver is the time for the driver to reach
//! the pickup plus the pickup→dropoff time. The assignment runs in two
//! passes:
//!
//! 1. **Coverage**: drivers in index order each take their cheapest
//!    still-unassigned pickup, so every driver gets work while pickups last.
//! 2. **Remainder**: every pickup still unassigned, in index order, goes to
//!    its cheapest driver overall.
//!
//! Ties go to the lowest pickup index in pass 1 and the lowest driver index
//! in pass 2. This is a heuristic, not an optimal matching.

use tracing::debug;

use crate::cache::{EdgeKey, TimeCache, TimeLookupError};
use crate::domain::{NodeIndex, RequestContext};
use crate::oracle::TimeOracle;

/// What the graph builder should do with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentPlan {
    /// A single driver serves everyone over the global graph.
    NoAssignmentNeeded,
    /// Each driver serves its own pickups.
    Assignment(Assignment),
}

/// Pickups per driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// `lists[d]` holds the pickups of driver `NodeIndex(d)`, coverage pick first.
    lists: Vec<Vec<NodeIndex>>,
}

impl Assignment {
    fn with_drivers(driver_count: usize) -> Self {
        Self {
            lists: vec![Vec::new(); driver_count],
        }
    }

    /// Pickups assigned to `driver`. Empty for unknown drivers.
    pub fn sources_for(&self, driver: NodeIndex) -> &[NodeIndex] {
        self.lists.get(driver.0).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate over every driver and its pickups, in driver order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, &[NodeIndex])> {
        self.lists
            .iter()
            .enumerate()
            .map(|(d, sources)| (NodeIndex(d), sources.as_slice()))
    }

    pub fn driver_count(&self) -> usize {
        self.lists.len()
    }

    /// Total number of assigned pickups.
    pub fn assigned_count(&self) -> usize {
        self.lists.iter().map(Vec::len).sum()
    }
}

/// Cost of each driver for one pickup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostRow {
    pub source: NodeIndex,
    /// `costs[d]` is the cost for driver `NodeIndex(d)`.
    pub costs: Vec<u32>,
}

/// Driver costs for every pickup, rows in ascending pickup order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CostTable {
    driver_count: usize,
    rows: Vec<CostRow>,
}

impl CostTable {
    pub fn new(driver_count: usize) -> Self {
        Self {
            driver_count,
            rows: Vec::new(),
        }
    }

    /// Append the row for `source`. `costs` must have one entry per driver.
    pub fn push(&mut self, source: NodeIndex, costs: Vec<u32>) {
        debug_assert_eq!(costs.len(), self.driver_count);
        self.rows.push(CostRow { source, costs });
    }

    pub fn rows(&self) -> &[CostRow] {
        &self.rows
    }

    pub fn driver_count(&self) -> usize {
        self.driver_count
    }
}

/// Fetch the needed travel times and assign pickups to drivers.
///
/// Returns [`AssignmentPlan::NoAssignmentNeeded`] for exactly one driver.
pub async fn assign_passengers<O: TimeOracle>(
    ctx: &RequestContext,
    cache: &mut TimeCache<'_, O>,
) -> Result<AssignmentPlan, TimeLookupError> {
    if ctx.driver_count() == 1 {
        return Ok(AssignmentPlan::NoAssignmentNeeded);
    }

    let costs = build_cost_table(ctx, cache).await?;
    let assignment = assign_with_costs(&costs);

    for (driver, sources) in assignment.iter() {
        debug!(driver = %driver, sources = ?sources, "driver assignment");
    }

    Ok(AssignmentPlan::Assignment(assignment))
}

/// Compute `time(driver, source) + time(source, dest(source))` for every pair.
pub async fn build_cost_table<O: TimeOracle>(
    ctx: &RequestContext,
    cache: &mut TimeCache<'_, O>,
) -> Result<CostTable, TimeLookupError> {
    let drivers: Vec<NodeIndex> = ctx.drivers().collect();
    let sources: Vec<NodeIndex> = ctx.sources().collect();

    let mut pairs = Vec::with_capacity((drivers.len() + 1) * sources.len());
    for &source in &sources {
        for &driver in &drivers {
            pairs.push(EdgeKey::new(driver, source));
        }
        pairs.push(EdgeKey::new(source, ctx.dest_of(source)));
    }
    cache.prefetch(&pairs).await?;

    let mut table = CostTable::new(drivers.len());
    for &source in &sources {
        let ride = cache.get_time(source, ctx.dest_of(source)).await?;
        let mut costs = Vec::with_capacity(drivers.len());
        for &driver in &drivers {
            let approach = cache.get_time(driver, source).await?;
            costs.push(approach.saturating_add(ride));
        }
        table.push(source, costs);
    }

    Ok(table)
}

/// Run both assignment passes over a precomputed cost table.
pub fn assign_with_costs(table: &CostTable) -> Assignment {
    let driver_count = table.driver_count();
    let rows = table.rows();
    let mut assignment = Assignment::with_drivers(driver_count);
    let mut assigned = vec![false; rows.len()];

    // Coverage pass. `min_by_key` keeps the first minimum: lowest pickup.
    for driver in 0..driver_count {
        let best = rows
            .iter()
            .enumerate()
            .filter(|(i, _)| !assigned[*i])
            .min_by_key(|(_, row)| row.costs[driver]);

        if let Some((i, row)) = best {
            assignment.lists[driver].push(row.source);
            assigned[i] = true;
        }
    }

    // Remainder pass, lowest driver on ties.
    for (i, row) in rows.iter().enumerate() {
        if assigned[i] {
            continue;
        }
        let Some(driver) = (0..driver_count).min_by_key(|&d| row.costs[d]) else {
            continue;
        };
        assignment.lists[driver].push(row.source);
        assigned[i] = true;
    }

    assignment
}
