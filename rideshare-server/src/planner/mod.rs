//! Route planning for one request.
//!
//! Planning runs in four stages over a shared per-request [`TimeCache`]:
//! pickups are assigned to drivers, a search graph is built per driver,
//! each graph is searched for its minimum-time route, and the routes found
//! are collected for the response.

mod aggregate;
mod assign;
mod config;
mod graph;
mod search;

pub use aggregate::{PlannedRoute, aggregate, deduplicate};
pub use assign::{
    Assignment, AssignmentPlan, CostRow, CostTable, assign_passengers, assign_with_costs,
    build_cost_table,
};
pub use config::{DEFAULT_CAPACITY, PlannerConfig};
pub use graph::{Graph, RouteQuery, build_for_driver, build_global, build_queries};
pub use search::{Route, RouteSearch, SearchOutcome, SearchResult};

use tracing::{debug, info, warn};

use crate::cache::{TimeCache, TimeLookupError};
use crate::domain::{Coord, PassengerRequest, RequestContext, RequestError};
use crate::oracle::TimeOracle;

/// Error from planning a request.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// A travel time could not be fetched.
    #[error(transparent)]
    Lookup(#[from] TimeLookupError),

    /// The request itself is inconsistent.
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] RequestError),
}

/// Outcome of planning one request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlanResult {
    /// Routes found, in driver order.
    pub routes: Vec<PlannedRoute>,

    /// Drivers whose search ran out of states.
    pub unreachable: Vec<Coord>,

    /// Oracle calls made for this request.
    pub lookups: usize,
}

/// Plans routes for drivers and passengers.
pub struct Planner<'a, O: TimeOracle> {
    oracle: &'a O,
    config: &'a PlannerConfig,
}

impl<'a, O: TimeOracle> Planner<'a, O> {
    /// Create a new planner.
    pub fn new(oracle: &'a O, config: &'a PlannerConfig) -> Self {
        Self { oracle, config }
    }

    /// Validate raw request data and plan it.
    pub async fn plan_request(
        &self,
        passengers: &[PassengerRequest],
        drivers: &[Coord],
    ) -> Result<PlanResult, PlanError> {
        let ctx = RequestContext::build(passengers, drivers)?;
        debug!(
            drivers = ctx.driver_count(),
            passengers = ctx.source_count(),
            nodes = ctx.node_count(),
            "request context built"
        );
        self.plan(&ctx).await
    }

    /// Plan every route for an already built context.
    pub async fn plan(&self, ctx: &RequestContext) -> Result<PlanResult, PlanError> {
        if ctx.driver_count() == 0 {
            debug!("no drivers, nothing to plan");
            return Ok(PlanResult::default());
        }

        let mut cache = TimeCache::new(self.oracle, &ctx.registry)
            .with_batch_size(self.config.prefetch_batch_size);

        let plan = assign_passengers(ctx, &mut cache).await?;
        let queries = build_queries(ctx, &plan);
        let search = RouteSearch::new(ctx, self.config.capacity);

        let mut routes = Vec::with_capacity(queries.len());
        let mut unreachable = Vec::new();

        for query in &queries {
            let result = search.find_route(query, &mut cache).await?;
            match result.outcome {
                SearchOutcome::Found(route) => routes.push(route),
                SearchOutcome::Exhausted => {
                    let driver = ctx.registry.coord(query.driver);
                    warn!(
                        driver = %driver,
                        states_expanded = result.states_expanded,
                        "no feasible route for driver"
                    );
                    unreachable.push(driver);
                }
            }
        }

        let routes = aggregate(&ctx.registry, routes);
        info!(
            routes = routes.len(),
            unreachable = unreachable.len(),
            lookups = cache.lookups(),
            "request planned"
        );

        Ok(PlanResult {
            routes,
            unreachable,
            lookups: cache.lookups(),
        })
    }
}
