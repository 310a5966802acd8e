//! Application state for the web layer.

use std::sync::Arc;

use crate::oracle::DistanceMatrixClient;
use crate::planner::PlannerConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Distance Matrix client, shared by all requests
    pub oracle: Arc<DistanceMatrixClient>,

    /// Route planner configuration
    pub config: Arc<PlannerConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(oracle: DistanceMatrixClient, config: PlannerConfig) -> Self {
        Self {
            oracle: Arc::new(oracle),
            config: Arc::new(config),
        }
    }
}
