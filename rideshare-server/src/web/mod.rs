//! Web layer for the ride-share router.
//!
//! Provides the routing endpoint and the liveness endpoints.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router, handle_routes_request};
pub use state::AppState;
