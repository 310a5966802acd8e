//! Travel-time oracle.
//!
//! The planner asks for the driving time between two coordinates through
//! the [`TimeOracle`] trait. [`DistanceMatrixClient`] answers from the
//! Google Distance Matrix API; [`StaticOracle`] answers from a table.
//!
//! Lookups are expensive and fallible. Callers go through
//! [`crate::cache::TimeCache`], which guarantees one lookup per ordered
//! pair per request.

use std::future::Future;

use crate::domain::Coord;

mod client;
mod convert;
mod error;
mod mock;
mod types;

pub use client::{DEFAULT_BASE_URL, DistanceMatrixClient, OracleConfig};
pub use convert::{seconds_to_minutes, travel_minutes};
pub use error::OracleError;
pub use mock::StaticOracle;
pub use types::{DistanceMatrixResponse, MatrixElement, MatrixRow, TextValue};

/// Source of travel times between coordinates.
///
/// This abstraction allows the planner to be tested without API access.
pub trait TimeOracle: Sync {
    /// Driving time from `from` to `to`, in whole minutes.
    fn travel_minutes(
        &self,
        from: Coord,
        to: Coord,
    ) -> impl Future<Output = Result<u32, OracleError>> + Send;
}
