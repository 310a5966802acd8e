//! Data transfer objects for web requests and responses.
//!
//! The request body is read leniently: entries that do not have the
//! expected shape are skipped rather than failing the whole request.

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::domain::{Coord, PassengerRequest};
use crate::planner::PlannedRoute;

/// Message sent with every successful response.
pub const SUCCESS_MESSAGE: &str = "Request handled successfully";

/// Message sent when travel times could not be fetched.
pub const UPSTREAM_MESSAGE: &str = "Failed to fetch travel times";

/// Parsed body of a routing request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RoutesRequest {
    pub passengers: Vec<PassengerRequest>,
    pub drivers: Vec<Coord>,
}

impl RoutesRequest {
    /// Read `passengers` and `drivers` from a JSON body.
    ///
    /// Passengers are `[[srcLat, srcLng], [dstLat, dstLng]]` and drivers are
    /// `[lat, lng]`. A missing or non-array field is treated as empty.
    pub fn from_json(body: &Value) -> Self {
        let passengers = entries(body, "passengers")
            .enumerate()
            .filter_map(|(i, entry)| {
                let passenger = parse_passenger(entry);
                if passenger.is_none() {
                    warn!(index = i, entry = %entry, "skipping malformed passenger");
                }
                passenger
            })
            .collect();

        let drivers = entries(body, "drivers")
            .enumerate()
            .filter_map(|(i, entry)| {
                let driver = parse_coord(entry);
                if driver.is_none() {
                    warn!(index = i, entry = %entry, "skipping malformed driver");
                }
                driver
            })
            .collect();

        Self {
            passengers,
            drivers,
        }
    }
}

fn entries<'a>(body: &'a Value, field: &str) -> impl Iterator<Item = &'a Value> + use<'a> {
    body.get(field)
        .and_then(Value::as_array)
        .map(|items| items.iter())
        .into_iter()
        .flatten()
}

/// `[lat, lng]` with both numbers.
fn parse_coord(value: &Value) -> Option<Coord> {
    match value.as_array()?.as_slice() {
        [lat, lng] => Some(Coord::new(lat.as_f64()?, lng.as_f64()?)),
        _ => None,
    }
}

fn parse_passenger(value: &Value) -> Option<PassengerRequest> {
    match value.as_array()?.as_slice() {
        [source, destination] => Some(PassengerRequest::new(
            parse_coord(source)?,
            parse_coord(destination)?,
        )),
        _ => None,
    }
}

/// One driver's route in the response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathResult {
    /// Total minutes along the route
    #[serde(rename = "shortestTime")]
    pub shortest_time: u32,

    /// Stops as `[lng, lat]`
    pub path: Vec<[f64; 2]>,
}

impl From<&PlannedRoute> for PathResult {
    fn from(route: &PlannedRoute) -> Self {
        Self {
            shortest_time: route.time,
            path: route.lng_lat_path(),
        }
    }
}

/// Response for a routing request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutesResponse {
    pub success: bool,
    pub message: String,
    pub paths: Vec<PathResult>,
}

impl RoutesResponse {
    pub fn from_routes(routes: &[PlannedRoute]) -> Self {
        Self {
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
            paths: routes.iter().map(PathResult::from).collect(),
        }
    }
}

/// Response for the root endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct GreetingResponse {
    pub message: &'static str,
}

/// Error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}
