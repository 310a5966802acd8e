//! Distance Matrix API response DTOs.
//!
//! Only the fields the planner reads are modelled. Everything is optional
//! because the API drops `rows`/`duration` on failure rather than sending
//! nulls.

use serde::Deserialize;

/// Top-level response from `/distancematrix/json`.
#[derive(Debug, Clone, Deserialize)]
pub struct DistanceMatrixResponse {
    /// Request-level status. `"OK"` on success.
    pub status: Option<String>,

    /// Human-readable explanation accompanying a non-OK status.
    pub error_message: Option<String>,

    /// One row per origin.
    #[serde(default)]
    pub rows: Vec<MatrixRow>,
}

/// Results for one origin.
#[derive(Debug, Clone, Deserialize)]
pub struct MatrixRow {
    /// One element per destination.
    #[serde(default)]
    pub elements: Vec<MatrixElement>,
}

/// Result for one origin/destination pair.
#[derive(Debug, Clone, Deserialize)]
pub struct MatrixElement {
    /// Element-level status. `"OK"` when a route exists,
    /// `"ZERO_RESULTS"` or `"NOT_FOUND"` otherwise.
    pub status: Option<String>,

    /// Travel duration.
    pub duration: Option<TextValue>,
}

/// A `{ "text": ..., "value": ... }` pair.
#[derive(Debug, Clone, Deserialize)]
pub struct TextValue {
    pub text: Option<String>,
    /// Seconds.
    pub value: Option<f64>,
}
