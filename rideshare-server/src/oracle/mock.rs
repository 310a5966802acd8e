//! In-memory time oracle for tests and offline development.
//!
//! Serves fixed travel times keyed by coordinate pair and counts how many
//! times each pair was requested.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::{Coord, CoordKey};

use super::TimeOracle;
use super::error::OracleError;

type PairKey = (CoordKey, CoordKey);

/// Oracle that answers from a table, falling back to a default.
#[derive(Debug, Default)]
pub struct StaticOracle {
    times: HashMap<PairKey, u32>,
    failures: HashMap<PairKey, String>,
    default_minutes: Option<u32>,
    calls: Mutex<HashMap<PairKey, usize>>,
}

impl StaticOracle {
    /// Create an oracle with no known pairs.
    ///
    /// Unknown pairs fail with [`OracleError::NoRouteFound`] until a default
    /// is set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every unknown pair with `minutes`.
    pub fn with_default(mut self, minutes: u32) -> Self {
        self.default_minutes = Some(minutes);
        self
    }

    /// Set the travel time from `from` to `to`.
    pub fn set(&mut self, from: Coord, to: Coord, minutes: u32) -> &mut Self {
        self.times.insert((from.key(), to.key()), minutes);
        self
    }

    /// Make lookups of `from` → `to` fail with the given API status.
    pub fn fail(&mut self, from: Coord, to: Coord, status: impl Into<String>) -> &mut Self {
        self.failures.insert((from.key(), to.key()), status.into());
        self
    }

    /// Number of lookups made for one ordered pair.
    pub fn calls_for(&self, from: Coord, to: Coord) -> usize {
        self.calls
            .lock()
            .map(|calls| calls.get(&(from.key(), to.key())).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    /// Total lookups across all pairs.
    pub fn total_calls(&self) -> usize {
        self.calls
            .lock()
            .map(|calls| calls.values().sum())
            .unwrap_or(0)
    }

    /// Largest number of lookups made for any single pair.
    pub fn max_calls_per_pair(&self) -> usize {
        self.calls
            .lock()
            .map(|calls| calls.values().copied().max().unwrap_or(0))
            .unwrap_or(0)
    }
}

impl TimeOracle for StaticOracle {
    async fn travel_minutes(&self, from: Coord, to: Coord) -> Result<u32, OracleError> {
        let key = (from.key(), to.key());

        if let Ok(mut calls) = self.calls.lock() {
            *calls.entry(key).or_insert(0) += 1;
        }

        if let Some(status) = self.failures.get(&key) {
            return Err(OracleError::ApiStatus {
                status: status.clone(),
                message: format!("lookup {from} -> {to} configured to fail"),
            });
        }

        self.times
            .get(&key)
            .copied()
            .or(self.default_minutes)
            .ok_or_else(|| OracleError::NoRouteFound {
                status: "NOT_FOUND".to_string(),
            })
    }
}
