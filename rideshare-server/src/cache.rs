//! Per-request memoization of travel-time lookups.
//!
//! Every oracle call is expensive, so each ordered node pair is looked up
//! at most once per request. Entries are never evicted; the cache is dropped
//! with the request.

use std::collections::{HashMap, HashSet};

use futures::future::join_all;
use tracing::{debug, trace};

use crate::domain::{LocationRegistry, NodeIndex};
use crate::oracle::{OracleError, TimeOracle};

/// Default number of lookups issued concurrently by [`TimeCache::prefetch`].
pub const DEFAULT_BATCH_SIZE: usize = 8;

/// Ordered pair of nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    pub from: NodeIndex,
    pub to: NodeIndex,
}

impl EdgeKey {
    pub fn new(from: NodeIndex, to: NodeIndex) -> Self {
        Self { from, to }
    }
}

/// A failed lookup, fatal for the request that triggered it.
#[derive(Debug, thiserror::Error)]
#[error("travel time lookup {from} -> {to} failed: {source}")]
pub struct TimeLookupError {
    pub from: NodeIndex,
    pub to: NodeIndex,
    #[source]
    pub source: OracleError,
}

/// Travel times between registry nodes, backed by a [`TimeOracle`].
pub struct TimeCache<'a, O: TimeOracle> {
    oracle: &'a O,
    registry: &'a LocationRegistry,
    times: HashMap<EdgeKey, u32>,
    batch_size: usize,
    lookups: usize,
}

impl<'a, O: TimeOracle> TimeCache<'a, O> {
    /// Create an empty cache for one request.
    pub fn new(oracle: &'a O, registry: &'a LocationRegistry) -> Self {
        Self {
            oracle,
            registry,
            times: HashMap::new(),
            batch_size: DEFAULT_BATCH_SIZE,
            lookups: 0,
        }
    }

    /// Set how many lookups [`prefetch`](Self::prefetch) runs at once.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Cached time for a pair, without triggering a lookup.
    pub fn cached(&self, from: NodeIndex, to: NodeIndex) -> Option<u32> {
        self.times.get(&EdgeKey::new(from, to)).copied()
    }

    /// Travel time from `from` to `to`, looking it up on a miss.
    pub async fn get_time(&mut self, from: NodeIndex, to: NodeIndex) -> Result<u32, TimeLookupError> {
        let key = EdgeKey::new(from, to);
        if let Some(&minutes) = self.times.get(&key) {
            return Ok(minutes);
        }

        let minutes = self.lookup(key).await?;
        self.times.insert(key, minutes);
        Ok(minutes)
    }

    /// Make sure every pair in `pairs` is cached.
    ///
    /// Missing pairs are deduplicated and fetched concurrently, one batch at
    /// a time. Successful results are stored even when another lookup in the
    /// same batch fails; the first failure is then returned.
    pub async fn prefetch(&mut self, pairs: &[EdgeKey]) -> Result<(), TimeLookupError> {
        let mut seen = HashSet::new();
        let mut missing = Vec::new();
        for &key in pairs {
            if !self.times.contains_key(&key) && seen.insert(key) {
                missing.push(key);
            }
        }

        if missing.is_empty() {
            return Ok(());
        }

        debug!(pairs = missing.len(), "prefetching travel times");

        for batch in missing.chunks(self.batch_size) {
            let oracle = self.oracle;
            let registry = self.registry;
            let futures: Vec<_> = batch
                .iter()
                .copied()
                .map(|key| async move {
                    let result = oracle
                        .travel_minutes(registry.coord(key.from), registry.coord(key.to))
                        .await;
                    (key, result)
                })
                .collect();

            let results = join_all(futures).await;
            self.lookups += results.len();

            let mut first_error = None;
            for (key, result) in results {
                match result {
                    Ok(minutes) => {
                        self.times.insert(key, minutes);
                    }
                    Err(source) => {
                        if first_error.is_none() {
                            first_error = Some(TimeLookupError {
                                from: key.from,
                                to: key.to,
                                source,
                            });
                        }
                    }
                }
            }

            if let Some(err) = first_error {
                return Err(err);
            }
        }

        Ok(())
    }

    /// Number of oracle calls made so far.
    pub fn lookups(&self) -> usize {
        self.lookups
    }

    /// Number of cached pairs.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    async fn lookup(&mut self, key: EdgeKey) -> Result<u32, TimeLookupError> {
        self.lookups += 1;
        let from = self.registry.coord(key.from);
        let to = self.registry.coord(key.to);
        trace!(from = %key.from, to = %key.to, "travel time cache miss");

        self.oracle
            .travel_minutes(from, to)
            .await
            .map_err(|source| TimeLookupError {
                from: key.from,
                to: key.to,
                source,
            })
    }
}
