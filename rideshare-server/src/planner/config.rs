//! Configuration for the route planner.

use crate::cache::DEFAULT_BATCH_SIZE;

/// Seats available to passengers in every vehicle.
pub const DEFAULT_CAPACITY: usize = 4;

/// Configuration parameters for planning.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Maximum passengers on board at once.
    /// A pickup that would exceed this is rejected during search.
    pub capacity: usize,

    /// Maximum number of travel-time lookups issued concurrently.
    /// Higher values increase parallelism but put more load on the oracle.
    pub prefetch_batch_size: usize,
}

impl PlannerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(capacity: usize, prefetch_batch_size: usize) -> Self {
        Self {
            capacity,
            prefetch_batch_size,
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            prefetch_batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlannerConfig::default();

        assert_eq!(config.capacity, 4);
        assert_eq!(config.prefetch_batch_size, 8);
    }

    #[test]
    fn custom_config() {
        let config = PlannerConfig::new(2, 16);

        assert_eq!(config.capacity, 2);
        assert_eq!(config.prefetch_batch_size, 16);
    }
}
