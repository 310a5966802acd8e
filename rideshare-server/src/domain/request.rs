//! Per-request routing context.

use super::coord::{Coord, Role};
use super::error::RequestError;
use super::pairing::{PairInsert, Pairing};
use super::registry::{LocationRegistry, NodeIndex};

/// One passenger's pickup and dropoff points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassengerRequest {
    pub source: Coord,
    pub destination: Coord,
}

impl PassengerRequest {
    pub fn new(source: Coord, destination: Coord) -> Self {
        Self {
            source,
            destination,
        }
    }
}

/// Everything the planner knows about one request.
///
/// Nodes are interned in three phases, so drivers occupy `[0, D)`,
/// pickups `[D, D+P)` and dropoffs `[D+P, N)`.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub registry: LocationRegistry,
    pub pairing: Pairing,
    driver_count: usize,
    source_count: usize,
}

impl RequestContext {
    /// Intern drivers and passengers and pair pickups with dropoffs.
    pub fn build(
        passengers: &[PassengerRequest],
        drivers: &[Coord],
    ) -> Result<Self, RequestError> {
        let mut registry = LocationRegistry::new();

        for &driver in drivers {
            registry.intern(driver, Role::Driver);
        }
        let driver_count = registry.len();

        for passenger in passengers {
            registry.intern(passenger.source, Role::PassengerSource);
        }
        let source_count = registry.len() - driver_count;

        for passenger in passengers {
            registry.intern(passenger.destination, Role::PassengerDestination);
        }

        let mut pairing = Pairing::new();
        for passenger in passengers {
            // Both lookups hit: every point was interned above.
            let (Some(src), Some(dst)) = (
                registry.lookup(passenger.source, Role::PassengerSource),
                registry.lookup(passenger.destination, Role::PassengerDestination),
            ) else {
                continue;
            };

            match pairing.insert(src, dst) {
                PairInsert::Added | PairInsert::Duplicate => {}
                PairInsert::SourceTaken => {
                    return Err(RequestError::PickupConflict {
                        pickup: passenger.source,
                    });
                }
                PairInsert::DestinationTaken => {
                    return Err(RequestError::DropoffConflict {
                        dropoff: passenger.destination,
                    });
                }
            }
        }

        Ok(Self {
            registry,
            pairing,
            driver_count,
            source_count,
        })
    }

    /// Number of distinct drivers (D).
    pub fn driver_count(&self) -> usize {
        self.driver_count
    }

    /// Number of distinct pickups (P).
    pub fn source_count(&self) -> usize {
        self.source_count
    }

    /// Total number of nodes (N).
    pub fn node_count(&self) -> usize {
        self.registry.len()
    }

    /// Driver nodes in index order.
    pub fn drivers(&self) -> impl Iterator<Item = NodeIndex> + use<> {
        (0..self.driver_count).map(NodeIndex)
    }

    /// Pickup nodes in index order.
    pub fn sources(&self) -> impl Iterator<Item = NodeIndex> + use<> {
        let start = self.driver_count;
        (start..start + self.source_count).map(NodeIndex)
    }

    /// Dropoff nodes in index order.
    pub fn destinations(&self) -> impl Iterator<Item = NodeIndex> + use<> {
        (self.driver_count + self.source_count..self.registry.len()).map(NodeIndex)
    }

    /// Pickups and dropoffs, i.e. every non-driver node.
    pub fn passenger_nodes(&self) -> impl Iterator<Item = NodeIndex> + use<> {
        (self.driver_count..self.registry.len()).map(NodeIndex)
    }

    /// Dropoff paired with `source`.
    ///
    /// Panics if `source` is not a pickup of this request.
    pub(crate) fn dest_of(&self, source: NodeIndex) -> NodeIndex {
        self.pairing
            .dest_of(source)
            .unwrap_or_else(|| panic!("node {source} is not a paired pickup"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pax(src: (f64, f64), dst: (f64, f64)) -> PassengerRequest {
        PassengerRequest::new(Coord::new(src.0, src.1), Coord::new(dst.0, dst.1))
    }

    #[test]
    fn indices_are_grouped_by_role() {
        let drivers = [Coord::new(0.0, 0.0), Coord::new(0.0, 1.0)];
        let passengers = [pax((1.0, 0.0), (2.0, 0.0)), pax((1.0, 1.0), (2.0, 1.0))];

        let ctx = RequestContext::build(&passengers, &drivers).unwrap();

        assert_eq!(ctx.driver_count(), 2);
        assert_eq!(ctx.source_count(), 2);
        assert_eq!(ctx.node_count(), 6);
        assert_eq!(
            ctx.sources().collect::<Vec<_>>(),
            vec![NodeIndex(2), NodeIndex(3)]
        );
        assert_eq!(
            ctx.destinations().collect::<Vec<_>>(),
            vec![NodeIndex(4), NodeIndex(5)]
        );
        assert_eq!(ctx.dest_of(NodeIndex(2)), NodeIndex(4));
        assert_eq!(ctx.dest_of(NodeIndex(3)), NodeIndex(5));
        assert_eq!(ctx.pairing.source_of(NodeIndex(5)), Some(NodeIndex(3)));
    }

    #[test]
    fn duplicate_inputs_collapse() {
        let drivers = [Coord::new(0.0, 0.0), Coord::new(0.0, 0.0)];
        let passengers = [pax((1.0, 0.0), (2.0, 0.0)), pax((1.0, 0.0), (2.0, 0.0))];

        let ctx = RequestContext::build(&passengers, &drivers).unwrap();

        assert_eq!(ctx.driver_count(), 1);
        assert_eq!(ctx.source_count(), 1);
        assert_eq!(ctx.node_count(), 3);
        assert_eq!(ctx.pairing.len(), 1);
    }

    #[test]
    fn shared_pickup_with_different_dropoffs_is_rejected() {
        let drivers = [Coord::new(0.0, 0.0)];
        let passengers = [pax((1.0, 0.0), (2.0, 0.0)), pax((1.0, 0.0), (3.0, 0.0))];

        let err = RequestContext::build(&passengers, &drivers).unwrap_err();
        assert_eq!(
            err,
            RequestError::PickupConflict {
                pickup: Coord::new(1.0, 0.0)
            }
        );
    }

    #[test]
    fn shared_dropoff_is_rejected() {
        let drivers = [Coord::new(0.0, 0.0)];
        let passengers = [pax((1.0, 0.0), (2.0, 0.0)), pax((1.5, 0.0), (2.0, 0.0))];

        let err = RequestContext::build(&passengers, &drivers).unwrap_err();
        assert!(matches!(err, RequestError::DropoffConflict { .. }));
    }

    #[test]
    fn pickup_may_share_coordinates_with_a_driver() {
        let drivers = [Coord::new(1.0, 0.0)];
        let passengers = [pax((1.0, 0.0), (2.0, 0.0))];

        let ctx = RequestContext::build(&passengers, &drivers).unwrap();
        assert_eq!(ctx.node_count(), 3);
        assert_eq!(ctx.registry.role(NodeIndex(1)), Role::PassengerSource);
    }

    #[test]
    fn no_passengers() {
        let ctx = RequestContext::build(&[], &[Coord::new(0.0, 0.0)]).unwrap();
        assert_eq!(ctx.sources().count(), 0);
        assert_eq!(ctx.destinations().count(), 0);
        assert_eq!(ctx.passenger_nodes().count(), 0);
    }

    #[test]
    #[should_panic(expected = "not a paired pickup")]
    fn dest_of_driver_panics() {
        let ctx = RequestContext::build(&[pax((1.0, 0.0), (2.0, 0.0))], &[Coord::new(0.0, 0.0)])
            .unwrap();
        ctx.dest_of(NodeIndex(0));
    }
}
