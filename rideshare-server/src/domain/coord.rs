//! Geographic points and node roles.

use std::fmt;

/// A latitude/longitude pair as received from the client.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coord {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl Coord {
    /// Create a coordinate.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Returns the coordinate as `[lng, lat]`, the order used in responses.
    pub fn to_lng_lat(self) -> [f64; 2] {
        [self.lng, self.lat]
    }

    /// Returns the hashable identity of this coordinate.
    pub fn key(self) -> CoordKey {
        CoordKey {
            lat: normalized_bits(self.lat),
            lng: normalized_bits(self.lng),
        }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// Exact-equality identity of a [`Coord`].
///
/// Built from the IEEE bit patterns, with `-0.0` folded into `0.0` so the
/// two zeroes intern to the same node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoordKey {
    lat: u64,
    lng: u64,
}

fn normalized_bits(value: f64) -> u64 {
    if value == 0.0 { 0.0f64.to_bits() } else { value.to_bits() }
}

/// What a node represents in the routing problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    /// Starting position of a driver.
    Driver,
    /// Passenger pickup point.
    PassengerSource,
    /// Passenger dropoff point.
    PassengerDestination,
}

impl Role {
    /// Returns true for pickup nodes.
    pub fn is_pickup(self) -> bool {
        self == Role::PassengerSource
    }

    /// Returns true for dropoff nodes.
    pub fn is_dropoff(self) -> bool {
        self == Role::PassengerDestination
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Driver => "Driver",
            Role::PassengerSource => "PassengerSrc",
            Role::PassengerDestination => "PassengerDst",
        };
        f.write_str(name)
    }
}

/// A role-tagged point. Identity is `(lat, lng, role)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub coord: Coord,
    pub role: Role,
}

impl Node {
    /// Create a node.
    pub fn new(coord: Coord, role: Role) -> Self {
        Self { coord, role }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeroes_share_a_key() {
        assert_eq!(Coord::new(0.0, -0.0).key(), Coord::new(-0.0, 0.0).key());
    }

    #[test]
    fn distinct_coords_have_distinct_keys() {
        let a = Coord::new(43.65, -79.38);
        let b = Coord::new(43.65, -79.381);
        assert_ne!(a.key(), b.key());
        assert_eq!(a.key(), Coord::new(43.65, -79.38).key());
    }

    #[test]
    fn lng_lat_order() {
        assert_eq!(Coord::new(1.5, 2.5).to_lng_lat(), [2.5, 1.5]);
    }

    #[test]
    fn role_display() {
        assert_eq!(Role::Driver.to_string(), "Driver");
        assert_eq!(Role::PassengerSource.to_string(), "PassengerSrc");
        assert_eq!(Role::PassengerDestination.to_string(), "PassengerDst");
    }

    #[test]
    fn role_predicates() {
        assert!(Role::PassengerSource.is_pickup());
        assert!(!Role::PassengerSource.is_dropoff());
        assert!(Role::PassengerDestination.is_dropoff());
        assert!(!Role::Driver.is_pickup());
        assert!(!Role::Driver.is_dropoff());
    }
}
