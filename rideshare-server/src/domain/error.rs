//! Domain error types.
//!
//! These errors describe requests whose contents cannot form a valid
//! routing problem. They are distinct from oracle/IO errors.

use super::Coord;

/// Validation failures while building a request context.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RequestError {
    /// One pickup point was paired with two different dropoffs
    #[error("pickup at {pickup} is paired with more than one dropoff")]
    PickupConflict { pickup: Coord },

    /// One dropoff point was paired with two different pickups
    #[error("dropoff at {dropoff} is paired with more than one pickup")]
    DropoffConflict { dropoff: Coord },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = RequestError::PickupConflict {
            pickup: Coord::new(43.5, -79.25),
        };
        assert_eq!(
            err.to_string(),
            "pickup at 43.5,-79.25 is paired with more than one dropoff"
        );

        let err = RequestError::DropoffConflict {
            dropoff: Coord::new(1.0, 2.0),
        };
        assert_eq!(
            err.to_string(),
            "dropoff at 1,2 is paired with more than one pickup"
        );
    }
}
