//! Domain types for the ride-share planner.
//!
//! Raw coordinates from a request are interned into role-tagged nodes with
//! stable indices. Everything downstream of the web layer works with
//! [`NodeIndex`] values and looks coordinates up through the registry.

mod coord;
mod error;
mod pairing;
mod registry;
mod request;

pub use coord::{Coord, CoordKey, Node, Role};
pub use error::RequestError;
pub use pairing::{PairInsert, Pairing};
pub use registry::{LocationRegistry, NodeIndex};
pub use request::{PassengerRequest, RequestContext};
