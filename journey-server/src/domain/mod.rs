//! Domain types for the journey planner.
//!
//! This module contains the core domain model types that represent
//! normalized itineraries. Types enforce their invariants at construction
//! time, so code that receives these types can trust their validity.

mod coordinate;
mod error;
mod leg;
mod mode;
mod query;
mod route;

pub use coordinate::{Coordinate, Stop};
pub use error::DomainError;
pub use leg::Leg;
pub use mode::{LastMile, TransitMode, UnknownMode};
pub use query::Query;
pub use route::{Route, RouteId, Tag};
