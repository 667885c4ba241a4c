//! Itinerary processing pipeline.
//!
//! This module turns a trip planner's raw itineraries into ranked,
//! priced routes:
//!
//! raw itinerary → normalize (fare, last mile) → rank (superlative tags)
//!
//! Normalization is per itinerary and tolerates bad records; ranking is a
//! whole-batch operation over the routes that survived.

mod config;
mod normalize;
mod orchestrator;
mod rank;


pub use config::PlannerConfig;
pub use normalize::{InvalidItinerary, decode_itinerary, normalize_itinerary};
pub use orchestrator::{PlannerError, RouteQueryOrchestrator, TripPlanner, normalize_all};
pub use rank::rank_routes;
