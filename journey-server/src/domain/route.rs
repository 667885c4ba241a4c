//! Route types.
//!
//! A `Route` is one complete candidate journey returned for a query,
//! normalized from a trip-planner itinerary.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DomainError, Leg, Stop, TransitMode};

/// Identifier of a route within one result set.
///
/// Ids are unique and stable for the lifetime of one query result; they
/// carry no meaning across queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RouteId(pub usize);

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A superlative label, assigned per result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Tag {
    Fastest,
    Cheapest,
    LeastTransfers,
}

impl Tag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Fastest => "fastest",
            Tag::Cheapest => "cheapest",
            Tag::LeastTransfers => "leastTransfers",
        }
    }
}

/// A complete candidate journey.
///
/// # Invariants
///
/// - At least one leg
/// - `duration_minutes` is fixed at construction from the planner's total.
///   It is not re-derived when the last-mile rewrite shortens the final
///   leg, so it can disagree with the sum of leg durations.
/// - Tags start empty and are set once, by ranking the whole result set
#[derive(Debug, Clone, Serialize)]
pub struct Route {
    id: RouteId,
    legs: Vec<Leg>,
    duration_minutes: u32,
    transfers: u32,
    cost_rupees: u32,
    tags: BTreeSet<Tag>,
    departure: Option<DateTime<Utc>>,
    arrival: Option<DateTime<Utc>>,
}

impl Route {
    /// Construct an untagged route.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `legs` is empty.
    pub fn new(
        id: RouteId,
        legs: Vec<Leg>,
        duration_minutes: u32,
        transfers: u32,
        cost_rupees: u32,
    ) -> Result<Self, DomainError> {
        if legs.is_empty() {
            return Err(DomainError::EmptyRoute);
        }

        Ok(Route {
            id,
            legs,
            duration_minutes,
            transfers,
            cost_rupees,
            tags: BTreeSet::new(),
            departure: None,
            arrival: None,
        })
    }

    /// Attach the planner's departure and arrival timestamps.
    pub fn with_times(
        mut self,
        departure: Option<DateTime<Utc>>,
        arrival: Option<DateTime<Utc>>,
    ) -> Self {
        self.departure = departure;
        self.arrival = arrival;
        self
    }

    pub fn id(&self) -> RouteId {
        self.id
    }

    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    pub fn transfers(&self) -> u32 {
        self.transfers
    }

    pub fn cost_rupees(&self) -> u32 {
        self.cost_rupees
    }

    pub fn tags(&self) -> &BTreeSet<Tag> {
        &self.tags
    }

    pub fn has_tag(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }

    pub fn departure(&self) -> Option<DateTime<Utc>> {
        self.departure
    }

    pub fn arrival(&self) -> Option<DateTime<Utc>> {
        self.arrival
    }

    /// Where the route starts (first leg's origin).
    pub fn origin(&self) -> &Stop {
        // Safe: legs is non-empty by construction
        self.legs[0].from()
    }

    /// Where the route ends (last leg's destination).
    pub fn destination(&self) -> &Stop {
        self.legs[self.legs.len() - 1].to()
    }

    /// Leg modes in travel order.
    pub fn modes(&self) -> Vec<TransitMode> {
        self.legs.iter().map(Leg::mode).collect()
    }

    /// Leg modes joined for display, e.g. `"WALK → RAIL → AUTO"`.
    pub fn mode_summary(&self) -> String {
        self.legs
            .iter()
            .map(|l| l.mode().as_str())
            .collect::<Vec<_>>()
            .join(" → ")
    }

    pub(crate) fn set_tags(&mut self, tags: BTreeSet<Tag>) {
        self.tags = tags;
    }
}
