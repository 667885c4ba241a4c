//! Route query type.

use std::collections::BTreeSet;

use super::{Coordinate, LastMile, TransitMode};

/// One rider request.
///
/// Built by the caller and handed once to the orchestrator. Origin and
/// destination are optional so that an unresolved station reaches
/// validation instead of being silently dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub origin: Option<Coordinate>,
    pub destination: Option<Coordinate>,
    pub active_modes: BTreeSet<TransitMode>,
    pub max_transfers: u32,
    pub last_mile: LastMile,
}

impl Query {
    /// Create a query with rail and bus enabled, direct trips only and
    /// walking for the last mile.
    pub fn new(origin: Coordinate, destination: Coordinate) -> Self {
        Self {
            origin: Some(origin),
            destination: Some(destination),
            active_modes: BTreeSet::from([TransitMode::Rail, TransitMode::Bus]),
            max_transfers: 0,
            last_mile: LastMile::Walk,
        }
    }

    /// Replace the active mode set.
    pub fn with_modes(mut self, modes: impl IntoIterator<Item = TransitMode>) -> Self {
        self.active_modes = modes.into_iter().collect();
        self
    }

    pub fn with_max_transfers(mut self, n: u32) -> Self {
        self.max_transfers = n;
        self
    }

    pub fn with_last_mile(mut self, last_mile: LastMile) -> Self {
        self.last_mile = last_mile;
        self
    }

    /// Modes to request from the trip planner: WALK first, then every
    /// active mode in a fixed order. WALK appears once.
    pub fn mode_filter(&self) -> Vec<TransitMode> {
        std::iter::once(TransitMode::Walk)
            .chain(
                self.active_modes
                    .iter()
                    .copied()
                    .filter(|m| *m != TransitMode::Walk),
            )
            .collect()
    }
}
