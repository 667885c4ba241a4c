//! Superlative tagging for a result set.
//!
//! Tags are a whole-batch property: a route is "fastest" only relative to
//! the other routes returned for the same query.

use std::collections::BTreeSet;

use crate::domain::{Route, RouteId, Tag};

/// Attach `fastest`, `cheapest` and `leastTransfers` tags to a batch.
///
/// Each criterion is a single minimum over the batch in input order. A
/// later route only takes a tag from an earlier one if it is strictly
/// better, so ties go to the earliest route. One route may collect
/// several tags. Route order is preserved and an empty batch is returned
/// as is.
///
/// Any tags already present are replaced.
pub fn rank_routes(mut routes: Vec<Route>) -> Vec<Route> {
    let fastest = first_minimum(&routes, Route::duration_minutes);
    let cheapest = first_minimum(&routes, Route::cost_rupees);
    let least_transfers = first_minimum(&routes, Route::transfers);

    for route in &mut routes {
        let id = Some(route.id());
        let mut tags = BTreeSet::new();

        if id == fastest {
            tags.insert(Tag::Fastest);
        }
        if id == cheapest {
            tags.insert(Tag::Cheapest);
        }
        if id == least_transfers {
            tags.insert(Tag::LeastTransfers);
        }

        route.set_tags(tags);
    }

    routes
}

/// Id of the first route with the smallest key.
fn first_minimum<K: Ord>(routes: &[Route], key: impl Fn(&Route) -> K) -> Option<RouteId> {
    let mut best: Option<(RouteId, K)> = None;

    for route in routes {
        let candidate = key(route);
        // Strictly less: ties keep the holder
        let better = match &best {
            Some((_, current)) => candidate < *current,
            None => true,
        };
        if better {
            best = Some((route.id(), candidate));
        }
    }

    best.map(|(id, _)| id)
}
