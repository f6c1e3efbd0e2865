//! Geo/score ranking of discovery candidates
//!
//! Candidates are ordered by great-circle distance from the requester, nearest
//! first. Equal distances fall back to the attractiveness score (highest first)
//! and finally to the user id so the order is stable across queries.

use std::cmp::Ordering;

use crate::entities::{Candidate, ScoredCandidate};
use crate::value_objects::Location;

/// Mean Earth radius in kilometres
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points in kilometres
pub fn haversine_km(from: Location, to: Location) -> f64 {
    let dlat = (to.latitude - from.latitude).to_radians();
    let dlon = (to.longitude - from.longitude).to_radians();
    let a = (dlat / 2.0).sin().powi(2)
        + from.latitude.to_radians().cos()
            * to.latitude.to_radians().cos()
            * (dlon / 2.0).sin().powi(2);
    // Rounding can push `a` a hair above 1 for antipodal points.
    let c = 2.0 * a.sqrt().min(1.0).asin();
    EARTH_RADIUS_KM * c
}

/// Distance between two optional locations.
///
/// A missing location is measured from (0, 0).
pub fn distance_between(from: Option<Location>, to: Option<Location>) -> f64 {
    haversine_km(
        from.unwrap_or(Location::ORIGIN),
        to.unwrap_or(Location::ORIGIN),
    )
}

/// Ranking order: distance ascending, score descending, id ascending
pub fn compare_candidates(a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
    a.distance_km
        .total_cmp(&b.distance_km)
        .then_with(|| b.attractiveness.cmp(&a.attractiveness))
        .then_with(|| a.user.id.cmp(&b.user.id))
}

/// Score candidates against the requester's location and sort them
pub fn rank(origin: Option<Location>, candidates: Vec<Candidate>) -> Vec<ScoredCandidate> {
    let mut scored: Vec<ScoredCandidate> = candidates
        .into_iter()
        .map(|c| ScoredCandidate {
            distance_km: distance_between(origin, c.user.location),
            attractiveness: c.attractiveness,
            user: c.user,
        })
        .collect();
    scored.sort_by(compare_candidates);
    scored
}
