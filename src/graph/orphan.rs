//! Orphan detection.
//!
//! Flags sources that route nowhere and destinations that nothing routes to.
//! Disabled endpoints are excluded: they render, but they take no part in
//! orphan analysis, and their connections contribute no active routing.

use std::collections::HashSet;

use crate::api::Endpoint;

/// Sources that are enabled but have no outgoing connections.
pub fn orphan_sources(sources: &[Endpoint]) -> HashSet<String> {
    sources
        .iter()
        .filter(|s| !s.disabled && s.connections.is_empty())
        .map(|s| s.id.clone())
        .collect()
}

/// Destinations never targeted by any enabled source's connections.
///
/// A destination referenced only by disabled sources still counts as an
/// orphan, matching edge generation: disabled sources produce no edges, so
/// nothing actually flows into it.
pub fn orphan_destinations(destinations: &[Endpoint], sources: &[Endpoint]) -> HashSet<String> {
    let targeted: HashSet<&str> = sources
        .iter()
        .filter(|s| !s.disabled)
        .flat_map(|s| s.connections.iter().map(|c| c.output_id.as_str()))
        .collect();

    destinations
        .iter()
        .filter(|d| !d.disabled && !targeted.contains(d.id.as_str()))
        .map(|d| d.id.clone())
        .collect()
}
