//! Edge styling from throughput.
//!
//! Maps a connection's measured EPS, relative to the group-wide maximum, to a
//! stroke width and a color band.

/// Edge color palette, hottest band first.
pub mod colors {
    pub const HOT: &str = "red3";
    pub const HIGH: &str = "darkorange";
    pub const MEDIUM: &str = "dodgerblue";
    pub const IDLE: &str = "gray60";
}

/// Computed visual encoding for one edge.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeStyle {
    pub pen_width: f64,
    pub color: &'static str,
}

/// Style an edge from its EPS relative to the group maximum.
///
/// No data (or a zero denominator) is not an error: it yields the minimal
/// stroke and the neutral color. Otherwise the stroke scales linearly from 1
/// to 5 with the capped ratio, and the band thresholds are strict
/// greater-than, so a ratio of exactly 0.8 is in the next lower band.
pub fn style_edge(eps: Option<f64>, max_eps: f64) -> EdgeStyle {
    let eps = eps.unwrap_or(0.0);
    if eps <= 0.0 || max_eps <= 0.0 {
        return EdgeStyle {
            pen_width: 1.0,
            color: colors::IDLE,
        };
    }

    let ratio = (eps / max_eps).min(1.0);
    let pen_width = ((1.0 + 4.0 * ratio) * 100.0).round() / 100.0;

    let color = if ratio > 0.8 {
        colors::HOT
    } else if ratio > 0.5 {
        colors::HIGH
    } else if ratio > 0.2 {
        colors::MEDIUM
    } else {
        colors::IDLE
    };

    EdgeStyle { pen_width, color }
}
