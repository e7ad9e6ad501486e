//! Node classification and styling.
//!
//! Decides, per endpoint, whether it renders as disabled, orphaned, degraded
//! or healthy, and produces the node's colors, border and label.

use crate::api::{Endpoint, HealthRecord, StatusRecord};

/// Health thresholds, as percentages of errored/dropped events.
#[derive(Debug, Clone)]
pub struct Thresholds {
    /// Error or drop rate above which an endpoint shows as warning.
    pub warning_pct: f64,
    /// Error or drop rate above which an endpoint shows as critical.
    pub critical_pct: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            warning_pct: 5.0,
            critical_pct: 10.0,
        }
    }
}

/// Health status for an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HealthStatus {
    Healthy,
    Warning,
    Critical,
}

impl HealthStatus {
    /// Compute health from an optional health record.
    ///
    /// A missing record means healthy; the worst of error rate and drop rate
    /// decides the band, with strict greater-than at both thresholds.
    pub fn from_record(record: Option<&HealthRecord>, thresholds: &Thresholds) -> Self {
        let Some(record) = record else {
            return HealthStatus::Healthy;
        };
        let worst = record
            .error_rate
            .unwrap_or(0.0)
            .max(record.drop_rate.unwrap_or(0.0));

        if worst > thresholds.critical_pct {
            HealthStatus::Critical
        } else if worst > thresholds.warning_pct {
            HealthStatus::Warning
        } else {
            HealthStatus::Healthy
        }
    }
}

/// Which side of the pipeline an endpoint sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointRole {
    Source,
    Destination,
}

impl EndpointRole {
    fn default_fill(self) -> &'static str {
        match self {
            EndpointRole::Source => colors::SOURCE_FILL,
            EndpointRole::Destination => colors::DESTINATION_FILL,
        }
    }
}

/// Border rendering for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderStyle {
    Solid,
    Dashed,
    Bold,
}

/// Computed visual encoding for one endpoint node.
#[derive(Debug, Clone)]
pub struct NodeStyle {
    pub fill_color: &'static str,
    pub border_style: BorderStyle,
    pub border_color: &'static str,
    pub pen_width: f64,
    pub label: String,
}

/// Node color palette.
pub mod colors {
    pub const SOURCE_FILL: &str = "lightblue";
    pub const DESTINATION_FILL: &str = "lightgreen";
    pub const WARNING_FILL: &str = "khaki";
    pub const CRITICAL_FILL: &str = "lightcoral";
    pub const ORPHAN_FILL: &str = "orange";
    pub const DISABLED_FILL: &str = "lightgray";

    pub const BORDER: &str = "black";
    pub const DISABLED_BORDER: &str = "gray";
    pub const ORPHAN_BORDER: &str = "red3";
}

/// Classify an endpoint into its visual style.
///
/// Precedence: disabled beats everything (health and orphan status are not
/// evaluated), then orphan, then health-derived color, then the role default.
/// Pure function of its inputs.
pub fn classify(
    endpoint: &Endpoint,
    health: Option<&HealthRecord>,
    status: Option<&StatusRecord>,
    is_orphan: bool,
    role: EndpointRole,
    thresholds: &Thresholds,
) -> NodeStyle {
    if endpoint.disabled {
        return NodeStyle {
            fill_color: colors::DISABLED_FILL,
            border_style: BorderStyle::Dashed,
            border_color: colors::DISABLED_BORDER,
            pen_width: 0.5,
            label: compose_label(endpoint, status, "[DISABLED] "),
        };
    }

    if is_orphan {
        return NodeStyle {
            fill_color: colors::ORPHAN_FILL,
            border_style: BorderStyle::Bold,
            border_color: colors::ORPHAN_BORDER,
            pen_width: 2.0,
            label: compose_label(endpoint, status, "[ORPHAN] "),
        };
    }

    let fill_color = match HealthStatus::from_record(health, thresholds) {
        HealthStatus::Critical => colors::CRITICAL_FILL,
        HealthStatus::Warning => colors::WARNING_FILL,
        HealthStatus::Healthy => role.default_fill(),
    };

    NodeStyle {
        fill_color,
        border_style: BorderStyle::Solid,
        border_color: colors::BORDER,
        pen_width: 1.0,
        label: compose_label(endpoint, status, ""),
    }
}

/// Build the node label: marker prefix + id, then EPS (preferred) or raw
/// event count, then the free-text description after a separator line.
fn compose_label(endpoint: &Endpoint, status: Option<&StatusRecord>, prefix: &str) -> String {
    let mut label = format!("{}{}", prefix, endpoint.id);

    if let Some(status) = status {
        if let Some(eps) = status.eps {
            label.push_str(&format!("\n{:.2} eps", eps));
        } else if let Some(events) = status.events {
            label.push_str(&format!("\n{} events", events));
        }
    }

    if let Some(description) = endpoint.description.as_deref() {
        if !description.is_empty() {
            label.push_str("\n------------\n");
            label.push_str(description);
        }
    }

    label
}
