//! Topology-to-diagram transformation.
//!
//! Converts raw management-API records into a styled directed graph:
//! classification ([`classify`]), orphan detection ([`orphan`]), edge styling
//! ([`edge`]), complexity scoring ([`complexity`]), and the orchestrating
//! builder ([`build`]). The output model and its DOT serialization live in
//! [`model`].

pub mod build;
pub mod classify;
pub mod complexity;
pub mod edge;
pub mod model;
pub mod orphan;

pub use build::{build_graph, BuildError};
pub use classify::{classify, EndpointRole, HealthStatus, NodeStyle, Thresholds};
pub use complexity::{score, Complexity, ComplexityTier};
pub use edge::{style_edge, EdgeStyle};
pub use model::{Cluster, Edge, Node, NodeRank, TopologyGraph};
pub use orphan::{orphan_destinations, orphan_sources};
