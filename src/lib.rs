//! # pipewatch
//!
//! Visualizes the runtime topology of a data-pipeline platform. It queries
//! the platform's management API for worker groups, their sources,
//! destinations and pipelines, and renders a directed graph annotated with
//! health and throughput signals.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                                                            │
//! │  ┌─────────┐     ┌──────────┐     ┌──────────┐   SVG/PNG   │
//! │  │   api   │────▶│  graph   │────▶│  render  │──▶ bytes    │
//! │  │ (fetch) │     │ (build)  │     │ (dot)    │             │
//! │  └─────────┘     └──────────┘     └──────────┘             │
//! │       ▲                                  ▲                 │
//! │       │          ┌──────────┐            │                 │
//! │       └──────────│  server  │────────────┘                 │
//! │                  │ (HTML /) │                              │
//! │                  └──────────┘                              │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`api`]**: management API access - the [`TopologyFetcher`] trait and
//!   the reqwest-backed [`ManagementClient`]
//! - **[`graph`]**: the core transformation - node classification, orphan
//!   detection, edge styling, pipeline complexity scoring, and the assembler
//!   that composes them into a [`TopologyGraph`]
//! - **[`render`]**: hands DOT to the external Graphviz renderer
//! - **[`server`]**: a single-page HTTP view of the rendered topology
//! - **[`settings`]**: layered file/env configuration
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pipewatch::{build_graph, ManagementClient, Thresholds};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ManagementClient::builder()
//!         .base_url("http://localhost:9000")
//!         .build();
//!
//!     let graph = build_graph(&client, &Thresholds::default()).await?;
//!     print!("{}", graph.to_dot());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod graph;
pub mod render;
pub mod server;
pub mod settings;

// Re-export main types for convenience
pub use api::{ApiError, ManagementClient, TopologyFetcher};
pub use graph::{build_graph, BuildError, HealthStatus, Thresholds, TopologyGraph};
pub use render::RenderError;
pub use settings::Settings;
