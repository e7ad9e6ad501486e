//! Graph assembly.
//!
//! Pulls raw records from a [`TopologyFetcher`] and composes the classifier,
//! orphan detector, edge styler and complexity scorer into one
//! [`TopologyGraph`]. An empty group list is the only hard failure; every
//! per-group feed degrades to "no data" on error so a flaky status endpoint
//! cannot take down the whole diagram.

use std::collections::HashMap;
use std::future::Future;

use thiserror::Error;
use tracing::{debug, warn};

use crate::api::{ApiError, Endpoint, PipelineRecord, StatusRecord, TopologyFetcher};

use super::classify::{classify, EndpointRole, Thresholds};
use super::complexity::{self, Complexity};
use super::edge::style_edge;
use super::model::{destination_node_id, source_node_id, Cluster, Edge, Node, NodeRank, TopologyGraph};
use super::orphan::{orphan_destinations, orphan_sources};

/// Errors from a graph build.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The platform reported no worker groups; there is nothing to draw.
    #[error("no worker groups found")]
    NoWorkerGroups,

    /// The group listing itself failed. Per-group feeds never surface here.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Build the full topology graph: one cluster per worker group.
pub async fn build_graph(
    fetcher: &dyn TopologyFetcher,
    thresholds: &Thresholds,
) -> Result<TopologyGraph, BuildError> {
    let groups = fetcher.fetch_groups().await?;
    if groups.is_empty() {
        return Err(BuildError::NoWorkerGroups);
    }

    let mut clusters = Vec::with_capacity(groups.len());
    for group in &groups {
        debug!(group = %group.id, "building cluster");
        clusters.push(build_cluster(fetcher, &group.id, thresholds).await);
    }

    Ok(TopologyGraph { clusters })
}

/// Run one feed fetch, substituting the empty value on failure.
///
/// All recovered failures are logged once here so the five call sites don't
/// each repeat the catch logic.
async fn feed_or_empty<T, F>(feed: &str, group_id: &str, fut: F) -> T
where
    T: Default,
    F: Future<Output = Result<T, ApiError>>,
{
    match fut.await {
        Ok(value) => value,
        Err(e) => {
            warn!(feed, group = group_id, error = %e, "feed unavailable, continuing without it");
            T::default()
        }
    }
}

async fn build_cluster(
    fetcher: &dyn TopologyFetcher,
    group_id: &str,
    thresholds: &Thresholds,
) -> Cluster {
    // Independent reads; fetched concurrently for latency only.
    let (sources, destinations, source_status, destination_status, source_health, destination_health, pipeline_status, pipelines) = tokio::join!(
        feed_or_empty("sources", group_id, fetcher.fetch_sources(group_id)),
        feed_or_empty("destinations", group_id, fetcher.fetch_destinations(group_id)),
        feed_or_empty("source_status", group_id, fetcher.fetch_source_status(group_id)),
        feed_or_empty("destination_status", group_id, fetcher.fetch_destination_status(group_id)),
        feed_or_empty("source_health", group_id, fetcher.fetch_source_health(group_id)),
        feed_or_empty("destination_health", group_id, fetcher.fetch_destination_health(group_id)),
        feed_or_empty("pipeline_status", group_id, fetcher.fetch_pipeline_status(group_id)),
        feed_or_empty("pipelines", group_id, fetcher.fetch_pipelines(group_id)),
    );

    let source_status_by_id = index_by_id(&source_status);
    let destination_status_by_id = index_by_id(&destination_status);
    let source_health_by_id: HashMap<&str, _> =
        source_health.iter().map(|h| (h.id.as_str(), h)).collect();
    let destination_health_by_id: HashMap<&str, _> = destination_health
        .iter()
        .map(|h| (h.id.as_str(), h))
        .collect();
    let pipeline_status_by_id = index_by_id(&pipeline_status);
    let pipeline_summary_by_id: HashMap<&str, &PipelineRecord> =
        pipelines.iter().map(|p| (p.id.as_str(), p)).collect();

    let source_orphans = orphan_sources(&sources);
    let destination_orphans = orphan_destinations(&destinations, &sources);

    // Normalization denominator for edge styling: recomputed per group over
    // both endpoint status feeds.
    let max_eps = source_status
        .iter()
        .chain(destination_status.iter())
        .filter_map(|s| s.eps)
        .fold(0.0_f64, f64::max);

    let complexity_by_pipeline =
        score_pipelines(fetcher, group_id, &sources, &pipeline_summary_by_id).await;

    let mut nodes = Vec::new();

    // Enabled endpoints first, then disabled ones per role with faded styling.
    for source in sources.iter().filter(|s| !s.disabled) {
        nodes.push(Node {
            id: source_node_id(group_id, &source.id),
            rank: NodeRank::Source,
            style: classify(
                source,
                source_health_by_id.get(source.id.as_str()).copied(),
                source_status_by_id.get(source.id.as_str()).copied(),
                source_orphans.contains(&source.id),
                EndpointRole::Source,
                thresholds,
            ),
        });
    }
    for destination in destinations.iter().filter(|d| !d.disabled) {
        nodes.push(Node {
            id: destination_node_id(group_id, &destination.id),
            rank: NodeRank::Sink,
            style: classify(
                destination,
                destination_health_by_id.get(destination.id.as_str()).copied(),
                destination_status_by_id.get(destination.id.as_str()).copied(),
                destination_orphans.contains(&destination.id),
                EndpointRole::Destination,
                thresholds,
            ),
        });
    }
    for source in sources.iter().filter(|s| s.disabled) {
        nodes.push(Node {
            id: source_node_id(group_id, &source.id),
            rank: NodeRank::Source,
            style: classify(source, None, None, false, EndpointRole::Source, thresholds),
        });
    }
    for destination in destinations.iter().filter(|d| d.disabled) {
        nodes.push(Node {
            id: destination_node_id(group_id, &destination.id),
            rank: NodeRank::Sink,
            style: classify(
                destination,
                None,
                None,
                false,
                EndpointRole::Destination,
                thresholds,
            ),
        });
    }

    // One edge per (enabled source, connection). A connection may reference
    // a destination with no record in this group; the edge is still emitted
    // and the target simply has no styled node.
    let mut edges = Vec::new();
    for source in sources.iter().filter(|s| !s.disabled) {
        for connection in &source.connections {
            let eps = pipeline_status_by_id
                .get(connection.pipeline_id.as_str())
                .and_then(|s| s.eps);
            let style = style_edge(eps, max_eps);

            let mut label = connection.pipeline_id.clone();
            if let Some(eps) = eps {
                if eps > 0.0 {
                    label.push_str(&format!("\n{:.2} eps", eps));
                }
            }
            if let Some(complexity) = complexity_by_pipeline.get(&connection.pipeline_id) {
                if complexity.annotates_edge() {
                    label.push('\n');
                    label.push_str(&complexity.label);
                }
            }

            edges.push(Edge {
                from: source_node_id(group_id, &source.id),
                to: destination_node_id(group_id, &connection.output_id),
                label,
                pen_width: style.pen_width,
                color: style.color,
            });
        }
    }

    Cluster {
        id: group_id.to_string(),
        nodes,
        edges,
    }
}

/// Score every pipeline referenced by an enabled source's connections.
///
/// Prefers the detailed record (with its full function list); a failed
/// detail fetch degrades to the summary record already in hand, and a
/// pipeline absent from both scores 0.
async fn score_pipelines(
    fetcher: &dyn TopologyFetcher,
    group_id: &str,
    sources: &[Endpoint],
    summaries: &HashMap<&str, &PipelineRecord>,
) -> HashMap<String, Complexity> {
    let mut scores: HashMap<String, Complexity> = HashMap::new();

    for source in sources.iter().filter(|s| !s.disabled) {
        for connection in &source.connections {
            let pipeline_id = connection.pipeline_id.as_str();
            if scores.contains_key(pipeline_id) {
                continue;
            }

            let complexity = match fetcher.fetch_pipeline_detail(group_id, pipeline_id).await {
                Ok(detail) => complexity::score(&detail),
                Err(e) => {
                    warn!(
                        group = group_id,
                        pipeline = pipeline_id,
                        error = %e,
                        "pipeline detail unavailable, scoring summary record"
                    );
                    summaries
                        .get(pipeline_id)
                        .map(|summary| complexity::score(summary))
                        .unwrap_or_default()
                }
            };
            scores.insert(pipeline_id.to_string(), complexity);
        }
    }

    scores
}

fn index_by_id(records: &[StatusRecord]) -> HashMap<&str, &StatusRecord> {
    records.iter().map(|r| (r.id.as_str(), r)).collect()
}
