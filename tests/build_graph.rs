//! End-to-end graph build tests against a canned fetcher.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;

use pipewatch::api::{
    ApiError, Connection, Endpoint, HealthRecord, PipelineFunction, PipelineRecord, StatusRecord,
    TopologyFetcher, WorkerGroup,
};
use pipewatch::graph::classify::colors;
use pipewatch::graph::{build_graph, BuildError, NodeRank, Thresholds};

/// Fetcher serving canned records for a single worker group. Any feed named
/// in `failing_feeds` returns an error instead.
#[derive(Debug, Default)]
struct MockFetcher {
    groups: Vec<WorkerGroup>,
    sources: Vec<Endpoint>,
    destinations: Vec<Endpoint>,
    source_status: Vec<StatusRecord>,
    destination_status: Vec<StatusRecord>,
    source_health: Vec<HealthRecord>,
    destination_health: Vec<HealthRecord>,
    pipeline_status: Vec<StatusRecord>,
    pipelines: Vec<PipelineRecord>,
    pipeline_details: HashMap<String, PipelineRecord>,
    failing_feeds: HashSet<&'static str>,
}

impl MockFetcher {
    fn feed<T: Clone>(&self, name: &'static str, data: &[T]) -> Result<Vec<T>, ApiError> {
        if self.failing_feeds.contains(name) {
            Err(ApiError::Http(format!("simulated {} failure", name)))
        } else {
            Ok(data.to_vec())
        }
    }
}

#[async_trait]
impl TopologyFetcher for MockFetcher {
    async fn fetch_groups(&self) -> Result<Vec<WorkerGroup>, ApiError> {
        self.feed("groups", &self.groups)
    }

    async fn fetch_sources(&self, _group_id: &str) -> Result<Vec<Endpoint>, ApiError> {
        self.feed("sources", &self.sources)
    }

    async fn fetch_destinations(&self, _group_id: &str) -> Result<Vec<Endpoint>, ApiError> {
        self.feed("destinations", &self.destinations)
    }

    async fn fetch_source_status(&self, _group_id: &str) -> Result<Vec<StatusRecord>, ApiError> {
        self.feed("source_status", &self.source_status)
    }

    async fn fetch_destination_status(
        &self,
        _group_id: &str,
    ) -> Result<Vec<StatusRecord>, ApiError> {
        self.feed("destination_status", &self.destination_status)
    }

    async fn fetch_source_health(&self, _group_id: &str) -> Result<Vec<HealthRecord>, ApiError> {
        self.feed("source_health", &self.source_health)
    }

    async fn fetch_destination_health(
        &self,
        _group_id: &str,
    ) -> Result<Vec<HealthRecord>, ApiError> {
        self.feed("destination_health", &self.destination_health)
    }

    async fn fetch_pipeline_status(&self, _group_id: &str) -> Result<Vec<StatusRecord>, ApiError> {
        self.feed("pipeline_status", &self.pipeline_status)
    }

    async fn fetch_pipelines(&self, _group_id: &str) -> Result<Vec<PipelineRecord>, ApiError> {
        self.feed("pipelines", &self.pipelines)
    }

    async fn fetch_pipeline_detail(
        &self,
        _group_id: &str,
        pipeline_id: &str,
    ) -> Result<PipelineRecord, ApiError> {
        if self.failing_feeds.contains("pipeline_detail") {
            return Err(ApiError::Http("simulated detail failure".to_string()));
        }
        self.pipeline_details
            .get(pipeline_id)
            .cloned()
            .ok_or_else(|| ApiError::Http(format!("Pipeline '{}' not found", pipeline_id)))
    }
}

fn group(id: &str) -> WorkerGroup {
    WorkerGroup { id: id.to_string() }
}

fn source(id: &str, disabled: bool, connections: &[(&str, &str)]) -> Endpoint {
    Endpoint {
        id: id.to_string(),
        disabled,
        description: None,
        connections: connections
            .iter()
            .map(|(output, pipeline)| Connection {
                output_id: output.to_string(),
                pipeline_id: pipeline.to_string(),
            })
            .collect(),
    }
}

fn destination(id: &str, disabled: bool) -> Endpoint {
    Endpoint {
        id: id.to_string(),
        disabled,
        description: None,
        connections: Vec::new(),
    }
}

fn status(id: &str, eps: f64) -> StatusRecord {
    StatusRecord {
        id: id.to_string(),
        eps: Some(eps),
        events: None,
    }
}

fn pipeline_with_functions(id: &str, count: usize) -> PipelineRecord {
    PipelineRecord {
        id: id.to_string(),
        functions: Some(
            (0..count)
                .map(|i| PipelineFunction {
                    id: format!("fn{}", i),
                })
                .collect(),
        ),
        ..Default::default()
    }
}

/// One group, one connected source/destination pair through pipeline "main".
fn simple_topology() -> MockFetcher {
    MockFetcher {
        groups: vec![group("default")],
        sources: vec![source("in_syslog", false, &[("out_s3", "main")])],
        destinations: vec![destination("out_s3", false)],
        ..Default::default()
    }
}

#[tokio::test]
async fn test_simple_topology_renders_cluster_nodes_and_edge() {
    let fetcher = simple_topology();
    let graph = build_graph(&fetcher, &Thresholds::default()).await.unwrap();

    assert_eq!(graph.clusters.len(), 1);
    let cluster = &graph.clusters[0];
    assert_eq!(cluster.id, "default");

    let ids: Vec<&str> = cluster.nodes.iter().map(|n| n.id.as_str()).collect();
    assert!(ids.contains(&"default__in__in_syslog"));
    assert!(ids.contains(&"default__out__out_s3"));

    assert_eq!(cluster.edges.len(), 1);
    let edge = &cluster.edges[0];
    assert_eq!(edge.from, "default__in__in_syslog");
    assert_eq!(edge.to, "default__out__out_s3");
    assert_eq!(edge.label, "main");

    // And the DOT output carries all of it
    let dot = graph.to_dot();
    assert!(dot.contains("subgraph \"cluster_default\""));
    assert!(dot.contains("\"default__in__in_syslog\" -> \"default__out__out_s3\""));
    assert!(dot.contains("label=\"main\""));
}

#[tokio::test]
async fn test_empty_group_list_fails_the_build() {
    let fetcher = MockFetcher::default();
    let err = build_graph(&fetcher, &Thresholds::default())
        .await
        .unwrap_err();

    assert!(matches!(err, BuildError::NoWorkerGroups));
    assert!(err.to_string().contains("no worker groups found"));
}

#[tokio::test]
async fn test_group_list_fetch_failure_propagates() {
    let mut fetcher = simple_topology();
    fetcher.failing_feeds.insert("groups");

    let err = build_graph(&fetcher, &Thresholds::default())
        .await
        .unwrap_err();
    assert!(matches!(err, BuildError::Api(_)));
}

#[tokio::test]
async fn test_node_label_rounds_eps_to_two_decimals() {
    let mut fetcher = simple_topology();
    fetcher.source_status = vec![status("in_syslog", 123.456)];

    let graph = build_graph(&fetcher, &Thresholds::default()).await.unwrap();
    let node = graph.clusters[0]
        .nodes
        .iter()
        .find(|n| n.id == "default__in__in_syslog")
        .unwrap();

    assert!(node.style.label.contains("123.46"));
}

#[tokio::test]
async fn test_untargeted_destination_gets_alert_styling() {
    let mut fetcher = simple_topology();
    fetcher.destinations.push(destination("out_orphan", false));

    let graph = build_graph(&fetcher, &Thresholds::default()).await.unwrap();
    let node = graph.clusters[0]
        .nodes
        .iter()
        .find(|n| n.id == "default__out__out_orphan")
        .unwrap();

    assert_eq!(node.style.fill_color, colors::ORPHAN_FILL);
    assert!(node.style.label.starts_with("[ORPHAN] out_orphan"));
}

#[tokio::test]
async fn test_feed_failures_degrade_to_no_data() {
    let mut fetcher = simple_topology();
    fetcher.source_status = vec![status("in_syslog", 10.0)];
    for feed in [
        "source_status",
        "destination_status",
        "source_health",
        "destination_health",
        "pipeline_status",
        "pipelines",
        "pipeline_detail",
    ] {
        fetcher.failing_feeds.insert(feed);
    }

    // Everything except the topology itself is unavailable; the graph still
    // builds with the same shape, just without the derived annotations.
    let graph = build_graph(&fetcher, &Thresholds::default()).await.unwrap();
    let cluster = &graph.clusters[0];
    assert_eq!(cluster.nodes.len(), 2);
    assert_eq!(cluster.edges.len(), 1);

    let node = cluster
        .nodes
        .iter()
        .find(|n| n.id == "default__in__in_syslog")
        .unwrap();
    assert!(!node.style.label.contains("eps"));
}

#[tokio::test]
async fn test_disabled_source_renders_but_produces_no_edges() {
    let mut fetcher = simple_topology();
    fetcher.sources = vec![source("in_syslog", true, &[("out_s3", "main")])];

    let graph = build_graph(&fetcher, &Thresholds::default()).await.unwrap();
    let cluster = &graph.clusters[0];

    let node = cluster
        .nodes
        .iter()
        .find(|n| n.id == "default__in__in_syslog")
        .unwrap();
    assert!(node.style.label.starts_with("[DISABLED]"));
    assert!(cluster.edges.is_empty());

    // out_s3 is now only targeted by a disabled source, so it is an orphan
    let out = cluster
        .nodes
        .iter()
        .find(|n| n.id == "default__out__out_s3")
        .unwrap();
    assert_eq!(out.style.fill_color, colors::ORPHAN_FILL);
}

#[tokio::test]
async fn test_edge_styled_from_pipeline_eps_against_group_max() {
    let mut fetcher = simple_topology();
    // Group max EPS comes from the endpoint status feeds
    fetcher.source_status = vec![status("in_syslog", 100.0)];
    fetcher.destination_status = vec![status("out_s3", 40.0)];
    // Edge EPS comes from the pipeline status feed
    fetcher.pipeline_status = vec![status("main", 50.0)];

    let graph = build_graph(&fetcher, &Thresholds::default()).await.unwrap();
    let edge = &graph.clusters[0].edges[0];

    // ratio 0.5 -> width 3, and 0.5 is not in the high band (strict >)
    assert_eq!(edge.pen_width, 3.0);
    assert!(edge.label.contains("50.00 eps"));
}

#[tokio::test]
async fn test_heavy_pipeline_annotates_edge() {
    let mut fetcher = simple_topology();
    fetcher
        .pipeline_details
        .insert("main".to_string(), pipeline_with_functions("main", 7));

    let graph = build_graph(&fetcher, &Thresholds::default()).await.unwrap();
    let edge = &graph.clusters[0].edges[0];
    assert!(edge.label.contains("7 fn"));
}

#[tokio::test]
async fn test_complexity_falls_back_to_summary_record() {
    let mut fetcher = simple_topology();
    fetcher.pipelines = vec![pipeline_with_functions("main", 20)];
    fetcher.failing_feeds.insert("pipeline_detail");

    let graph = build_graph(&fetcher, &Thresholds::default()).await.unwrap();
    let edge = &graph.clusters[0].edges[0];
    assert!(edge.label.contains("20 fn"));
}

#[tokio::test]
async fn test_lightweight_pipeline_is_not_annotated() {
    let mut fetcher = simple_topology();
    fetcher
        .pipeline_details
        .insert("main".to_string(), pipeline_with_functions("main", 3));

    let graph = build_graph(&fetcher, &Thresholds::default()).await.unwrap();
    let edge = &graph.clusters[0].edges[0];
    assert_eq!(edge.label, "main");
}

#[tokio::test]
async fn test_groups_stay_in_separate_clusters() {
    let mut fetcher = simple_topology();
    fetcher.groups.push(group("edge-site"));

    let graph = build_graph(&fetcher, &Thresholds::default()).await.unwrap();
    assert_eq!(graph.clusters.len(), 2);

    // Node ids are namespaced by group, so identical endpoint ids cannot
    // collide across clusters.
    let first: HashSet<&str> = graph.clusters[0].nodes.iter().map(|n| n.id.as_str()).collect();
    let second: HashSet<&str> = graph.clusters[1].nodes.iter().map(|n| n.id.as_str()).collect();
    assert!(first.is_disjoint(&second));
}

#[tokio::test]
async fn test_sources_rank_left_destinations_rank_right() {
    let fetcher = simple_topology();
    let graph = build_graph(&fetcher, &Thresholds::default()).await.unwrap();
    let cluster = &graph.clusters[0];

    let source_node = cluster
        .nodes
        .iter()
        .find(|n| n.id == "default__in__in_syslog")
        .unwrap();
    let sink_node = cluster
        .nodes
        .iter()
        .find(|n| n.id == "default__out__out_s3")
        .unwrap();
    assert_eq!(source_node.rank, NodeRank::Source);
    assert_eq!(sink_node.rank, NodeRank::Sink);
}
