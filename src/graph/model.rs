//! Abstract graph description and DOT emission.
//!
//! The builder produces a [`TopologyGraph`]: one cluster per worker group,
//! each holding styled nodes and edges. [`TopologyGraph::to_dot`] serializes
//! it to Graphviz DOT for the external renderer.

use super::classify::{BorderStyle, NodeStyle};

/// Layout rank for a node within its cluster: sources on the left, sinks on
/// the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRank {
    Source,
    Sink,
}

/// One rendered endpoint.
#[derive(Debug, Clone)]
pub struct Node {
    /// Graph-wide unique id, namespaced by group and role.
    pub id: String,
    pub rank: NodeRank,
    pub style: NodeStyle,
}

/// One rendered connection.
#[derive(Debug, Clone)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub label: String,
    pub pen_width: f64,
    pub color: &'static str,
}

/// All nodes and edges belonging to one worker group.
#[derive(Debug, Clone)]
pub struct Cluster {
    pub id: String,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

/// The complete graph description, ready for the renderer.
#[derive(Debug, Clone)]
pub struct TopologyGraph {
    pub clusters: Vec<Cluster>,
}

/// Deterministic node id for a source endpoint.
pub fn source_node_id(group_id: &str, endpoint_id: &str) -> String {
    format!("{}__in__{}", group_id, endpoint_id)
}

/// Deterministic node id for a destination endpoint. Role-qualified so the
/// same literal id can exist as both a source and a destination.
pub fn destination_node_id(group_id: &str, endpoint_id: &str) -> String {
    format!("{}__out__{}", group_id, endpoint_id)
}

impl TopologyGraph {
    /// Serialize to Graphviz DOT.
    ///
    /// Each worker group becomes an isolated `cluster_*` subgraph; sources
    /// are pinned to `rank=source` and destinations to `rank=sink` so data
    /// flows left to right.
    pub fn to_dot(&self) -> String {
        let mut dot = String::from("digraph topology {\n");
        dot.push_str("  rankdir=LR;\n");
        dot.push_str("  splines=polyline;\n");
        dot.push_str("  nodesep=0.5;\n");
        dot.push_str("  ranksep=1.5;\n");
        dot.push_str("  node [shape=box];\n");

        for cluster in &self.clusters {
            dot.push('\n');
            dot.push_str(&format!("  subgraph \"cluster_{}\" {{\n", escape(&cluster.id)));
            dot.push_str(&format!("    label=\"{}\";\n", escape(&cluster.id)));

            for node in &cluster.nodes {
                dot.push_str(&format!(
                    "    \"{}\" [label=\"{}\", style=\"{}\", fillcolor=\"{}\", color=\"{}\", penwidth={}];\n",
                    escape(&node.id),
                    escape(&node.style.label),
                    dot_node_style(node.style.border_style),
                    node.style.fill_color,
                    node.style.border_color,
                    node.style.pen_width,
                ));
            }

            write_rank_group(&mut dot, cluster, NodeRank::Source, "source");
            write_rank_group(&mut dot, cluster, NodeRank::Sink, "sink");

            for edge in &cluster.edges {
                dot.push_str(&format!(
                    "    \"{}\" -> \"{}\" [label=\"{}\", penwidth={}, color=\"{}\"];\n",
                    escape(&edge.from),
                    escape(&edge.to),
                    escape(&edge.label),
                    edge.pen_width,
                    edge.color,
                ));
            }

            dot.push_str("  }\n");
        }

        dot.push_str("}\n");
        dot
    }
}

fn write_rank_group(dot: &mut String, cluster: &Cluster, rank: NodeRank, name: &str) {
    let members: Vec<&Node> = cluster.nodes.iter().filter(|n| n.rank == rank).collect();
    if members.is_empty() {
        return;
    }
    dot.push_str(&format!("    {{ rank={};", name));
    for node in members {
        dot.push_str(&format!(" \"{}\";", escape(&node.id)));
    }
    dot.push_str(" }\n");
}

fn dot_node_style(border: BorderStyle) -> &'static str {
    match border {
        BorderStyle::Solid => "rounded,filled",
        BorderStyle::Dashed => "rounded,filled,dashed",
        BorderStyle::Bold => "rounded,filled,bold",
    }
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}
