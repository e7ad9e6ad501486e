//! Raw record types returned by the management API.
//!
//! These types match the JSON produced by the pipeline platform's management
//! API. They are deliberately loose: almost every field beyond the id is
//! optional or defaulted, because different platform versions omit different
//! fields and a missing field must never break a graph build.

use serde::{Deserialize, Serialize};

/// List responses are wrapped in an `items` envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemList<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// A worker group. The unit of clustering in the rendered graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerGroup {
    pub id: String,
}

/// A source or destination as configured on a worker group.
///
/// Sources carry their outgoing connections inline; destinations always have
/// an empty connection list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endpoint {
    pub id: String,

    #[serde(default)]
    pub disabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub connections: Vec<Connection>,
}

/// A routing from a source to a destination through a pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    #[serde(rename = "output")]
    pub output_id: String,

    /// Pipeline handling this connection. The platform treats a missing
    /// pipeline as the built-in passthrough.
    #[serde(rename = "pipeline", default = "default_pipeline")]
    pub pipeline_id: String,
}

fn default_pipeline() -> String {
    "passthru".to_string()
}

/// Throughput status for one endpoint or pipeline.
///
/// A missing record means "no recent traffic data", which is distinct from a
/// record reporting zero traffic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusRecord {
    pub id: String,

    /// Events per second, when the platform has a recent rate sample.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eps: Option<f64>,

    /// Raw event count, reported when no rate is available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<u64>,
}

/// Health metrics for one endpoint. Rates are percentages in [0, 100].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthRecord {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_rate: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drop_rate: Option<f64>,
}

/// Pipeline metadata, used for complexity scoring.
///
/// The function list appears in several shapes depending on which API route
/// produced the record: a top-level list, a bare count, or a list nested
/// under `conf`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineRecord {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub functions: Option<Vec<PipelineFunction>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_count: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conf: Option<PipelineConf>,
}

/// Configuration sub-object of a pipeline record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConf {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub functions: Option<Vec<PipelineFunction>>,
}

/// A single processing function inside a pipeline. Only its presence matters
/// for scoring, so everything except the id is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineFunction {
    #[serde(default)]
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_source_with_connections() {
        let json = r#"{
            "items": [
                {
                    "id": "in_syslog",
                    "description": "Syslog intake",
                    "connections": [
                        { "output": "out_s3", "pipeline": "main" },
                        { "output": "out_archive" }
                    ]
                },
                { "id": "in_http", "disabled": true }
            ]
        }"#;

        let list: ItemList<Endpoint> = serde_json::from_str(json).unwrap();
        assert_eq!(list.items.len(), 2);

        let syslog = &list.items[0];
        assert!(!syslog.disabled);
        assert_eq!(syslog.description.as_deref(), Some("Syslog intake"));
        assert_eq!(syslog.connections.len(), 2);
        assert_eq!(syslog.connections[0].pipeline_id, "main");
        // Missing pipeline falls back to the platform passthrough
        assert_eq!(syslog.connections[1].pipeline_id, "passthru");

        let http = &list.items[1];
        assert!(http.disabled);
        assert!(http.connections.is_empty());
    }

    #[test]
    fn test_deserialize_status_and_health() {
        let status: StatusRecord =
            serde_json::from_str(r#"{ "id": "in_syslog", "eps": 123.456 }"#).unwrap();
        assert_eq!(status.eps, Some(123.456));
        assert_eq!(status.events, None);

        let health: HealthRecord =
            serde_json::from_str(r#"{ "id": "in_syslog", "error_rate": 7.5 }"#).unwrap();
        assert_eq!(health.error_rate, Some(7.5));
        assert_eq!(health.drop_rate, None);
    }

    #[test]
    fn test_deserialize_pipeline_shapes() {
        let top_level: PipelineRecord = serde_json::from_str(
            r#"{ "id": "main", "functions": [{ "id": "eval" }, { "id": "drop" }] }"#,
        )
        .unwrap();
        assert_eq!(top_level.functions.as_ref().unwrap().len(), 2);

        let count_only: PipelineRecord =
            serde_json::from_str(r#"{ "id": "main", "function_count": 7 }"#).unwrap();
        assert_eq!(count_only.function_count, Some(7));

        let nested: PipelineRecord = serde_json::from_str(
            r#"{ "id": "main", "conf": { "functions": [{ "id": "mask" }] } }"#,
        )
        .unwrap();
        assert_eq!(nested.conf.unwrap().functions.unwrap().len(), 1);
    }
}
