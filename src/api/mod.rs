//! Management API access.
//!
//! The graph builder talks to the platform through the [`TopologyFetcher`]
//! trait rather than a concrete client, so tests (and alternative backends)
//! can supply canned topology data. [`ManagementClient`] is the real
//! implementation backed by the platform's REST API.

mod client;
mod types;

pub use client::{ApiError, ManagementClient, ManagementClientBuilder};
pub use types::{
    Connection, Endpoint, HealthRecord, ItemList, PipelineConf, PipelineFunction, PipelineRecord,
    StatusRecord, WorkerGroup,
};

use async_trait::async_trait;

/// Trait for fetching raw topology records for worker groups.
///
/// Every method may fail independently; the graph builder treats any failure
/// except [`fetch_groups`](TopologyFetcher::fetch_groups) as "no data" for
/// that feed and keeps going.
#[async_trait]
pub trait TopologyFetcher: Send + Sync {
    /// List all worker groups.
    async fn fetch_groups(&self) -> Result<Vec<WorkerGroup>, ApiError>;

    /// List the sources configured on a group.
    async fn fetch_sources(&self, group_id: &str) -> Result<Vec<Endpoint>, ApiError>;

    /// List the destinations configured on a group.
    async fn fetch_destinations(&self, group_id: &str) -> Result<Vec<Endpoint>, ApiError>;

    /// Throughput status per source, keyed by source id.
    async fn fetch_source_status(&self, group_id: &str) -> Result<Vec<StatusRecord>, ApiError>;

    /// Throughput status per destination, keyed by destination id.
    async fn fetch_destination_status(&self, group_id: &str)
        -> Result<Vec<StatusRecord>, ApiError>;

    /// Health metrics per source.
    async fn fetch_source_health(&self, group_id: &str) -> Result<Vec<HealthRecord>, ApiError>;

    /// Health metrics per destination.
    async fn fetch_destination_health(&self, group_id: &str)
        -> Result<Vec<HealthRecord>, ApiError>;

    /// Throughput status per pipeline, keyed by pipeline id.
    async fn fetch_pipeline_status(&self, group_id: &str) -> Result<Vec<StatusRecord>, ApiError>;

    /// Summary records for all pipelines on a group.
    async fn fetch_pipelines(&self, group_id: &str) -> Result<Vec<PipelineRecord>, ApiError>;

    /// Detailed record for one pipeline, including its function list.
    async fn fetch_pipeline_detail(
        &self,
        group_id: &str,
        pipeline_id: &str,
    ) -> Result<PipelineRecord, ApiError>;
}

#[async_trait]
impl TopologyFetcher for ManagementClient {
    async fn fetch_groups(&self) -> Result<Vec<WorkerGroup>, ApiError> {
        ManagementClient::fetch_groups(self).await
    }

    async fn fetch_sources(&self, group_id: &str) -> Result<Vec<Endpoint>, ApiError> {
        ManagementClient::fetch_sources(self, group_id).await
    }

    async fn fetch_destinations(&self, group_id: &str) -> Result<Vec<Endpoint>, ApiError> {
        ManagementClient::fetch_destinations(self, group_id).await
    }

    async fn fetch_source_status(&self, group_id: &str) -> Result<Vec<StatusRecord>, ApiError> {
        ManagementClient::fetch_source_status(self, group_id).await
    }

    async fn fetch_destination_status(
        &self,
        group_id: &str,
    ) -> Result<Vec<StatusRecord>, ApiError> {
        ManagementClient::fetch_destination_status(self, group_id).await
    }

    async fn fetch_source_health(&self, group_id: &str) -> Result<Vec<HealthRecord>, ApiError> {
        ManagementClient::fetch_source_health(self, group_id).await
    }

    async fn fetch_destination_health(
        &self,
        group_id: &str,
    ) -> Result<Vec<HealthRecord>, ApiError> {
        ManagementClient::fetch_destination_health(self, group_id).await
    }

    async fn fetch_pipeline_status(&self, group_id: &str) -> Result<Vec<StatusRecord>, ApiError> {
        ManagementClient::fetch_pipeline_status(self, group_id).await
    }

    async fn fetch_pipelines(&self, group_id: &str) -> Result<Vec<PipelineRecord>, ApiError> {
        ManagementClient::fetch_pipelines(self, group_id).await
    }

    async fn fetch_pipeline_detail(
        &self,
        group_id: &str,
        pipeline_id: &str,
    ) -> Result<PipelineRecord, ApiError> {
        ManagementClient::fetch_pipeline_detail(self, group_id, pipeline_id).await
    }
}
