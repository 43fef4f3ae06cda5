//! Response types returned by the search engine.

use serde::{Deserialize, Serialize};

/// Cluster health colour as reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Green,
    Yellow,
    Red,
}

/// The subset of the cluster health response callers care about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterHealth {
    /// Name of the cluster that answered.
    #[serde(default)]
    pub cluster_name: String,
    /// Overall cluster status.
    pub status: HealthStatus,
    /// Number of nodes in the cluster.
    #[serde(default)]
    pub number_of_nodes: u32,
}
