//! Wire representation of network peering containers

use atlasflow_api::WireResource;
use serde::{Deserialize, Serialize};

/// A network peering container as the control plane returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    pub id: String,

    /// Cloud provider backing the container, e.g. "AWS"
    pub provider_name: String,

    /// CIDR block reserved for the peering network
    pub atlas_cidr_block: String,

    /// Provider region; present for providers that scope by region
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_name: Option<String>,

    /// Set by the control plane once backing infrastructure exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioned: Option<bool>,

    /// Backing VPC id, reported on AWS containers once provisioned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vpc_id: Option<String>,

    /// Backing VNet name, reported on Azure containers once provisioned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vnet_name: Option<String>,
}

/// Create request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerPayload {
    pub provider_name: String,
    pub atlas_cidr_block: String,
    /// Omitted when unset so the control plane applies its default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_name: Option<String>,
}

/// Update request body; only changed fields are serialized.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerDelta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atlas_cidr_block: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_name: Option<String>,
}

/// Server-side listing filter.
#[derive(Debug, Clone, Default)]
pub struct ContainerFilter {
    /// Restrict results to one cloud provider, e.g. "AWS".
    pub provider_name: Option<String>,
}

impl WireResource for Container {
    type Payload = ContainerPayload;
    type Delta = ContainerDelta;
    type Filter = ContainerFilter;

    fn remote_id(&self) -> &str {
        &self.id
    }
}
