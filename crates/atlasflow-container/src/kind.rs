//! Network peering container resource kind

use crate::wire::{Container, ContainerDelta, ContainerPayload};
use atlasflow_api::ScopeField;
use atlasflow_core::{
    Attributes, IdSegment, ImportSpec, ResourceKind, ResourceStatus, Result, attrs,
};
use serde_json::{Value, json};

/// Network peering containers live under a project; their import
/// identifier is `projectID-containerID`.
pub struct NetworkContainer;

impl ResourceKind for NetworkContainer {
    type Wire = Container;

    const NAME: &'static str = "network_container";
    const SCOPE: &'static [ScopeField] = &[ScopeField::Project];
    const SET_ATTRIBUTES: &'static [&'static str] = &[];
    const IMPORT: ImportSpec = ImportSpec::new(&[
        IdSegment::Scope(ScopeField::Project),
        IdSegment::RemoteId,
    ]);

    fn to_payload(declared: &Attributes) -> Result<ContainerPayload> {
        Ok(ContainerPayload {
            provider_name: attrs::required_str(Self::NAME, declared, "provider_name")?.to_string(),
            atlas_cidr_block: attrs::required_str(Self::NAME, declared, "atlas_cidr_block")?
                .to_string(),
            region_name: declared
                .get("region_name")
                .and_then(Value::as_str)
                .map(String::from),
        })
    }

    fn to_delta(changes: &Attributes) -> Result<ContainerDelta> {
        Ok(ContainerDelta {
            provider_name: changes
                .get("provider_name")
                .and_then(Value::as_str)
                .map(String::from),
            atlas_cidr_block: changes
                .get("atlas_cidr_block")
                .and_then(Value::as_str)
                .map(String::from),
            region_name: changes
                .get("region_name")
                .and_then(Value::as_str)
                .map(String::from),
        })
    }

    fn observe(wire: &Container) -> Attributes {
        let mut observed = Attributes::new();
        observed.insert("provider_name".to_string(), json!(wire.provider_name));
        observed.insert("atlas_cidr_block".to_string(), json!(wire.atlas_cidr_block));
        // Read-only: reported even though no declaration can set it.
        observed.insert("provisioned".to_string(), json!(wire.provisioned.unwrap_or(false)));
        if let Some(region) = &wire.region_name {
            observed.insert("region_name".to_string(), json!(region));
        }
        if let Some(vpc_id) = &wire.vpc_id {
            observed.insert("vpc_id".to_string(), json!(vpc_id));
        }
        if let Some(vnet_name) = &wire.vnet_name {
            observed.insert("vnet_name".to_string(), json!(vnet_name));
        }
        observed
    }

    fn status(wire: &Container) -> ResourceStatus {
        if wire.provisioned.unwrap_or(false) {
            ResourceStatus::Active
        } else {
            ResourceStatus::Pending
        }
    }
}
