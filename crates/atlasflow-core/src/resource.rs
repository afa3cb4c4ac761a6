//! Observed resource model

use atlasflow_api::{Scope, ScopeField};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;

/// Attribute map shared by declared and observed state.
pub type Attributes = HashMap<String, serde_json::Value>;

/// The reconciler's view of one remote resource after a successful read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagedResource {
    /// Resource kind name, e.g. "team"
    pub kind: String,

    /// Identifier assigned by the control plane
    pub remote_id: String,

    /// Parent identifiers the resource lives under
    pub scope: Scope,

    /// Observed attributes, set-valued ones in sorted order
    pub attributes: Attributes,

    /// Coarse lifecycle status derived from the observed attributes
    pub status: ResourceStatus,

    /// When the control plane was last read successfully
    pub observed_at: DateTime<Utc>,
}

impl ManagedResource {
    pub fn new(kind: impl Into<String>, remote_id: impl Into<String>, scope: Scope) -> Self {
        Self {
            kind: kind.into(),
            remote_id: remote_id.into(),
            scope,
            attributes: Attributes::new(),
            status: ResourceStatus::Pending,
            observed_at: Utc::now(),
        }
    }

    pub fn with_status(mut self, status: ResourceStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    pub fn get_attribute<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.attributes
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// The map the host writes into its state store: observed attributes
    /// plus the identifiers under their fixed keys.
    pub fn flattened(&self) -> Attributes {
        let mut out = self.attributes.clone();
        out.insert("id".to_string(), json!(self.remote_id));
        for field in [ScopeField::Org, ScopeField::Project] {
            if let Some(value) = self.scope.get(field) {
                out.insert(field.key().to_string(), json!(value));
            }
        }
        out
    }
}

/// Coarse lifecycle status of a remote resource.
///
/// Always derived from observed attributes by the resource kind, never
/// stored independently of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceStatus {
    /// Created but backing infrastructure is still provisioning
    Pending,
    /// Fully provisioned and usable
    Active,
    /// The control plane reports a failure state
    Failed,
    /// Confirmed gone
    Deleted,
}

impl std::fmt::Display for ResourceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceStatus::Pending => write!(f, "pending"),
            ResourceStatus::Active => write!(f, "active"),
            ResourceStatus::Failed => write!(f, "failed"),
            ResourceStatus::Deleted => write!(f, "deleted"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flattened_includes_identifiers() {
        let resource = ManagedResource::new(
            "team",
            "team456",
            Scope::org_and_project("org123", "proj789"),
        )
        .with_status(ResourceStatus::Active)
        .with_attribute("name", json!("platform"));

        let flat = resource.flattened();
        assert_eq!(flat.get("id"), Some(&json!("team456")));
        assert_eq!(flat.get("org_id"), Some(&json!("org123")));
        assert_eq!(flat.get("project_id"), Some(&json!("proj789")));
        assert_eq!(flat.get("name"), Some(&json!("platform")));
    }

    #[test]
    fn test_flattened_skips_unset_scope_fields() {
        let resource = ManagedResource::new("network_container", "c-1", Scope::project("proj789"));
        let flat = resource.flattened();
        assert_eq!(flat.get("project_id"), Some(&json!("proj789")));
        assert!(!flat.contains_key("org_id"));
    }

    #[test]
    fn test_get_attribute() {
        let resource = ManagedResource::new("network_container", "c-1", Scope::project("p"))
            .with_attribute("provisioned", json!(true))
            .with_attribute("atlas_cidr_block", json!("10.8.12.0/24"));

        assert_eq!(resource.get_attribute::<bool>("provisioned"), Some(true));
        assert_eq!(
            resource.get_attribute::<String>("atlas_cidr_block").as_deref(),
            Some("10.8.12.0/24")
        );
        assert_eq!(resource.get_attribute::<u32>("missing"), None);
    }

    #[test]
    fn test_status_serializes_snake_case() {
        assert_eq!(json!(ResourceStatus::Pending), json!("pending"));
        assert_eq!(json!(ResourceStatus::Deleted), json!("deleted"));
        assert_eq!(ResourceStatus::Active.to_string(), "active");
        assert_eq!(ResourceStatus::Failed.to_string(), "failed");
    }
}
