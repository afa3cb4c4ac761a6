//! Wire representation of teams

use atlasflow_api::WireResource;
use serde::{Deserialize, Serialize};

/// A team as the control plane returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,

    pub name: String,

    /// Members, in whatever order the control plane reports them
    #[serde(default)]
    pub usernames: Vec<String>,

    /// Project roles granted to the team
    #[serde(default)]
    pub role_names: Vec<String>,
}

/// Create request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamPayload {
    pub name: String,
    pub usernames: Vec<String>,
    /// Omitted when empty; role assignment can happen after creation.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub role_names: Vec<String>,
}

/// Update request body; only changed fields are serialized.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamDelta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usernames: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_names: Option<Vec<String>>,
}

/// Server-side listing filter.
#[derive(Debug, Clone, Default)]
pub struct TeamFilter {
    /// Restrict results to teams whose name matches exactly.
    pub name: Option<String>,
}

impl WireResource for Team {
    type Payload = TeamPayload;
    type Delta = TeamDelta;
    type Filter = TeamFilter;

    fn remote_id(&self) -> &str {
        &self.id
    }
}
