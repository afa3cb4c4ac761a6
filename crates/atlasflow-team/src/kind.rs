//! Team resource kind

use crate::wire::{Team, TeamDelta, TeamPayload};
use atlasflow_api::ScopeField;
use atlasflow_core::{
    Attributes, IdSegment, ImportSpec, ReconcileError, ResourceKind, ResourceStatus, Result, attrs,
};
use serde_json::{Value, json};

/// Teams are owned by an organization and granted roles on a project, so
/// both identifiers scope every call. The import identifier is
/// `orgID-teamID-projectID`, the same layout operators see in the CLI.
pub struct ProjectTeam;

impl ResourceKind for ProjectTeam {
    type Wire = Team;

    const NAME: &'static str = "team";
    const SCOPE: &'static [ScopeField] = &[ScopeField::Org, ScopeField::Project];
    const SET_ATTRIBUTES: &'static [&'static str] = &["usernames", "team_roles"];
    const IMPORT: ImportSpec = ImportSpec::new(&[
        IdSegment::Scope(ScopeField::Org),
        IdSegment::RemoteId,
        IdSegment::Scope(ScopeField::Project),
    ]);

    fn to_payload(declared: &Attributes) -> Result<TeamPayload> {
        let name = attrs::required_str(Self::NAME, declared, "name")?.to_string();
        let usernames = attrs::string_list(Self::NAME, declared, "usernames")?.ok_or_else(|| {
            ReconcileError::Invalid {
                kind: Self::NAME,
                message: "usernames is required".to_string(),
            }
        })?;
        let role_names =
            attrs::string_list(Self::NAME, declared, "team_roles")?.unwrap_or_default();

        Ok(TeamPayload {
            name,
            usernames,
            role_names,
        })
    }

    fn to_delta(changes: &Attributes) -> Result<TeamDelta> {
        Ok(TeamDelta {
            name: changes.get("name").and_then(Value::as_str).map(String::from),
            usernames: attrs::string_list(Self::NAME, changes, "usernames")?,
            role_names: attrs::string_list(Self::NAME, changes, "team_roles")?,
        })
    }

    fn observe(wire: &Team) -> Attributes {
        let mut observed = Attributes::new();
        observed.insert("name".to_string(), json!(wire.name));
        observed.insert("usernames".to_string(), json!(wire.usernames));
        // Wire calls them roleNames; declarations call them team_roles.
        observed.insert("team_roles".to_string(), json!(wire.role_names));
        observed
    }

    fn status(_wire: &Team) -> ResourceStatus {
        // Teams have no provisioning phase; readable means usable.
        ResourceStatus::Active
    }
}
