//! Parent identifiers for scoped resources

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fields a resource kind may require in its [`Scope`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeField {
    Org,
    Project,
}

impl ScopeField {
    /// Attribute key under which this field appears in state.
    pub fn key(&self) -> &'static str {
        match self {
            ScopeField::Org => "org_id",
            ScopeField::Project => "project_id",
        }
    }
}

impl fmt::Display for ScopeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Parent identifiers locating a resource on the control plane.
///
/// Which fields are required depends on the resource kind (teams live under
/// an organization and are associated with a project, containers under a
/// project only). Fields a kind does not require stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    pub org_id: Option<String>,
    pub project_id: Option<String>,
}

impl Scope {
    pub fn project(project_id: impl Into<String>) -> Self {
        Self {
            org_id: None,
            project_id: Some(project_id.into()),
        }
    }

    pub fn org_and_project(org_id: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            org_id: Some(org_id.into()),
            project_id: Some(project_id.into()),
        }
    }

    /// Value of one field, if set and non-empty.
    pub fn get(&self, field: ScopeField) -> Option<&str> {
        let value = match field {
            ScopeField::Org => self.org_id.as_deref(),
            ScopeField::Project => self.project_id.as_deref(),
        };
        value.filter(|v| !v.is_empty())
    }

    /// Required fields that are absent or empty.
    pub fn missing(&self, required: &[ScopeField]) -> Vec<ScopeField> {
        required
            .iter()
            .copied()
            .filter(|f| self.get(*f).is_none())
            .collect()
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut wrote = false;
        for field in [ScopeField::Org, ScopeField::Project] {
            if let Some(value) = self.get(field) {
                if wrote {
                    write!(f, " ")?;
                }
                write!(f, "{}={}", field.key(), value)?;
                wrote = true;
            }
        }
        if !wrote {
            write!(f, "unscoped")?;
        }
        Ok(())
    }
}
