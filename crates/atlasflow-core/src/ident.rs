//! Composite import identifier codec
//!
//! Import identifiers join the scope fields and the remote id of an existing
//! resource into one hyphen-delimited string, e.g. `org123-team456-proj789`
//! for a team. They exist only for the duration of an import call and are
//! never persisted.

use crate::error::{ReconcileError, Result};
use atlasflow_api::{Scope, ScopeField};

const DELIMITER: char = '-';

/// One segment of a composite import identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdSegment {
    /// A scope field, e.g. the owning project id
    Scope(ScopeField),
    /// The resource's own remote identifier
    RemoteId,
}

/// Per-kind layout of the composite import identifier.
#[derive(Debug, Clone, Copy)]
pub struct ImportSpec {
    pub segments: &'static [IdSegment],
}

impl ImportSpec {
    pub const fn new(segments: &'static [IdSegment]) -> Self {
        Self { segments }
    }

    /// Human-readable layout, e.g. `org_id-<id>-project_id`.
    pub fn describe(&self) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                IdSegment::Scope(field) => field.key(),
                IdSegment::RemoteId => "<id>",
            })
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Join scope fields and remote id into an import identifier.
    ///
    /// Rejects absent or empty segment values and values containing the
    /// delimiter, since those cannot round-trip through [`ImportSpec::decode`].
    pub fn encode(&self, kind: &'static str, scope: &Scope, remote_id: &str) -> Result<String> {
        let mut parts = Vec::with_capacity(self.segments.len());
        for segment in self.segments {
            let value = match segment {
                IdSegment::Scope(field) => {
                    scope
                        .get(*field)
                        .ok_or_else(|| ReconcileError::Invalid {
                            kind,
                            message: format!("missing {} for import identifier", field.key()),
                        })?
                }
                IdSegment::RemoteId => remote_id,
            };
            if value.is_empty() || value.contains(DELIMITER) {
                return Err(ReconcileError::Invalid {
                    kind,
                    message: format!("{:?} cannot appear in an import identifier", value),
                });
            }
            parts.push(value);
        }
        Ok(parts.join("-"))
    }

    /// Split an import identifier back into scope fields and remote id.
    ///
    /// Fails with [`ReconcileError::MalformedIdentifier`] when the segment
    /// count does not match the layout or any segment is empty.
    pub fn decode(&self, kind: &'static str, input: &str) -> Result<(Scope, String)> {
        let parts: Vec<&str> = input.split(DELIMITER).collect();
        if parts.len() != self.segments.len() || parts.iter().any(|p| p.is_empty()) {
            return Err(ReconcileError::MalformedIdentifier {
                kind,
                value: input.to_string(),
                expected: self.describe(),
            });
        }

        let mut scope = Scope::default();
        let mut remote_id = String::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                IdSegment::Scope(ScopeField::Org) => scope.org_id = Some(part.to_string()),
                IdSegment::Scope(ScopeField::Project) => scope.project_id = Some(part.to_string()),
                IdSegment::RemoteId => remote_id = part.to_string(),
            }
        }
        Ok((scope, remote_id))
    }
}
