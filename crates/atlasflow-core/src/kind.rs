//! Per-kind capability contract

use crate::error::Result;
use crate::ident::ImportSpec;
use crate::resource::{Attributes, ResourceStatus};
use atlasflow_api::{ScopeField, WireResource};

/// Everything the reconciler needs to know about one resource type, as a
/// flat table of constants and pure functions.
///
/// Kinds carry no state and no behavior beyond mapping; the reconciler,
/// retry controller, and identifier codec are shared across all of them.
/// Adding a resource type means implementing this trait and nothing else.
pub trait ResourceKind {
    /// Wire representation this kind reconciles.
    type Wire: WireResource;

    /// Kind name used in errors, logs, and state keys.
    const NAME: &'static str;

    /// Scope fields that must be present before any remote call.
    const SCOPE: &'static [ScopeField];

    /// Attributes compared by set membership instead of order.
    const SET_ATTRIBUTES: &'static [&'static str];

    /// Layout of the composite import identifier.
    const IMPORT: ImportSpec;

    /// Build the create payload from declared attributes.
    ///
    /// Required attributes must be present and well-typed; optional
    /// attributes left unset are omitted from the wire so the control
    /// plane applies its own defaults.
    fn to_payload(declared: &Attributes) -> Result<<Self::Wire as WireResource>::Payload>;

    /// Build the update delta from the changed attributes only.
    fn to_delta(changes: &Attributes) -> Result<<Self::Wire as WireResource>::Delta>;

    /// Map a wire resource into observed attributes.
    ///
    /// Every reportable field appears, including read-only ones the
    /// declaration can never set.
    fn observe(wire: &Self::Wire) -> Attributes;

    /// Derive the coarse status from the wire representation.
    fn status(wire: &Self::Wire) -> ResourceStatus;
}
