//! AtlasFlow Teams
//!
//! The team resource kind. Teams are created inside an organization,
//! associated with a project, and carry two membership lists: user names
//! and project roles. Both lists are order-insensitive; the control plane
//! returns them in arbitrary order and the reconciler treats reorderings
//! as no change.
//!
//! The wire field `roleNames` surfaces as the attribute `team_roles`, the
//! name the declarations use.

pub mod kind;
pub mod wire;

// Re-exports
pub use kind::ProjectTeam;
pub use wire::{Team, TeamDelta, TeamFilter, TeamPayload};
