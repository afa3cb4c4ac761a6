//! AtlasFlow Network Containers
//!
//! The network peering container resource kind. Containers reserve a CIDR
//! block inside one cloud provider region; the control plane provisions the
//! backing VPC or VNet asynchronously and reports it through read-only
//! fields (`provisioned`, `vpc_id`, `vnet_name`).
//!
//! Besides full lifecycle management, the crate supports the read-only
//! listing used as a data source: all containers of a project, optionally
//! filtered by cloud provider.

pub mod kind;
pub mod wire;

// Re-exports
pub use kind::NetworkContainer;
pub use wire::{Container, ContainerDelta, ContainerFilter, ContainerPayload};
