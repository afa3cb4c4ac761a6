//! AtlasFlow Remote API Contract
//!
//! This crate defines the boundary between the reconciler core and the
//! remote control plane: the [`Gateway`] trait that concrete API clients
//! implement, the [`WireResource`] shape of resources as the control plane
//! represents them, the [`ApiError`] taxonomy those clients map transport
//! failures into, and the [`Scope`] parent identifiers that locate a
//! resource.
//!
//! No HTTP code lives here. Hosts supply gateway implementations backed by
//! their transport and credentials; tests supply scripted in-memory ones.

pub mod error;
pub mod gateway;
pub mod scope;

// Re-exports
pub use error::{ApiError, ApiResult};
pub use gateway::{Gateway, Page, WireResource};
pub use scope::{Scope, ScopeField};
