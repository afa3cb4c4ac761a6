//! AtlasFlow Reconciler Core
//!
//! This crate drives declaratively managed control plane resources through
//! their lifecycle: create with read-back, drift-detecting reads, diff-driven
//! updates, idempotent deletes, and import of pre-existing resources via
//! composite identifiers.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │               host plugin runtime                │
//! │        (schema, RPC dispatch, state store)       │
//! └─────────────────┬───────────────────────────────┘
//!                   │ declared / observed attributes
//! ┌─────────────────▼───────────────────────────────┐
//! │               atlasflow-core                     │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │     Reconciler<K: ResourceKind, G>        │   │
//! │  └──────────────┬───────────────────────────┘   │
//! │  ┌──────────────▼───────────┐  ┌───────────┐    │
//! │  │  retry (backoff, cancel)  │  │   ident   │    │
//! │  └──────────────┬───────────┘  └───────────┘    │
//! └─────────────────┼───────────────────────────────┘
//!                   │ one remote call per attempt
//! ┌─────────────────▼───────────────────────────────┐
//! │        Gateway<W> (atlasflow-api, host HTTP)     │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! The remote control plane is eventually consistent: a read right after a
//! write may miss or return stale data. All of that is absorbed here, in the
//! retry controller; gateways perform exactly one round trip per call and
//! kinds are pure mapping tables.

pub mod attrs;
pub mod error;
pub mod ident;
pub mod kind;
pub mod lifecycle;
pub mod resource;
pub mod retry;

// Re-exports
pub use error::{ReconcileError, Result};
pub use ident::{IdSegment, ImportSpec};
pub use kind::ResourceKind;
pub use lifecycle::{ReadOutcome, Reconciler};
pub use resource::{Attributes, ManagedResource, ResourceStatus};
pub use retry::{RetryError, RetryPolicy};
