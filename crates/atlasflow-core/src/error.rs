//! Reconciler error types

use atlasflow_api::{ApiError, Scope};
use thiserror::Error;

/// Errors surfaced by lifecycle operations.
///
/// Every variant names the resource kind it concerns; remote failures also
/// carry the scope and the raw control plane error, so nothing is lost
/// between the wire and the caller's diagnostics.
#[derive(Error, Debug)]
pub enum ReconcileError {
    /// The declared configuration cannot be turned into a remote call.
    #[error("{kind}: invalid configuration: {message}")]
    Invalid { kind: &'static str, message: String },

    /// The control plane rejected a call with a permanent error.
    #[error("{kind} ({scope}): remote call failed")]
    Remote {
        kind: &'static str,
        scope: Scope,
        #[source]
        source: ApiError,
    },

    /// The retry budget ran out while the error stayed transient.
    #[error("{kind} ({scope}): gave up after {attempts} attempts")]
    ConsistencyTimeout {
        kind: &'static str,
        scope: Scope,
        attempts: u32,
        #[source]
        source: ApiError,
    },

    /// An import identifier did not match the kind's layout.
    #[error("{kind}: malformed import identifier {value:?}, expected {expected}")]
    MalformedIdentifier {
        kind: &'static str,
        value: String,
        expected: String,
    },

    /// A declared change to a field that is fixed at creation.
    #[error("{kind}: field {field} cannot be changed after creation")]
    ImmutableFieldChanged { kind: &'static str, field: String },

    /// The operation was cancelled between retry attempts.
    #[error("{kind}: operation cancelled")]
    Cancelled { kind: &'static str },
}

pub type Result<T> = std::result::Result<T, ReconcileError>;
