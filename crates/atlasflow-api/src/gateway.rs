//! Gateway trait implemented by concrete control plane clients

use crate::error::ApiResult;
use crate::scope::Scope;
use async_trait::async_trait;
use serde::Serialize;
use std::fmt::Debug;

/// One page of list results plus the cursor for the next call.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Opaque continuation cursor. `None` means the listing is exhausted.
    pub next: Option<String>,
}

impl<T> Page<T> {
    /// A final page with no continuation.
    pub fn last(items: Vec<T>) -> Self {
        Self { items, next: None }
    }

    pub fn with_next(items: Vec<T>, next: impl Into<String>) -> Self {
        Self {
            items,
            next: Some(next.into()),
        }
    }
}

/// A resource as the remote control plane represents it.
///
/// The associated types split the wire surface the way the API does:
/// the full body sent on create, the partial body sent on update, and the
/// server-side listing filter.
pub trait WireResource: Debug + Clone + Send + Sync + 'static {
    /// Full request body for create calls.
    type Payload: Debug + Serialize + Send + Sync;

    /// Partial request body for update calls; carries changed fields only.
    type Delta: Debug + Serialize + Send + Sync;

    /// Server-side listing filter.
    type Filter: Debug + Clone + Send + Sync;

    /// Identifier assigned by the control plane.
    fn remote_id(&self) -> &str;
}

/// Remote API operations for one wire type.
///
/// Implementations translate these calls into authenticated requests and
/// map every failure into [`crate::ApiError`]. They never retry; the retry
/// controller above owns that, so a gateway call is exactly one remote
/// round trip.
#[async_trait]
pub trait Gateway<W: WireResource>: Send + Sync {
    /// Create the resource and return its remote representation.
    async fn create(&self, scope: &Scope, payload: &W::Payload) -> ApiResult<W>;

    /// Fetch one resource by its remote identifier.
    async fn get(&self, scope: &Scope, remote_id: &str) -> ApiResult<W>;

    /// Fetch one page of resources matching the filter.
    async fn list(
        &self,
        scope: &Scope,
        filter: &W::Filter,
        cursor: Option<&str>,
    ) -> ApiResult<Page<W>>;

    /// Apply a partial modification and return the updated representation.
    async fn update(&self, scope: &Scope, remote_id: &str, delta: &W::Delta) -> ApiResult<W>;

    /// Delete the resource.
    async fn delete(&self, scope: &Scope, remote_id: &str) -> ApiResult<()>;
}
