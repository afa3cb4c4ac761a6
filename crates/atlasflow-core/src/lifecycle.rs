//! Lifecycle operations
//!
//! One [`Reconciler`] instance drives a single resource kind against a
//! gateway. It owns no global client and no shared mutable state; hosts
//! construct one per kind, hand each its gateway handle, and may run any
//! number of reconciliations concurrently.

use crate::attrs;
use crate::error::{ReconcileError, Result};
use crate::kind::ResourceKind;
use crate::resource::{Attributes, ManagedResource};
use crate::retry::{self, RetryError, RetryPolicy};
use atlasflow_api::{ApiError, ApiResult, Gateway, Scope, WireResource};
use chrono::Utc;
use std::future::Future;
use std::marker::PhantomData;
use tokio_util::sync::CancellationToken;

/// Result of a read: either the observed resource or a drift signal.
///
/// `Gone` is not an error. A resource deleted out of band is a normal
/// outcome; the caller resolves it by dropping the resource from state and,
/// if it is still declared, recreating it.
#[derive(Debug)]
pub enum ReadOutcome {
    Found(ManagedResource),
    Gone,
}

impl ReadOutcome {
    pub fn is_gone(&self) -> bool {
        matches!(self, ReadOutcome::Gone)
    }
}

/// Drives one resource kind through its lifecycle.
pub struct Reconciler<K: ResourceKind, G: Gateway<K::Wire>> {
    gateway: G,
    policy: RetryPolicy,
    cancel: CancellationToken,
    _kind: PhantomData<K>,
}

impl<K, G> Reconciler<K, G>
where
    K: ResourceKind,
    G: Gateway<K::Wire>,
{
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            policy: RetryPolicy::default(),
            cancel: CancellationToken::new(),
            _kind: PhantomData,
        }
    }

    /// Backoff schedule for every remote call this reconciler makes.
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Token observed between retry attempts. Cancelling it stops the
    /// current operation without issuing further remote calls.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Create the resource, then read it back until it is visible.
    ///
    /// The create call itself retries only transient errors; the read-back
    /// additionally retries `NotFound`, since right after a create that is
    /// the consistency window rather than an absence.
    pub async fn create(&self, scope: &Scope, declared: &Attributes) -> Result<ManagedResource> {
        self.check_scope(scope)?;
        let payload = K::to_payload(declared)?;

        tracing::info!("creating {} ({})", K::NAME, scope);
        let created = self
            .call(scope, retry::on_transient, || {
                self.gateway.create(scope, &payload)
            })
            .await?;
        let remote_id = created.remote_id().to_string();

        let wire = self
            .call(scope, retry::on_transient_or_missing, || {
                self.gateway.get(scope, &remote_id)
            })
            .await?;
        tracing::info!("created {} {} ({})", K::NAME, remote_id, scope);
        Ok(self.materialize(scope, &wire))
    }

    /// Fetch current remote state.
    ///
    /// A missing resource is reported as [`ReadOutcome::Gone`], never as an
    /// error, so callers can always distinguish drift from a failed read.
    pub async fn read(&self, scope: &Scope, remote_id: &str) -> Result<ReadOutcome> {
        self.check_scope(scope)?;

        let result = retry::with_backoff(&self.policy, &self.cancel, retry::on_transient, || {
            self.gateway.get(scope, remote_id)
        })
        .await;

        match result {
            Ok(wire) => Ok(ReadOutcome::Found(self.materialize(scope, &wire))),
            Err(RetryError::Permanent(ApiError::NotFound(_))) => {
                tracing::info!("{} {} is gone from the control plane", K::NAME, remote_id);
                Ok(ReadOutcome::Gone)
            }
            Err(error) => Err(self.remote_error(scope, error)),
        }
    }

    /// Reconcile declared attributes against previously observed ones.
    ///
    /// Scope keys are fixed at creation; a declared change to one fails
    /// before any remote call. An empty diff refreshes observed state and
    /// issues no mutation at all. Otherwise a single update carries every
    /// changed field, followed by a read to confirm the result.
    pub async fn update(
        &self,
        scope: &Scope,
        remote_id: &str,
        declared: &Attributes,
        observed: &Attributes,
    ) -> Result<ManagedResource> {
        self.check_scope(scope)?;

        for field in K::SCOPE {
            if let Some(value) = declared.get(field.key()).and_then(|v| v.as_str()) {
                if scope.get(*field) != Some(value) {
                    return Err(ReconcileError::ImmutableFieldChanged {
                        kind: K::NAME,
                        field: field.key().to_string(),
                    });
                }
            }
        }

        let mut changes = attrs::diff(declared, observed, K::SET_ATTRIBUTES);
        for field in K::SCOPE {
            changes.remove(field.key());
        }

        if changes.is_empty() {
            tracing::debug!(
                "{} {} matches declared configuration, refreshing only",
                K::NAME,
                remote_id
            );
            let wire = self
                .call(scope, retry::on_transient, || {
                    self.gateway.get(scope, remote_id)
                })
                .await?;
            return Ok(self.materialize(scope, &wire));
        }

        let delta = K::to_delta(&changes)?;
        let mut fields: Vec<&str> = changes.keys().map(String::as_str).collect();
        fields.sort_unstable();
        tracing::info!(
            "updating {} {} ({}): {}",
            K::NAME,
            remote_id,
            scope,
            fields.join(", ")
        );

        self.call(scope, retry::on_transient, || {
            self.gateway.update(scope, remote_id, &delta)
        })
        .await?;

        let wire = self
            .call(scope, retry::on_transient_or_missing, || {
                self.gateway.get(scope, remote_id)
            })
            .await?;
        Ok(self.materialize(scope, &wire))
    }

    /// Delete the resource.
    ///
    /// Deleting something already gone is success, which keeps the
    /// operation safe under at-least-once delivery. Teardown on the control
    /// plane is asynchronous, so a confirming read that still sees the
    /// resource is also success.
    pub async fn delete(&self, scope: &Scope, remote_id: &str) -> Result<()> {
        self.check_scope(scope)?;

        tracing::info!("deleting {} {} ({})", K::NAME, remote_id, scope);
        let result = retry::with_backoff(&self.policy, &self.cancel, retry::on_transient, || {
            self.gateway.delete(scope, remote_id)
        })
        .await;

        match result {
            Ok(()) => {}
            Err(RetryError::Permanent(ApiError::NotFound(_))) => {
                tracing::debug!("{} {} already absent, nothing to delete", K::NAME, remote_id);
                return Ok(());
            }
            Err(error) => return Err(self.remote_error(scope, error)),
        }

        match self.read(scope, remote_id).await? {
            ReadOutcome::Gone => {}
            ReadOutcome::Found(residual) => {
                tracing::debug!(
                    "{} {} still visible after delete (status {}), teardown is asynchronous",
                    K::NAME,
                    remote_id,
                    residual.status
                );
            }
        }
        Ok(())
    }

    /// Re-associate an existing remote resource from its composite import
    /// identifier.
    ///
    /// Decoding failures happen before any remote call, and the operation
    /// never mutates anything: it is a decode followed by a read.
    pub async fn import(&self, identifier: &str) -> Result<ManagedResource> {
        let (scope, remote_id) = K::IMPORT.decode(K::NAME, identifier)?;
        self.check_scope(&scope)?;

        tracing::info!("importing {} {} ({})", K::NAME, remote_id, scope);
        match self.read(&scope, &remote_id).await? {
            ReadOutcome::Found(resource) => Ok(resource),
            ReadOutcome::Gone => Err(ReconcileError::Remote {
                kind: K::NAME,
                scope,
                source: ApiError::NotFound(format!("{} {} does not exist", K::NAME, remote_id)),
            }),
        }
    }

    /// Import identifier for an existing resource, the inverse of
    /// [`Reconciler::import`].
    pub fn import_id(&self, scope: &Scope, remote_id: &str) -> Result<String> {
        K::IMPORT.encode(K::NAME, scope, remote_id)
    }

    /// List resources matching the filter, following the cursor until the
    /// control plane reports no more pages. Results accumulate in arrival
    /// order.
    pub async fn list(
        &self,
        scope: &Scope,
        filter: &<K::Wire as WireResource>::Filter,
    ) -> Result<Vec<ManagedResource>> {
        self.check_scope(scope)?;

        let mut resources = Vec::new();
        let mut cursor: Option<String> = None;
        loop {
            let page = self
                .call(scope, retry::on_transient, || {
                    self.gateway.list(scope, filter, cursor.as_deref())
                })
                .await?;
            resources.extend(page.items.iter().map(|wire| self.materialize(scope, wire)));
            match page.next {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }
        tracing::debug!("listed {} {} resource(s) ({})", resources.len(), K::NAME, scope);
        Ok(resources)
    }

    async fn call<T, F, Fut>(
        &self,
        scope: &Scope,
        should_retry: fn(&ApiError) -> bool,
        op: F,
    ) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ApiResult<T>>,
    {
        retry::with_backoff(&self.policy, &self.cancel, should_retry, op)
            .await
            .map_err(|error| self.remote_error(scope, error))
    }

    fn remote_error(&self, scope: &Scope, error: RetryError) -> ReconcileError {
        match error {
            RetryError::Permanent(source) => ReconcileError::Remote {
                kind: K::NAME,
                scope: scope.clone(),
                source,
            },
            RetryError::Exhausted { attempts, last } => ReconcileError::ConsistencyTimeout {
                kind: K::NAME,
                scope: scope.clone(),
                attempts,
                source: last,
            },
            RetryError::Cancelled => ReconcileError::Cancelled { kind: K::NAME },
        }
    }

    fn check_scope(&self, scope: &Scope) -> Result<()> {
        let missing = scope.missing(K::SCOPE);
        if missing.is_empty() {
            return Ok(());
        }
        let fields: Vec<&str> = missing.iter().map(|f| f.key()).collect();
        Err(ReconcileError::Invalid {
            kind: K::NAME,
            message: format!("missing required scope field(s): {}", fields.join(", ")),
        })
    }

    fn materialize(&self, scope: &Scope, wire: &K::Wire) -> ManagedResource {
        let mut attributes = K::observe(wire);
        attrs::normalize(&mut attributes, K::SET_ATTRIBUTES);
        ManagedResource {
            kind: K::NAME.to_string(),
            remote_id: wire.remote_id().to_string(),
            scope: scope.clone(),
            attributes,
            status: K::status(wire),
            observed_at: Utc::now(),
        }
    }
}
