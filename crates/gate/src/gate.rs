use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, instrument, warn};

use tollgate_audit::{AuditSink, EventKind, PolicyEvent};
use tollgate_core::PolicyContext;
use tollgate_state::{CounterStore, Expiry, KeyKind, StateKey};

use crate::config::GateConfig;
use crate::error::GateError;
use crate::request::GateRequest;
use crate::suspicion::SuspicionRules;
use crate::verdict::GateVerdict;

/// The policy gate: per-address rate limiting, brute-force lockout, and
/// cumulative suspicion strikes over an injected [`CounterStore`].
///
/// Construct via [`GateBuilder`](crate::GateBuilder). The gate holds no
/// mutable state of its own; every decision round-trips through the store,
/// so independently constructed gates sharing a store agree on counts.
pub struct PolicyGate {
    pub(crate) state: Arc<dyn CounterStore>,
    pub(crate) audit: Option<Arc<dyn AuditSink>>,
    pub(crate) config: GateConfig,
    pub(crate) suspicion: SuspicionRules,
}

impl std::fmt::Debug for PolicyGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolicyGate")
            .field("config", &self.config)
            .field("suspicion", &self.suspicion)
            .field("audit", &self.audit.is_some())
            .finish_non_exhaustive()
    }
}

impl PolicyGate {
    /// The configuration this gate was built with.
    #[must_use]
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    fn key(&self, ctx: &PolicyContext, kind: KeyKind) -> StateKey {
        StateKey::for_ip(ctx.namespace.clone(), ctx.tenant.clone(), kind, &ctx.ip)
    }

    /// Emit an audit event. Emission failures are logged and swallowed;
    /// they never change the admit/reject decision.
    async fn emit(&self, kind: EventKind, ctx: &PolicyContext, details: serde_json::Value) {
        let Some(sink) = &self.audit else { return };
        let event = PolicyEvent::from_context(kind, ctx, details);
        if let Err(e) = sink.record(event).await {
            warn!(error = %e, "audit emission failed");
        }
    }

    /// Run the full admission pipeline for a request.
    ///
    /// Order: suspicion strike block, suspicious-content scan, general rate
    /// cap, then (on configured auth routes) the lockout check. The first
    /// denial short-circuits the rest.
    #[instrument(name = "gate.admit", skip_all, fields(ip = %request.context.ip, route = %request.route))]
    pub async fn admit(&self, request: &GateRequest) -> Result<GateVerdict, GateError> {
        let verdict = self
            .inspect_request(
                &request.context,
                &request.url,
                &request.params,
                request.user_agent.as_deref(),
            )
            .await?;
        if !verdict.is_admitted() {
            return Ok(verdict);
        }

        let verdict = self.check_rate(&request.context).await?;
        if !verdict.is_admitted() {
            return Ok(verdict);
        }

        if self.config.is_auth_route(&request.route) {
            let verdict = self.check_auth_route(&request.context).await?;
            if !verdict.is_admitted() {
                return Ok(verdict);
            }
        }

        Ok(GateVerdict::Admitted)
    }

    /// Check and record against the general per-address rate cap.
    ///
    /// A rejected request is not counted: rejection is terminal and has no
    /// side effect beyond the audit event. The window TTL is anchored at the
    /// first admitted request and never extended by later ones.
    #[instrument(name = "gate.check_rate", skip_all, fields(ip = %ctx.ip))]
    pub async fn check_rate(&self, ctx: &PolicyContext) -> Result<GateVerdict, GateError> {
        let key = self.key(ctx, KeyKind::RateWindow);
        let count = self.state.get_count(&key).await?;

        if count >= self.config.max_requests_per_minute {
            debug!(count, limit = self.config.max_requests_per_minute, "rate cap hit");
            self.emit(
                EventKind::RateLimitExceeded,
                ctx,
                serde_json::json!({
                    "count": count,
                    "limit": self.config.max_requests_per_minute,
                }),
            )
            .await;
            return Ok(GateVerdict::RateLimited {
                retry_after: self.config.rate_window,
            });
        }

        self.state
            .increment(&key, 1, Expiry::StartWindow(self.config.rate_window))
            .await?;
        Ok(GateVerdict::Admitted)
    }

    /// Check whether an authentication route is reachable for this address.
    ///
    /// Below the failure threshold the route is open. At or above it, an
    /// active lockout marker denies the attempt; a missing or elapsed marker
    /// clears both the marker and the failure counter together and re-opens
    /// the route.
    #[instrument(name = "gate.check_auth_route", skip_all, fields(ip = %ctx.ip))]
    pub async fn check_auth_route(&self, ctx: &PolicyContext) -> Result<GateVerdict, GateError> {
        let failure_key = self.key(ctx, KeyKind::FailedLogins);
        let lockout_key = self.key(ctx, KeyKind::Lockout);

        let attempts = self.state.get_count(&failure_key).await?;
        if attempts < self.config.max_login_attempts {
            return Ok(GateVerdict::Admitted);
        }

        if let Some(raw) = self.state.get(&lockout_key).await? {
            let until = parse_lockout_marker(&raw)?;
            if Utc::now() < until {
                self.emit(
                    EventKind::BruteForceLockout,
                    ctx,
                    serde_json::json!({
                        "attempts": attempts,
                        "locked_until": until.to_rfc3339(),
                    }),
                )
                .await;
                return Ok(GateVerdict::Locked { until });
            }
        }

        // No marker, or it has elapsed: clear both sides together so the
        // next failure starts counting from one.
        self.state.delete(&failure_key).await?;
        self.state.delete(&lockout_key).await?;
        Ok(GateVerdict::Admitted)
    }

    /// Record a failed authentication attempt and arm the lockout when the
    /// threshold is reached.
    ///
    /// The failure counter's window re-arms on every failure, so the lockout
    /// countdown runs from the most recent attempt. Returns the new attempt
    /// count.
    #[instrument(name = "gate.record_failed_attempt", skip_all, fields(ip = %ctx.ip))]
    pub async fn record_failed_attempt(
        &self,
        ctx: &PolicyContext,
        attempted_identifier: &str,
    ) -> Result<i64, GateError> {
        let failure_key = self.key(ctx, KeyKind::FailedLogins);
        let attempts = self
            .state
            .increment(&failure_key, 1, Expiry::Refresh(self.config.lockout_duration))
            .await?;

        let lockout_active = attempts >= self.config.max_login_attempts;
        if lockout_active {
            let until = Utc::now() + lockout_chrono(self.config.lockout_duration);
            let lockout_key = self.key(ctx, KeyKind::Lockout);
            self.state
                .set(
                    &lockout_key,
                    &until.to_rfc3339(),
                    Some(self.config.lockout_duration),
                )
                .await?;
        }

        self.emit(
            EventKind::FailedLoginAttempt,
            ctx,
            serde_json::json!({
                "identifier": attempted_identifier,
                "attempts": attempts,
                "lockout_active": lockout_active,
            }),
        )
        .await;

        Ok(attempts)
    }

    /// Clear the failure counter and lockout marker after a successful
    /// authentication. A no-op when neither exists.
    #[instrument(name = "gate.clear_on_success", skip_all, fields(ip = %ctx.ip))]
    pub async fn clear_on_success(&self, ctx: &PolicyContext) -> Result<(), GateError> {
        let failure_key = self.key(ctx, KeyKind::FailedLogins);
        let lockout_key = self.key(ctx, KeyKind::Lockout);
        self.state.delete(&failure_key).await?;
        self.state.delete(&lockout_key).await?;
        Ok(())
    }

    /// Scan request content against the suspicion signatures and enforce the
    /// cumulative strike limit.
    ///
    /// An address at the strike limit is rejected outright, regardless of
    /// this request's content, until the strike window lapses. A matching
    /// request below the limit is recorded as a strike but still admitted.
    #[instrument(name = "gate.inspect_request", skip_all, fields(ip = %ctx.ip))]
    pub async fn inspect_request(
        &self,
        ctx: &PolicyContext,
        url: &str,
        params: &std::collections::HashMap<String, String>,
        user_agent: Option<&str>,
    ) -> Result<GateVerdict, GateError> {
        let strike_key = self.key(ctx, KeyKind::SuspiciousStrikes);

        let strikes = self.state.get_count(&strike_key).await?;
        if strikes >= self.config.strike_limit {
            debug!(strikes, "address is strike-blocked");
            return Ok(GateVerdict::SuspiciousBlocked { strikes });
        }

        let matched = self.suspicion.scan_request(url, params, user_agent);
        if !matched.is_empty() {
            let strikes = self
                .state
                .increment(&strike_key, 1, Expiry::StartWindow(self.config.strike_window))
                .await?;
            self.emit(
                EventKind::SuspiciousActivity,
                ctx,
                serde_json::json!({
                    "signatures": matched,
                    "strikes": strikes,
                    "url": url,
                }),
            )
            .await;
        }

        Ok(GateVerdict::Admitted)
    }
}

/// Parse a stored lockout marker back into a timestamp.
fn parse_lockout_marker(raw: &str) -> Result<DateTime<Utc>, GateError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| {
            GateError::State(tollgate_state::StateError::Serialization(format!(
                "lockout marker is not a timestamp: {e}"
            )))
        })
}

/// Convert a lockout duration to a chrono duration, saturating on overflow.
fn lockout_chrono(d: std::time::Duration) -> chrono::Duration {
    chrono::Duration::from_std(d).unwrap_or(chrono::Duration::MAX)
}
