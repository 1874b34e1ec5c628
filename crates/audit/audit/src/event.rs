use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tollgate_core::PolicyContext;

/// The class of policy event being recorded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// The general request cap was hit for an address.
    RateLimitExceeded,
    /// An authentication attempt failed.
    FailedLoginAttempt,
    /// An address was denied because its lockout window is active.
    BruteForceLockout,
    /// Request content matched one or more suspicion signatures.
    SuspiciousActivity,
    Custom(String),
}

impl EventKind {
    /// Return the stable tag used in persisted records.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::RateLimitExceeded => "rate_limit_exceeded",
            Self::FailedLoginAttempt => "failed_login_attempt",
            Self::BruteForceLockout => "brute_force_lockout",
            Self::SuspiciousActivity => "suspicious_activity",
            Self::Custom(s) => s.as_str(),
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single append-only policy event.
///
/// Identity fields come straight from the [`PolicyContext`]: anonymous
/// requests carry `user_id = None` rather than a synthesized placeholder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyEvent {
    /// Unique identifier for this event (UUID v4).
    pub id: String,
    /// What happened.
    pub kind: EventKind,
    /// Client address the decision was keyed by.
    pub ip: String,
    /// Namespace of the originating request.
    pub namespace: String,
    /// Tenant of the originating request.
    pub tenant: String,
    /// Authenticated user, if any.
    pub user_id: Option<String>,
    /// Company of the authenticated user, if any.
    pub company_id: Option<String>,
    /// Event-specific details (attempt counts, matched signatures, ...).
    pub details: serde_json::Value,
    /// When the event was recorded.
    pub recorded_at: DateTime<Utc>,
}

impl PolicyEvent {
    /// Build an event from a policy context, timestamped now.
    #[must_use]
    pub fn from_context(kind: EventKind, ctx: &PolicyContext, details: serde_json::Value) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            ip: ctx.ip.to_string(),
            namespace: ctx.namespace.to_string(),
            tenant: ctx.tenant.to_string(),
            user_id: ctx.user_id.as_ref().map(ToString::to_string),
            company_id: ctx.company_id.as_ref().map(ToString::to_string),
            details,
            recorded_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tollgate_core::PolicyContext;

    #[test]
    fn event_kind_tags() {
        assert_eq!(EventKind::RateLimitExceeded.as_str(), "rate_limit_exceeded");
        assert_eq!(EventKind::FailedLoginAttempt.as_str(), "failed_login_attempt");
        assert_eq!(EventKind::BruteForceLockout.as_str(), "brute_force_lockout");
        assert_eq!(EventKind::SuspiciousActivity.as_str(), "suspicious_activity");
        assert_eq!(EventKind::Custom("probe".into()).as_str(), "probe");
    }

    #[test]
    fn from_context_carries_identity() {
        let ctx = PolicyContext::anonymous("portal", "acme", "10.0.0.5").with_user("u-1");
        let ev = PolicyEvent::from_context(
            EventKind::FailedLoginAttempt,
            &ctx,
            serde_json::json!({ "attempts": 3 }),
        );
        assert_eq!(ev.ip, "10.0.0.5");
        assert_eq!(ev.tenant, "acme");
        assert_eq!(ev.user_id.as_deref(), Some("u-1"));
        assert!(ev.company_id.is_none());
        assert_eq!(ev.details["attempts"], 3);
    }

    #[test]
    fn event_serde_roundtrip() {
        let ctx = PolicyContext::anonymous("portal", "acme", "10.0.0.5");
        let ev = PolicyEvent::from_context(
            EventKind::SuspiciousActivity,
            &ctx,
            serde_json::json!({ "signatures": ["sql_keyword"] }),
        );
        let json = serde_json::to_string(&ev).unwrap();
        let back: PolicyEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back.kind, EventKind::SuspiciousActivity);
        assert_eq!(back.id, ev.id);
    }
}
