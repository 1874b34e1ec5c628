use serde::{Deserialize, Serialize};

use tollgate_core::{ClientIp, Namespace, TenantId};

/// The kind of policy state being stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyKind {
    /// General request counter for the fixed rate window.
    RateWindow,
    /// Failed authentication attempts for an address.
    FailedLogins,
    /// Lockout marker holding the `locked_until` timestamp.
    Lockout,
    /// Cumulative suspicious-pattern strikes.
    SuspiciousStrikes,
    Custom(String),
}

impl KeyKind {
    /// Return a string representation of the key kind.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::RateWindow => "rate_window",
            Self::FailedLogins => "failed_logins",
            Self::Lockout => "lockout",
            Self::SuspiciousStrikes => "suspicious_strikes",
            Self::Custom(s) => s.as_str(),
        }
    }
}

impl std::fmt::Display for KeyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key used to address entries in the counter store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateKey {
    pub namespace: Namespace,
    pub tenant: TenantId,
    pub kind: KeyKind,
    pub id: String,
}

impl StateKey {
    /// Create a new state key.
    #[must_use]
    pub fn new(
        namespace: impl Into<Namespace>,
        tenant: impl Into<TenantId>,
        kind: KeyKind,
        id: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            tenant: tenant.into(),
            kind,
            id: id.into(),
        }
    }

    /// Build a key of the given kind addressed by client IP.
    #[must_use]
    pub fn for_ip(
        namespace: impl Into<Namespace>,
        tenant: impl Into<TenantId>,
        kind: KeyKind,
        ip: &ClientIp,
    ) -> Self {
        Self::new(namespace, tenant, kind, ip.as_str())
    }

    /// Return a canonical string representation: `namespace:tenant:kind:id`
    #[must_use]
    pub fn canonical(&self) -> String {
        format!(
            "{}:{}:{}:{}",
            self.namespace, self.tenant, self.kind, self.id
        )
    }
}

impl std::fmt::Display for StateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.canonical())
    }
}
