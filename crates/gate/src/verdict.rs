use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The gate's decision for a single request.
///
/// Denials are ordinary values, not errors: the surrounding pipeline maps
/// them onto user-facing responses (429, 423, 403). A rejection is terminal
/// for the request; no further checks run once one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum GateVerdict {
    /// The request may proceed.
    Admitted,
    /// The general request cap was exceeded for this address.
    RateLimited {
        /// Upper bound on how long the caller should wait before retrying.
        retry_after: Duration,
    },
    /// The address is under an active brute-force lockout.
    Locked {
        /// When the lockout elapses.
        until: DateTime<Utc>,
    },
    /// The address accumulated too many suspicion strikes this window.
    SuspiciousBlocked {
        /// Strikes recorded when the block was applied.
        strikes: i64,
    },
}

impl GateVerdict {
    /// Whether this verdict lets the request through.
    #[must_use]
    pub fn is_admitted(&self) -> bool {
        matches!(self, Self::Admitted)
    }

    /// A stable tag for logs and audit details.
    #[must_use]
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::Admitted => "admitted",
            Self::RateLimited { .. } => "rate_limited",
            Self::Locked { .. } => "locked",
            Self::SuspiciousBlocked { .. } => "suspicious_blocked",
        }
    }
}

impl std::fmt::Display for GateVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_tag())
    }
}
