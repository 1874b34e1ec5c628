use std::collections::HashSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tunable thresholds and windows for the policy gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    /// Requests admitted per address within one rate window.
    pub max_requests_per_minute: i64,
    /// Length of the general rate window. The window is anchored at the
    /// first request, not sliding, so bursts straddling a boundary can reach
    /// twice the nominal rate.
    #[serde(with = "duration_secs")]
    pub rate_window: Duration,
    /// Failed authentication attempts before an address is locked out.
    pub max_login_attempts: i64,
    /// How long a lockout lasts, measured from the most recent failure.
    #[serde(with = "duration_secs")]
    pub lockout_duration: Duration,
    /// Suspicious-pattern strikes before requests are rejected outright.
    pub strike_limit: i64,
    /// Length of the strike accumulation window.
    #[serde(with = "duration_secs")]
    pub strike_window: Duration,
    /// Route identifiers subject to the brute-force lockout check.
    pub auth_routes: HashSet<String>,
}

impl GateConfig {
    /// Whether the given route identifier is an authentication route.
    #[must_use]
    pub fn is_auth_route(&self, route: &str) -> bool {
        self.auth_routes.contains(route)
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            max_requests_per_minute: 60,
            rate_window: Duration::from_secs(60),
            max_login_attempts: 5,
            lockout_duration: Duration::from_secs(900),
            strike_limit: 3,
            strike_window: Duration::from_secs(3600),
            auth_routes: ["login", "register", "password.email", "password.update"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
        }
    }
}

/// Serialize `Duration` fields as whole seconds.
mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(de)?;
        Ok(Duration::from_secs(secs))
    }
}
