use std::sync::Arc;

use tollgate_audit::AuditSink;
use tollgate_state::CounterStore;

use crate::config::GateConfig;
use crate::error::GateError;
use crate::gate::PolicyGate;
use crate::suspicion::SuspicionRules;

/// Fluent builder for constructing a [`PolicyGate`] instance.
///
/// A [`CounterStore`] implementation must be supplied; everything else has a
/// sensible default (default thresholds, built-in suspicion signatures, no
/// audit sink).
pub struct GateBuilder {
    state: Option<Arc<dyn CounterStore>>,
    audit: Option<Arc<dyn AuditSink>>,
    config: GateConfig,
    suspicion: Option<SuspicionRules>,
}

impl GateBuilder {
    /// Create a new builder with all optional fields at their defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: None,
            audit: None,
            config: GateConfig::default(),
            suspicion: None,
        }
    }

    /// Set the counter store implementation.
    #[must_use]
    pub fn state(mut self, store: Arc<dyn CounterStore>) -> Self {
        self.state = Some(store);
        self
    }

    /// Set the audit sink. Without one, events are silently dropped.
    #[must_use]
    pub fn audit(mut self, sink: Arc<dyn AuditSink>) -> Self {
        self.audit = Some(sink);
        self
    }

    /// Override the gate configuration.
    #[must_use]
    pub fn config(mut self, config: GateConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the built-in suspicion signature set.
    #[must_use]
    pub fn suspicion(mut self, rules: SuspicionRules) -> Self {
        self.suspicion = Some(rules);
        self
    }

    /// Build the gate.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::Configuration`] if no counter store was supplied
    /// or a threshold is non-positive.
    pub fn build(self) -> Result<PolicyGate, GateError> {
        let state = self
            .state
            .ok_or_else(|| GateError::Configuration("counter store is required".into()))?;

        if self.config.max_requests_per_minute <= 0 {
            return Err(GateError::Configuration(
                "max_requests_per_minute must be positive".into(),
            ));
        }
        if self.config.max_login_attempts <= 0 {
            return Err(GateError::Configuration(
                "max_login_attempts must be positive".into(),
            ));
        }
        if self.config.strike_limit <= 0 {
            return Err(GateError::Configuration(
                "strike_limit must be positive".into(),
            ));
        }

        Ok(PolicyGate {
            state,
            audit: self.audit,
            config: self.config,
            suspicion: self.suspicion.unwrap_or_default(),
        })
    }
}

impl Default for GateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
