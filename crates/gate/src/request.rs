use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use tollgate_core::PolicyContext;

/// Everything the gate inspects about an inbound request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateRequest {
    /// Identity and keying information.
    pub context: PolicyContext,
    /// Route identifier as named by the surrounding router (e.g. `login`).
    pub route: String,
    /// Full request URL, query string included.
    pub url: String,
    /// All input key/value pairs (query and body merged by the caller).
    pub params: HashMap<String, String>,
    /// Client-reported agent string, if present.
    pub user_agent: Option<String>,
}

impl GateRequest {
    /// Create a request with no params and no agent string.
    #[must_use]
    pub fn new(context: PolicyContext, route: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            context,
            route: route.into(),
            url: url.into(),
            params: HashMap::new(),
            user_agent: None,
        }
    }

    /// Add an input key/value pair.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Set the client-reported agent string.
    #[must_use]
    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }
}
