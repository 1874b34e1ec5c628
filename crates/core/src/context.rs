use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{ClientIp, CompanyId, Namespace, TenantId, UserId};

/// The identity a policy decision is made for.
///
/// Every gate operation is keyed by `(namespace, tenant, ip)`. The user and
/// company fields are carried for audit purposes only; anonymous requests
/// leave them as `None` rather than synthesizing a placeholder identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyContext {
    /// Namespace the decision belongs to (e.g. `portal`, `api`).
    pub namespace: Namespace,
    /// Tenant the request is scoped to.
    pub tenant: TenantId,
    /// Client address the counters are keyed by.
    pub ip: ClientIp,
    /// Authenticated user, if any.
    pub user_id: Option<UserId>,
    /// Company of the authenticated user, if any.
    pub company_id: Option<CompanyId>,
    /// When the request entered the gate.
    pub timestamp: DateTime<Utc>,
}

impl PolicyContext {
    /// Create a context for an anonymous request, timestamped now.
    #[must_use]
    pub fn anonymous(
        namespace: impl Into<Namespace>,
        tenant: impl Into<TenantId>,
        ip: impl Into<ClientIp>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            tenant: tenant.into(),
            ip: ip.into(),
            user_id: None,
            company_id: None,
            timestamp: Utc::now(),
        }
    }

    /// Attach an authenticated user identity to this context.
    #[must_use]
    pub fn with_user(mut self, user_id: impl Into<UserId>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Attach a company identity to this context.
    #[must_use]
    pub fn with_company(mut self, company_id: impl Into<CompanyId>) -> Self {
        self.company_id = Some(company_id.into());
        self
    }
}
