use async_trait::async_trait;

use crate::error::AuditError;
use crate::event::PolicyEvent;

/// Trait for append-only policy event sinks.
///
/// Implementations must be `Send + Sync` to be shared across async tasks.
/// Durability is the sink's responsibility; from the gate's perspective a
/// `record` call is fire-and-forget, and a returned error never changes the
/// admit/reject decision.
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Persist a policy event.
    async fn record(&self, event: PolicyEvent) -> Result<(), AuditError>;
}
