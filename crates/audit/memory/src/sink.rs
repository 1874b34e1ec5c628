use std::sync::Mutex;

use async_trait::async_trait;

use tollgate_audit::error::AuditError;
use tollgate_audit::event::{EventKind, PolicyEvent};
use tollgate_audit::sink::AuditSink;

/// In-memory audit sink. Suitable for development and testing.
///
/// Events are kept in insertion order behind a mutex; accessors clone so
/// test assertions never hold the lock across an await point.
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    events: Mutex<Vec<PolicyEvent>>,
}

impl MemoryAuditSink {
    /// Create a new empty in-memory sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a snapshot of all recorded events in insertion order.
    #[must_use]
    pub fn events(&self) -> Vec<PolicyEvent> {
        self.events.lock().expect("audit sink lock poisoned").clone()
    }

    /// Return a snapshot of the events of one kind, in insertion order.
    #[must_use]
    pub fn events_of_kind(&self, kind: &EventKind) -> Vec<PolicyEvent> {
        self.events
            .lock()
            .expect("audit sink lock poisoned")
            .iter()
            .filter(|e| &e.kind == kind)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl AuditSink for MemoryAuditSink {
    async fn record(&self, event: PolicyEvent) -> Result<(), AuditError> {
        self.events
            .lock()
            .map_err(|_| AuditError::Storage("audit sink lock poisoned".into()))?
            .push(event);
        Ok(())
    }
}
