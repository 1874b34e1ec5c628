pub mod error;
pub mod event;
pub mod sink;

pub use error::AuditError;
pub use event::{EventKind, PolicyEvent};
pub use sink::AuditSink;
