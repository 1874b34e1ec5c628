use thiserror::Error;

/// Errors from counter store operations.
///
/// A store failure is always distinct from a policy verdict: the gate treats
/// any of these as "policy store unavailable" and fails the enclosing
/// operation closed, never as "limit exceeded".
#[derive(Debug, Error)]
pub enum StateError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("backend error: {0}")]
    Backend(String),

    #[error("operation timed out after {0:?}")]
    Timeout(std::time::Duration),
}
