use thiserror::Error;

/// Top-level error type for the Tollgate system.
///
/// Individual crates define their own error enums; this type exists for
/// callers that need to hold errors from several crates behind one variant
/// set (e.g. a request pipeline reporting a single failure class upward).
#[derive(Debug, Error)]
pub enum TollgateError {
    #[error("state error: {0}")]
    State(String),

    #[error("gate error: {0}")]
    Gate(String),

    #[error("pricing error: {0}")]
    Pricing(String),

    #[error("audit error: {0}")]
    Audit(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("{0}")]
    Other(String),
}
