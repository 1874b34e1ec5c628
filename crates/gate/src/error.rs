use thiserror::Error;

/// Errors that can occur during gate operations.
///
/// Policy denials are not errors: they come back as
/// [`GateVerdict`](crate::GateVerdict) variants. An error here means the
/// decision could not be made at all, and the enclosing request must fail
/// closed rather than be silently admitted.
#[derive(Debug, Error)]
pub enum GateError {
    /// The counter store could not be reached or queried.
    #[error("policy store unavailable: {0}")]
    State(#[from] tollgate_state::StateError),

    /// The gate was misconfigured (e.g. missing required components).
    #[error("configuration error: {0}")]
    Configuration(String),
}
