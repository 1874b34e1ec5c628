use thiserror::Error;

/// Errors from pricing validation and resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// Quantity must be at least 1; zero is rejected, never clamped.
    #[error("invalid quantity: {0} (must be at least 1)")]
    InvalidQuantity(u32),

    /// A tier set violates the non-overlap/ordering invariant. Raised at
    /// write time so invalid data never reaches the resolver.
    #[error("invalid tier configuration: {field}: {reason}")]
    InvalidTierConfiguration { field: String, reason: String },

    /// A suggested-tier ladder is malformed.
    #[error("invalid discount ladder: {0}")]
    InvalidLadder(String),
}

impl PricingError {
    pub(crate) fn tier_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTierConfiguration {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
