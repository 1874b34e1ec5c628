pub mod book;
pub mod error;
pub mod money;
pub mod model;
pub mod resolver;
pub mod suggest;

pub use book::TierBook;
pub use error::PricingError;
pub use model::{CustomerSegment, PricingItem, PricingTier};
pub use money::{Money, Percent};
pub use resolver::{PriceResolution, PriceSource, resolve};
pub use suggest::suggest_tiers;
