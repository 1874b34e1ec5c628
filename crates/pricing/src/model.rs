use serde::{Deserialize, Serialize};

use crate::money::{Money, Percent};

/// A priced catalog item carrying its base (list) price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingItem {
    pub id: String,
    /// Base price per unit, used when no tier or segment default applies.
    pub unit_price: Money,
}

impl PricingItem {
    #[must_use]
    pub fn new(id: impl Into<String>, unit_price: Money) -> Self {
        Self {
            id: id.into(),
            unit_price,
        }
    }
}

/// A customer segment with an optional fallback discount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSegment {
    pub id: String,
    /// Percentage off the base price when no tier matches for this segment.
    pub default_discount: Option<Percent>,
    /// Inactive segments never contribute their default discount.
    pub is_active: bool,
}

impl CustomerSegment {
    #[must_use]
    pub fn new(id: impl Into<String>, default_discount: Option<Percent>) -> Self {
        Self {
            id: id.into(),
            default_discount,
            is_active: true,
        }
    }
}

/// A quantity-bracket price rule.
///
/// Brackets are closed on both ends: a tier matches quantity `q` when
/// `min_quantity <= q` and (`max_quantity` is `None` or `q <= max_quantity`).
/// `segment = None` means the tier belongs to the item's default ("all
/// segments") set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingTier {
    pub min_quantity: u32,
    /// `None` = unbounded upper end (open-ended top tier).
    pub max_quantity: Option<u32>,
    pub unit_price: Money,
    pub discount: Option<Percent>,
    pub segment: Option<String>,
}

impl PricingTier {
    /// A tier in the default (all-segments) set.
    #[must_use]
    pub fn new(min_quantity: u32, max_quantity: Option<u32>, unit_price: Money) -> Self {
        Self {
            min_quantity,
            max_quantity,
            unit_price,
            discount: None,
            segment: None,
        }
    }

    /// Scope this tier to a customer segment.
    #[must_use]
    pub fn for_segment(mut self, segment: impl Into<String>) -> Self {
        self.segment = Some(segment.into());
        self
    }

    /// Attach the discount percentage this tier represents.
    #[must_use]
    pub fn with_discount(mut self, discount: Percent) -> Self {
        self.discount = Some(discount);
        self
    }

    /// Whether this tier's bracket contains `quantity`.
    #[must_use]
    pub fn matches(&self, quantity: u32) -> bool {
        self.min_quantity <= quantity && self.max_quantity.is_none_or(|max| quantity <= max)
    }
}
