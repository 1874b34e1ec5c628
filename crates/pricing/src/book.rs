use std::collections::BTreeMap;

use crate::error::PricingError;
use crate::model::{PricingItem, PricingTier};

/// The validated tier sets for one item, grouped by segment.
///
/// Construction is the write-time validation gate: a `TierBook` can only
/// hold tier sets that satisfy the ordering and non-overlap invariants, so
/// the resolver never has to re-check them. Each set is kept sorted by
/// `min_quantity`, which also makes the defensive smallest-`min_quantity`
/// tie-break deterministic if stored data is ever edited out from under us.
#[derive(Debug, Clone)]
pub struct TierBook {
    item: PricingItem,
    /// `None` key = the default (all-segments) tier set.
    tiers: BTreeMap<Option<String>, Vec<PricingTier>>,
}

impl TierBook {
    /// Validate and index a set of tiers for an item.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidTierConfiguration`] naming the field at
    /// fault when any per-segment set violates an invariant: minimum below 1,
    /// inverted bounds, negative price, discount above 100%, overlapping
    /// brackets, or an open-ended tier that is not the top tier.
    pub fn new(item: PricingItem, tiers: Vec<PricingTier>) -> Result<Self, PricingError> {
        if item.unit_price.is_negative() {
            return Err(PricingError::tier_config(
                "unit_price",
                "base price must not be negative",
            ));
        }

        let mut grouped: BTreeMap<Option<String>, Vec<PricingTier>> = BTreeMap::new();
        for tier in tiers {
            validate_tier(&tier)?;
            grouped.entry(tier.segment.clone()).or_default().push(tier);
        }

        for set in grouped.values_mut() {
            set.sort_by_key(|t| t.min_quantity);
            validate_set(set)?;
        }

        Ok(Self {
            item,
            tiers: grouped,
        })
    }

    /// An empty book: every resolution falls through to segment default or
    /// base price.
    #[must_use]
    pub fn without_tiers(item: PricingItem) -> Self {
        Self {
            item,
            tiers: BTreeMap::new(),
        }
    }

    /// The item this book prices.
    #[must_use]
    pub fn item(&self) -> &PricingItem {
        &self.item
    }

    /// The sorted tier set for a segment, if one exists. `None` segment
    /// addresses the default set.
    #[must_use]
    pub fn tiers_for(&self, segment: Option<&str>) -> Option<&[PricingTier]> {
        self.tiers
            .get(&segment.map(ToOwned::to_owned))
            .map(Vec::as_slice)
    }
}

fn validate_tier(tier: &PricingTier) -> Result<(), PricingError> {
    if tier.min_quantity < 1 {
        return Err(PricingError::tier_config(
            "min_quantity",
            "must be at least 1",
        ));
    }
    if let Some(max) = tier.max_quantity
        && max < tier.min_quantity
    {
        return Err(PricingError::tier_config(
            "max_quantity",
            format!("must be >= min_quantity ({} > {max})", tier.min_quantity),
        ));
    }
    if tier.unit_price.is_negative() {
        return Err(PricingError::tier_config(
            "unit_price",
            "must not be negative",
        ));
    }
    if let Some(discount) = tier.discount
        && !discount.is_valid_discount()
    {
        return Err(PricingError::tier_config(
            "discount",
            format!("{discount} exceeds 100%"),
        ));
    }
    Ok(())
}

/// Validate a single min-sorted per-segment set.
fn validate_set(set: &[PricingTier]) -> Result<(), PricingError> {
    for pair in set.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        let Some(prev_max) = prev.max_quantity else {
            // An unbounded tier followed by anything overlaps it.
            return Err(PricingError::tier_config(
                "max_quantity",
                format!(
                    "open-ended tier starting at {} must be the highest tier",
                    prev.min_quantity
                ),
            ));
        };
        if next.min_quantity <= prev_max {
            return Err(PricingError::tier_config(
                "min_quantity",
                format!(
                    "tier starting at {} overlaps the bracket [{}, {prev_max}]",
                    next.min_quantity, prev.min_quantity
                ),
            ));
        }
    }
    Ok(())
}
