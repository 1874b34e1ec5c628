use serde::{Deserialize, Serialize};

use crate::book::TierBook;
use crate::error::PricingError;
use crate::model::CustomerSegment;
use crate::money::{Money, Percent};

/// Where a resolved price came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceSource {
    /// A quantity-bracket tier matched.
    Tier,
    /// No tier matched; the segment's default discount applied.
    SegmentDefault,
    /// No tier and no segment default; the base price stands.
    BasePrice,
}

impl PriceSource {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tier => "tier",
            Self::SegmentDefault => "segment_default",
            Self::BasePrice => "base_price",
        }
    }
}

impl std::fmt::Display for PriceSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcome of a single price resolution.
///
/// Callers snapshot this onto the invoice or quotation line item at creation
/// time; a line item's price is never re-derived from live tiers later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceResolution {
    pub unit_price: Money,
    pub discount: Option<Percent>,
    pub source: PriceSource,
}

/// Resolve the unit price for `quantity` of the book's item.
///
/// Pure and side-effect free: resolving the same inputs twice yields
/// identical results. Segment-specific tiers fully shadow the default set —
/// a segment that has any tiers of its own never falls through to the
/// default tiers, only to its default discount or the base price.
///
/// # Errors
///
/// Returns [`PricingError::InvalidQuantity`] for `quantity == 0`.
pub fn resolve(
    book: &TierBook,
    quantity: u32,
    segment: Option<&CustomerSegment>,
) -> Result<PriceResolution, PricingError> {
    if quantity == 0 {
        return Err(PricingError::InvalidQuantity(quantity));
    }

    let segment_id = segment.map(|s| s.id.as_str());
    let set = segment_id
        .and_then(|id| book.tiers_for(Some(id)))
        .or_else(|| book.tiers_for(None))
        .unwrap_or(&[]);

    // The set is min-sorted, so the first match is the smallest-minimum
    // match; disjoint-by-construction sets have at most one anyway.
    if let Some(tier) = set.iter().find(|t| t.matches(quantity)) {
        return Ok(PriceResolution {
            unit_price: tier.unit_price,
            discount: tier.discount,
            source: PriceSource::Tier,
        });
    }

    if let Some(seg) = segment
        && seg.is_active
        && let Some(discount) = seg.default_discount
    {
        return Ok(PriceResolution {
            unit_price: book.item().unit_price.apply_discount(discount),
            discount: Some(discount),
            source: PriceSource::SegmentDefault,
        });
    }

    Ok(PriceResolution {
        unit_price: book.item().unit_price,
        discount: None,
        source: PriceSource::BasePrice,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PricingItem, PricingTier};

    fn standard_book() -> TierBook {
        TierBook::new(
            PricingItem::new("widget", Money::from_major(100)),
            vec![
                PricingTier::new(1, Some(9), Money::from_major(100)),
                PricingTier::new(10, Some(49), Money::from_major(90)),
                PricingTier::new(50, None, Money::from_major(80)),
            ],
        )
        .unwrap()
    }

    #[test]
    fn bracket_boundaries_are_inclusive() {
        let book = standard_book();

        let r = resolve(&book, 9, None).unwrap();
        assert_eq!(r.unit_price, Money::from_major(100));
        assert_eq!(r.source, PriceSource::Tier);

        let r = resolve(&book, 10, None).unwrap();
        assert_eq!(r.unit_price, Money::from_major(90));

        let r = resolve(&book, 49, None).unwrap();
        assert_eq!(r.unit_price, Money::from_major(90));

        let r = resolve(&book, 50, None).unwrap();
        assert_eq!(r.unit_price, Money::from_major(80));
    }

    #[test]
    fn zero_quantity_is_rejected_not_clamped() {
        let book = standard_book();
        let err = resolve(&book, 0, None).unwrap_err();
        assert_eq!(err, PricingError::InvalidQuantity(0));
    }

    #[test]
    fn open_ended_tier_covers_large_quantities() {
        let book = standard_book();
        let r = resolve(&book, 100_000, None).unwrap();
        assert_eq!(r.unit_price, Money::from_major(80));
        assert_eq!(r.source, PriceSource::Tier);
    }

    #[test]
    fn segment_without_tiers_falls_back_to_default_discount() {
        // Tiers exist only for a different segment; resolution for this one
        // uses its default discount at any quantity.
        let book = TierBook::new(
            PricingItem::new("widget", Money::from_major(100)),
            vec![PricingTier::new(1, Some(9), Money::from_major(70)).for_segment("wholesale")],
        )
        .unwrap();
        let retail = CustomerSegment::new("retail", Some(Percent::from_percent(10)));

        for qty in [1, 9, 10, 500] {
            let r = resolve(&book, qty, Some(&retail)).unwrap();
            assert_eq!(r.unit_price, Money::from_major(90));
            assert_eq!(r.source, PriceSource::SegmentDefault);
            assert_eq!(r.discount, Some(Percent::from_percent(10)));
        }
    }

    #[test]
    fn segment_tiers_shadow_default_tiers() {
        let book = TierBook::new(
            PricingItem::new("widget", Money::from_major(100)),
            vec![
                PricingTier::new(1, Some(9), Money::from_major(100)),
                PricingTier::new(10, None, Money::from_major(90)),
                PricingTier::new(1, Some(4), Money::from_major(85)).for_segment("wholesale"),
            ],
        )
        .unwrap();
        let wholesale = CustomerSegment::new("wholesale", None);

        // Within the wholesale bracket: wholesale price wins.
        let r = resolve(&book, 2, Some(&wholesale)).unwrap();
        assert_eq!(r.unit_price, Money::from_major(85));

        // Outside it, the default *tiers* are not consulted: with no segment
        // default discount, the base price applies.
        let r = resolve(&book, 20, Some(&wholesale)).unwrap();
        assert_eq!(r.unit_price, Money::from_major(100));
        assert_eq!(r.source, PriceSource::BasePrice);
    }

    #[test]
    fn inactive_segment_discount_is_ignored() {
        let book = TierBook::without_tiers(PricingItem::new("widget", Money::from_major(100)));
        let mut seg = CustomerSegment::new("dormant", Some(Percent::from_percent(25)));
        seg.is_active = false;

        let r = resolve(&book, 5, Some(&seg)).unwrap();
        assert_eq!(r.unit_price, Money::from_major(100));
        assert_eq!(r.source, PriceSource::BasePrice);
    }

    #[test]
    fn no_segment_no_tiers_returns_base_price() {
        let book = TierBook::without_tiers(PricingItem::new("widget", Money::from_major(100)));
        let r = resolve(&book, 3, None).unwrap();
        assert_eq!(r.unit_price, Money::from_major(100));
        assert_eq!(r.source, PriceSource::BasePrice);
        assert_eq!(r.discount, None);
    }

    #[test]
    fn resolution_is_idempotent() {
        let book = standard_book();
        let seg = CustomerSegment::new("retail", Some(Percent::from_percent(10)));
        let first = resolve(&book, 25, Some(&seg)).unwrap();
        let second = resolve(&book, 25, Some(&seg)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn fractional_segment_discount_rounds_half_up() {
        let book = TierBook::without_tiers(PricingItem::new("widget", Money::from_cents(9_999)));
        let seg = CustomerSegment::new("assoc", Some(Percent::from_bps(1250)));

        // 99.99 * 0.875 = 87.491_25 -> 87.49
        let r = resolve(&book, 1, Some(&seg)).unwrap();
        assert_eq!(r.unit_price, Money::from_cents(8_749));
    }
}
