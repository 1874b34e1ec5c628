use crate::error::PricingError;
use crate::model::PricingTier;
use crate::money::{Money, Percent};

/// Generate a candidate tier list from a base price and a discount ladder.
///
/// An administrative convenience, not part of the resolution path: given
/// quantity breaks with a discount at each (e.g. 5%/10%/15%/20% at
/// 10/50/100/500), produce closed brackets between consecutive breaks with an
/// open-ended top tier, unit prices rounded half-up to the cent. Quantities
/// below the first break are intentionally uncovered and fall through to the
/// base price.
///
/// # Errors
///
/// Returns [`PricingError::InvalidLadder`] for an empty ladder, a zero
/// quantity break, non-ascending breaks, a negative base price, or a
/// discount above 100%.
pub fn suggest_tiers(
    base_price: Money,
    ladder: &[(u32, Percent)],
) -> Result<Vec<PricingTier>, PricingError> {
    if ladder.is_empty() {
        return Err(PricingError::InvalidLadder("ladder must not be empty".into()));
    }
    if base_price.is_negative() {
        return Err(PricingError::InvalidLadder(
            "base price must not be negative".into(),
        ));
    }

    for pair in ladder.windows(2) {
        if pair[1].0 <= pair[0].0 {
            return Err(PricingError::InvalidLadder(format!(
                "quantity breaks must be strictly ascending ({} then {})",
                pair[0].0, pair[1].0
            )));
        }
    }

    let mut tiers = Vec::with_capacity(ladder.len());
    for (i, &(break_at, discount)) in ladder.iter().enumerate() {
        if break_at == 0 {
            return Err(PricingError::InvalidLadder(
                "quantity breaks must be at least 1".into(),
            ));
        }
        if !discount.is_valid_discount() {
            return Err(PricingError::InvalidLadder(format!(
                "discount {discount} exceeds 100%"
            )));
        }

        let max_quantity = ladder.get(i + 1).map(|&(next, _)| next - 1);
        tiers.push(
            PricingTier::new(break_at, max_quantity, base_price.apply_discount(discount))
                .with_discount(discount),
        );
    }

    Ok(tiers)
}
