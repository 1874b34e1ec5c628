use serde::{Deserialize, Serialize};
use std::fmt;

/// A monetary amount in integer minor units (cents).
///
/// Integer representation keeps price math exact; the only rounding point is
/// [`apply_discount`](Money::apply_discount), which rounds half-up to the
/// nearest cent.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Self = Self(0);

    /// Create from minor units (cents).
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create from whole major units (e.g. dollars).
    #[must_use]
    pub const fn from_major(units: i64) -> Self {
        Self(units * 100)
    }

    /// The amount in minor units.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Whether the amount is below zero.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Apply a percentage discount, rounding half-up to the nearest cent.
    ///
    /// Defined for non-negative amounts; validation rejects negative prices
    /// before they reach this point.
    #[must_use]
    pub fn apply_discount(self, discount: Percent) -> Self {
        let remaining = i128::from(Percent::SCALE) - i128::from(discount.bps().min(Percent::SCALE));
        let scaled = i128::from(self.0) * remaining;
        let rounded = (scaled + i128::from(Percent::SCALE) / 2) / i128::from(Percent::SCALE);
        Self(i64::try_from(rounded).unwrap_or(i64::MAX))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

/// A percentage expressed in basis points (`1250` = 12.5%).
///
/// Basis points keep discount math integer-exact while still allowing the
/// fractional percentages catalog administrators actually configure.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Percent(u32);

impl Percent {
    /// Basis points in 100%.
    pub const SCALE: u32 = 10_000;

    /// Create from basis points.
    #[must_use]
    pub const fn from_bps(bps: u32) -> Self {
        Self(bps)
    }

    /// Create from a whole percentage (e.g. `10` = 10%).
    #[must_use]
    pub const fn from_percent(percent: u32) -> Self {
        Self(percent * 100)
    }

    /// The value in basis points.
    #[must_use]
    pub const fn bps(self) -> u32 {
        self.0
    }

    /// Whether this is a valid discount (0–100% inclusive).
    #[must_use]
    pub const fn is_valid_discount(self) -> bool {
        self.0 <= Self::SCALE
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 100 == 0 {
            write!(f, "{}%", self.0 / 100)
        } else {
            write!(f, "{}.{:02}%", self.0 / 100, self.0 % 100)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_display() {
        assert_eq!(Money::from_cents(12_345).to_string(), "123.45");
        assert_eq!(Money::from_cents(-50).to_string(), "-0.50");
        assert_eq!(Money::from_major(100).to_string(), "100.00");
    }

    #[test]
    fn discount_basic() {
        let base = Money::from_major(100);
        assert_eq!(base.apply_discount(Percent::from_percent(10)), Money::from_major(90));
        assert_eq!(base.apply_discount(Percent::from_percent(0)), base);
        assert_eq!(base.apply_discount(Percent::from_percent(100)), Money::ZERO);
    }

    #[test]
    fn discount_rounds_half_up() {
        // 0.99 * 5% off = 0.9405 -> 0.94; 0.99 * 15% off = 0.8415 -> 0.84;
        // 0.90 * 12.5% off = 0.7875 -> 0.79 (half rounds up).
        let p99 = Money::from_cents(99);
        assert_eq!(p99.apply_discount(Percent::from_percent(5)), Money::from_cents(94));
        assert_eq!(p99.apply_discount(Percent::from_percent(15)), Money::from_cents(84));
        let p90 = Money::from_cents(90);
        assert_eq!(p90.apply_discount(Percent::from_bps(1250)), Money::from_cents(79));
    }

    #[test]
    fn discount_clamps_above_full() {
        let base = Money::from_major(10);
        assert_eq!(base.apply_discount(Percent::from_bps(20_000)), Money::ZERO);
    }

    #[test]
    fn percent_display() {
        assert_eq!(Percent::from_percent(10).to_string(), "10%");
        assert_eq!(Percent::from_bps(1250).to_string(), "12.50%");
    }

    #[test]
    fn percent_validity() {
        assert!(Percent::from_percent(100).is_valid_discount());
        assert!(!Percent::from_bps(10_001).is_valid_discount());
    }

    #[test]
    fn money_serde_is_transparent() {
        let m = Money::from_cents(250);
        assert_eq!(serde_json::to_string(&m).unwrap(), "250");
        let back: Money = serde_json::from_str("250").unwrap();
        assert_eq!(back, m);
    }
}
