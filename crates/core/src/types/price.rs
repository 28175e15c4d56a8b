//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are stored as [`Decimal`] values in dollars and never as floats,
//! so cart totals stay exact no matter how many line items accumulate.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Deserializer, Serialize};

/// A non-negative amount of money in dollars.
///
/// Deserializes from the plain numeric prices the catalog API returns,
/// clamping anything negative to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Default)]
#[serde(transparent)]
pub struct Price(Decimal);

// Deserialized through `Price::new` so the non-negative invariant survives
// the wire.
impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        <Decimal as Deserialize>::deserialize(deserializer).map(Self::new)
    }
}

impl Price {
    /// A price of zero dollars.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal dollar amount.
    ///
    /// Negative amounts are clamped to zero; the domain has no concept of
    /// a negative price and upstream data occasionally misbehaves.
    #[must_use]
    pub fn new(amount: Decimal) -> Self {
        Self(amount.max(Decimal::ZERO))
    }

    /// Create a price from a floating point dollar amount.
    ///
    /// Non-finite values collapse to zero.
    #[must_use]
    pub fn from_f64(amount: f64) -> Self {
        Decimal::from_f64(amount).map_or(Self::ZERO, Self::new)
    }

    /// The underlying decimal dollar amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Apply a percentage discount (e.g. `12.5` for 12.5% off), rounding
    /// the result to cents.
    ///
    /// Percentages outside `0..=100` are clamped so a bad upstream value
    /// can never produce a negative or inflated price.
    #[must_use]
    pub fn apply_discount_percent(&self, percent: Decimal) -> Self {
        let percent = percent.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
        let factor = (Decimal::ONE_HUNDRED - percent) / Decimal::ONE_HUNDRED;
        Self::new((self.0 * factor).round_dp(2))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Price {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}
