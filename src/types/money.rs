//! Fixed-point money type for expense amounts
//!
//! This module defines the Money type used for all monetary values in the
//! engine. Amounts are stored as integer minor units (cents), so arithmetic
//! is exact and comparisons never depend on floating-point behavior.
//!
//! Decimal values only appear at the wire boundary: construction from a
//! decimal string or `rust_decimal::Decimal` is exact and rejects inputs
//! that carry sub-cent precision rather than rounding them.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use std::str::FromStr;

use crate::types::error::MoneyError;

/// Number of fractional digits carried by [`Money`] (2 = cents).
pub const MONEY_SCALE: u32 = 2;

/// A monetary amount in integer minor units (cents)
///
/// Negative values are representable (they arise transiently while
/// validating custom splits); whether a negative amount is acceptable is
/// decided by the operation consuming it, not by this type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Zero amount
    pub const ZERO: Money = Money(0);

    /// Create an amount from integer minor units (cents)
    pub const fn from_minor_units(minor_units: i64) -> Self {
        Money(minor_units)
    }

    /// The amount in integer minor units (cents)
    pub const fn minor_units(self) -> i64 {
        self.0
    }

    /// Convert an exact decimal value into minor units
    ///
    /// # Arguments
    ///
    /// * `value` - A decimal amount in major units (e.g. `12.34`)
    ///
    /// # Errors
    ///
    /// * `MoneyError::PrecisionLoss` - the value carries more than
    ///   [`MONEY_SCALE`] fractional digits (e.g. `12.345`); such values are
    ///   rejected, never rounded
    /// * `MoneyError::Overflow` - the value does not fit in `i64` minor units
    pub fn try_from_decimal(value: Decimal) -> Result<Self, MoneyError> {
        let factor = Decimal::from(10_i64.pow(MONEY_SCALE));
        let units = value
            .checked_mul(factor)
            .ok_or_else(|| MoneyError::overflow("decimal conversion"))?;
        if units.fract() != Decimal::ZERO {
            return Err(MoneyError::precision_loss(value));
        }
        units
            .to_i64()
            .map(Money)
            .ok_or_else(|| MoneyError::overflow("decimal conversion"))
    }

    /// The amount as an exact decimal in major units
    pub fn as_decimal(self) -> Decimal {
        Decimal::new(self.0, MONEY_SCALE)
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Divide the amount into `parts` shares that reconcile exactly
    ///
    /// Returns `parts` amounts whose sum equals the receiver exactly. Any
    /// remainder minor units are distributed one each to the lowest-index
    /// shares, so `divide_evenly` is deterministic for a given input.
    ///
    /// # Arguments
    ///
    /// * `parts` - Number of shares to produce
    ///
    /// # Returns
    ///
    /// A vector of exactly `parts` amounts. `parts == 0` yields an empty
    /// vector; callers that need at least one share must validate before
    /// calling (the split policy rejects empty member lists).
    pub fn divide_evenly(self, parts: usize) -> Vec<Money> {
        if parts == 0 {
            return Vec::new();
        }
        let n = parts as i64;
        // Euclidean division keeps the remainder in [0, n) for any sign of
        // the total, so base * n + remainder == total always holds.
        let base = self.0.div_euclid(n);
        let remainder = self.0.rem_euclid(n);
        (0..n)
            .map(|idx| {
                if idx < remainder {
                    Money(base + 1)
                } else {
                    Money(base)
                }
            })
            .collect()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_decimal())
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decimal =
            Decimal::from_str(s.trim()).map_err(|_| MoneyError::invalid_amount(s))?;
        Money::try_from_decimal(decimal)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    fn mul(self, rhs: i64) -> Money {
        Money(self.0 * rhs)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}
