//! Fixed-point monetary amounts
//!
//! Amounts are held as whole minor units (cents) so that sums are exact:
//! adding and then removing a record always restores the previous total.
//! Only multiplication by a real factor rounds, and it rounds once, to the
//! nearest minor unit.

use crate::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Minor units per major unit (cents per currency unit)
pub const MINOR_PER_MAJOR: i64 = 100;

/// Largest accepted record or aggregate amount, in major units
///
/// Keeps every valuation step well inside `i64` minor units and inside the
/// range where `f64` represents minor units exactly.
pub const MAX_MAJOR: i64 = 1_000_000_000_000;

/// A signed monetary amount in minor units
///
/// Serialized as a decimal number of major units, e.g. `1250.5`.
///
/// # Examples
///
/// ```
/// use parley_domain::Money;
///
/// let fee = Money::from_major(250_000);
/// let half = fee.scale(0.5);
/// assert_eq!(half, Money::from_major(125_000));
/// assert_eq!(half.to_string(), "125000.00");
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "f64", into = "f64")]
pub struct Money(i64);

impl Money {
    /// Zero
    pub const ZERO: Money = Money(0);

    /// Largest accepted amount (see [`MAX_MAJOR`])
    pub const MAX: Money = Money(MAX_MAJOR * MINOR_PER_MAJOR);

    /// Create an amount from minor units
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Create an amount from whole major units
    pub const fn from_major(major: i64) -> Self {
        Self(major * MINOR_PER_MAJOR)
    }

    /// Convert a decimal major-unit value, rounding to the nearest minor unit
    ///
    /// Returns `None` for NaN or infinite input, or when the magnitude
    /// exceeds [`Money::MAX`].
    pub fn from_major_f64(major: f64) -> Option<Self> {
        if !major.is_finite() || major.abs() > MAX_MAJOR as f64 {
            return None;
        }
        Some(Self((major * MINOR_PER_MAJOR as f64).round() as i64))
    }

    /// Raw minor units
    pub const fn minor_units(&self) -> i64 {
        self.0
    }

    /// Value in major units as a float (display and ratios only)
    pub fn to_major_f64(&self) -> f64 {
        self.0 as f64 / MINOR_PER_MAJOR as f64
    }

    /// True when the amount is below zero
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// True when the amount is exactly zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// True when the amount is above zero
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Reject an amount that is negative or above [`Money::MAX`], naming
    /// `field` in the error
    pub fn ensure_in_range(self, field: &'static str) -> Result<Self, ValidationError> {
        if self.is_negative() {
            return Err(ValidationError::NegativeAmount {
                field,
                value: self.to_string(),
            });
        }
        if self > Money::MAX {
            return Err(ValidationError::AmountTooLarge {
                field,
                value: self.to_string(),
            });
        }
        Ok(self)
    }

    /// Sum `amounts`, rejecting a total above [`Money::MAX`]
    ///
    /// Accumulates in `i128`, so any number of in-range amounts sums
    /// without overflow.
    pub fn checked_total<I>(amounts: I, field: &'static str) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = Money>,
    {
        let total: i128 = amounts.into_iter().map(|m| i128::from(m.0)).sum();
        if total > i128::from(Money::MAX.0) {
            return Err(ValidationError::AmountTooLarge {
                field,
                value: format_minor(total),
            });
        }
        Ok(Self(saturate(total)))
    }

    /// Multiply by a real factor, rounding half away from zero to the minor unit
    pub fn scale(self, factor: f64) -> Self {
        Self((self.0 as f64 * factor).round() as i64)
    }

    /// Take `percent` percent of the amount, rounding to the minor unit
    ///
    /// Multiplies before dividing so whole percentages of whole amounts
    /// stay exact.
    pub fn percent(self, percent: f64) -> Self {
        Self((self.0 as f64 * percent / 100.0).round() as i64)
    }

    /// Midpoint of two amounts, rounded once to the nearest whole major
    /// unit (half away from zero)
    pub fn midpoint_to_major(self, other: Money) -> Self {
        let sum = i128::from(self.0) + i128::from(other.0);
        let per = i128::from(MINOR_PER_MAJOR);
        Self(saturate(div_round_half_away(sum, 2 * per) * per))
    }

    /// Multiply by a real factor, rounding once to the nearest whole major
    /// unit (half away from zero)
    pub fn scale_to_major(self, factor: f64) -> Self {
        let per = MINOR_PER_MAJOR as f64;
        Self(((self.0 as f64 * factor / per).round() * per) as i64)
    }

    /// Ratio of this amount to `other`, or `None` when `other` is zero
    pub fn ratio_to(self, other: Money) -> Option<f64> {
        if other.is_zero() {
            return None;
        }
        Some(self.0 as f64 / other.0 as f64)
    }
}

fn div_round_half_away(n: i128, d: i128) -> i128 {
    let q = n / d;
    let r = n % d;
    if r.abs() * 2 >= d.abs() {
        q + n.signum() * d.signum()
    } else {
        q
    }
}

fn saturate(minor: i128) -> i64 {
    i64::try_from(minor).unwrap_or(if minor < 0 { i64::MIN } else { i64::MAX })
}

fn format_minor(minor: i128) -> String {
    let sign = if minor < 0 { "-" } else { "" };
    let abs = minor.unsigned_abs();
    let per = MINOR_PER_MAJOR as u128;
    format!("{}{}.{:02}", sign, abs / per, abs % per)
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_minor(i128::from(self.0)))
    }
}

impl TryFrom<f64> for Money {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Money::from_major_f64(value).ok_or_else(|| format!("Invalid amount: {}", value))
    }
}

impl From<Money> for f64 {
    fn from(money: Money) -> Self {
        money.to_major_f64()
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}
