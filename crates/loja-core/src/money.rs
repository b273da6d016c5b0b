//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely, plus the
//! input parser used for operator-typed amounts.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                         │
//! │                                                                     │
//! │  In floating point:                                                 │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                       │
//! │                                                                     │
//! │  OUR SOLUTION: Integer Cents                                        │
//! │    Every price, total, commission and net amount is an i64 cent     │
//! │    count. unit_price × quantity and total − commission are exact    │
//! │    integer operations with no currency drift.                       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use loja_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(2500); // 25.00
//!
//! // Arithmetic operations
//! let total = price * 3;                        // 75.00
//! let net = total - Money::from_cents(500);     // 70.00
//!
//! // Operator input, either decimal separator
//! assert_eq!(Money::parse("10,50").unwrap(), Money::parse("10.50").unwrap());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use thiserror::Error;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values (net amounts can dip below
///   zero when a commission exceeds a total)
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use loja_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents 10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Parses an operator-typed amount into `Money`.
    ///
    /// ## Contract
    /// - Leading/trailing whitespace is ignored.
    /// - Either `.` or `,` is accepted as the decimal separator; `,` is
    ///   normalized to `.` before parsing, so `"10,50"` and `"10.50"`
    ///   yield the same value.
    /// - At most two fractional digits; one digit means tenths
    ///   (`"10.5"` → 10.50).
    /// - An optional leading `-` is allowed.
    /// - Empty (or whitespace-only) input is an error — callers decide
    ///   whether a blank field defaults to zero.
    /// - Anything else (letters, multiple separators, thousands grouping)
    ///   is rejected.
    ///
    /// ## Example
    /// ```rust
    /// use loja_core::money::Money;
    ///
    /// assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
    /// assert_eq!(Money::parse("10,50").unwrap().cents(), 1050);
    /// assert_eq!(Money::parse(" 7 ").unwrap().cents(), 700);
    /// assert!(Money::parse("").is_err());
    /// assert!(Money::parse("1,2,3").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Money, ParseMoneyError> {
        let normalized = input.trim().replace(',', ".");
        if normalized.is_empty() {
            return Err(ParseMoneyError::Empty);
        }

        let (negative, digits) = match normalized.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, normalized.as_str()),
        };

        let (whole, frac) = match digits.split_once('.') {
            Some((w, f)) => (w, f),
            None => (digits, ""),
        };

        // A second separator ends up inside the fractional part.
        if frac.contains('.') {
            return Err(ParseMoneyError::Invalid);
        }
        if whole.is_empty() && frac.is_empty() {
            return Err(ParseMoneyError::Invalid);
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseMoneyError::Invalid);
        }
        if frac.len() > 2 {
            return Err(ParseMoneyError::TooManyDecimals);
        }

        let whole_units: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| ParseMoneyError::Invalid)?
        };
        let frac_cents: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| ParseMoneyError::Invalid)? * 10,
            _ => frac.parse().map_err(|_| ParseMoneyError::Invalid)?,
        };

        let cents = whole_units
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac_cents))
            .ok_or(ParseMoneyError::Invalid)?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

/// Failure to parse an operator-typed amount.
///
/// See [`Money::parse`] for the accepted grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseMoneyError {
    /// Input was empty or whitespace-only.
    #[error("amount is empty")]
    Empty,

    /// More than two digits after the decimal separator.
    #[error("amount has more than two decimal places")]
    TooManyDecimals,

    /// Input contained characters outside the accepted grammar.
    #[error("amount is not a valid decimal number")]
    Invalid,
}

// =============================================================================
// Sale Totals
// =============================================================================

/// The derived financial figures of a sale.
///
/// ## Invariants
/// - `total = unit_price × quantity`, exact in cents
/// - `net = total − commission`, exact in cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleTotals {
    /// Gross total of the (single) line item.
    pub total: Money,
    /// Marketplace commission withheld by the channel.
    pub commission: Money,
    /// Net proceeds: total minus commission.
    pub net: Money,
}

impl SaleTotals {
    /// Computes the totals for a sale of `quantity` units at `unit_price`
    /// with the given `commission`.
    ///
    /// ## Example
    /// ```rust
    /// use loja_core::money::{Money, SaleTotals};
    ///
    /// let totals = SaleTotals::compute(Money::from_cents(2500), 3, Money::from_cents(500));
    /// assert_eq!(totals.total.cents(), 7500);
    /// assert_eq!(totals.net.cents(), 7000);
    /// ```
    pub fn compute(unit_price: Money, quantity: i64, commission: Money) -> SaleTotals {
        let total = unit_price * quantity;
        SaleTotals {
            total,
            commission,
            net: total - commission,
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money as a plain decimal, two places.
///
/// ## Note
/// This is for logs and messages. The view layer owns currency symbols
/// and localization.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.units().abs(), self.cents_part())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.units(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-5.50");
        assert_eq!(format!("{}", Money::from_cents(-5)), "-0.05");
        assert_eq!(format!("{}", Money::from_cents(0)), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);

        let mut c = a;
        c += b;
        assert_eq!(c.cents(), 1500);
        c -= b;
        assert_eq!(c.cents(), 1000);
    }

    #[test]
    fn test_zero_and_checks() {
        assert!(Money::zero().is_zero());
        assert!(!Money::from_cents(100).is_negative());
        assert!(Money::from_cents(-100).is_negative());
        assert_eq!(Money::default(), Money::zero());
    }

    #[test]
    fn test_parse_both_separators() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("10,50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("10.50").unwrap(), Money::parse("10,50").unwrap());
    }

    #[test]
    fn test_parse_shapes() {
        assert_eq!(Money::parse("7").unwrap().cents(), 700);
        assert_eq!(Money::parse("7.5").unwrap().cents(), 750);
        assert_eq!(Money::parse(".50").unwrap().cents(), 50);
        assert_eq!(Money::parse("0,99").unwrap().cents(), 99);
        assert_eq!(Money::parse(" 12,00 ").unwrap().cents(), 1200);
        assert_eq!(Money::parse("-3.25").unwrap().cents(), -325);
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(Money::parse(""), Err(ParseMoneyError::Empty));
        assert_eq!(Money::parse("   "), Err(ParseMoneyError::Empty));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Money::parse("abc"), Err(ParseMoneyError::Invalid));
        assert_eq!(Money::parse("10.5x"), Err(ParseMoneyError::Invalid));
        assert_eq!(Money::parse("1,2,3"), Err(ParseMoneyError::Invalid));
        assert_eq!(Money::parse("1.2.3"), Err(ParseMoneyError::Invalid));
        assert_eq!(Money::parse("-"), Err(ParseMoneyError::Invalid));
        assert_eq!(Money::parse("."), Err(ParseMoneyError::Invalid));
        assert_eq!(Money::parse("1 000"), Err(ParseMoneyError::Invalid));
    }

    #[test]
    fn test_parse_rejects_three_decimals() {
        assert_eq!(Money::parse("10.505"), Err(ParseMoneyError::TooManyDecimals));
    }

    #[test]
    fn test_totals_exactness() {
        // Product at 25.00, qty 3, commission 5.00 → total 75.00, net 70.00
        let totals = SaleTotals::compute(Money::from_cents(2500), 3, Money::from_cents(500));
        assert_eq!(totals.total.cents(), 7500);
        assert_eq!(totals.commission.cents(), 500);
        assert_eq!(totals.net.cents(), 7000);
    }

    #[test]
    fn test_totals_commission_exceeding_total() {
        let totals = SaleTotals::compute(Money::from_cents(100), 1, Money::from_cents(250));
        assert_eq!(totals.net.cents(), -150);
        assert!(totals.net.is_negative());
    }
}
