//! # Money Module
//!
//! Provides the `Money` type for handling product prices safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Stock value as floats:                                                 │
//! │    0.1 * 3 = 0.30000000000000004  ❌ WRONG!                             │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units (paise / cents)                      │
//! │    Price "19.99" is stored as 1999                                      │
//! │    Σ price × stock is exact integer arithmetic                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stockroom_core::money::Money;
//!
//! let price = Money::parse("19.99").unwrap();
//! assert_eq!(price.minor(), 1999);
//!
//! let value = price.multiply_quantity(3);
//! assert_eq!(value.to_string(), "59.97");
//! assert_eq!(value.with_symbol("Rs "), "Rs 59.97");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (two decimal places).
///
/// ## Design Decisions
/// - **i64 (signed)**: arithmetic never panics on an intermediate negative
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serialized as the integer minor amount**: `19.99` is stored as `1999`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

/// Error returned when a price string cannot be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseMoneyError {
    /// Nothing but whitespace.
    Empty,
    /// Anything that is not `[+-]digits[.digits][e[+-]digits]`.
    Malformed,
    /// Does not fit in i64 minor units.
    Overflow,
}

impl Money {
    /// Creates a Money value from minor units (paise, cents).
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Parses a decimal string such as `"19.99"`, `"5"`, `".5"` or `"1.5e2"`.
    ///
    /// More than two fractional digits are rounded half away from zero,
    /// so `"0.125"` becomes `0.13`.
    pub fn parse(input: &str) -> Result<Self, ParseMoneyError> {
        parse_decimal(input, 2).map(|(minor, _)| Money(minor))
    }

    /// Converts a floating point amount (e.g. a JSON number) to the nearest
    /// minor unit. Returns `None` for NaN, infinities and out-of-range values.
    pub fn from_major_f64(amount: f64) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }
        let minor = (amount * 100.0).round();
        if minor.abs() >= i64::MAX as f64 {
            return None;
        }
        Some(Money(minor as i64))
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
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

    /// Multiplies money by a quantity (price × stock).
    ///
    /// Saturates instead of overflowing.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Formats the amount with two decimals behind a currency prefix.
    ///
    /// ```rust
    /// use stockroom_core::money::Money;
    ///
    /// assert_eq!(Money::from_minor(1999).with_symbol("₹"), "₹19.99");
    /// assert_eq!(Money::from_minor(-550).with_symbol("₹"), "-₹5.50");
    /// ```
    pub fn with_symbol(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            self.major().abs(),
            self.minor_part()
        )
    }
}

// =============================================================================
// Decimal Text
// =============================================================================

/// Reads numeric text as an integer count of `10^-places` units.
///
/// Grammar: `[+-]digits[.digits][e[+-]digits]`, either digit run may be
/// empty but not both. Surplus digits are rounded half away from zero; the
/// returned flag is `true` when that rounding dropped a non-zero digit.
///
/// Prices read with `places = 2`, quantities with `places = 0`.
pub(crate) fn parse_decimal(input: &str, places: u32) -> Result<(i64, bool), ParseMoneyError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseMoneyError::Empty);
    }

    let (negative, rest) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };

    let (mantissa, exponent) = match rest.split_once(['e', 'E']) {
        Some((mantissa, exp)) => (mantissa, parse_exponent(exp)?),
        None => (rest, 0),
    };

    let (whole, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && frac.is_empty()) || !is_digits(whole) || !is_digits(frac) {
        return Err(ParseMoneyError::Malformed);
    }

    let digits: Vec<i64> = whole
        .bytes()
        .chain(frac.bytes())
        .map(|b| i64::from(b - b'0'))
        .skip_while(|d| *d == 0)
        .collect();

    // Power of ten the digit string must be multiplied by.
    let shift = exponent
        .saturating_add(i64::from(places))
        .saturating_sub(frac.len() as i64);

    let (kept, dropped) = if shift >= 0 {
        (&digits[..], &[][..])
    } else {
        let cut = usize::try_from(shift.unsigned_abs())
            .map_or(0, |n| digits.len().saturating_sub(n));
        digits.split_at(cut)
    };

    let mut value: i64 = 0;
    for d in kept {
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(*d))
            .ok_or(ParseMoneyError::Overflow)?;
    }

    if shift > 0 && value != 0 {
        let factor = u32::try_from(shift)
            .ok()
            .and_then(|s| 10i64.checked_pow(s))
            .ok_or(ParseMoneyError::Overflow)?;
        value = value.checked_mul(factor).ok_or(ParseMoneyError::Overflow)?;
    }

    // A shift past the first digit drops an implied leading zero.
    let dropped_all = shift < 0 && shift.unsigned_abs() > digits.len() as u64;
    let round_up = !dropped_all && dropped.first().is_some_and(|d| *d >= 5);
    if round_up {
        value = value.checked_add(1).ok_or(ParseMoneyError::Overflow)?;
    }

    let inexact = dropped.iter().any(|d| *d != 0);
    Ok((if negative { -value } else { value }, inexact))
}

fn parse_exponent(text: &str) -> Result<i64, ParseMoneyError> {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseMoneyError::Malformed);
    }
    text.parse::<i64>().map_err(|_| ParseMoneyError::Overflow)
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain two-decimal rendering, no currency symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.with_symbol(""))
    }
}

impl fmt::Display for ParseMoneyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseMoneyError::Empty => write!(f, "empty amount"),
            ParseMoneyError::Malformed => write!(f, "malformed amount"),
            ParseMoneyError::Overflow => write!(f, "amount too large"),
        }
    }
}

impl std::error::Error for ParseMoneyError {}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_amounts() {
        assert_eq!(Money::parse("19.99"), Ok(Money::from_minor(1999)));
        assert_eq!(Money::parse("5"), Ok(Money::from_minor(500)));
        assert_eq!(Money::parse("5."), Ok(Money::from_minor(500)));
        assert_eq!(Money::parse(".5"), Ok(Money::from_minor(50)));
        assert_eq!(Money::parse("  7.1 "), Ok(Money::from_minor(710)));
        assert_eq!(Money::parse("+3"), Ok(Money::from_minor(300)));
        assert_eq!(Money::parse("-2.50"), Ok(Money::from_minor(-250)));
    }

    #[test]
    fn test_parse_rounds_extra_digits() {
        assert_eq!(Money::parse("0.125"), Ok(Money::from_minor(13)));
        assert_eq!(Money::parse("0.124"), Ok(Money::from_minor(12)));
        assert_eq!(Money::parse("19.999"), Ok(Money::from_minor(2000)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Money::parse(""), Err(ParseMoneyError::Empty));
        assert_eq!(Money::parse("   "), Err(ParseMoneyError::Empty));
        assert_eq!(Money::parse("."), Err(ParseMoneyError::Malformed));
        assert_eq!(Money::parse("abc"), Err(ParseMoneyError::Malformed));
        assert_eq!(Money::parse("1.2.3"), Err(ParseMoneyError::Malformed));
        assert_eq!(Money::parse("1e"), Err(ParseMoneyError::Malformed));
        assert_eq!(Money::parse("e5"), Err(ParseMoneyError::Malformed));
        assert_eq!(Money::parse("inf"), Err(ParseMoneyError::Malformed));
        assert_eq!(
            Money::parse("99999999999999999999"),
            Err(ParseMoneyError::Overflow)
        );
    }

    #[test]
    fn test_parse_exponent_notation() {
        assert_eq!(Money::parse("1e2"), Ok(Money::from_minor(10_000)));
        assert_eq!(Money::parse("1.999E1"), Ok(Money::from_minor(1999)));
        assert_eq!(Money::parse("5e-2"), Ok(Money::from_minor(5)));
        assert_eq!(Money::parse("5e-3"), Ok(Money::from_minor(1)));
        assert_eq!(Money::parse("4e-3"), Ok(Money::from_minor(0)));
        assert_eq!(Money::parse("9e-9"), Ok(Money::from_minor(0)));
        assert_eq!(Money::parse("0e999"), Ok(Money::from_minor(0)));
        assert_eq!(Money::parse("1e30"), Err(ParseMoneyError::Overflow));
    }

    #[test]
    fn test_parse_decimal_reports_dropped_digits() {
        assert_eq!(parse_decimal("5.0", 0), Ok((5, false)));
        assert_eq!(parse_decimal("5.5", 0), Ok((6, true)));
        assert_eq!(parse_decimal("25e-1", 0), Ok((3, true)));
        assert_eq!(parse_decimal("-12", 0), Ok((-12, false)));
    }

    #[test]
    fn test_from_major_f64() {
        assert_eq!(Money::from_major_f64(19.99), Some(Money::from_minor(1999)));
        assert_eq!(Money::from_major_f64(10.0), Some(Money::from_minor(1000)));
        assert_eq!(Money::from_major_f64(f64::NAN), None);
        assert_eq!(Money::from_major_f64(f64::INFINITY), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_minor(1099).to_string(), "10.99");
        assert_eq!(Money::from_minor(500).to_string(), "5.00");
        assert_eq!(Money::from_minor(0).to_string(), "0.00");
        assert_eq!(Money::from_minor(-550).to_string(), "-5.50");
    }

    #[test]
    fn test_sum_and_multiply() {
        let total: Money = [
            Money::from_minor(1000).multiply_quantity(5),
            Money::from_minor(2000).multiply_quantity(20),
        ]
        .into_iter()
        .sum();
        assert_eq!(total, Money::from_minor(45_000));
    }

    #[test]
    fn test_serializes_as_minor_units() {
        let json = serde_json::to_string(&Money::from_minor(1999)).unwrap();
        assert_eq!(json, "1999");
    }
}
