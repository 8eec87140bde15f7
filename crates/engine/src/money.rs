use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{Currency, EngineError};

/// Signed money amount represented as an integer number of **minor units**.
///
/// Use this type for **all** monetary values in the engine (entry amounts,
/// fees, unit prices, balances) to avoid floating-point drift.
///
/// The value is signed:
/// - positive = money received by the household/member
/// - negative = money paid out by the member
///
/// # Examples
///
/// ```rust
/// use engine::{Currency, Money};
///
/// let amount = Money::new(1_500_000);
/// assert_eq!(amount.minor(), 1_500_000);
/// assert_eq!(amount.format(Currency::Vnd), "1,500,000đ");
/// ```
///
/// Parsing form input (thousands separators are ignored):
///
/// ```rust
/// use engine::Money;
///
/// assert_eq!("-150,000".parse::<Money>().unwrap().minor(), -150_000);
/// assert_eq!(Money::parse_lenient("abc"), Money::ZERO);
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates a new amount from minor units.
    #[must_use]
    pub const fn new(minor: i64) -> Self {
        Self(minor)
    }

    /// Returns the raw value in minor units.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the amount is positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns `true` if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    #[must_use]
    pub const fn abs(self) -> Money {
        Money(self.0.saturating_abs())
    }

    /// Narrows a wide intermediate back to minor units, clamping at the `i64`
    /// bounds.
    #[must_use]
    pub(crate) fn clamp_wide(wide: i128) -> Money {
        Money(i64::try_from(wide).unwrap_or(if wide < 0 { i64::MIN } else { i64::MAX }))
    }

    #[must_use]
    pub const fn saturating_add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }

    #[must_use]
    pub const fn saturating_sub(self, rhs: Money) -> Money {
        Money(self.0.saturating_sub(rhs.0))
    }

    /// Multiplies a unit price by a quantity, saturating at the `i64` bounds.
    #[must_use]
    pub const fn saturating_mul(self, quantity: i64) -> Money {
        Money(self.0.saturating_mul(quantity))
    }

    /// Formats the amount with thousands grouping and the currency symbol.
    ///
    /// `Vnd` renders `-1,234,567đ`, `Eur` renders `1,234.50€`.
    #[must_use]
    pub fn format(self, currency: Currency) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let scale = 10u64.pow(u32::from(currency.minor_units()));
        let major = group_thousands(abs / scale);
        let symbol = currency.symbol();
        if currency.minor_units() == 0 {
            format!("{sign}{major}{symbol}")
        } else {
            let frac = abs % scale;
            let width = usize::from(currency.minor_units());
            format!("{sign}{major}.{frac:0width$}{symbol}")
        }
    }

    /// Parses form input and never fails.
    ///
    /// Thousands separators are stripped and a leading `-` marks an expense.
    /// Anything that is not a signed integer (including overflow) is `0`.
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Money {
        parse_signed(raw).map(Money).unwrap_or(Money::ZERO)
    }
}

fn is_separator(c: char) -> bool {
    matches!(c, ',' | '.' | '_' | ' ' | '\u{a0}')
}

enum ParseFailure {
    Empty,
    Invalid,
    Overflow,
}

fn split_sign(trimmed: &str) -> (bool, &str) {
    if let Some(rest) = trimmed.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = trimmed.strip_prefix('+') {
        (false, rest)
    } else {
        (false, trimmed)
    }
}

fn parse_signed_checked(raw: &str) -> Result<i64, ParseFailure> {
    let (negative, rest) = split_sign(raw.trim());
    let digits: String = rest.chars().filter(|c| !is_separator(*c)).collect();
    if digits.is_empty() {
        return Err(ParseFailure::Empty);
    }
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ParseFailure::Invalid);
    }
    let magnitude: i64 = digits.parse().map_err(|_| ParseFailure::Overflow)?;
    Ok(if negative { -magnitude } else { magnitude })
}

fn parse_signed(raw: &str) -> Option<i64> {
    parse_signed_checked(raw).ok()
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(Currency::default()))
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Money> for i64 {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        self.saturating_add(rhs)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        *self = self.saturating_add(rhs);
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Self::Output {
        self.saturating_sub(rhs)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        *self = self.saturating_sub(rhs);
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Self::Output {
        Money(self.0.saturating_neg())
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl FromStr for Money {
    type Err = EngineError;

    /// Parses a signed integer amount in minor units.
    ///
    /// Accepts an optional leading `+`/`-` and thousands separators
    /// (`,` `.` `_` or spaces). Rejects empty input, any other character and
    /// values outside the `i64` range.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_signed_checked(s).map(Money).map_err(|failure| {
            let reason = match failure {
                ParseFailure::Empty => "empty amount",
                ParseFailure::Invalid => "invalid amount",
                ParseFailure::Overflow => "amount too large",
            };
            EngineError::InvalidAmount(format!("{reason}: {:?}", s.trim()))
        })
    }
}
