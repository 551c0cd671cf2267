use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, Neg, Sub, SubAssign},
};

use serde::{Deserialize, Serialize};
use sqlx::Type;
use thiserror::Error;

pub const CURRENCY_CODE: &str = "INR";

//--------------------------------------       Money        ---------------------------------------------------------
/// An amount of currency in minor units (cents / paise). All prices and ledger amounts in the system are stored in
/// minor units, so the `round(price * 100)` conversion happens exactly once, when a price enters the system.
#[derive(Debug, Clone, Copy, Default, Type, Ord, PartialOrd, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct Money(i64);

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[derive(Debug, Clone, Error)]
#[error("Value cannot be represented as a currency amount: {0}")]
pub struct MoneyConversionError(String);

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl PartialEq for Money {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Money {}

impl TryFrom<u64> for Money {
    type Error = MoneyConversionError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        if value > i64::MAX as u64 {
            Err(MoneyConversionError(format!("Value {value} is too large to convert to Money")))
        } else {
            #[allow(clippy::cast_possible_wrap)]
            Ok(Self(value as i64))
        }
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let cents = self.0.abs();
        write!(f, "{sign}{}.{:02} {CURRENCY_CODE}", cents / 100, cents % 100)
    }
}

impl Money {
    /// The amount in minor units.
    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Converts a whole-number major-unit price (e.g. 499 for ₹499.00) to minor units.
    pub fn from_major(major: i64) -> Result<Self, MoneyConversionError> {
        major
            .checked_mul(100)
            .map(Self)
            .ok_or_else(|| MoneyConversionError(format!("{major} major units exceed the representable range")))
    }

    /// Converts a fractional major-unit price to minor units, rounding to the nearest cent. Client-supplied
    /// prices enter the system through this conversion, so NaN, infinities and out-of-range values are refused
    /// here rather than stored.
    pub fn from_major_f64(major: f64) -> Result<Self, MoneyConversionError> {
        if !major.is_finite() {
            return Err(MoneyConversionError(format!("{major} is not a finite amount")));
        }
        let minor = (major * 100.0).round();
        // i64::MAX as f64 rounds up to 2^63, which `as i64` would saturate. Exclude the boundary itself.
        if minor < i64::MIN as f64 || minor >= i64::MAX as f64 {
            return Err(MoneyConversionError(format!("{major} major units exceed the representable range")));
        }
        #[allow(clippy::cast_possible_truncation)]
        Ok(Self(minor as i64))
    }
}
