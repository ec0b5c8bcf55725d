use crate::error::VendingError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// Represents a monetary value in whole cents.
///
/// This is a signed wrapper so that intermediate differences (e.g. thrown-in
/// minus price) can be compared against zero before they are committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Cents(pub i64);

/// Represents a single coin's denomination in cents.
///
/// Ensures that coin values are always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CoinValue(i64);

impl CoinValue {
    pub fn new(value: i64) -> Result<Self, VendingError> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(VendingError::ValidationError(
                "Coin value must be positive".to_string(),
            ))
        }
    }

    pub fn cents(&self) -> Cents {
        Cents(self.0)
    }
}

impl TryFrom<i64> for CoinValue {
    type Error = VendingError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CoinValue> for Cents {
    fn from(value: CoinValue) -> Self {
        Cents(value.0)
    }
}

impl fmt::Display for CoinValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Cents {
    pub const ZERO: Self = Self(0);

    pub fn new(amount: i64) -> Self {
        Self(amount)
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Implement basic arithmetic for Cents to make it a usable Value Object
impl Add for Cents {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Cents {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl AddAssign for Cents {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Cents {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

/// One row of the coin depot: a denomination and how many coins of it are
/// currently in the machine. `count` is unsigned, so the depot can never go
/// negative.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
pub struct Coin {
    pub value: CoinValue,
    pub count: u32,
}

impl Coin {
    pub fn new(value: CoinValue, count: u32) -> Self {
        Self { value, count }
    }

    /// Total cents this row holds.
    pub fn total(&self) -> Cents {
        Cents(self.value.0 * self.count as i64)
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}*{}", self.count, self.value)
    }
}

/// Encodes a coin log as integers joined by `;` with no trailing separator.
/// An empty log encodes as the empty string.
pub fn join_coin_values(values: &[CoinValue]) -> String {
    values
        .iter()
        .map(CoinValue::to_string)
        .collect::<Vec<_>>()
        .join(";")
}

/// Parses the `;`-joined encoding back into a coin log.
pub fn parse_coin_values(encoded: &str) -> Result<Vec<CoinValue>, VendingError> {
    if encoded.is_empty() {
        return Ok(Vec::new());
    }
    encoded
        .split(';')
        .map(|part| {
            let value: i64 = part.parse().map_err(|_| {
                VendingError::ValidationError(format!("Invalid coin value: {part}"))
            })?;
            CoinValue::new(value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cents_arithmetic() {
        let a = Cents::new(100);
        let b = Cents::new(35);
        assert_eq!(a + b, Cents::new(135));
        assert_eq!(a - b, Cents::new(65));

        let mut c = Cents::ZERO;
        c += a;
        c -= b;
        assert_eq!(c, Cents::new(65));
    }

    #[test]
    fn test_coin_value_validation() {
        assert!(CoinValue::new(5).is_ok());
        assert!(matches!(
            CoinValue::new(0),
            Err(VendingError::ValidationError(_))
        ));
        assert!(matches!(
            CoinValue::new(-10),
            Err(VendingError::ValidationError(_))
        ));
    }

    #[test]
    fn test_coin_display() {
        let coin = Coin::new(CoinValue::new(200).unwrap(), 3);
        assert_eq!(coin.to_string(), "3*200");
        assert_eq!(coin.total(), Cents::new(600));
    }

    #[test]
    fn test_join_coin_values_no_trailing_separator() {
        let values = vec![
            CoinValue::new(20).unwrap(),
            CoinValue::new(10).unwrap(),
            CoinValue::new(5).unwrap(),
        ];
        assert_eq!(join_coin_values(&values), "20;10;5");
        assert_eq!(join_coin_values(&[]), "");
    }

    #[test]
    fn test_parse_coin_values() {
        let values = parse_coin_values("10;20;100").unwrap();
        assert_eq!(values.len(), 3);
        assert_eq!(values[2], CoinValue::new(100).unwrap());

        assert!(parse_coin_values("").unwrap().is_empty());
        assert!(parse_coin_values("10;x").is_err());
        assert!(parse_coin_values("10;-5").is_err());
    }
}
