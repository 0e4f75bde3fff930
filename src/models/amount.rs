//! Amount type for expense values
//!
//! Internally stores amounts in minor units (i64 paise/cents) so values never
//! pass through floating point. On the wire an amount is written as a decimal
//! string with two fraction digits and read back from either a JSON string or
//! a JSON number, parsed from its decimal text.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// A monetary amount stored as minor units (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(i64);

impl Amount {
    /// Create an amount from minor units
    ///
    /// # Examples
    /// ```
    /// use expense_cli::models::Amount;
    /// let amount = Amount::from_minor(1050); // 10.50
    /// assert_eq!(amount.to_string(), "10.50");
    /// ```
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Create an amount from whole units and a fractional part
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        Self(major * 100 + minor)
    }

    /// Get the amount in minor units
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Get the whole-unit portion (truncated toward zero)
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Get the fractional portion (0-99)
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Parse an amount from user or server text
    ///
    /// Accepts "200", "200.5", "200.50", "-12.00", "Rs 200", "₹200" and
    /// "1,200.00". More than two fraction digits is rejected.
    pub fn parse(s: &str) -> Result<Self, AmountParseError> {
        Self::parse_decimal(s, false)
    }

    /// Parse an amount read from the server
    ///
    /// Like [`Amount::parse`], but extra fraction digits are rounded half
    /// away from zero instead of rejected.
    pub fn parse_lenient(s: &str) -> Result<Self, AmountParseError> {
        Self::parse_decimal(s, true)
    }

    fn parse_decimal(s: &str, round: bool) -> Result<Self, AmountParseError> {
        let original = s;
        let s = s.trim();

        let (negative, s) = match s.strip_prefix('-') {
            Some(stripped) => (true, stripped.trim_start()),
            None => (false, s),
        };

        let s = s
            .strip_prefix("Rs.")
            .or_else(|| s.strip_prefix("Rs"))
            .or_else(|| s.strip_prefix('₹'))
            .or_else(|| s.strip_prefix('$'))
            .unwrap_or(s)
            .trim_start();

        let digits: String = s.chars().filter(|c| *c != ',').collect();
        if digits.is_empty() {
            return Err(AmountParseError::InvalidFormat(original.to_string()));
        }

        let invalid = || AmountParseError::InvalidFormat(original.to_string());

        let (whole, fraction) = match digits.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (digits.as_str(), ""),
        };

        if !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
            || (whole.is_empty() && fraction.is_empty())
        {
            return Err(invalid());
        }

        if fraction.len() > 2 && !round {
            return Err(AmountParseError::TooPrecise(original.to_string()));
        }
        let round_up = fraction.as_bytes().get(2).is_some_and(|d| *d >= b'5');
        let fraction = &fraction[..fraction.len().min(2)];

        let major: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };

        let minor: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };

        let value = major
            .checked_mul(100)
            .and_then(|m| m.checked_add(minor))
            .and_then(|v| v.checked_add(i64::from(round_up)))
            .ok_or_else(invalid)?;

        Ok(Self(if negative { -value } else { value }))
    }

    /// Format with a currency label, e.g. "Rs 200.00"
    pub fn format_with_label(&self, label: &str) -> String {
        if label.is_empty() {
            self.to_string()
        } else {
            format!("{} {}", label, self)
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-{}.{:02}", self.major().abs(), self.minor_part())
        } else {
            write!(f, "{}.{:02}", self.major(), self.minor_part())
        }
    }
}

impl std::str::FromStr for Amount {
    type Err = AmountParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AmountVisitor;

        impl<'de> Visitor<'de> for AmountVisitor {
            type Value = Amount;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a decimal amount as a string or number")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
                Amount::parse_lenient(v).map_err(E::custom)
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
                v.checked_mul(100)
                    .map(Amount)
                    .ok_or_else(|| E::custom("amount out of range"))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
                i64::try_from(v)
                    .ok()
                    .and_then(|v| v.checked_mul(100))
                    .map(Amount)
                    .ok_or_else(|| E::custom("amount out of range"))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Amount, E> {
                // Round-trip through the shortest decimal text, not through arithmetic
                Amount::parse_lenient(&v.to_string()).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(AmountVisitor)
    }
}

/// Error type for amount parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountParseError {
    InvalidFormat(String),
    TooPrecise(String),
}

impl fmt::Display for AmountParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountParseError::InvalidFormat(s) => write!(f, "Invalid amount: {}", s),
            AmountParseError::TooPrecise(s) => {
                write!(f, "Amount has more than two decimal places: {}", s)
            }
        }
    }
}

impl std::error::Error for AmountParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_minor() {
        let a = Amount::from_minor(1050);
        assert_eq!(a.minor(), 1050);
        assert_eq!(a.major(), 10);
        assert_eq!(a.minor_part(), 50);
        assert_eq!(Amount::from_major_minor(10, 50), a);
    }

    #[test]
    fn test_display() {
        assert_eq!(Amount::from_minor(20000).to_string(), "200.00");
        assert_eq!(Amount::from_minor(5).to_string(), "0.05");
        assert_eq!(Amount::from_minor(-1050).to_string(), "-10.50");
        assert_eq!(Amount::from_minor(5000).format_with_label("Rs"), "Rs 50.00");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Amount::parse("200").unwrap().minor(), 20000);
        assert_eq!(Amount::parse("10.5").unwrap().minor(), 1050);
        assert_eq!(Amount::parse("10.50").unwrap().minor(), 1050);
        assert_eq!(Amount::parse(".75").unwrap().minor(), 75);
        assert_eq!(Amount::parse("-12").unwrap().minor(), -1200);
        assert_eq!(Amount::parse("Rs 1,200.00").unwrap().minor(), 120000);
        assert_eq!(Amount::parse("₹99").unwrap().minor(), 9900);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            Amount::parse("abc"),
            Err(AmountParseError::InvalidFormat(_))
        ));
        assert!(Amount::parse("").is_err());
        assert!(Amount::parse("1.2.3").is_err());
        assert!(Amount::parse(".").is_err());
        assert!(matches!(
            Amount::parse("1.005"),
            Err(AmountParseError::TooPrecise(_))
        ));
    }

    #[test]
    fn test_wire_format() {
        let a = Amount::from_minor(5000);
        assert_eq!(serde_json::to_string(&a).unwrap(), "\"50.00\"");

        let from_str: Amount = serde_json::from_str("\"50\"").unwrap();
        let from_int: Amount = serde_json::from_str("50").unwrap();
        let from_float: Amount = serde_json::from_str("50.1").unwrap();
        assert_eq!(from_str, a);
        assert_eq!(from_int, a);
        assert_eq!(from_float.minor(), 5010);
    }

    #[test]
    fn test_server_amounts_round_half_away_from_zero() {
        let a: Amount = serde_json::from_str("10.555").unwrap();
        assert_eq!(a.minor(), 1056);

        let b: Amount = serde_json::from_str("0.30000000000000004").unwrap();
        assert_eq!(b.minor(), 30);

        let c: Amount = serde_json::from_str("\"-2.345\"").unwrap();
        assert_eq!(c.minor(), -235);

        let d: Amount = serde_json::from_str("\"1.994\"").unwrap();
        assert_eq!(d.minor(), 199);
    }

    #[test]
    fn test_typed_amounts_stay_strict() {
        assert!(matches!(
            Amount::parse("10.555"),
            Err(AmountParseError::TooPrecise(_))
        ));
        assert_eq!(Amount::parse_lenient("10.555").unwrap().minor(), 1056);
    }
}
