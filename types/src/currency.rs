//! ISO 4217 style currency codes.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A three-letter uppercase currency code.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CurrencyCode([u8; 3]);

impl CurrencyCode {
    /// Euro — the default currency of the wallet.
    pub const EUR: Self = Self(*b"EUR");

    /// Parse a code. Returns `None` unless the input is exactly three
    /// uppercase ASCII letters.
    pub fn parse(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 3 || !bytes.iter().all(|b| b.is_ascii_uppercase()) {
            return None;
        }
        Some(Self([bytes[0], bytes[1], bytes[2]]))
    }

    pub fn as_str(&self) -> &str {
        // Constructed only from ASCII uppercase bytes.
        std::str::from_utf8(&self.0).unwrap_or("???")
    }
}

impl fmt::Debug for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CurrencyCode({})", self.as_str())
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for CurrencyCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CurrencyCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid currency code '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_uppercase_triplet() {
        assert_eq!(CurrencyCode::parse("EUR"), Some(CurrencyCode::EUR));
        assert_eq!(CurrencyCode::parse("USD").unwrap().as_str(), "USD");
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(CurrencyCode::parse("eur").is_none());
        assert!(CurrencyCode::parse("EU").is_none());
        assert!(CurrencyCode::parse("EURO").is_none());
        assert!(CurrencyCode::parse("E1R").is_none());
    }
}
