//! Currency codes for the Cambio widget.

use serde::{Deserialize, Serialize};
use std::fmt;

/// ISO 4217-like currency code.
///
/// Codes are uppercased on construction but otherwise not validated;
/// whether a code is convertible is decided by the active rate table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Currency(String);

impl Currency {
    /// Create a new currency from code.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    /// Get the currency code.
    pub fn code(&self) -> &str {
        &self.0
    }

    /// Get the display symbol for this currency.
    ///
    /// Unknown codes fall back to the code itself.
    pub fn symbol(&self) -> &str {
        match self.0.as_str() {
            "BRL" => "R$",
            "USD" => "US$",
            "EUR" => "€",
            "GBP" => "£",
            "JPY" => "¥",
            "CAD" => "C$",
            "AUD" => "A$",
            "CHF" => "CHF",
            "CNY" => "¥",
            "ARS" => "$",
            _ => &self.0,
        }
    }

    /// Get the full display name, if known.
    pub fn name(&self) -> Option<&'static str> {
        match self.0.as_str() {
            "BRL" => Some("Brazilian Real"),
            "USD" => Some("US Dollar"),
            "EUR" => Some("Euro"),
            "GBP" => Some("Pound Sterling"),
            "JPY" => Some("Japanese Yen"),
            "CAD" => Some("Canadian Dollar"),
            "AUD" => Some("Australian Dollar"),
            "CHF" => Some("Swiss Franc"),
            "CNY" => Some("Chinese Yuan"),
            "ARS" => Some("Argentine Peso"),
            _ => None,
        }
    }

    /// Get the standard decimal places for display in this currency.
    pub fn decimal_places(&self) -> usize {
        match self.0.as_str() {
            "JPY" | "KRW" | "VND" => 0,
            _ => 2,
        }
    }

    /// Common currencies
    pub fn usd() -> Self {
        Self::new("USD")
    }

    pub fn eur() -> Self {
        Self::new("EUR")
    }

    pub fn brl() -> Self {
        Self::new("BRL")
    }

    pub fn gbp() -> Self {
        Self::new("GBP")
    }

    pub fn jpy() -> Self {
        Self::new("JPY")
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Currency {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_is_uppercased() {
        assert_eq!(Currency::new("usd"), Currency::usd());
        assert_eq!(Currency::new("brl").code(), "BRL");
    }

    #[test]
    fn test_known_symbols() {
        assert_eq!(Currency::brl().symbol(), "R$");
        assert_eq!(Currency::eur().symbol(), "€");
    }

    #[test]
    fn test_unknown_symbol_falls_back_to_code() {
        assert_eq!(Currency::new("XYZ").symbol(), "XYZ");
        assert!(Currency::new("XYZ").name().is_none());
    }

    #[test]
    fn test_decimal_places() {
        assert_eq!(Currency::usd().decimal_places(), 2);
        assert_eq!(Currency::jpy().decimal_places(), 0);
    }
}
