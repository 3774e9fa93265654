//! Base-relative exchange rate tables.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::currency::Currency;

/// A table of exchange rates relative to one base currency.
///
/// Every value is a positive rate of the base into the keyed currency
/// (base to itself = 1). Missing keys mean the currency is not
/// convertible with this table. Tables are only ever replaced whole;
/// switching base never merges two tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    /// Currency the rates are expressed against.
    pub base: Currency,
    /// Rate of the base into each keyed currency.
    pub rates: HashMap<String, f64>,
}

impl RateTable {
    /// Build a table from (code, rate) pairs, forcing the base key to 1.
    pub fn from_pairs<I, S>(base: Currency, pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut rates: HashMap<String, f64> = pairs
            .into_iter()
            .map(|(code, rate)| (code.into().to_uppercase(), rate))
            .collect();
        rates.insert(base.code().to_string(), 1.0);
        Self { base, rates }
    }

    /// Look up the base-relative rate for a currency.
    pub fn rate_for(&self, currency: &Currency) -> Option<f64> {
        self.rates.get(currency.code()).copied()
    }

    /// Check whether a currency is convertible with this table.
    pub fn contains(&self, currency: &Currency) -> bool {
        self.rates.contains_key(currency.code())
    }

    /// Number of rates in the table.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Check if the table has no rates.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}
