//! Built-in fallback rate tables.
//!
//! Used when the rate service is unreachable or returns garbage. Values
//! are fixed approximations; the widget surfaces them tagged as
//! [`crate::store::RateSource::Fallback`] so callers can tell they are
//! not live data.

use cambio_common::{Currency, RateTable};

/// Fallback table for a base currency.
///
/// Bases without a built-in table get the USD default; loading must
/// always produce some table.
pub fn table_for(base: &Currency) -> RateTable {
    match base.code() {
        "BRL" => brl(),
        "EUR" => eur(),
        "GBP" => gbp(),
        "JPY" => jpy(),
        _ => usd(),
    }
}

fn usd() -> RateTable {
    RateTable::from_pairs(
        Currency::usd(),
        [
            ("BRL", 5.20),
            ("EUR", 0.85),
            ("GBP", 0.73),
            ("JPY", 110.50),
            ("CAD", 1.25),
            ("AUD", 1.35),
            ("CHF", 0.92),
            ("CNY", 6.45),
            ("ARS", 98.30),
        ],
    )
}

fn brl() -> RateTable {
    RateTable::from_pairs(
        Currency::brl(),
        [
            ("USD", 0.19),
            ("EUR", 0.16),
            ("GBP", 0.14),
            ("JPY", 21.25),
            ("CAD", 0.24),
            ("AUD", 0.26),
            ("CHF", 0.18),
            ("CNY", 1.24),
            ("ARS", 18.90),
        ],
    )
}

fn eur() -> RateTable {
    RateTable::from_pairs(
        Currency::eur(),
        [
            ("USD", 1.18),
            ("BRL", 6.15),
            ("GBP", 0.86),
            ("JPY", 130.00),
            ("CAD", 1.47),
            ("AUD", 1.59),
            ("CHF", 1.08),
            ("CNY", 7.59),
            ("ARS", 115.65),
        ],
    )
}

fn gbp() -> RateTable {
    RateTable::from_pairs(
        Currency::gbp(),
        [
            ("USD", 1.37),
            ("BRL", 7.12),
            ("EUR", 1.16),
            ("JPY", 151.37),
            ("CAD", 1.71),
            ("AUD", 1.85),
            ("CHF", 1.26),
            ("CNY", 8.82),
            ("ARS", 134.57),
        ],
    )
}

fn jpy() -> RateTable {
    RateTable::from_pairs(
        Currency::jpy(),
        [
            ("USD", 0.0090),
            ("BRL", 0.047),
            ("EUR", 0.0077),
            ("GBP", 0.0066),
            ("CAD", 0.0113),
            ("AUD", 0.0122),
            ("CHF", 0.0083),
            ("CNY", 0.058),
            ("ARS", 0.89),
        ],
    )
}
