//! Outbound display strings for the UI collaborator.
//!
//! The engine's contract ends at producing numeric results; these
//! helpers turn them into the strings the widget surface shows. Symbol
//! and decimal-place choices come from [`Currency`].

use chrono::DateTime;

use cambio_common::{Currency, RateTable, Timestamp};

use crate::convert::convert;
use crate::history::ConversionRecord;

/// Shown when the history list is empty.
pub const EMPTY_HISTORY: &str = "No conversions yet";

/// Format an amount with its currency symbol, e.g. `R$ 520.00`.
pub fn format_amount(value: f64, currency: &Currency) -> String {
    format!(
        "{} {:.prec$}",
        currency.symbol(),
        value,
        prec = currency.decimal_places()
    )
}

/// The unit-rate description line, e.g. `1 USD = R$ 5.20 BRL`.
pub fn rate_text(from: &Currency, to: &Currency, unit_rate: f64) -> String {
    format!(
        "1 {} = {} {}",
        from,
        format_amount(unit_rate, to),
        to
    )
}

/// Rows of unit conversions from the table's base into the display
/// currencies, skipping the base itself.
///
/// A currency missing from the table shows a formatted zero, the same
/// sentinel the conversion itself produces.
pub fn rates_grid(table: &RateTable, display: &[Currency]) -> Vec<String> {
    display
        .iter()
        .filter(|c| **c != table.base)
        .map(|c| {
            let rate = convert(table, 1.0, &table.base, c);
            format!("1 {} = {}", table.base, format_amount(rate, c))
        })
        .collect()
}

/// One history list line.
pub fn history_line(record: &ConversionRecord) -> String {
    format!(
        "{} → {}  (1 {} = {}) at {}",
        format_amount(record.amount, &record.from_currency),
        format_amount(record.result, &record.to_currency),
        record.from_currency,
        format_amount(record.rate, &record.to_currency),
        short_time(&record.timestamp)
    )
}

/// The last-updated line, e.g. `Updated: 14:03:22`.
pub fn last_update_text(stamp: Timestamp) -> String {
    format!("Updated: {}", stamp.format("%H:%M:%S"))
}

fn short_time(rfc3339: &str) -> String {
    DateTime::parse_from_rfc3339(rfc3339)
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|_| rfc3339.to_string())
}
