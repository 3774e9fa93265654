//! Two-step base-relative conversion.

use cambio_common::{Currency, RateTable};
use tracing::warn;

/// Convert an amount between two currencies using the active table.
///
/// `from == to` is the identity and does not touch the table. If either
/// currency is missing from the table the result is the sentinel `0.0`
/// with a logged warning; callers must treat a zero result from a
/// nonzero amount as a missing-rate condition, not a free conversion.
///
/// The table only holds base-relative rates, never cross rates, so the
/// amount is first re-based into the table's base currency and then
/// re-based into the target: `amount / rate[from] * rate[to]`. Plain
/// floating point, no rounding; rounding is a display concern.
pub fn convert(table: &RateTable, amount: f64, from: &Currency, to: &Currency) -> f64 {
    if from == to {
        return amount;
    }

    let (rate_from, rate_to) = match (table.rate_for(from), table.rate_for(to)) {
        (Some(f), Some(t)) => (f, t),
        _ => {
            warn!(from = %from, to = %to, base = %table.base, "Missing rate, returning sentinel zero");
            return 0.0;
        }
    };

    amount / rate_from * rate_to
}


#[cfg(test)]
mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn identity_holds_for_any_positive_amount(
            amount in 1e-6f64..1e12,
            code in "[A-Z]{3}",
        ) {
            let table = RateTable::from_pairs(Currency::usd(), [("BRL", 5.20)]);
            let currency = Currency::new(code);

            prop_assert_eq!(convert(&table, amount, &currency, &currency), amount);
        }

        #[test]
        fn conversion_matches_the_two_step_formula(
            amount in 1e-6f64..1e12,
            rate_from in 1e-4f64..1e4,
            rate_to in 1e-4f64..1e4,
        ) {
            let table = RateTable::from_pairs(
                Currency::usd(),
                [("AAA", rate_from), ("BBB", rate_to)],
            );

            let result = convert(&table, amount, &Currency::new("AAA"), &Currency::new("BBB"));

            prop_assert_eq!(result, amount / rate_from * rate_to);
        }

        #[test]
        fn any_missing_currency_yields_the_sentinel(amount in 1e-6f64..1e12) {
            let table = RateTable::from_pairs(Currency::usd(), [("BRL", 5.20)]);

            prop_assert_eq!(
                convert(&table, amount, &Currency::new("QQQ"), &Currency::brl()),
                0.0
            );
            prop_assert_eq!(
                convert(&table, amount, &Currency::brl(), &Currency::new("QQQ")),
                0.0
            );
        }
    }
}
