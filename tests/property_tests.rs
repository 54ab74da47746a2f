//! Property-based tests for the pure analytics rules.
//!
//! Stock classification, the executive-summary average and currency
//! formatting are checked over wide input ranges.

use pharma_analytics::common::format_currency;
use pharma_analytics::{ActionRequired, ExecutiveSummary, StockStatus};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn cents_strategy() -> impl Strategy<Value = Decimal> {
    (-1_000_000_000i64..1_000_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

// Property: classification is a pure function of (stock, reorder level)
proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn status_matches_threshold_definition(stock in -1_000i64..100_000, reorder in 0i64..100_000) {
        let status = StockStatus::classify(stock, reorder);
        let expected = if stock <= 0 {
            StockStatus::OutOfStock
        } else if Decimal::from(stock) <= Decimal::from(reorder) * Decimal::new(3, 1) {
            StockStatus::Critical
        } else if Decimal::from(stock) <= Decimal::from(reorder) * Decimal::new(6, 1) {
            StockStatus::Low
        } else if stock <= reorder {
            StockStatus::Moderate
        } else {
            StockStatus::Adequate
        };
        prop_assert_eq!(status, expected);
    }

    #[test]
    fn more_stock_never_raises_severity(
        stock in 0i64..100_000,
        extra in 0i64..1_000,
        reorder in 0i64..100_000
    ) {
        let before = StockStatus::classify(stock, reorder).severity();
        let after = StockStatus::classify(stock + extra, reorder).severity();
        prop_assert!(after >= before);
    }

    #[test]
    fn empty_shelf_always_reorders(stock in i64::MIN..=0, reorder in any::<i64>()) {
        prop_assert_eq!(StockStatus::classify(stock, reorder), StockStatus::OutOfStock);
        prop_assert_eq!(ActionRequired::classify(stock, reorder), ActionRequired::ReorderNow);
    }

    #[test]
    fn alert_statuses_always_reorder(stock in -100i64..10_000, reorder in 0i64..10_000) {
        if StockStatus::classify(stock, reorder).is_alert() {
            prop_assert_eq!(ActionRequired::classify(stock, reorder), ActionRequired::ReorderNow);
        }
    }
}

// Property: the average order value never divides by zero
proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn average_is_revenue_over_orders(revenue in cents_strategy(), orders in 1u64..100_000) {
        let summary = ExecutiveSummary::from_totals(revenue, orders, 3, Decimal::ZERO);
        prop_assert_eq!(summary.average_order_value, revenue / Decimal::from(orders));
    }

    #[test]
    fn no_orders_means_zero_average(revenue in cents_strategy()) {
        let summary = ExecutiveSummary::from_totals(revenue, 0, 0, Decimal::ZERO);
        prop_assert_eq!(summary.average_order_value, Decimal::ZERO);
    }
}

// Property: currency text always has a dollar sign, grouping and two decimals
proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn currency_format_round_trips_cents(amount in cents_strategy()) {
        let text = format_currency(amount);
        let (sign, body) = match text.strip_prefix('-') {
            Some(rest) => (-1, rest),
            None => (1, text.as_str()),
        };
        prop_assert!(body.starts_with('$'));

        let (whole, cents) = body[1..].split_once('.').unwrap();
        prop_assert_eq!(cents.len(), 2);
        prop_assert!(whole.split(',').skip(1).all(|group| group.len() == 3));

        let parsed: Decimal = format!("{}.{}", whole.replace(',', ""), cents).parse().unwrap();
        prop_assert_eq!(parsed * Decimal::from(sign), amount);
    }
}
