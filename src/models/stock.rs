use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Inventory severity bucket, most severe first.
///
/// Thresholds are ratios of stock to reorder level and are evaluated with
/// integer arithmetic so the SQL and Rust sides agree exactly at boundaries.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    strum::Display,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum StockStatus {
    #[sea_orm(string_value = "OUT_OF_STOCK")]
    OutOfStock,
    #[sea_orm(string_value = "CRITICAL")]
    Critical,
    #[sea_orm(string_value = "LOW")]
    Low,
    #[sea_orm(string_value = "MODERATE")]
    Moderate,
    #[sea_orm(string_value = "ADEQUATE")]
    Adequate,
}

impl StockStatus {
    /// 1 (out of stock) through 5 (adequate)
    pub fn severity(self) -> u8 {
        match self {
            StockStatus::OutOfStock => 1,
            StockStatus::Critical => 2,
            StockStatus::Low => 3,
            StockStatus::Moderate => 4,
            StockStatus::Adequate => 5,
        }
    }

    /// Buckets `stock` against `reorder_level`; a boundary value falls into
    /// the stricter bucket.
    pub fn classify(stock: i64, reorder_level: i64) -> Self {
        let (stock, reorder) = (i128::from(stock), i128::from(reorder_level));
        if stock <= 0 {
            StockStatus::OutOfStock
        } else if stock * 10 <= reorder * 3 {
            StockStatus::Critical
        } else if stock * 10 <= reorder * 6 {
            StockStatus::Low
        } else if stock <= reorder {
            StockStatus::Moderate
        } else {
            StockStatus::Adequate
        }
    }

    /// Statuses that belong in the report's alert section
    pub fn is_alert(self) -> bool {
        matches!(self, StockStatus::OutOfStock | StockStatus::Critical)
    }
}

/// Recommended handling for an inventory line
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    strum::Display,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionRequired {
    #[sea_orm(string_value = "REORDER_NOW")]
    ReorderNow,
    #[sea_orm(string_value = "MONITOR")]
    Monitor,
    #[sea_orm(string_value = "SUFFICIENT")]
    Sufficient,
}

impl ActionRequired {
    pub fn classify(stock: i64, reorder_level: i64) -> Self {
        let (stock, reorder) = (i128::from(stock), i128::from(reorder_level));
        if stock <= 0 || stock <= reorder {
            ActionRequired::ReorderNow
        } else if stock * 2 <= reorder * 3 {
            ActionRequired::Monitor
        } else {
            ActionRequired::Sufficient
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use sea_orm::Iterable;

    #[rstest]
    #[case(0, 100, StockStatus::OutOfStock)]
    #[case(-5, 100, StockStatus::OutOfStock)]
    #[case(30, 100, StockStatus::Critical)]
    #[case(31, 100, StockStatus::Low)]
    #[case(60, 100, StockStatus::Low)]
    #[case(61, 100, StockStatus::Moderate)]
    #[case(100, 100, StockStatus::Moderate)]
    #[case(101, 100, StockStatus::Adequate)]
    #[case(3, 10, StockStatus::Critical)]
    #[case(1, 0, StockStatus::Adequate)]
    fn stock_buckets(#[case] stock: i64, #[case] reorder: i64, #[case] expected: StockStatus) {
        assert_eq!(StockStatus::classify(stock, reorder), expected);
    }

    #[rstest]
    #[case(0, 0, ActionRequired::ReorderNow)]
    #[case(100, 100, ActionRequired::ReorderNow)]
    #[case(150, 100, ActionRequired::Monitor)]
    #[case(151, 100, ActionRequired::Sufficient)]
    fn action_buckets(#[case] stock: i64, #[case] reorder: i64, #[case] expected: ActionRequired) {
        assert_eq!(ActionRequired::classify(stock, reorder), expected);
    }

    #[test]
    fn display_matches_stored_values() {
        assert_eq!(StockStatus::OutOfStock.to_string(), "OUT_OF_STOCK");
        assert_eq!(ActionRequired::ReorderNow.to_string(), "REORDER_NOW");
        assert_eq!(StockStatus::OutOfStock.to_value(), "OUT_OF_STOCK");
    }

    #[test]
    fn severity_follows_declaration_order() {
        let all: Vec<StockStatus> = StockStatus::iter().collect();
        assert!(all.windows(2).all(|w| w[0] < w[1]));
        assert!(all.windows(2).all(|w| w[0].severity() + 1 == w[1].severity()));
    }
}
