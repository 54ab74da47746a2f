use rust_decimal::Decimal;
use sea_orm::{FromQueryResult, Value};

use super::{MetricQuery, CANCELLED_STATUS};

const VALUE_COLUMN: &[&str] = &["value"];

/// Single decimal produced by a scalar aggregate
#[derive(Debug, Clone, FromQueryResult)]
pub struct DecimalValue {
    pub value: Decimal,
}

/// Single count produced by a scalar aggregate
#[derive(Debug, Clone, FromQueryResult)]
pub struct CountValue {
    pub value: i64,
}

fn non_negative(count: i64) -> u64 {
    u64::try_from(count).unwrap_or(0)
}

/// Sum of `Total_cost` over non-cancelled orders
#[derive(Debug, Clone, Copy, Default)]
pub struct TotalRevenueQuery;

impl MetricQuery for TotalRevenueQuery {
    type Record = DecimalValue;
    type Row = Decimal;

    fn name(&self) -> &'static str {
        "total_revenue"
    }

    fn sql(&self) -> &'static str {
        "SELECT COALESCE(SUM(Total_cost), 0) * 1.0 AS value \
         FROM Orders \
         WHERE Order_Status IS NULL OR Order_Status <> ?"
    }

    fn params(&self) -> Vec<Value> {
        vec![CANCELLED_STATUS.into()]
    }

    fn columns(&self) -> &'static [&'static str] {
        VALUE_COLUMN
    }

    fn shape(&self, record: DecimalValue) -> Decimal {
        record.value
    }
}

/// Number of non-cancelled orders
#[derive(Debug, Clone, Copy, Default)]
pub struct TotalOrdersQuery;

impl MetricQuery for TotalOrdersQuery {
    type Record = CountValue;
    type Row = u64;

    fn name(&self) -> &'static str {
        "total_orders"
    }

    fn sql(&self) -> &'static str {
        "SELECT COUNT(*) AS value \
         FROM Orders \
         WHERE Order_Status IS NULL OR Order_Status <> ?"
    }

    fn params(&self) -> Vec<Value> {
        vec![CANCELLED_STATUS.into()]
    }

    fn columns(&self) -> &'static [&'static str] {
        VALUE_COLUMN
    }

    fn shape(&self, record: CountValue) -> u64 {
        non_negative(record.value)
    }
}

/// Number of distinct sales representatives
#[derive(Debug, Clone, Copy, Default)]
pub struct ActiveRepresentativesQuery;

impl MetricQuery for ActiveRepresentativesQuery {
    type Record = CountValue;
    type Row = u64;

    fn name(&self) -> &'static str {
        "active_representatives"
    }

    fn sql(&self) -> &'static str {
        "SELECT COUNT(DISTINCT Representative_ID) AS value FROM Sales_Representative"
    }

    fn columns(&self) -> &'static [&'static str] {
        VALUE_COLUMN
    }

    fn shape(&self, record: CountValue) -> u64 {
        non_negative(record.value)
    }
}

/// Stock valued at list price across every inventory location
#[derive(Debug, Clone, Copy, Default)]
pub struct InventoryValueQuery;

impl MetricQuery for InventoryValueQuery {
    type Record = DecimalValue;
    type Row = Decimal;

    fn name(&self) -> &'static str {
        "inventory_value"
    }

    fn sql(&self) -> &'static str {
        "SELECT COALESCE(SUM(p.Price * i.Quantity), 0) * 1.0 AS value \
         FROM Product p \
         JOIN Inventory i ON p.Product_ID = i.Product_ID"
    }

    fn columns(&self) -> &'static [&'static str] {
        VALUE_COLUMN
    }

    fn shape(&self, record: DecimalValue) -> Decimal {
        record.value
    }
}
