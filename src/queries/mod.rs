//! Typed catalog of the analytics SQL.
//!
//! Each query is a value carrying its SQL text, bound parameters, column
//! headings and result record. The SQL stays inside the subset MySQL and
//! SQLite share:
//! - `?` placeholders
//! - fractional expressions are multiplied by `1.0` so SQLite yields REAL
//!   (MySQL keeps DECIMAL); both decode into `Decimal`
//! - integer sums are cast with `CAST(.. AS SIGNED INTEGER)`
//! - ratio thresholds are compared with integer arithmetic only
//!
//! Facts with a one-to-many relation to the grouped dimension are
//! pre-aggregated in derived tables so joins never multiply them.

pub mod customer_queries;
pub mod inventory_queries;
pub mod product_queries;
pub mod regional_queries;
pub mod sales_queries;
pub mod summary_queries;

use sea_orm::{FromQueryResult, Value};

pub use customer_queries::{CustomerSegmentRow, CustomerSegmentsQuery};
pub use inventory_queries::{InventoryStatusQuery, InventoryStatusRow};
pub use product_queries::{ProductPerformanceQuery, ProductPerformanceRow};
pub use regional_queries::{RegionalPerformanceQuery, RegionalPerformanceRow};
pub use sales_queries::{SalesPerformanceQuery, SalesPerformanceRow};
pub use summary_queries::{
    ActiveRepresentativesQuery, InventoryValueQuery, TotalOrdersQuery, TotalRevenueQuery,
};

/// Order status excluded from every monetary aggregate and order count
pub const CANCELLED_STATUS: &str = "Cancelled";

/// A named aggregation with a fixed result shape
pub trait MetricQuery: Send + Sync {
    /// Raw record as decoded from one result row
    type Record: FromQueryResult + Send;
    /// Row handed to callers
    type Row: Send;

    fn name(&self) -> &'static str;

    fn sql(&self) -> &'static str;

    fn params(&self) -> Vec<Value> {
        Vec::new()
    }

    fn columns(&self) -> &'static [&'static str];

    fn shape(&self, record: Self::Record) -> Self::Row;
}

/// Cell text for an optional value
pub(crate) fn cell_or_dash<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Cell text for a decimal, rounded for display
pub(crate) fn money_cell(value: rust_decimal::Decimal) -> String {
    value.round_dp(2).to_string()
}
