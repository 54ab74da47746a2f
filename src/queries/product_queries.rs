use rust_decimal::Decimal;
use sea_orm::{FromQueryResult, Value};
use serde::Serialize;

use super::{cell_or_dash, money_cell, MetricQuery, CANCELLED_STATUS};
use crate::db::TableRow;

/// One row per product
#[derive(Debug, Clone, PartialEq, FromQueryResult, Serialize)]
pub struct ProductPerformanceRow {
    pub product_name: String,
    pub category: Option<String>,
    pub unit_price: Decimal,
    pub times_ordered: i64,
    pub total_quantity_sold: i64,
    pub total_revenue: Decimal,
    pub avg_quantity_per_order: Decimal,
    /// `None` when the product has no inventory record
    pub current_stock: Option<i64>,
    pub turnover_ratio: Decimal,
}

impl TableRow for ProductPerformanceRow {
    fn cells(&self) -> Vec<String> {
        vec![
            self.product_name.clone(),
            cell_or_dash(self.category.as_deref()),
            money_cell(self.unit_price),
            self.times_ordered.to_string(),
            self.total_quantity_sold.to_string(),
            money_cell(self.total_revenue),
            money_cell(self.avg_quantity_per_order),
            cell_or_dash(self.current_stock),
            money_cell(self.turnover_ratio),
        ]
    }
}

/// Sales volume and turnover per product, highest revenue first.
///
/// Turnover is quantity sold over current stock, rounded to two places,
/// and zero when either side is zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductPerformanceQuery;

impl MetricQuery for ProductPerformanceQuery {
    type Record = ProductPerformanceRow;
    type Row = ProductPerformanceRow;

    fn name(&self) -> &'static str {
        "product_performance"
    }

    fn sql(&self) -> &'static str {
        r#"
        SELECT
            p.Name AS product_name,
            p.Category AS category,
            p.Price * 1.0 AS unit_price,
            COALESCE(s.times_ordered, 0) AS times_ordered,
            COALESCE(s.total_quantity_sold, 0) AS total_quantity_sold,
            COALESCE(s.total_revenue, 0) * 1.0 AS total_revenue,
            COALESCE(s.avg_quantity_per_order, 0) * 1.0 AS avg_quantity_per_order,
            stock.quantity AS current_stock,
            CASE
                WHEN COALESCE(stock.quantity, 0) > 0 AND COALESCE(s.total_quantity_sold, 0) > 0
                THEN ROUND(s.total_quantity_sold * 1.0 / stock.quantity, 2)
                ELSE 0.0
            END AS turnover_ratio
        FROM Product p
        LEFT JOIN (
            SELECT
                inv.Product_ID,
                COUNT(DISTINCT inv.Order_ID) AS times_ordered,
                CAST(SUM(inv.Quantity_Ordered) AS SIGNED INTEGER) AS total_quantity_sold,
                SUM(inv.Line_Total) AS total_revenue,
                AVG(inv.Quantity_Ordered) AS avg_quantity_per_order
            FROM Involvement inv
            JOIN Orders o ON o.Order_ID = inv.Order_ID
            WHERE o.Order_Status IS NULL OR o.Order_Status <> ?
            GROUP BY inv.Product_ID
        ) s ON s.Product_ID = p.Product_ID
        LEFT JOIN (
            SELECT Product_ID, CAST(SUM(Quantity) AS SIGNED INTEGER) AS quantity
            FROM Inventory
            GROUP BY Product_ID
        ) stock ON stock.Product_ID = p.Product_ID
        ORDER BY total_revenue DESC, product_name ASC
        "#
    }

    fn params(&self) -> Vec<Value> {
        vec![CANCELLED_STATUS.into()]
    }

    fn columns(&self) -> &'static [&'static str] {
        &[
            "Product_Name",
            "Category",
            "Unit_Price",
            "Times_Ordered",
            "Total_Quantity_Sold",
            "Total_Revenue",
            "Avg_Quantity_Per_Order",
            "Current_Stock",
            "Turnover_Ratio",
        ]
    }

    fn shape(&self, record: ProductPerformanceRow) -> ProductPerformanceRow {
        record
    }
}
