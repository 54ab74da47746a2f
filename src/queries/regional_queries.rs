use rust_decimal::Decimal;
use sea_orm::{FromQueryResult, Value};
use serde::Serialize;

use super::{money_cell, MetricQuery, CANCELLED_STATUS};
use crate::db::TableRow;

/// One row per region that has at least one representative
#[derive(Debug, Clone, PartialEq, FromQueryResult, Serialize)]
pub struct RegionalPerformanceRow {
    pub region_name: String,
    pub total_representatives: i64,
    pub total_orders: i64,
    pub total_revenue: Decimal,
    pub average_order_value: Decimal,
    pub unique_customers: i64,
    pub revenue_per_rep: Decimal,
    pub orders_per_rep: Decimal,
}

impl TableRow for RegionalPerformanceRow {
    fn cells(&self) -> Vec<String> {
        vec![
            self.region_name.clone(),
            self.total_representatives.to_string(),
            self.total_orders.to_string(),
            money_cell(self.total_revenue),
            money_cell(self.average_order_value),
            self.unique_customers.to_string(),
            money_cell(self.revenue_per_rep),
            money_cell(self.orders_per_rep),
        ]
    }
}

/// Revenue and reach per region, highest revenue first
#[derive(Debug, Clone, Copy, Default)]
pub struct RegionalPerformanceQuery;

impl MetricQuery for RegionalPerformanceQuery {
    type Record = RegionalPerformanceRow;
    type Row = RegionalPerformanceRow;

    fn name(&self) -> &'static str {
        "regional_performance"
    }

    fn sql(&self) -> &'static str {
        r#"
        SELECT
            r.Name AS region_name,
            reps.total_representatives AS total_representatives,
            COALESCE(o.total_orders, 0) AS total_orders,
            COALESCE(o.total_revenue, 0) * 1.0 AS total_revenue,
            COALESCE(o.average_order_value, 0) * 1.0 AS average_order_value,
            COALESCE(c.unique_customers, 0) AS unique_customers,
            COALESCE(o.total_revenue, 0) * 1.0 / reps.total_representatives AS revenue_per_rep,
            COALESCE(o.total_orders, 0) * 1.0 / reps.total_representatives AS orders_per_rep
        FROM Region r
        JOIN (
            SELECT Region_ID, COUNT(DISTINCT Representative_ID) AS total_representatives
            FROM Sales_Representative
            GROUP BY Region_ID
        ) reps ON reps.Region_ID = r.Region_ID
        LEFT JOIN (
            SELECT
                sr.Region_ID,
                COUNT(DISTINCT ord.Order_ID) AS total_orders,
                SUM(ord.Total_cost) AS total_revenue,
                AVG(ord.Total_cost) AS average_order_value
            FROM Orders ord
            JOIN Sales_Representative sr ON sr.Representative_ID = ord.Representative_ID
            WHERE ord.Order_Status IS NULL OR ord.Order_Status <> ?
            GROUP BY sr.Region_ID
        ) o ON o.Region_ID = r.Region_ID
        LEFT JOIN (
            SELECT sr.Region_ID, COUNT(DISTINCT it.Customer_ID) AS unique_customers
            FROM Interaction it
            JOIN Sales_Representative sr ON sr.Representative_ID = it.Representative_ID
            GROUP BY sr.Region_ID
        ) c ON c.Region_ID = r.Region_ID
        WHERE reps.total_representatives > 0
        ORDER BY total_revenue DESC, region_name ASC
        "#
    }

    fn params(&self) -> Vec<Value> {
        vec![CANCELLED_STATUS.into()]
    }

    fn columns(&self) -> &'static [&'static str] {
        &[
            "Region_Name",
            "Total_Representatives",
            "Total_Orders",
            "Total_Revenue",
            "Average_Order_Value",
            "Unique_Customers",
            "Revenue_Per_Rep",
            "Orders_Per_Rep",
        ]
    }

    fn shape(&self, record: RegionalPerformanceRow) -> RegionalPerformanceRow {
        record
    }
}
