use rust_decimal::Decimal;
use sea_orm::{FromQueryResult, Value};
use serde::Serialize;

use super::{money_cell, MetricQuery, CANCELLED_STATUS};
use crate::db::TableRow;
use crate::models::CustomerType;

/// One row per customer segment
#[derive(Debug, Clone, PartialEq, FromQueryResult, Serialize)]
pub struct CustomerSegmentRow {
    pub customer_type: CustomerType,
    pub customer_count: i64,
    pub total_orders: i64,
    pub total_revenue: Decimal,
    pub average_order_value: Decimal,
    pub revenue_per_customer: Decimal,
}

impl TableRow for CustomerSegmentRow {
    fn cells(&self) -> Vec<String> {
        vec![
            self.customer_type.to_string(),
            self.customer_count.to_string(),
            self.total_orders.to_string(),
            money_cell(self.total_revenue),
            money_cell(self.average_order_value),
            money_cell(self.revenue_per_customer),
        ]
    }
}

/// Revenue by customer role. Each customer is classified once, with
/// Doctor taking precedence over Hospital over Pharmacy.
#[derive(Debug, Clone, Copy, Default)]
pub struct CustomerSegmentsQuery;

impl MetricQuery for CustomerSegmentsQuery {
    type Record = CustomerSegmentRow;
    type Row = CustomerSegmentRow;

    fn name(&self) -> &'static str {
        "customer_segments"
    }

    fn sql(&self) -> &'static str {
        r#"
        SELECT
            seg.customer_type AS customer_type,
            COUNT(DISTINCT seg.Customer_ID) AS customer_count,
            COUNT(DISTINCT o.Order_ID) AS total_orders,
            COALESCE(SUM(o.Total_cost), 0) * 1.0 AS total_revenue,
            COALESCE(AVG(o.Total_cost), 0) * 1.0 AS average_order_value,
            COALESCE(SUM(o.Total_cost), 0) * 1.0
                / COUNT(DISTINCT seg.Customer_ID) AS revenue_per_customer
        FROM (
            SELECT
                c.Customer_ID,
                CASE
                    WHEN EXISTS (SELECT 1 FROM Doctors d WHERE d.Customer_ID = c.Customer_ID)
                        THEN 'Doctor'
                    WHEN EXISTS (SELECT 1 FROM Hospital h WHERE h.Customer_ID = c.Customer_ID)
                        THEN 'Hospital'
                    WHEN EXISTS (SELECT 1 FROM Pharmacy p WHERE p.Customer_ID = c.Customer_ID)
                        THEN 'Pharmacy'
                    ELSE 'Other'
                END AS customer_type
            FROM Customer c
        ) seg
        LEFT JOIN Order_Placed op ON op.Customer_ID = seg.Customer_ID
        LEFT JOIN Orders o
            ON o.Order_ID = op.Order_ID
            AND (o.Order_Status IS NULL OR o.Order_Status <> ?)
        GROUP BY seg.customer_type
        ORDER BY total_revenue DESC, customer_type ASC
        "#
    }

    fn params(&self) -> Vec<Value> {
        vec![CANCELLED_STATUS.into()]
    }

    fn columns(&self) -> &'static [&'static str] {
        &[
            "Customer_Type",
            "Customer_Count",
            "Total_Orders",
            "Total_Revenue",
            "Average_Order_Value",
            "Revenue_Per_Customer",
        ]
    }

    fn shape(&self, record: CustomerSegmentRow) -> CustomerSegmentRow {
        record
    }
}
