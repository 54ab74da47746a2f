use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{FromQueryResult, Value};
use serde::Serialize;

use super::{cell_or_dash, money_cell, MetricQuery, CANCELLED_STATUS};
use crate::db::TableRow;

#[derive(Debug, Clone, FromQueryResult)]
pub struct SalesPerformanceRecord {
    pub representative_name: String,
    pub region_name: String,
    pub performance_rating: Option<Decimal>,
    pub total_orders: i64,
    pub total_sales: Decimal,
    pub average_order_value: Decimal,
    pub unique_customers: i64,
    pub last_order_date: Option<NaiveDate>,
}

/// One row per sales representative
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesPerformanceRow {
    pub representative_name: String,
    pub region_name: String,
    pub performance_rating: Option<Decimal>,
    pub total_orders: i64,
    pub total_sales: Decimal,
    pub average_order_value: Decimal,
    pub unique_customers: i64,
    pub last_order_date: Option<NaiveDate>,
    pub days_since_last_order: Option<i64>,
}

impl TableRow for SalesPerformanceRow {
    fn cells(&self) -> Vec<String> {
        vec![
            self.representative_name.clone(),
            self.region_name.clone(),
            cell_or_dash(self.performance_rating),
            self.total_orders.to_string(),
            money_cell(self.total_sales),
            money_cell(self.average_order_value),
            self.unique_customers.to_string(),
            cell_or_dash(self.last_order_date),
            cell_or_dash(self.days_since_last_order),
        ]
    }
}

/// Per-representative sales, best seller first.
///
/// Orders and interactions are aggregated separately so neither multiplies
/// the other; representatives without orders still appear with zero sales.
#[derive(Debug, Clone, Copy)]
pub struct SalesPerformanceQuery {
    /// Reference date for "days since last order"
    pub as_of: NaiveDate,
}

impl SalesPerformanceQuery {
    pub fn new(as_of: NaiveDate) -> Self {
        Self { as_of }
    }
}

impl MetricQuery for SalesPerformanceQuery {
    type Record = SalesPerformanceRecord;
    type Row = SalesPerformanceRow;

    fn name(&self) -> &'static str {
        "sales_performance"
    }

    fn sql(&self) -> &'static str {
        r#"
        SELECT
            sr.Name AS representative_name,
            r.Name AS region_name,
            sr.Performance_Rating * 1.0 AS performance_rating,
            COALESCE(o.total_orders, 0) AS total_orders,
            COALESCE(o.total_sales, 0) * 1.0 AS total_sales,
            COALESCE(o.average_order_value, 0) * 1.0 AS average_order_value,
            COALESCE(c.unique_customers, 0) AS unique_customers,
            o.last_order_date AS last_order_date
        FROM Sales_Representative sr
        JOIN Region r ON sr.Region_ID = r.Region_ID
        LEFT JOIN (
            SELECT
                Representative_ID,
                COUNT(DISTINCT Order_ID) AS total_orders,
                SUM(Total_cost) AS total_sales,
                AVG(Total_cost) AS average_order_value,
                MAX(Date) AS last_order_date
            FROM Orders
            WHERE Order_Status IS NULL OR Order_Status <> ?
            GROUP BY Representative_ID
        ) o ON o.Representative_ID = sr.Representative_ID
        LEFT JOIN (
            SELECT Representative_ID, COUNT(DISTINCT Customer_ID) AS unique_customers
            FROM Interaction
            GROUP BY Representative_ID
        ) c ON c.Representative_ID = sr.Representative_ID
        ORDER BY total_sales DESC, representative_name ASC
        "#
    }

    fn params(&self) -> Vec<Value> {
        vec![CANCELLED_STATUS.into()]
    }

    fn columns(&self) -> &'static [&'static str] {
        &[
            "Representative_Name",
            "Region_Name",
            "Performance_Rating",
            "Total_Orders",
            "Total_Sales",
            "Average_Order_Value",
            "Unique_Customers",
            "Last_Order_Date",
            "Days_Since_Last_Order",
        ]
    }

    fn shape(&self, record: SalesPerformanceRecord) -> SalesPerformanceRow {
        let days_since_last_order = record
            .last_order_date
            .map(|last| (self.as_of - last).num_days());

        SalesPerformanceRow {
            representative_name: record.representative_name,
            region_name: record.region_name,
            performance_rating: record.performance_rating,
            total_orders: record.total_orders,
            total_sales: record.total_sales,
            average_order_value: record.average_order_value,
            unique_customers: record.unique_customers,
            last_order_date: record.last_order_date,
            days_since_last_order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn days_since_last_order_uses_reference_date() {
        let as_of = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let query = SalesPerformanceQuery::new(as_of);
        let row = query.shape(SalesPerformanceRecord {
            representative_name: "Asha".into(),
            region_name: "North".into(),
            performance_rating: Some(dec!(4.5)),
            total_orders: 2,
            total_sales: dec!(250),
            average_order_value: dec!(125),
            unique_customers: 1,
            last_order_date: NaiveDate::from_ymd_opt(2024, 3, 1),
        });
        assert_eq!(row.days_since_last_order, Some(9));
    }

    #[test]
    fn no_orders_means_no_recency() {
        let query = SalesPerformanceQuery::new(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
        let row = query.shape(SalesPerformanceRecord {
            representative_name: "Ben".into(),
            region_name: "South".into(),
            performance_rating: None,
            total_orders: 0,
            total_sales: Decimal::ZERO,
            average_order_value: Decimal::ZERO,
            unique_customers: 0,
            last_order_date: None,
        });
        assert_eq!(row.days_since_last_order, None);
        assert_eq!(row.cells()[2], "-");
    }
}
