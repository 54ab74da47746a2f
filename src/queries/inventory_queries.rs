use rust_decimal::Decimal;
use sea_orm::FromQueryResult;
use serde::Serialize;

use super::{cell_or_dash, money_cell, MetricQuery};
use crate::db::TableRow;
use crate::models::{ActionRequired, StockStatus};

/// One row per inventory record, classified against its reorder level
#[derive(Debug, Clone, PartialEq, FromQueryResult, Serialize)]
pub struct InventoryStatusRow {
    pub product_name: String,
    pub category: Option<String>,
    pub unit_price: Decimal,
    pub current_stock: i64,
    pub reorder_level: i64,
    pub total_value: Decimal,
    pub location: Option<String>,
    pub stock_status: StockStatus,
    pub action_required: ActionRequired,
}

impl TableRow for InventoryStatusRow {
    fn cells(&self) -> Vec<String> {
        vec![
            self.product_name.clone(),
            cell_or_dash(self.category.as_deref()),
            money_cell(self.unit_price),
            self.current_stock.to_string(),
            self.reorder_level.to_string(),
            money_cell(self.total_value),
            cell_or_dash(self.location.as_deref()),
            self.stock_status.to_string(),
            self.action_required.to_string(),
        ]
    }
}

/// Inventory lines, most severe bucket first, then by value.
///
/// The bucket arithmetic mirrors [`StockStatus::classify`] and
/// [`ActionRequired::classify`].
#[derive(Debug, Clone, Copy, Default)]
pub struct InventoryStatusQuery;

impl MetricQuery for InventoryStatusQuery {
    type Record = InventoryStatusRow;
    type Row = InventoryStatusRow;

    fn name(&self) -> &'static str {
        "inventory_status"
    }

    fn sql(&self) -> &'static str {
        r#"
        SELECT
            p.Name AS product_name,
            p.Category AS category,
            p.Price * 1.0 AS unit_price,
            i.Quantity AS current_stock,
            i.Reorder_Level AS reorder_level,
            p.Price * i.Quantity * 1.0 AS total_value,
            i.Location AS location,
            CASE
                WHEN i.Quantity <= 0 THEN 'OUT_OF_STOCK'
                WHEN i.Quantity * 10 <= i.Reorder_Level * 3 THEN 'CRITICAL'
                WHEN i.Quantity * 10 <= i.Reorder_Level * 6 THEN 'LOW'
                WHEN i.Quantity <= i.Reorder_Level THEN 'MODERATE'
                ELSE 'ADEQUATE'
            END AS stock_status,
            CASE
                WHEN i.Quantity <= 0 OR i.Quantity <= i.Reorder_Level THEN 'REORDER_NOW'
                WHEN i.Quantity * 2 <= i.Reorder_Level * 3 THEN 'MONITOR'
                ELSE 'SUFFICIENT'
            END AS action_required,
            CASE
                WHEN i.Quantity <= 0 THEN 1
                WHEN i.Quantity * 10 <= i.Reorder_Level * 3 THEN 2
                WHEN i.Quantity * 10 <= i.Reorder_Level * 6 THEN 3
                WHEN i.Quantity <= i.Reorder_Level THEN 4
                ELSE 5
            END AS severity
        FROM Product p
        JOIN Inventory i ON p.Product_ID = i.Product_ID
        ORDER BY severity ASC, total_value DESC, product_name ASC
        "#
    }

    fn columns(&self) -> &'static [&'static str] {
        &[
            "Product_Name",
            "Category",
            "Price",
            "Current_Stock",
            "Reorder_Level",
            "Total_Value",
            "Location",
            "Stock_Status",
            "Action_Required",
        ]
    }

    fn shape(&self, record: InventoryStatusRow) -> InventoryStatusRow {
        record
    }
}
