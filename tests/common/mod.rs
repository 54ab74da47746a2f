#![allow(dead_code)]

use chrono::NaiveDate;
use pharma_analytics::schema::{DEMO_DATA_SQL, SCHEMA_SQL};
use pharma_analytics::{ConnectionConfig, Gateway};
use tempfile::TempDir;

/// Reference date for metrics that depend on "today"
pub fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

/// Helper harness backed by a throwaway SQLite file.
///
/// A file (not `:memory:`) lets a separately connecting session see the same
/// data as the harness gateway.
pub struct TestDb {
    _dir: TempDir,
    pub config: ConnectionConfig,
    pub gateway: Gateway,
}

impl TestDb {
    /// Empty schema, no rows
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("analytics.db");
        let config = ConnectionConfig::sqlite(path.to_string_lossy().into_owned());

        let mut gateway = Gateway::new();
        gateway
            .connect(&config)
            .await
            .expect("failed to open test database");
        gateway
            .execute_batch(SCHEMA_SQL)
            .await
            .expect("failed to create schema");

        Self {
            _dir: dir,
            config,
            gateway,
        }
    }

    /// Schema plus the bundled demo data set
    pub async fn seeded() -> Self {
        let db = Self::new().await;
        db.exec(DEMO_DATA_SQL).await;
        db
    }

    pub async fn exec(&self, script: &str) {
        self.gateway
            .execute_batch(script)
            .await
            .unwrap_or_else(|e| panic!("fixture failed: {e}\n{script}"));
    }

    pub async fn region(&self, id: i32, name: &str) {
        self.exec(&format!(
            "INSERT INTO Region (Region_ID, Name) VALUES ({id}, '{name}')"
        ))
        .await;
    }

    pub async fn rep(&self, id: i32, name: &str, region_id: i32, rating: Option<f64>) {
        let rating = rating.map_or("NULL".to_string(), |r| r.to_string());
        self.exec(&format!(
            "INSERT INTO Sales_Representative \
             (Representative_ID, Name, Region_ID, Performance_Rating) \
             VALUES ({id}, '{name}', {region_id}, {rating})"
        ))
        .await;
    }

    pub async fn customer(&self, id: i32, name: &str) {
        self.exec(&format!(
            "INSERT INTO Customer (Customer_ID, Name) VALUES ({id}, '{name}')"
        ))
        .await;
    }

    pub async fn order(&self, id: i32, rep_id: i32, date: &str, total: &str, status: &str) {
        self.exec(&format!(
            "INSERT INTO Orders (Order_ID, Representative_ID, Date, Total_cost, Order_Status) \
             VALUES ({id}, {rep_id}, '{date}', {total}, '{status}')"
        ))
        .await;
    }

    pub async fn placed(&self, customer_id: i32, order_id: i32) {
        self.exec(&format!(
            "INSERT INTO Order_Placed (Customer_ID, Order_ID) VALUES ({customer_id}, {order_id})"
        ))
        .await;
    }

    pub async fn interaction(&self, id: i32, rep_id: i32, customer_id: i32) {
        self.exec(&format!(
            "INSERT INTO Interaction \
             (Interaction_ID, Representative_ID, Customer_ID, Interaction_Date) \
             VALUES ({id}, {rep_id}, {customer_id}, '2024-01-01')"
        ))
        .await;
    }

    pub async fn product(&self, id: i32, name: &str, category: Option<&str>, price: &str) {
        let category = category.map_or("NULL".to_string(), |c| format!("'{c}'"));
        self.exec(&format!(
            "INSERT INTO Product (Product_ID, Name, Category, Price) \
             VALUES ({id}, '{name}', {category}, {price})"
        ))
        .await;
    }

    pub async fn inventory(&self, id: i32, product_id: i32, quantity: i64, reorder_level: i64) {
        self.exec(&format!(
            "INSERT INTO Inventory (Inventory_ID, Product_ID, Quantity, Reorder_Level, Location) \
             VALUES ({id}, {product_id}, {quantity}, {reorder_level}, 'Main')"
        ))
        .await;
    }

    pub async fn line(&self, order_id: i32, product_id: i32, quantity: i64, total: &str) {
        self.exec(&format!(
            "INSERT INTO Involvement (Order_ID, Product_ID, Quantity_Ordered, Line_Total) \
             VALUES ({order_id}, {product_id}, {quantity}, {total})"
        ))
        .await;
    }

    pub async fn close(mut self) {
        self.gateway.close().await;
    }
}
