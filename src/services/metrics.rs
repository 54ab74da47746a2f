use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{info, instrument};

use crate::db::{Gateway, Table};
use crate::models::ExecutiveSummary;
use crate::queries::{
    ActiveRepresentativesQuery, CustomerSegmentRow, CustomerSegmentsQuery, InventoryStatusQuery,
    InventoryStatusRow, InventoryValueQuery, ProductPerformanceQuery, ProductPerformanceRow,
    RegionalPerformanceQuery, RegionalPerformanceRow, SalesPerformanceQuery, SalesPerformanceRow,
    TotalOrdersQuery, TotalRevenueQuery,
};

/// Source of every business metric consumed by reports and dashboards.
///
/// Implementations never fail: a broken query surfaces as an empty table
/// (or a zero in the summary).
#[async_trait]
pub trait MetricsProvider: Send + Sync {
    async fn get_executive_summary(&self) -> ExecutiveSummary;

    async fn analyze_sales_performance(&self) -> Table<SalesPerformanceRow>;

    async fn analyze_inventory_status(&self) -> Table<InventoryStatusRow>;

    async fn analyze_regional_performance(&self) -> Table<RegionalPerformanceRow>;

    async fn analyze_customer_segments(&self) -> Table<CustomerSegmentRow>;

    async fn analyze_product_performance(&self) -> Table<ProductPerformanceRow>;
}

/// Metrics computed live through the gateway
pub struct GatewayMetrics<'a> {
    gateway: &'a Gateway,
    as_of: NaiveDate,
}

impl<'a> GatewayMetrics<'a> {
    /// `as_of` is the reference date for recency columns
    pub fn new(gateway: &'a Gateway, as_of: NaiveDate) -> Self {
        Self { gateway, as_of }
    }
}

#[async_trait]
impl MetricsProvider for GatewayMetrics<'_> {
    #[instrument(skip(self))]
    async fn get_executive_summary(&self) -> ExecutiveSummary {
        // Each part degrades to zero on its own
        let revenue = self.gateway.fetch(&TotalRevenueQuery).await;
        let orders = self.gateway.fetch(&TotalOrdersQuery).await;
        let reps = self.gateway.fetch(&ActiveRepresentativesQuery).await;
        let inventory = self.gateway.fetch(&InventoryValueQuery).await;

        let summary = ExecutiveSummary::from_totals(
            revenue.first().copied().unwrap_or_default(),
            orders.first().copied().unwrap_or_default(),
            reps.first().copied().unwrap_or_default(),
            inventory.first().copied().unwrap_or_default(),
        );
        info!(
            revenue = %summary.total_revenue,
            orders = summary.total_orders,
            "Executive summary computed"
        );
        summary
    }

    async fn analyze_sales_performance(&self) -> Table<SalesPerformanceRow> {
        self.gateway
            .fetch(&SalesPerformanceQuery::new(self.as_of))
            .await
    }

    async fn analyze_inventory_status(&self) -> Table<InventoryStatusRow> {
        self.gateway.fetch(&InventoryStatusQuery).await
    }

    async fn analyze_regional_performance(&self) -> Table<RegionalPerformanceRow> {
        self.gateway.fetch(&RegionalPerformanceQuery).await
    }

    async fn analyze_customer_segments(&self) -> Table<CustomerSegmentRow> {
        self.gateway.fetch(&CustomerSegmentsQuery).await
    }

    async fn analyze_product_performance(&self) -> Table<ProductPerformanceRow> {
        self.gateway.fetch(&ProductPerformanceQuery).await
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! In-memory provider for formatter and composer tests

    use super::*;
    use crate::queries::{
        CustomerSegmentsQuery, InventoryStatusQuery, MetricQuery, ProductPerformanceQuery,
        RegionalPerformanceQuery,
    };
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, Default)]
    pub struct StaticMetrics {
        pub summary: ExecutiveSummary,
        pub sales: Vec<SalesPerformanceRow>,
        pub inventory: Vec<InventoryStatusRow>,
        pub regional: Vec<RegionalPerformanceRow>,
        pub segments: Vec<CustomerSegmentRow>,
        pub products: Vec<ProductPerformanceRow>,
        /// Names of the provider methods called, in order
        pub calls: Arc<Mutex<Vec<&'static str>>>,
    }

    impl StaticMetrics {
        pub fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: &'static str) {
            self.calls.lock().unwrap().push(call);
        }
    }

    fn sales_columns() -> &'static [&'static str] {
        SalesPerformanceQuery::new(NaiveDate::MIN).columns()
    }

    #[async_trait]
    impl MetricsProvider for StaticMetrics {
        async fn get_executive_summary(&self) -> ExecutiveSummary {
            self.record("summary");
            self.summary.clone()
        }

        async fn analyze_sales_performance(&self) -> Table<SalesPerformanceRow> {
            self.record("sales");
            Table::new(sales_columns(), self.sales.clone())
        }

        async fn analyze_inventory_status(&self) -> Table<InventoryStatusRow> {
            self.record("inventory");
            Table::new(InventoryStatusQuery.columns(), self.inventory.clone())
        }

        async fn analyze_regional_performance(&self) -> Table<RegionalPerformanceRow> {
            self.record("regional");
            Table::new(RegionalPerformanceQuery.columns(), self.regional.clone())
        }

        async fn analyze_customer_segments(&self) -> Table<CustomerSegmentRow> {
            self.record("segments");
            Table::new(CustomerSegmentsQuery.columns(), self.segments.clone())
        }

        async fn analyze_product_performance(&self) -> Table<ProductPerformanceRow> {
            self.record("products");
            Table::new(ProductPerformanceQuery.columns(), self.products.clone())
        }
    }
}
