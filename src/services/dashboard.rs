use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use rust_decimal::Decimal;
use sea_orm::Iterable;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::charts::{
    linear_fit, Chart, ChartRenderer, Dashboard, PanelSpec, Rgb, Series, ValueKind,
    PRIMARY_PALETTE, SECONDARY_PALETTE,
};
use crate::common::{decimal_to_f64, format_count, format_currency};
use crate::config::DashboardConfig;
use crate::db::Table;
use crate::errors::RenderError;
use crate::models::{ExecutiveSummary, StockStatus};
use crate::queries::{
    CustomerSegmentRow, InventoryStatusRow, ProductPerformanceRow, RegionalPerformanceRow,
    SalesPerformanceRow,
};
use crate::services::metrics::MetricsProvider;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const TREND_MEAN: f64 = 50_000.0;
const TREND_STD_DEV: f64 = 10_000.0;
const TREND_BASELINE: f64 = 100_000.0;
const UNCATEGORIZED: &str = "Uncategorized";

/// Everything the dashboard panels are bound to
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub summary: ExecutiveSummary,
    pub sales: Table<SalesPerformanceRow>,
    pub inventory: Table<InventoryStatusRow>,
    pub regional: Table<RegionalPerformanceRow>,
    pub segments: Table<CustomerSegmentRow>,
    pub products: Table<ProductPerformanceRow>,
}

impl DashboardData {
    /// Fetches every table the grid needs
    pub async fn collect(provider: &dyn MetricsProvider) -> Self {
        let summary = provider.get_executive_summary().await;
        let sales = provider.analyze_sales_performance().await;
        let inventory = provider.analyze_inventory_status().await;
        let regional = provider.analyze_regional_performance().await;
        Self::complete(provider, summary, sales, inventory, regional).await
    }

    /// Reuses tables the caller already holds and fetches only the
    /// dashboard-only ones (customer segments and products)
    pub async fn complete(
        provider: &dyn MetricsProvider,
        summary: ExecutiveSummary,
        sales: Table<SalesPerformanceRow>,
        inventory: Table<InventoryStatusRow>,
        regional: Table<RegionalPerformanceRow>,
    ) -> Self {
        Self {
            summary,
            sales,
            inventory,
            regional,
            segments: provider.analyze_customer_segments().await,
            products: provider.analyze_product_performance().await,
        }
    }
}

/// Result of a dashboard render
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardArtifact {
    pub path: PathBuf,
    pub panels_drawn: usize,
    pub panels_skipped: usize,
}

/// Lays out the fixed 3x3 analytics grid.
///
/// Panels only rearrange rows produced by the metric queries; the one derived
/// figure is revenue per product category.
#[derive(Debug, Clone)]
pub struct DashboardComposer {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub top_reps: usize,
    pub top_products: usize,
    /// Seed for the placeholder trend; `None` draws from entropy
    pub trend_seed: Option<u64>,
}

impl Default for DashboardComposer {
    fn default() -> Self {
        Self::from_config(&DashboardConfig::default())
    }
}

impl DashboardComposer {
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self {
            title: config.title.clone(),
            width: config.width,
            height: config.height,
            top_reps: 8,
            top_products: 6,
            trend_seed: None,
        }
    }

    pub fn with_trend_seed(mut self, seed: u64) -> Self {
        self.trend_seed = Some(seed);
        self
    }

    /// Collects metrics, composes the grid and hands it to the renderer
    pub async fn render(
        &self,
        provider: &dyn MetricsProvider,
        renderer: &dyn ChartRenderer,
        path: &Path,
    ) -> Result<DashboardArtifact, RenderError> {
        let data = DashboardData::collect(provider).await;
        self.render_data(&data, renderer, path)
    }

    /// Composes already collected data and hands it to the renderer
    pub fn render_data(
        &self,
        data: &DashboardData,
        renderer: &dyn ChartRenderer,
        path: &Path,
    ) -> Result<DashboardArtifact, RenderError> {
        let dashboard = self.compose(data);
        let panels_drawn = dashboard.drawn_panels();
        let panels_skipped = dashboard.panels.len() - panels_drawn;
        if panels_skipped > 0 {
            warn!(
                panels_skipped,
                "Dashboard panels left blank for lack of data"
            );
        }

        renderer.render(&dashboard, path)?;
        info!("✓ Dashboard saved to {}", path.display());

        Ok(DashboardArtifact {
            path: path.to_path_buf(),
            panels_drawn,
            panels_skipped,
        })
    }

    /// Pure layout: no I/O, no queries
    pub fn compose(&self, data: &DashboardData) -> Dashboard {
        let mut dashboard = Dashboard::new(&self.title, self.width, self.height);
        let top_reps = data.sales.head(self.top_reps);

        dashboard.place(0, 0, self.sales_reps_panel(top_reps));
        dashboard.place(0, 1, self.regional_panel(&data.regional));
        dashboard.place(0, 2, self.inventory_panel(&data.inventory));
        dashboard.place(1, 0, self.segments_panel(&data.segments));
        dashboard.place(1, 1, self.category_panel(&data.products));
        dashboard.place(1, 2, self.trend_panel());
        dashboard.place(2, 0, self.top_products_panel(&data.products));
        dashboard.place(2, 1, self.rating_panel(top_reps));
        dashboard.place(2, 2, Some(summary_panel(&data.summary)));
        dashboard
    }

    fn sales_reps_panel(&self, rows: &[SalesPerformanceRow]) -> Option<PanelSpec> {
        if rows.is_empty() {
            return None;
        }
        let series = rows
            .iter()
            .map(|r| (r.representative_name.clone(), decimal_to_f64(r.total_sales)))
            .collect();
        let chart = Chart::HorizontalBar(series);
        Some(
            PanelSpec::new("Top Sales Representatives by Revenue", chart)
                .x_label("Total Sales ($)")
                .colors(&PRIMARY_PALETTE[..1]),
        )
    }

    fn regional_panel(&self, table: &Table<RegionalPerformanceRow>) -> Option<PanelSpec> {
        let series: Series = table
            .iter()
            .map(|r| (r.region_name.clone(), decimal_to_f64(r.total_revenue)))
            .collect();
        // A pie of nothing has no meaningful slices
        if series.is_empty() || series.values.iter().sum::<f64>() <= 0.0 {
            return None;
        }
        Some(
            PanelSpec::new("Revenue Distribution by Region", Chart::Pie(series))
                .colors(&SECONDARY_PALETTE),
        )
    }

    fn inventory_panel(&self, table: &Table<InventoryStatusRow>) -> Option<PanelSpec> {
        if table.is_empty() {
            return None;
        }
        let counts = status_counts(table);
        let colors: Vec<_> = counts
            .iter()
            .map(|(status, _)| status_color(*status))
            .collect();
        let series = counts
            .into_iter()
            .map(|(status, count)| (status.to_string(), count as f64))
            .collect();
        Some(
            PanelSpec::new("Inventory Status Distribution", Chart::Bar(series))
                .y_label("Number of Products")
                .value_kind(ValueKind::Count)
                .colors(&colors),
        )
    }

    fn segments_panel(&self, table: &Table<CustomerSegmentRow>) -> Option<PanelSpec> {
        if table.is_empty() {
            return None;
        }
        let series = table
            .iter()
            .map(|r| (r.customer_type.to_string(), decimal_to_f64(r.total_revenue)))
            .collect();
        Some(
            PanelSpec::new("Revenue by Customer Type", Chart::Bar(series))
                .y_label("Total Revenue ($)")
                .colors(&PRIMARY_PALETTE),
        )
    }

    fn category_panel(&self, table: &Table<ProductPerformanceRow>) -> Option<PanelSpec> {
        if table.is_empty() {
            return None;
        }
        let series = revenue_by_category(table)
            .into_iter()
            .map(|(category, revenue)| (category, decimal_to_f64(revenue)))
            .collect();
        Some(
            PanelSpec::new("Revenue by Product Category", Chart::HorizontalBar(series))
                .x_label("Total Revenue ($)")
                .colors(&SECONDARY_PALETTE[..1]),
        )
    }

    fn trend_panel(&self) -> Option<PanelSpec> {
        let values = placeholder_trend(self.trend_seed)?;
        let series = Series::new(MONTHS.iter().map(|m| m.to_string()).collect(), values);
        Some(
            PanelSpec::new(
                "Monthly Sales Trend (placeholder, not from data)",
                Chart::Line {
                    series,
                    placeholder: true,
                },
            )
            .y_label("Cumulative Sales ($)")
            .colors(&PRIMARY_PALETTE[1..2]),
        )
    }

    fn top_products_panel(&self, table: &Table<ProductPerformanceRow>) -> Option<PanelSpec> {
        let rows = table.head(self.top_products);
        if rows.is_empty() {
            return None;
        }
        let series = rows
            .iter()
            .map(|r| (r.product_name.clone(), decimal_to_f64(r.total_revenue)))
            .collect();
        Some(
            PanelSpec::new("Top Products by Revenue", Chart::Bar(series))
                .y_label("Total Revenue ($)")
                .colors(&PRIMARY_PALETTE[2..3]),
        )
    }

    fn rating_panel(&self, rows: &[SalesPerformanceRow]) -> Option<PanelSpec> {
        let points: Vec<(f64, f64)> = rows
            .iter()
            .filter_map(|r| {
                r.performance_rating
                    .map(|rating| (decimal_to_f64(rating), decimal_to_f64(r.total_sales)))
            })
            .collect();
        if points.is_empty() {
            return None;
        }
        let fit = linear_fit(&points);
        let chart = Chart::Scatter { points, fit };
        Some(
            PanelSpec::new("Performance Rating vs Sales", chart)
                .x_label("Performance Rating")
                .y_label("Total Sales ($)")
                .colors(&PRIMARY_PALETTE[3..4]),
        )
    }
}

fn summary_panel(summary: &ExecutiveSummary) -> PanelSpec {
    let lines = vec![
        "EXECUTIVE SUMMARY".to_string(),
        "=".repeat(20),
        String::new(),
        format!("Total Revenue: {}", format_currency(summary.total_revenue)),
        format!("Total Orders: {}", format_count(summary.total_orders)),
        format!("Active Reps: {}", summary.active_representatives),
        String::new(),
        format!(
            "Average Order: {}",
            format_currency(summary.average_order_value)
        ),
        format!(
            "Inventory Value: {}",
            format_currency(summary.inventory_value)
        ),
    ];
    PanelSpec::new("Executive Summary", Chart::Text(lines))
}

/// Products per status, in severity order, statuses with no products omitted
pub fn status_counts(table: &Table<InventoryStatusRow>) -> Vec<(StockStatus, usize)> {
    StockStatus::iter()
        .map(|status| {
            let count = table.iter().filter(|r| r.stock_status == status).count();
            (status, count)
        })
        .filter(|(_, count)| *count > 0)
        .collect()
}

/// Product revenue summed per category, largest first (ties by name)
pub fn revenue_by_category(table: &Table<ProductPerformanceRow>) -> Vec<(String, Decimal)> {
    let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();
    for row in table {
        let category = row.category.as_deref().unwrap_or(UNCATEGORIZED);
        *totals.entry(category.to_string()).or_default() += row.total_revenue;
    }
    let mut totals: Vec<_> = totals.into_iter().collect();
    // BTreeMap order is by name, so a stable sort keeps name order on ties
    totals.sort_by(|a, b| b.1.cmp(&a.1));
    totals
}

/// Twelve cumulative Normal(50k, 10k) draws over a 100k baseline.
///
/// Synthetic: it does not reflect stored orders.
pub fn placeholder_trend(seed: Option<u64>) -> Option<Vec<f64>> {
    let normal = Normal::new(TREND_MEAN, TREND_STD_DEV).ok()?;
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut running = TREND_BASELINE;
    Some(
        MONTHS
            .iter()
            .map(|_| {
                running += normal.sample(&mut rng);
                running
            })
            .collect(),
    )
}

fn status_color(status: StockStatus) -> Rgb {
    match status {
        StockStatus::OutOfStock => Rgb::hex(0xC73E1D),
        StockStatus::Critical => Rgb::hex(0xF18F01),
        StockStatus::Low => Rgb::hex(0xA23B72),
        StockStatus::Moderate => Rgb::hex(0x2E86AB),
        StockStatus::Adequate => Rgb::hex(0x4E9F3D),
    }
}
