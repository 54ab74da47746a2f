use chrono::{Local, NaiveDateTime};
use tracing::info;

use crate::common::{format_count, format_currency};
use crate::db::Table;
use crate::models::ExecutiveSummary;
use crate::queries::{InventoryStatusRow, RegionalPerformanceRow, SalesPerformanceRow};
use crate::services::metrics::MetricsProvider;

const REPORT_TITLE: &str = "PHARMACEUTICAL SUPPLY CHAIN ANALYTICS REPORT";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const PAGE_RULE_WIDTH: usize = 80;
const SECTION_RULE_WIDTH: usize = 50;

/// Data a report is built from
#[derive(Debug, Clone, Copy)]
pub struct ReportInputs<'a> {
    pub summary: &'a ExecutiveSummary,
    pub sales: &'a Table<SalesPerformanceRow>,
    pub inventory: &'a Table<InventoryStatusRow>,
    pub regional: &'a Table<RegionalPerformanceRow>,
}

/// Sectioned plain-text analytics report
#[derive(Debug, Clone)]
pub struct ReportFormatter {
    pub top_sales: usize,
    pub top_regions: usize,
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self {
            top_sales: 5,
            top_regions: 3,
        }
    }
}

impl ReportFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queries the provider and formats the report stamped with local time
    pub async fn generate_report(&self, provider: &dyn MetricsProvider) -> String {
        let summary = provider.get_executive_summary().await;
        let sales = provider.analyze_sales_performance().await;
        let inventory = provider.analyze_inventory_status().await;
        let regional = provider.analyze_regional_performance().await;

        let inputs = ReportInputs {
            summary: &summary,
            sales: &sales,
            inventory: &inventory,
            regional: &regional,
        };
        self.format_report(&inputs, Local::now().naive_local())
    }

    /// Formats the report. Sections whose source rows are empty are omitted.
    pub fn format_report(&self, inputs: &ReportInputs<'_>, generated_at: NaiveDateTime) -> String {
        let mut report = Vec::new();
        let page_rule = "=".repeat(PAGE_RULE_WIDTH);

        report.push(page_rule.clone());
        report.push(REPORT_TITLE.to_string());
        report.push(page_rule.clone());
        report.push(format!("Generated: {}", generated_at.format(TIMESTAMP_FORMAT)));
        report.push(String::new());

        let summary = inputs.summary;
        section(
            &mut report,
            "EXECUTIVE SUMMARY",
            vec![
                format!("Total Revenue: {}", format_currency(summary.total_revenue)),
                format!("Total Orders: {}", format_count(summary.total_orders)),
                format!("Active Representatives: {}", summary.active_representatives),
                format!(
                    "Average Order Value: {}",
                    format_currency(summary.average_order_value)
                ),
                format!(
                    "Total Inventory Value: {}",
                    format_currency(summary.inventory_value)
                ),
            ],
        );

        section(
            &mut report,
            "TOP SALES PERFORMERS",
            inputs
                .sales
                .head(self.top_sales)
                .iter()
                .map(|row| {
                    format!(
                        "{} ({}): {}",
                        row.representative_name,
                        row.region_name,
                        format_currency(row.total_sales)
                    )
                })
                .collect(),
        );

        section(
            &mut report,
            "CRITICAL INVENTORY ALERTS",
            inputs
                .inventory
                .iter()
                .filter(|row| row.stock_status.is_alert())
                .map(|row| {
                    format!(
                        "{}: {} units ({})",
                        row.product_name, row.current_stock, row.stock_status
                    )
                })
                .collect(),
        );

        section(
            &mut report,
            "REGIONAL PERFORMANCE SUMMARY",
            inputs
                .regional
                .head(self.top_regions)
                .iter()
                .map(|row| {
                    format!(
                        "{}: {} revenue, {} orders",
                        row.region_name,
                        format_currency(row.total_revenue),
                        row.total_orders
                    )
                })
                .collect(),
        );

        report.push(page_rule);

        let text = report.join("\n");
        info!(lines = report.len(), "Report formatted");
        text
    }
}

/// Appends a titled section; nothing at all when `lines` is empty
fn section(report: &mut Vec<String>, title: &str, lines: Vec<String>) {
    if lines.is_empty() {
        return;
    }
    report.push(title.to_string());
    report.push("-".repeat(SECTION_RULE_WIDTH));
    report.extend(lines);
    report.push(String::new());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActionRequired, StockStatus};
    use crate::queries::{InventoryStatusQuery, MetricQuery, RegionalPerformanceQuery};
    use crate::services::metrics::fixtures::StaticMetrics;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|d| d.and_hms_opt(9, 30, 0))
            .unwrap()
    }

    fn stock_row(name: &str, stock: i64, reorder: i64) -> InventoryStatusRow {
        InventoryStatusRow {
            product_name: name.into(),
            category: Some("Analgesic".into()),
            unit_price: dec!(2.50),
            current_stock: stock,
            reorder_level: reorder,
            total_value: dec!(2.50) * Decimal::from(stock),
            location: Some("Warehouse A".into()),
            stock_status: StockStatus::classify(stock, reorder),
            action_required: ActionRequired::classify(stock, reorder),
        }
    }

    fn render(summary: &ExecutiveSummary, inventory: Vec<InventoryStatusRow>) -> String {
        let sales = Table::empty(&[]);
        let inventory = Table::new(InventoryStatusQuery.columns(), inventory);
        let regional = Table::new(RegionalPerformanceQuery.columns(), Vec::new());
        ReportFormatter::new().format_report(
            &ReportInputs {
                summary,
                sales: &sales,
                inventory: &inventory,
                regional: &regional,
            },
            timestamp(),
        )
    }

    #[test]
    fn header_and_summary() {
        let summary = ExecutiveSummary::from_totals(dec!(1234567.891), 1500, 12, dec!(9876.5));
        let text = render(&summary, Vec::new());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "=".repeat(80));
        assert_eq!(lines[1], REPORT_TITLE);
        assert_eq!(lines[3], "Generated: 2024-05-01 09:30:00");
        assert!(text.contains(&format!("EXECUTIVE SUMMARY\n{}", "-".repeat(50))));
        assert!(text.contains("Total Revenue: $1,234,567.89"));
        assert!(text.contains("Total Orders: 1,500"));
        assert!(text.contains("Total Inventory Value: $9,876.50"));
        assert_eq!(lines.last().copied(), Some("=".repeat(80).as_str()));
    }

    #[test]
    fn alerts_section_omitted_without_critical_rows() {
        let text = render(
            &ExecutiveSummary::default(),
            vec![stock_row("Aspirin", 80, 100), stock_row("Zinc", 500, 100)],
        );
        assert!(!text.contains("CRITICAL INVENTORY ALERTS"));
        assert!(!text.contains("TOP SALES PERFORMERS"));
        assert!(!text.contains("REGIONAL PERFORMANCE SUMMARY"));
    }

    #[test]
    fn alerts_list_only_critical_and_out_of_stock() {
        let text = render(
            &ExecutiveSummary::default(),
            vec![
                stock_row("Insulin", 0, 40),
                stock_row("Amoxicillin", 10, 100),
                stock_row("Ibuprofen", 50, 100),
            ],
        );
        assert!(text.contains("Insulin: 0 units (OUT_OF_STOCK)"));
        assert!(text.contains("Amoxicillin: 10 units (CRITICAL)"));
        assert!(!text.contains("Ibuprofen"));
    }

    #[tokio::test]
    async fn generate_report_uses_provider() {
        let provider = StaticMetrics {
            summary: ExecutiveSummary::from_totals(dec!(100), 1, 1, Decimal::ZERO),
            inventory: vec![stock_row("Insulin", 0, 40)],
            ..Default::default()
        };
        let text = ReportFormatter::new().generate_report(&provider).await;
        assert!(text.contains("Total Revenue: $100.00"));
        assert!(text.contains("CRITICAL INVENTORY ALERTS"));
    }
}
