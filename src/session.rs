use chrono::{Local, NaiveDate};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::path::PathBuf;
use tracing::{error, info, instrument, warn};

use crate::charts::ChartRenderer;
use crate::config::ConnectionConfig;
use crate::db::{Gateway, Table};
use crate::errors::{AnalyticsError, ConnectionError};
use crate::models::ExecutiveSummary;
use crate::queries::{InventoryStatusRow, RegionalPerformanceRow, SalesPerformanceRow};
use crate::services::dashboard::{DashboardArtifact, DashboardComposer, DashboardData};
use crate::services::metrics::{GatewayMetrics, MetricsProvider};
use crate::services::reports::{ReportFormatter, ReportInputs};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum SessionState {
    Disconnected,
    Connected,
}

/// What one reporting cycle produces and where
#[derive(Debug, Clone)]
pub struct SessionPlan {
    pub report_path: PathBuf,
    /// `None` skips the dashboard
    pub dashboard_path: Option<PathBuf>,
    pub composer: DashboardComposer,
    pub formatter: ReportFormatter,
}

impl SessionPlan {
    pub fn new(report_path: impl Into<PathBuf>) -> Self {
        Self {
            report_path: report_path.into(),
            dashboard_path: None,
            composer: DashboardComposer::default(),
            formatter: ReportFormatter::default(),
        }
    }

    pub fn with_dashboard(mut self, path: impl Into<PathBuf>, composer: DashboardComposer) -> Self {
        self.dashboard_path = Some(path.into());
        self.composer = composer;
        self
    }
}

/// Everything a completed cycle computed
#[derive(Debug, Clone)]
pub struct SessionReport {
    pub summary: ExecutiveSummary,
    pub sales: Table<SalesPerformanceRow>,
    pub inventory: Table<InventoryStatusRow>,
    pub regional: Table<RegionalPerformanceRow>,
    pub report: String,
    pub report_path: PathBuf,
    /// `None` when the dashboard was skipped or failed to render
    pub dashboard: Option<DashboardArtifact>,
}

/// One analytics session: owns the connection for its whole lifetime
pub struct AnalyticsSession {
    config: ConnectionConfig,
    gateway: Gateway,
}

impl AnalyticsSession {
    pub fn new(config: ConnectionConfig) -> Self {
        Self {
            config,
            gateway: Gateway::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        if self.gateway.is_connected() {
            SessionState::Connected
        } else {
            SessionState::Disconnected
        }
    }

    /// Borrow the gateway, e.g. to load fixtures
    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    pub async fn connect(&mut self) -> Result<(), ConnectionError> {
        self.gateway.connect(&self.config).await
    }

    /// Metrics as of today's local date
    pub fn metrics(&self) -> GatewayMetrics<'_> {
        self.metrics_as_of(Local::now().date_naive())
    }

    pub fn metrics_as_of(&self, as_of: NaiveDate) -> GatewayMetrics<'_> {
        GatewayMetrics::new(&self.gateway, as_of)
    }

    /// Returns to `Disconnected` from any state
    pub async fn close(&mut self) {
        self.gateway.close().await;
    }

    /// Connect, compute, render, write, and always close.
    ///
    /// A connection failure aborts before any artifact is written. Any error
    /// or panic during the cycle is logged and returned after the connection
    /// has been released.
    #[instrument(skip_all, fields(db = %self.config.display_target()))]
    pub async fn run(
        &mut self,
        plan: &SessionPlan,
        renderer: &dyn ChartRenderer,
    ) -> Result<SessionReport, AnalyticsError> {
        if let Err(e) = self.connect().await {
            self.close().await;
            return Err(e.into());
        }

        let metrics = self.metrics();
        let outcome = AssertUnwindSafe(run_cycle(&metrics, plan, renderer))
            .catch_unwind()
            .await;

        self.close().await;

        match outcome {
            Ok(Ok(report)) => Ok(report),
            Ok(Err(e)) => {
                error!("Error during analysis: {}", e);
                Err(e)
            }
            Err(panic) => {
                let message = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                error!("Unhandled failure during analysis: {}", message);
                Err(AnalyticsError::Unhandled(message))
            }
        }
    }
}

async fn run_cycle(
    metrics: &dyn MetricsProvider,
    plan: &SessionPlan,
    renderer: &dyn ChartRenderer,
) -> Result<SessionReport, AnalyticsError> {
    info!("Generating comprehensive analytics...");
    let summary = metrics.get_executive_summary().await;
    info!("✓ Executive summary");
    let sales = metrics.analyze_sales_performance().await;
    info!(rows = sales.len(), "✓ Sales performance analysis");
    let inventory = metrics.analyze_inventory_status().await;
    info!(rows = inventory.len(), "✓ Inventory status analysis");
    let regional = metrics.analyze_regional_performance().await;
    info!(rows = regional.len(), "✓ Regional performance analysis");

    let dashboard = match &plan.dashboard_path {
        Some(path) => {
            info!("Generating analytics dashboard...");
            let data = DashboardData::complete(
                metrics,
                summary.clone(),
                sales.clone(),
                inventory.clone(),
                regional.clone(),
            )
            .await;
            match plan.composer.render_data(&data, renderer, path) {
                Ok(artifact) => Some(artifact),
                Err(e) => {
                    warn!("✗ Dashboard rendering failed: {}", e);
                    None
                }
            }
        }
        None => None,
    };

    info!("Generating detailed report...");
    let report = plan.formatter.format_report(
        &ReportInputs {
            summary: &summary,
            sales: &sales,
            inventory: &inventory,
            regional: &regional,
        },
        Local::now().naive_local(),
    );
    tokio::fs::write(&plan.report_path, &report).await?;
    info!("✓ Report saved to '{}'", plan.report_path.display());

    Ok(SessionReport {
        summary,
        sales,
        inventory,
        regional,
        report,
        report_path: plan.report_path.clone(),
        dashboard,
    })
}
