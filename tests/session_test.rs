mod common;

use std::path::Path;
use std::sync::Mutex;

use assert_matches::assert_matches;
use common::TestDb;
use pharma_analytics::charts::{ChartRenderer, Dashboard};
use pharma_analytics::{
    AnalyticsError, AnalyticsSession, ConnectionConfig, DashboardComposer, RenderError,
    SessionPlan, SessionState,
};

/// Records panel titles instead of drawing
#[derive(Default)]
struct RecordingRenderer {
    titles: Mutex<Vec<String>>,
}

impl ChartRenderer for RecordingRenderer {
    fn render(&self, dashboard: &Dashboard, _path: &Path) -> Result<(), RenderError> {
        let mut titles = self.titles.lock().unwrap();
        titles.extend(dashboard.panels.iter().flatten().map(|p| p.title.clone()));
        Ok(())
    }
}

struct FailingRenderer;

impl ChartRenderer for FailingRenderer {
    fn render(&self, _dashboard: &Dashboard, _path: &Path) -> Result<(), RenderError> {
        Err(RenderError::Backend("no canvas".into()))
    }
}

struct PanickingRenderer;

impl ChartRenderer for PanickingRenderer {
    fn render(&self, _dashboard: &Dashboard, _path: &Path) -> Result<(), RenderError> {
        panic!("renderer exploded")
    }
}

fn plan_in(dir: &Path) -> SessionPlan {
    SessionPlan::new(dir.join("analytics_report.txt")).with_dashboard(
        dir.join("dashboard.png"),
        DashboardComposer::default().with_trend_seed(7),
    )
}

#[tokio::test]
async fn full_cycle_writes_report_and_closes() {
    let db = TestDb::seeded().await;
    let out = tempfile::tempdir().unwrap();
    let plan = plan_in(out.path());
    let renderer = RecordingRenderer::default();

    let mut session = AnalyticsSession::new(db.config.clone());
    let report = session.run(&plan, &renderer).await.unwrap();

    assert_eq!(session.state(), SessionState::Disconnected);
    assert_eq!(report.summary.total_orders, 10);
    assert_eq!(report.sales.len(), 6);

    let written = std::fs::read_to_string(&plan.report_path).unwrap();
    assert_eq!(written, report.report);
    assert!(written.contains("PHARMACEUTICAL SUPPLY CHAIN ANALYTICS REPORT"));
    assert!(written.contains("CRITICAL INVENTORY ALERTS"));
    assert!(written.contains("Insulin Glargine: 0 units (OUT_OF_STOCK)"));

    let artifact = report.dashboard.expect("dashboard rendered");
    assert_eq!(artifact.panels_drawn + artifact.panels_skipped, 9);
    assert_eq!(artifact.panels_drawn, 9);
    let titles = renderer.titles.lock().unwrap();
    assert!(titles.iter().any(|t| t.contains("placeholder")));
    db.close().await;
}

#[tokio::test]
async fn empty_database_still_produces_report() {
    let db = TestDb::new().await;
    let out = tempfile::tempdir().unwrap();
    let plan = SessionPlan::new(out.path().join("report.txt"));

    let mut session = AnalyticsSession::new(db.config.clone());
    let report = session
        .run(&plan, &RecordingRenderer::default())
        .await
        .unwrap();

    assert!(report.dashboard.is_none());
    assert!(!report.report.contains("TOP SALES PERFORMERS"));
    assert!(!report.report.contains("CRITICAL INVENTORY ALERTS"));
    assert!(report.report.contains("Total Revenue: $0.00"));
    db.close().await;
}

#[tokio::test]
async fn render_failure_is_not_fatal() {
    let db = TestDb::seeded().await;
    let out = tempfile::tempdir().unwrap();
    let plan = plan_in(out.path());

    let mut session = AnalyticsSession::new(db.config.clone());
    let report = session.run(&plan, &FailingRenderer).await.unwrap();

    assert!(report.dashboard.is_none());
    assert!(plan.report_path.exists());
    db.close().await;
}

#[tokio::test]
async fn panic_during_cycle_is_caught_and_connection_released() {
    let db = TestDb::seeded().await;
    let out = tempfile::tempdir().unwrap();
    let plan = plan_in(out.path());

    let mut session = AnalyticsSession::new(db.config.clone());
    let result = session.run(&plan, &PanickingRenderer).await;

    assert_matches!(
        result,
        Err(AnalyticsError::Unhandled(msg)) if msg.contains("renderer exploded")
    );
    assert_eq!(session.state(), SessionState::Disconnected);
    assert!(!plan.report_path.exists());
    db.close().await;
}

#[tokio::test]
async fn connection_failure_writes_nothing() {
    let out = tempfile::tempdir().unwrap();
    let plan = plan_in(out.path());
    let mut config = ConnectionConfig::mysql("127.0.0.1", 1, "root", "", "pharma_db");
    config.connect_timeout_secs = 1;

    let mut session = AnalyticsSession::new(config);
    let err = session
        .run(&plan, &RecordingRenderer::default())
        .await
        .unwrap_err();

    assert!(err.is_connection_failure());
    assert_eq!(session.state(), SessionState::Disconnected);
    assert!(!plan.report_path.exists());
    assert!(!out.path().join("dashboard.png").exists());
}

#[tokio::test]
async fn session_can_run_twice() {
    let db = TestDb::seeded().await;
    let out = tempfile::tempdir().unwrap();
    let plan = SessionPlan::new(out.path().join("report.txt"));
    let renderer = RecordingRenderer::default();

    let mut session = AnalyticsSession::new(db.config.clone());
    let first = session.run(&plan, &renderer).await.unwrap();
    let second = session.run(&plan, &renderer).await.unwrap();

    assert_eq!(first.summary, second.summary);
    assert_eq!(first.sales, second.sales);
    db.close().await;
}
