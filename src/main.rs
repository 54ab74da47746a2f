use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::error;

use pharma_analytics as analytics;
use pharma_analytics::charts::PlottersRenderer;
use pharma_analytics::common::{format_count, format_currency};
use pharma_analytics::{
    AnalyticsSession, DashboardComposer, ExecutiveSummary, SessionPlan, SessionReport,
};

const BANNER: &str = "Pharmaceutical Supply Chain Analytics Platform";

/// Computes supply-chain metrics, renders the dashboard and writes the report
#[derive(Debug, Parser)]
#[command(name = "pharma-analytics", version, about)]
struct Cli {
    /// Report output path (overrides `report_path`)
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Dashboard image path (overrides `dashboard.path`)
    #[arg(long, value_name = "FILE", conflicts_with = "no_dashboard")]
    dashboard: Option<PathBuf>,

    /// Skip rendering the dashboard
    #[arg(long)]
    no_dashboard: bool,

    /// Print the executive summary as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("✗ {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let cfg = analytics::config::load_config().context("failed to load configuration")?;
    analytics::config::init_tracing(cfg.log_level(), cfg.log_json);
    cfg.log_loaded();

    println!("{}", BANNER);
    println!("{}", "=".repeat(50));

    let report_path = cli
        .report
        .unwrap_or_else(|| PathBuf::from(&cfg.report_path));
    let mut plan = SessionPlan::new(report_path);
    if cfg.dashboard.enabled && !cli.no_dashboard {
        let dashboard_path = cli
            .dashboard
            .unwrap_or_else(|| PathBuf::from(&cfg.dashboard.path));
        plan = plan.with_dashboard(
            dashboard_path,
            DashboardComposer::from_config(&cfg.dashboard),
        );
    }

    let mut session = AnalyticsSession::new(cfg.database.clone());
    let outcome = session.run(&plan, &PlottersRenderer::new()).await;

    let report = match outcome {
        Ok(report) => report,
        Err(e) if e.is_connection_failure() => {
            println!("✗ Failed to connect to database. Please check your configuration.");
            error!("{}", e);
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => {
            println!("✗ Error during analysis: {}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report.summary)?);
    } else {
        print_summary(&report.summary);
    }
    print_details(&report);

    println!("\n{}", report.report);
    println!("Report saved to '{}'", report.report_path.display());
    if let Some(artifact) = &report.dashboard {
        println!("Dashboard saved to '{}'", artifact.path.display());
    }

    Ok(ExitCode::SUCCESS)
}

fn print_summary(summary: &ExecutiveSummary) {
    println!("\nEXECUTIVE SUMMARY");
    println!("{}", "-".repeat(30));
    println!("Total Revenue: {}", format_currency(summary.total_revenue));
    println!("Total Orders: {}", format_count(summary.total_orders));
    println!(
        "Active Sales Reps: {}",
        format_count(summary.active_representatives)
    );
    println!(
        "Average Order Value: {}",
        format_currency(summary.average_order_value)
    );
}

fn print_details(report: &SessionReport) {
    println!("\nDETAILED ANALYTICS");
    println!("{}", "-".repeat(30));

    println!("\nTop Sales Performance:");
    println!("{}", report.sales.to_text(Some(5)));

    println!("\nInventory Status:");
    println!("{}", report.inventory.to_text(Some(5)));

    println!("\nRegional Performance:");
    println!("{}", report.regional.to_text(None));
}
