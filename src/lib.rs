//! Pharmaceutical supply-chain analytics
//!
//! Connects to the order/inventory database, computes business metrics,
//! renders a chart dashboard and writes a plain-text report.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod charts;
pub mod common;
pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod queries;
pub mod schema;
pub mod services;
pub mod session;

pub use config::{AppConfig, ConnectionConfig, DashboardConfig, DatabaseBackend};
pub use db::{Gateway, Table, TableRow};
pub use errors::{AnalyticsError, ConnectionError, QueryError, RenderError};
pub use models::{ActionRequired, CustomerType, ExecutiveSummary, StockStatus};
pub use services::dashboard::{DashboardArtifact, DashboardComposer};
pub use services::metrics::{GatewayMetrics, MetricsProvider};
pub use services::reports::ReportFormatter;
pub use session::{AnalyticsSession, SessionPlan, SessionReport, SessionState};
