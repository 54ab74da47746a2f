// Presentation services over the metric catalog
pub mod dashboard;
pub mod metrics;
pub mod reports;
