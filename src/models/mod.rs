// Classification enums decoded straight from query columns, plus derived KPIs
pub mod segment;
pub mod stock;
pub mod summary;

pub use segment::CustomerType;
pub use stock::{ActionRequired, StockStatus};
pub use summary::ExecutiveSummary;
