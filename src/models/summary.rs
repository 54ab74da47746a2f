use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Headline KPIs, recomputed on every request
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutiveSummary {
    pub total_revenue: Decimal,
    pub total_orders: u64,
    pub active_representatives: u64,
    pub inventory_value: Decimal,
    pub average_order_value: Decimal,
}

impl ExecutiveSummary {
    /// Derives the average order value; zero when there are no orders
    pub fn from_totals(
        total_revenue: Decimal,
        total_orders: u64,
        active_representatives: u64,
        inventory_value: Decimal,
    ) -> Self {
        let average_order_value = if total_orders > 0 {
            total_revenue
                .checked_div(Decimal::from(total_orders))
                .unwrap_or(Decimal::ZERO)
        } else {
            Decimal::ZERO
        };

        Self {
            total_revenue,
            total_orders,
            active_representatives,
            inventory_value,
            average_order_value,
        }
    }
}
