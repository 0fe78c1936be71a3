use contracts::dashboards::d400_period_comparison::ComparisonRow;
use contracts::shared::analytics::Metric;
use contracts::shared::indicators::IndicatorValue;

use super::from_comparison;
use crate::shared::indicators::metadata::ids;

// ---------------------------------------------------------------------------
// Public compute functions
// ---------------------------------------------------------------------------

pub fn compute_sales_revenue(total: &ComparisonRow) -> IndicatorValue {
    from_comparison(ids::sales_revenue(), total.metric(Metric::Revenue), None)
}

pub fn compute_sales_order_count(total: &ComparisonRow) -> IndicatorValue {
    from_comparison(ids::sales_order_count(), total.metric(Metric::Orders), None)
}

pub fn compute_sales_avg_check(total: &ComparisonRow) -> IndicatorValue {
    let orders = total.metric(Metric::Orders).current.unwrap_or(0.0);
    let subtitle = if orders > 0.0 {
        Some(format!("{} orders", orders))
    } else {
        Some("no orders in period".to_string())
    };
    from_comparison(ids::sales_avg_check(), total.metric(Metric::Aov), subtitle)
}
