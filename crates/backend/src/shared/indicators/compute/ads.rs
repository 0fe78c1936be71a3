use contracts::dashboards::d400_period_comparison::ComparisonRow;
use contracts::shared::analytics::Metric;
use contracts::shared::indicators::{IndicatorId, IndicatorValue};

use super::from_comparison;
use crate::shared::indicators::metadata::ids;

/// Ad metrics are unknown, not zero, when the feed has no ad rows.
fn ad_indicator(id: IndicatorId, total: &ComparisonRow, metric: Metric) -> IndicatorValue {
    let comparison = total.metric(metric);
    let subtitle = comparison
        .current
        .is_none()
        .then(|| "no advertising data".to_string());
    from_comparison(id, comparison, subtitle)
}

pub fn compute_ads_spend(total: &ComparisonRow) -> IndicatorValue {
    ad_indicator(ids::ads_spend(), total, Metric::Spend)
}

pub fn compute_ads_sales(total: &ComparisonRow) -> IndicatorValue {
    ad_indicator(ids::ads_sales(), total, Metric::Sales)
}

pub fn compute_ads_roas(total: &ComparisonRow) -> IndicatorValue {
    ad_indicator(ids::ads_roas(), total, Metric::Roas)
}

pub fn compute_ads_daily_spend(total: &ComparisonRow) -> IndicatorValue {
    ad_indicator(ids::ads_daily_spend(), total, Metric::DailySpend)
}

pub fn compute_ads_cost_per_order(total: &ComparisonRow) -> IndicatorValue {
    ad_indicator(ids::ads_cost_per_order(), total, Metric::CostPerOrder)
}
