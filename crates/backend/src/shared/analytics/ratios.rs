use contracts::shared::analytics::{Metric, Period};

use super::aggregator::Bucket;

fn finite(value: f64) -> Option<f64> {
    if value.is_finite() {
        Some(value)
    } else {
        None
    }
}

/// Average order value. Zero orders means no sales happened, so the AOV is
/// zero rather than unknown.
pub fn aov(bucket: &Bucket) -> f64 {
    if bucket.orders > 0.0 {
        finite(bucket.revenue / bucket.orders).unwrap_or(0.0)
    } else {
        0.0
    }
}

/// Sales attributed to ads when only spend and ROAS are reported.
pub fn derived_sales(spend: Option<f64>, roas: Option<f64>) -> Option<f64> {
    finite(spend? * roas?)
}

/// Return on ad spend (sales / spend). Unknown without ad data or spend.
pub fn roas(bucket: &Bucket) -> Option<f64> {
    if !bucket.has_ad_data() || bucket.spend == 0.0 {
        return None;
    }
    finite(bucket.sales / bucket.spend)
}

/// Spend per calendar day of the bucket's period set.
pub fn daily_spend(bucket: &Bucket, days: u32) -> Option<f64> {
    if !bucket.has_ad_data() || days == 0 {
        return None;
    }
    finite(bucket.spend / days as f64)
}

/// Ad spend per order. Zero orders gives zero, like AOV.
pub fn cost_per_order(bucket: &Bucket) -> Option<f64> {
    if !bucket.has_ad_data() {
        return None;
    }
    if bucket.orders > 0.0 {
        finite(bucket.spend / bucket.orders)
    } else {
        Some(0.0)
    }
}

/// Total calendar days covered by a set of months.
pub fn days_in_periods(periods: &[Period]) -> u32 {
    periods.iter().map(|p| p.days_in_month()).sum()
}

/// Fraction of `total` contributed by `part`.
pub fn share(part: Option<f64>, total: Option<f64>) -> Option<f64> {
    let (part, total) = (part?, total?);
    if total == 0.0 || !total.is_finite() {
        return None;
    }
    finite(part / total)
}

/// Value of `metric` for a bucket covering `days` calendar days.
///
/// A missing bucket is "no data" and yields `None` for every metric.
pub fn metric_value(metric: Metric, bucket: Option<&Bucket>, days: u32) -> Option<f64> {
    let bucket = bucket?;
    match metric {
        Metric::Revenue => Some(bucket.revenue),
        Metric::Orders => Some(bucket.orders),
        Metric::Aov => Some(aov(bucket)),
        Metric::Spend => bucket.has_ad_data().then_some(bucket.spend),
        Metric::Sales => bucket.has_ad_data().then_some(bucket.sales),
        Metric::Roas => roas(bucket),
        Metric::DailySpend => daily_spend(bucket, days),
        Metric::CostPerOrder => cost_per_order(bucket),
    }
}
