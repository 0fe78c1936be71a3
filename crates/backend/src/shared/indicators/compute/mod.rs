pub mod ads;
pub mod sales;

use contracts::shared::analytics::MetricComparison;
use contracts::shared::indicators::{IndicatorId, IndicatorValue};

/// Map an engine comparison onto the indicator card shape.
pub(crate) fn from_comparison(
    id: IndicatorId,
    comparison: MetricComparison,
    subtitle: Option<String>,
) -> IndicatorValue {
    IndicatorValue {
        id,
        value: comparison.current,
        previous_value: comparison.previous,
        year_ago_value: comparison.year_ago,
        mom: comparison.mom,
        yoy: comparison.yoy,
        subtitle,
    }
}
