use serde::{Deserialize, Serialize};

use crate::shared::analytics::{Dimension, DimensionFilter, DimensionKey, Metric, Period};

fn default_periods() -> usize {
    12
}

/// Request for a per-period trend series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendRequest {
    /// Last period of the series
    pub end_period: Period,
    /// How many periods back from `end_period` (inclusive)
    #[serde(default = "default_periods")]
    pub periods: usize,
    #[serde(default)]
    pub filters: Vec<DimensionFilter>,
    #[serde(default)]
    pub group_by: Vec<Dimension>,
    #[serde(default)]
    pub metric: Metric,
}

/// One line of the trend chart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendSeries {
    pub dimension_key: DimensionKey,
    pub label: String,
    /// One value per period in `TrendResponse::periods`
    pub values: Vec<Option<f64>>,
    /// Change against the preceding point; the first point has none
    pub changes: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendResponse {
    pub periods: Vec<Period>,
    pub metric: Metric,
    pub series: Vec<TrendSeries>,
}
