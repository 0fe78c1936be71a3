use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::shared::analytics::{
    Dimension, DimensionFilter, DimensionKey, Metric, MetricComparison, Period, SortDirection,
    SortKey,
};

fn default_window() -> usize {
    1
}

/// Request for the period comparison dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonQuery {
    /// Period the dashboard is looking at, e.g. "2025-10"
    pub selected_period: Period,
    /// Equality constraints applied before grouping
    #[serde(default)]
    pub filters: Vec<DimensionFilter>,
    /// Grouping columns; empty means a single total row
    #[serde(default)]
    pub group_by: Vec<Dimension>,
    /// Metric exposed in the top-level row fields and used for share
    #[serde(default)]
    pub metric: Metric,
    #[serde(default)]
    pub sort_key: Option<SortKey>,
    #[serde(default)]
    pub sort_direction: SortDirection,
    /// Number of trailing periods summed into one bucket (1 = single month)
    #[serde(default = "default_window")]
    pub window: usize,
}

impl ComparisonQuery {
    pub fn new(selected_period: Period) -> Self {
        Self {
            selected_period,
            filters: Vec::new(),
            group_by: Vec::new(),
            metric: Metric::default(),
            sort_key: None,
            sort_direction: SortDirection::default(),
            window: default_window(),
        }
    }
}

/// One result row of the comparison dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub dimension_key: DimensionKey,
    /// Dimension values joined with " / "
    pub label: String,
    /// Selected metric for the current period set
    pub current: Option<f64>,
    pub previous: Option<f64>,
    pub year_ago: Option<f64>,
    pub mom: Option<f64>,
    pub yoy: Option<f64>,
    /// Fraction of the selected metric's current total (additive metrics only)
    pub share: Option<f64>,
    /// Every metric for this row
    pub metrics: BTreeMap<Metric, MetricComparison>,
}

impl ComparisonRow {
    pub fn metric(&self, metric: Metric) -> MetricComparison {
        self.metrics.get(&metric).copied().unwrap_or_default()
    }
}

/// Response for the period comparison dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResponse {
    /// Last period of the current window, `None` if the selection is unknown
    pub current_period: Option<Period>,
    pub previous_period: Option<Period>,
    pub yoy_period: Option<Period>,
    pub current_periods: Vec<Period>,
    pub previous_periods: Vec<Period>,
    pub yoy_periods: Vec<Period>,
    pub metric: Metric,
    pub rows: Vec<ComparisonRow>,
    /// Ungrouped totals over the filtered set
    pub total: Option<ComparisonRow>,
}

impl ComparisonResponse {
    pub fn empty(metric: Metric) -> Self {
        Self {
            current_period: None,
            previous_period: None,
            yoy_period: None,
            current_periods: Vec::new(),
            previous_periods: Vec::new(),
            yoy_periods: Vec::new(),
            metric,
            rows: Vec::new(),
            total: None,
        }
    }
}
