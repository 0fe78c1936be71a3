use serde::{Deserialize, Serialize};

use crate::shared::analytics::{DimensionFilter, Metric, Period};

// ---------------------------------------------------------------------------
// Indicator identity & metadata
// ---------------------------------------------------------------------------

/// Unique indicator identifier, used as key in registry and API requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndicatorId(pub String);

impl IndicatorId {
    pub fn new(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// What kind of quantity the value is. Consumers pick their own formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Money,
    Count,
    Ratio,
}

/// Static metadata describing one indicator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorMeta {
    pub id: IndicatorId,
    pub label: String,
    pub short_label: Option<String>,
    /// Metric the indicator reads from the comparison engine
    pub metric: Metric,
    pub kind: ValueKind,
    /// Whether growth is good news (revenue) or bad news (spend per order)
    pub higher_is_better: bool,
    pub description: Option<String>,
}

// ---------------------------------------------------------------------------
// Indicator sets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndicatorSetId(pub String);

impl IndicatorSetId {
    pub fn new(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A group of indicators rendered together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorSetMeta {
    pub id: IndicatorSetId,
    pub label: String,
    pub indicators: Vec<IndicatorId>,
}

// ---------------------------------------------------------------------------
// Computed values
// ---------------------------------------------------------------------------

/// A single computed indicator result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorValue {
    pub id: IndicatorId,
    /// Value for the selected period (`None` when data is unavailable)
    pub value: Option<f64>,
    pub previous_value: Option<f64>,
    pub year_ago_value: Option<f64>,
    /// Month-over-month change as a fraction
    pub mom: Option<f64>,
    /// Year-over-year change as a fraction
    pub yoy: Option<f64>,
    /// Optional secondary text, e.g. why the value is missing
    pub subtitle: Option<String>,
}

// ---------------------------------------------------------------------------
// API request / response
// ---------------------------------------------------------------------------

fn default_window() -> usize {
    1
}

/// Scope of an indicator computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorContext {
    pub selected_period: Period,
    #[serde(default)]
    pub filters: Vec<DimensionFilter>,
    /// Trailing window length in periods (1 = single month)
    #[serde(default = "default_window")]
    pub window: usize,
}

/// Batch request: compute several indicators in one round-trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputeIndicatorsRequest {
    pub indicator_ids: Vec<IndicatorId>,
    pub context: IndicatorContext,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputeIndicatorsResponse {
    pub values: Vec<IndicatorValue>,
}

/// Full catalogue returned by the metadata endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorCatalogResponse {
    pub indicators: Vec<IndicatorMeta>,
    pub sets: Vec<IndicatorSetMeta>,
}
