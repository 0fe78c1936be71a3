use serde::{Deserialize, Serialize};

use super::dimension::Dimension;

/// Numeric KPI that can be compared across periods.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    #[default]
    Revenue,
    Orders,
    /// Average order value: revenue / orders
    Aov,
    Spend,
    Sales,
    /// Return on ad spend: sales / spend
    Roas,
    DailySpend,
    CostPerOrder,
}

impl Metric {
    pub const ALL: [Metric; 8] = [
        Metric::Revenue,
        Metric::Orders,
        Metric::Aov,
        Metric::Spend,
        Metric::Sales,
        Metric::Roas,
        Metric::DailySpend,
        Metric::CostPerOrder,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Metric::Revenue => "revenue",
            Metric::Orders => "orders",
            Metric::Aov => "aov",
            Metric::Spend => "spend",
            Metric::Sales => "sales",
            Metric::Roas => "roas",
            Metric::DailySpend => "daily_spend",
            Metric::CostPerOrder => "cost_per_order",
        }
    }

    /// Plain sums can be added across dimension values; ratios cannot.
    pub fn is_additive(&self) -> bool {
        matches!(
            self,
            Metric::Revenue | Metric::Orders | Metric::Spend | Metric::Sales
        )
    }
}

/// Current / previous / year-ago values of one metric and their deltas.
///
/// Deltas are signed fractions (`0.2` means +20%).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricComparison {
    pub current: Option<f64>,
    pub previous: Option<f64>,
    pub year_ago: Option<f64>,
    pub mom: Option<f64>,
    pub yoy: Option<f64>,
}

/// Field a result set can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SortKey {
    /// Full dimension label
    Label,
    /// One component of the dimension key
    Dimension(Dimension),
    Current,
    Previous,
    YearAgo,
    Mom,
    Yoy,
    Share,
    /// Current value of any metric, regardless of the selected one
    Metric(Metric),
}

impl SortKey {
    pub fn is_lexical(&self) -> bool {
        matches!(self, SortKey::Label | SortKey::Dimension(_))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn toggle(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}
