use contracts::shared::analytics::Metric;
use contracts::shared::indicators::*;

/// Well-known indicator IDs (constants to avoid typos).
pub mod ids {
    use super::*;

    pub fn sales_revenue() -> IndicatorId {
        IndicatorId::new("sales_revenue")
    }
    pub fn sales_order_count() -> IndicatorId {
        IndicatorId::new("sales_order_count")
    }
    pub fn sales_avg_check() -> IndicatorId {
        IndicatorId::new("sales_avg_check")
    }
    pub fn ads_spend() -> IndicatorId {
        IndicatorId::new("ads_spend")
    }
    pub fn ads_sales() -> IndicatorId {
        IndicatorId::new("ads_sales")
    }
    pub fn ads_roas() -> IndicatorId {
        IndicatorId::new("ads_roas")
    }
    pub fn ads_daily_spend() -> IndicatorId {
        IndicatorId::new("ads_daily_spend")
    }
    pub fn ads_cost_per_order() -> IndicatorId {
        IndicatorId::new("ads_cost_per_order")
    }
}

fn meta(
    id: IndicatorId,
    label: &str,
    short_label: Option<&str>,
    metric: Metric,
    kind: ValueKind,
    higher_is_better: bool,
    description: &str,
) -> IndicatorMeta {
    IndicatorMeta {
        id,
        label: label.into(),
        short_label: short_label.map(Into::into),
        metric,
        kind,
        higher_is_better,
        description: Some(description.into()),
    }
}

/// Build the full catalogue of indicators + sets.
pub fn build_catalog() -> IndicatorCatalogResponse {
    let indicators = vec![
        meta(
            ids::sales_revenue(),
            "Revenue",
            None,
            Metric::Revenue,
            ValueKind::Money,
            true,
            "Sum of revenue over the selected period",
        ),
        meta(
            ids::sales_order_count(),
            "Orders",
            None,
            Metric::Orders,
            ValueKind::Count,
            true,
            "Number of orders over the selected period",
        ),
        meta(
            ids::sales_avg_check(),
            "Average order value",
            Some("AOV"),
            Metric::Aov,
            ValueKind::Money,
            true,
            "Revenue / Orders, 0 when there were no orders",
        ),
        meta(
            ids::ads_spend(),
            "Ad spend",
            None,
            Metric::Spend,
            ValueKind::Money,
            false,
            "Advertising spend over the selected period",
        ),
        meta(
            ids::ads_sales(),
            "Ad sales",
            None,
            Metric::Sales,
            ValueKind::Money,
            true,
            "Sales attributed to ads (reported, or spend x ROAS)",
        ),
        meta(
            ids::ads_roas(),
            "Return on ad spend",
            Some("ROAS"),
            Metric::Roas,
            ValueKind::Ratio,
            true,
            "Ad sales / Ad spend",
        ),
        meta(
            ids::ads_daily_spend(),
            "Daily spend",
            None,
            Metric::DailySpend,
            ValueKind::Money,
            false,
            "Ad spend / calendar days in the period",
        ),
        meta(
            ids::ads_cost_per_order(),
            "Ad cost per order",
            Some("CPO"),
            Metric::CostPerOrder,
            ValueKind::Money,
            false,
            "Ad spend / Orders",
        ),
    ];

    let sets = vec![
        IndicatorSetMeta {
            id: IndicatorSetId::new("sales_overview"),
            label: "Sales overview".into(),
            indicators: vec![
                ids::sales_revenue(),
                ids::sales_order_count(),
                ids::sales_avg_check(),
            ],
        },
        IndicatorSetMeta {
            id: IndicatorSetId::new("ads_overview"),
            label: "Advertising overview".into(),
            indicators: vec![
                ids::ads_spend(),
                ids::ads_sales(),
                ids::ads_roas(),
                ids::ads_daily_spend(),
                ids::ads_cost_per_order(),
            ],
        },
    ];

    IndicatorCatalogResponse { indicators, sets }
}
