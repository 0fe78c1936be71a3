use contracts::dashboards::d400_period_comparison::{ComparisonQuery, ComparisonRow};
use contracts::shared::analytics::RawRecord;
use contracts::shared::indicators::*;
use std::collections::HashMap;

use super::compute::{ads, sales};
use super::metadata::ids;
use crate::dashboards::d400_period_comparison::service::build_comparison;
use crate::shared::analytics::PeriodIndex;

type ComputeFn = fn(&ComparisonRow) -> IndicatorValue;

/// Central registry: maps `IndicatorId` to its compute function.
///
/// Every function reads the same ungrouped comparison, so the engine runs
/// once per batch.
pub struct IndicatorRegistry {
    fns: HashMap<String, ComputeFn>,
}

impl Default for IndicatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl IndicatorRegistry {
    pub fn new() -> Self {
        let mut fns: HashMap<String, ComputeFn> = HashMap::new();

        fns.insert(ids::sales_revenue().0, sales::compute_sales_revenue);
        fns.insert(ids::sales_order_count().0, sales::compute_sales_order_count);
        fns.insert(ids::sales_avg_check().0, sales::compute_sales_avg_check);
        fns.insert(ids::ads_spend().0, ads::compute_ads_spend);
        fns.insert(ids::ads_sales().0, ads::compute_ads_sales);
        fns.insert(ids::ads_roas().0, ads::compute_ads_roas);
        fns.insert(ids::ads_daily_spend().0, ads::compute_ads_daily_spend);
        fns.insert(ids::ads_cost_per_order().0, ads::compute_ads_cost_per_order);

        Self { fns }
    }

    /// Compute a batch of indicators for one context.
    ///
    /// Unknown ids are skipped; a context without data yields `None` values
    /// with an explanatory subtitle.
    pub fn compute(
        &self,
        ids: &[IndicatorId],
        ctx: &IndicatorContext,
        records: &[RawRecord],
        index: &PeriodIndex,
    ) -> Vec<IndicatorValue> {
        let query = ComparisonQuery {
            filters: ctx.filters.clone(),
            window: ctx.window,
            ..ComparisonQuery::new(ctx.selected_period)
        };
        let total = build_comparison(records, index, &query).total;

        let mut results = Vec::with_capacity(ids.len());

        for id in ids {
            let Some(compute_fn) = self.fns.get(&id.0) else {
                tracing::warn!("indicator {} not found in registry", id.0);
                continue;
            };

            match &total {
                Some(total) => results.push(compute_fn(total)),
                None => results.push(IndicatorValue {
                    id: id.clone(),
                    value: None,
                    previous_value: None,
                    year_ago_value: None,
                    mom: None,
                    yoy: None,
                    subtitle: Some(format!("no data for {}", ctx.selected_period)),
                }),
            }
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::indicators::metadata::build_catalog;
    use contracts::shared::analytics::{Dimension, DimensionFilter, Period};

    fn p(s: &str) -> Period {
        Period::parse(s).unwrap()
    }

    fn ctx(period: &str) -> IndicatorContext {
        IndicatorContext {
            selected_period: p(period),
            filters: Vec::new(),
            window: 1,
        }
    }

    fn records() -> Vec<RawRecord> {
        let mut ad = RawRecord::sales(p("2025-10"), "BC", "Uber", "S1", 0.0, 0.0);
        ad.spend = Some(100.0);
        ad.sales = Some(400.0);
        vec![
            RawRecord::sales(p("2025-09"), "BC", "Uber", "S1", 1000.0, 10.0),
            RawRecord::sales(p("2025-10"), "BC", "Uber", "S1", 1200.0, 12.0),
            RawRecord::sales(p("2025-10"), "ON", "Uber", "S2", 800.0, 8.0),
            ad,
        ]
    }

    #[test]
    fn test_every_catalog_entry_is_registered() {
        let registry = IndicatorRegistry::new();
        for meta in build_catalog().indicators {
            assert!(registry.fns.contains_key(&meta.id.0), "{} missing", meta.id.0);
        }
    }

    #[test]
    fn test_compute_batch() {
        let records = records();
        let index = PeriodIndex::from_records(&records);
        let registry = IndicatorRegistry::new();
        let ids = vec![ids::sales_revenue(), IndicatorId::new("unknown"), ids::ads_roas()];

        let values = registry.compute(&ids, &ctx("2025-10"), &records, &index);
        assert_eq!(values.len(), 2);
        assert_eq!(values[0].value, Some(2000.0));
        assert_eq!(values[0].previous_value, Some(1000.0));
        assert_eq!(values[0].mom, Some(1.0));
        assert_eq!(values[1].value, Some(4.0));
        assert_eq!(values[1].previous_value, None);
        assert_eq!(values[1].mom, None);
    }

    #[test]
    fn test_compute_with_filter() {
        let records = records();
        let index = PeriodIndex::from_records(&records);
        let mut context = ctx("2025-10");
        context.filters = vec![DimensionFilter::equals(Dimension::Region, "ON")];

        let values = IndicatorRegistry::new().compute(&[ids::sales_revenue()], &context, &records, &index);
        assert_eq!(values[0].value, Some(800.0));
        assert_eq!(values[0].previous_value, None);
    }

    #[test]
    fn test_compute_unknown_period() {
        let records = records();
        let index = PeriodIndex::from_records(&records);
        let values =
            IndicatorRegistry::new().compute(&[ids::sales_revenue()], &ctx("2020-01"), &records, &index);
        assert_eq!(values.len(), 1);
        assert_eq!(values[0].value, None);
        assert_eq!(values[0].subtitle.as_deref(), Some("no data for 2020-01"));
    }
}
