use anyhow::Result;
use contracts::dashboards::d401_metric_trend::{TrendRequest, TrendResponse, TrendSeries};
use contracts::shared::analytics::{DimensionKey, RawRecord};
use std::collections::BTreeSet;

use crate::shared::analytics::ratios::metric_value;
use crate::shared::analytics::{aggregate_series, delta, group_key, matches_all, PeriodIndex};
use crate::shared::data::record_store;

pub async fn get_trend(request: TrendRequest) -> Result<TrendResponse> {
    let snapshot = record_store::get_snapshot()?;
    Ok(build_trend(&snapshot.records, &snapshot.index, &request))
}

/// One value per period for each dimension key, aggregated period by period.
pub fn build_trend(records: &[RawRecord], index: &PeriodIndex, request: &TrendRequest) -> TrendResponse {
    let metric = request.metric;
    let periods = index.window(request.end_period, request.periods);

    if periods.is_empty() {
        return TrendResponse {
            periods,
            metric,
            series: Vec::new(),
        };
    }

    let per_period = aggregate_series(
        records,
        &periods,
        group_key(&request.group_by),
        matches_all(&request.filters),
    );

    let keys: BTreeSet<&DimensionKey> = per_period
        .iter()
        .flat_map(|(_, buckets)| buckets.keys())
        .collect();

    let series = keys
        .into_iter()
        .map(|key| {
            let values: Vec<Option<f64>> = per_period
                .iter()
                .map(|(period, buckets)| {
                    metric_value(metric, buckets.get(key), period.days_in_month())
                })
                .collect();

            let changes = values
                .iter()
                .enumerate()
                .map(|(i, value)| {
                    if i == 0 {
                        None
                    } else {
                        delta(*value, values[i - 1])
                    }
                })
                .collect();

            TrendSeries {
                dimension_key: key.clone(),
                label: key.label(),
                values,
                changes,
            }
        })
        .collect();

    TrendResponse {
        periods,
        metric,
        series,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::analytics::{Dimension, DimensionFilter, Metric, Period};

    fn p(s: &str) -> Period {
        Period::parse(s).unwrap()
    }

    fn rec(period: &str, region: &str, revenue: f64, orders: f64) -> RawRecord {
        RawRecord::sales(p(period), region, "Uber", "S1", revenue, orders)
    }

    fn request(end: &str, periods: usize) -> TrendRequest {
        TrendRequest {
            end_period: p(end),
            periods,
            filters: Vec::new(),
            group_by: vec![Dimension::Region],
            metric: Metric::Revenue,
        }
    }

    #[test]
    fn test_series_per_region() {
        let records = vec![
            rec("2025-08", "BC", 100.0, 1.0),
            rec("2025-09", "BC", 150.0, 1.0),
            rec("2025-09", "ON", 80.0, 1.0),
            rec("2025-10", "BC", 120.0, 1.0),
            rec("2025-10", "ON", 100.0, 1.0),
        ];
        let index = PeriodIndex::from_records(&records);
        let response = build_trend(&records, &index, &request("2025-10", 3));

        assert_eq!(response.periods, vec![p("2025-08"), p("2025-09"), p("2025-10")]);
        assert_eq!(response.series.len(), 2);

        let bc = &response.series[0];
        assert_eq!(bc.label, "BC");
        assert_eq!(bc.values, vec![Some(100.0), Some(150.0), Some(120.0)]);
        assert_eq!(bc.changes[0], None);
        assert!((bc.changes[1].unwrap() - 0.5).abs() < 1e-9);
        assert!((bc.changes[2].unwrap() + 0.2).abs() < 1e-9);

        let on = &response.series[1];
        assert_eq!(on.values, vec![None, Some(80.0), Some(100.0)]);
        assert_eq!(on.changes[1], None);
    }

    #[test]
    fn test_series_clipped_and_filtered() {
        let records = vec![
            rec("2025-09", "BC", 100.0, 4.0),
            rec("2025-10", "ON", 100.0, 1.0),
        ];
        let index = PeriodIndex::from_records(&records);
        let mut req = request("2025-10", 12);
        req.filters = vec![DimensionFilter::equals(Dimension::Region, "BC")];
        req.metric = Metric::Aov;
        let response = build_trend(&records, &index, &req);

        assert_eq!(response.periods.len(), 2);
        assert_eq!(response.series.len(), 1);
        assert_eq!(response.series[0].values, vec![Some(25.0), None]);
    }

    #[test]
    fn test_unknown_end_period() {
        let records = vec![rec("2025-09", "BC", 100.0, 1.0)];
        let index = PeriodIndex::from_records(&records);
        let response = build_trend(&records, &index, &request("2026-01", 3));
        assert!(response.periods.is_empty());
        assert!(response.series.is_empty());
    }
}
