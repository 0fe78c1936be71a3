use anyhow::Result;
use contracts::dashboards::d400_period_comparison::{
    ComparisonQuery, ComparisonResponse, ComparisonRow,
};
use contracts::shared::analytics::{
    DimensionKey, Metric, MetricComparison, PeriodsResponse, RawRecord,
};
use std::collections::{BTreeMap, BTreeSet};

use crate::shared::analytics::ratios::{days_in_periods, metric_value, share};
use crate::shared::analytics::{
    aggregate, compare, group_key, matches_all, sort_rows, Bucket, PeriodIndex,
};
use crate::shared::data::record_store;

/// Calendar days covered by each compared period set
#[derive(Debug, Clone, Copy)]
struct PeriodDays {
    current: u32,
    previous: u32,
    year_ago: u32,
}

/// Get comparison rows for the loaded feed
pub async fn get_comparison(query: ComparisonQuery) -> Result<ComparisonResponse> {
    let snapshot = record_store::get_snapshot()?;
    Ok(build_comparison(&snapshot.records, &snapshot.index, &query))
}

/// Get the list of periods present in the feed
pub async fn get_available_periods() -> Result<PeriodsResponse> {
    let snapshot = record_store::get_snapshot()?;
    Ok(snapshot.periods_response())
}

/// Compare the selected period set against the previous and year-ago sets.
///
/// Rows are the union of dimension keys seen in any of the three sets. An
/// unknown selected period yields an empty response.
pub fn build_comparison(
    records: &[RawRecord],
    index: &PeriodIndex,
    query: &ComparisonQuery,
) -> ComparisonResponse {
    let metric = query.metric;
    let resolved = index.resolve(query.selected_period, query.window);

    if resolved.current.is_empty() {
        tracing::debug!(
            "D400: period {} is not in the index, returning empty result",
            query.selected_period
        );
        return ComparisonResponse::empty(metric);
    }

    let days = PeriodDays {
        current: days_in_periods(&resolved.current),
        previous: days_in_periods(&resolved.previous),
        year_ago: days_in_periods(&resolved.year_ago),
    };

    let key_fn = group_key(&query.group_by);
    let filter = matches_all(&query.filters);

    let current = aggregate(records, &resolved.current, &key_fn, &filter);
    let previous = aggregate(records, &resolved.previous, &key_fn, &filter);
    let year_ago = aggregate(records, &resolved.year_ago, &key_fn, &filter);

    let totals = [
        Bucket::merged(current.values()),
        Bucket::merged(previous.values()),
        Bucket::merged(year_ago.values()),
    ];
    let mut total = if totals.iter().any(Option::is_some) {
        Some(build_row(
            DimensionKey::total(),
            [totals[0].as_ref(), totals[1].as_ref(), totals[2].as_ref()],
            days,
            metric,
        ))
    } else {
        None
    };

    let keys: BTreeSet<&DimensionKey> = current
        .keys()
        .chain(previous.keys())
        .chain(year_ago.keys())
        .collect();

    let mut rows: Vec<ComparisonRow> = keys
        .into_iter()
        .map(|key| {
            build_row(
                key.clone(),
                [current.get(key), previous.get(key), year_ago.get(key)],
                days,
                metric,
            )
        })
        .collect();

    // Share only makes sense for metrics that add up across rows
    let share_total = if metric.is_additive() {
        total.as_ref().and_then(|t| t.current)
    } else {
        None
    };
    for row in &mut rows {
        row.share = share(row.current, share_total);
    }
    if let Some(total) = total.as_mut() {
        total.share = share(total.current, share_total);
    }

    if let Some(sort_key) = query.sort_key {
        sort_rows(&mut rows, sort_key, query.sort_direction);
    }

    tracing::debug!(
        "D400: {} rows for {} (window {}, group_by {:?})",
        rows.len(),
        query.selected_period,
        query.window,
        query.group_by
    );

    ComparisonResponse {
        current_period: resolved.current_period(),
        previous_period: resolved.previous_period(),
        yoy_period: resolved.year_ago_period(),
        current_periods: resolved.current,
        previous_periods: resolved.previous,
        yoy_periods: resolved.year_ago,
        metric,
        rows,
        total,
    }
}

/// Build one row from its current / previous / year-ago buckets
fn build_row(
    key: DimensionKey,
    buckets: [Option<&Bucket>; 3],
    days: PeriodDays,
    metric: Metric,
) -> ComparisonRow {
    let [current, previous, year_ago] = buckets;

    let metrics: BTreeMap<Metric, MetricComparison> = Metric::ALL
        .iter()
        .map(|m| {
            let comparison = compare(
                metric_value(*m, current, days.current),
                metric_value(*m, previous, days.previous),
                metric_value(*m, year_ago, days.year_ago),
            );
            (*m, comparison)
        })
        .collect();

    let selected = metrics.get(&metric).copied().unwrap_or_default();

    ComparisonRow {
        label: key.label(),
        dimension_key: key,
        current: selected.current,
        previous: selected.previous,
        year_ago: selected.year_ago,
        mom: selected.mom,
        yoy: selected.yoy,
        share: None,
        metrics,
    }
}
