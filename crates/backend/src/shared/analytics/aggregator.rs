use contracts::shared::analytics::{Dimension, DimensionFilter, DimensionKey, Period, RawRecord};
use std::collections::{BTreeMap, BTreeSet};

use super::ratios::derived_sales;

/// Summed measures of one dimension key over one period set.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bucket {
    pub revenue: f64,
    pub orders: f64,
    pub spend: f64,
    pub sales: f64,
    pub row_count: usize,
    /// Rows that carried spend / sales / roas
    pub ad_row_count: usize,
}

impl Bucket {
    pub fn add_record(&mut self, record: &RawRecord) {
        self.revenue += finite_or_zero(record.revenue);
        self.orders += finite_or_zero(record.orders);
        self.row_count += 1;

        if record.has_ad_data() {
            self.spend += finite_or_zero(record.spend);
            self.sales += record_sales(record);
            self.ad_row_count += 1;
        }
    }

    pub fn merge(&mut self, other: &Bucket) {
        self.revenue += other.revenue;
        self.orders += other.orders;
        self.spend += other.spend;
        self.sales += other.sales;
        self.row_count += other.row_count;
        self.ad_row_count += other.ad_row_count;
    }

    /// Sum of several buckets; `None` when there is nothing to sum.
    pub fn merged<'a>(buckets: impl IntoIterator<Item = &'a Bucket>) -> Option<Bucket> {
        let mut iter = buckets.into_iter();
        let mut total = *iter.next()?;
        for bucket in iter {
            total.merge(bucket);
        }
        Some(total)
    }

    pub fn has_ad_data(&self) -> bool {
        self.ad_row_count > 0
    }
}

/// Missing, NaN and infinite inputs count as zero so one bad row cannot
/// poison a sum.
pub fn finite_or_zero(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Attributed sales of an ad row: explicit `sales`, else `spend * roas`.
fn record_sales(record: &RawRecord) -> f64 {
    match record.sales {
        Some(sales) if sales.is_finite() => sales,
        _ => derived_sales(record.spend, record.roas).unwrap_or(0.0),
    }
}

/// Key extractor grouping by the given dimensions, in order.
pub fn group_key(group_by: &[Dimension]) -> impl Fn(&RawRecord) -> DimensionKey + '_ {
    move |record| DimensionKey::of(record, group_by)
}

/// Predicate that accepts a record only if every filter matches.
pub fn matches_all(filters: &[DimensionFilter]) -> impl Fn(&RawRecord) -> bool + '_ {
    move |record| filters.iter().all(|f| f.matches(record))
}

/// Group `records` whose period is in `periods` by `key_fn`.
///
/// All listed periods are summed into a single bucket per key. An empty
/// period list yields an empty map.
pub fn aggregate<K, F, P>(
    records: &[RawRecord],
    periods: &[Period],
    key_fn: F,
    filter: P,
) -> BTreeMap<K, Bucket>
where
    K: Ord,
    F: Fn(&RawRecord) -> K,
    P: Fn(&RawRecord) -> bool,
{
    let wanted: BTreeSet<Period> = periods.iter().copied().collect();
    let mut buckets: BTreeMap<K, Bucket> = BTreeMap::new();

    if wanted.is_empty() {
        return buckets;
    }

    for record in records {
        if !wanted.contains(&record.period) || !filter(record) {
            continue;
        }
        buckets.entry(key_fn(record)).or_default().add_record(record);
    }

    buckets
}

/// Aggregate each period separately, in the order given.
///
/// Periods without matching rows get an empty map so the result stays
/// aligned with `periods`.
pub fn aggregate_series<K, F, P>(
    records: &[RawRecord],
    periods: &[Period],
    key_fn: F,
    filter: P,
) -> Vec<(Period, BTreeMap<K, Bucket>)>
where
    K: Ord,
    F: Fn(&RawRecord) -> K,
    P: Fn(&RawRecord) -> bool,
{
    let wanted: BTreeSet<Period> = periods.iter().copied().collect();
    let mut by_period: BTreeMap<Period, BTreeMap<K, Bucket>> = BTreeMap::new();

    for record in records {
        if !wanted.contains(&record.period) || !filter(record) {
            continue;
        }
        by_period
            .entry(record.period)
            .or_default()
            .entry(key_fn(record))
            .or_default()
            .add_record(record);
    }

    periods
        .iter()
        .map(|period| (*period, by_period.remove(period).unwrap_or_default()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> Period {
        Period::parse(s).unwrap()
    }

    fn rec(period: &str, region: &str, platform: &str, store: &str, revenue: f64, orders: f64) -> RawRecord {
        RawRecord::sales(p(period), region, platform, store, revenue, orders)
    }

    fn sample() -> Vec<RawRecord> {
        vec![
            rec("2025-08", "BC", "Uber", "S1", 100.0, 2.0),
            rec("2025-09", "BC", "Uber", "S1", 200.0, 4.0),
            rec("2025-09", "BC", "Fantuan", "S2", 50.0, 1.0),
            rec("2025-09", "ON", "Uber", "S3", 300.0, 3.0),
            rec("2025-10", "BC", "Doordash", "S1", 400.0, 8.0),
            rec("2025-10", "ON", "Uber", "S3", 120.0, 2.0),
        ]
    }

    #[test]
    fn test_group_by_region() {
        let records = sample();
        let by_region = aggregate(&records, &[p("2025-09")], |r| r.region.clone(), |_| true);
        assert_eq!(by_region.len(), 2);
        assert_eq!(by_region["BC"].revenue, 250.0);
        assert_eq!(by_region["BC"].orders, 5.0);
        assert_eq!(by_region["BC"].row_count, 2);
        assert_eq!(by_region["ON"].revenue, 300.0);
    }

    #[test]
    fn test_composite_key_and_filter() {
        let records = sample();
        let group_by = [Dimension::Region, Dimension::Platform];
        let filters = [DimensionFilter::equals(Dimension::Region, "BC")];
        let buckets = aggregate(
            &records,
            &[p("2025-09"), p("2025-10")],
            group_key(&group_by),
            matches_all(&filters),
        );
        let labels: Vec<String> = buckets.keys().map(|k| k.label()).collect();
        assert_eq!(labels, vec!["BC / Doordash", "BC / Fantuan", "BC / Uber"]);
    }

    #[test]
    fn test_window_sums_into_one_bucket() {
        let records = sample();
        let buckets = aggregate(
            &records,
            &[p("2025-08"), p("2025-09"), p("2025-10")],
            |r| r.store.clone(),
            |_| true,
        );
        assert_eq!(buckets["S1"].revenue, 700.0);
        assert_eq!(buckets["S1"].orders, 14.0);
    }

    #[test]
    fn test_window_equals_merged_series() {
        let records = sample();
        let periods = [p("2025-08"), p("2025-09"), p("2025-10")];
        let whole = aggregate(&records, &periods, |r| r.region.clone(), |_| true);

        let mut merged: BTreeMap<String, Bucket> = BTreeMap::new();
        for (_, buckets) in aggregate_series(&records, &periods, |r| r.region.clone(), |_| true) {
            for (key, bucket) in buckets {
                merged.entry(key).or_default().merge(&bucket);
            }
        }
        assert_eq!(whole, merged);
    }

    #[test]
    fn test_series_alignment() {
        let records = sample();
        let periods = [p("2025-07"), p("2025-09")];
        let series = aggregate_series(&records, &periods, |r| r.region.clone(), |_| true);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].0, p("2025-07"));
        assert!(series[0].1.is_empty());
        assert_eq!(series[1].1["ON"].revenue, 300.0);
    }

    #[test]
    fn test_empty_periods_and_records() {
        let records = sample();
        assert!(aggregate(&records, &[], |r| r.region.clone(), |_| true).is_empty());
        assert!(aggregate(&[], &[p("2025-09")], |r: &RawRecord| r.region.clone(), |_| true).is_empty());
    }

    #[test]
    fn test_bad_numbers_are_sanitized() {
        let mut bad = rec("2025-09", "BC", "Uber", "S1", f64::NAN, 2.0);
        bad.orders = Some(f64::INFINITY);
        let mut missing = rec("2025-09", "BC", "Uber", "S1", 0.0, 0.0);
        missing.revenue = None;
        missing.orders = None;
        let records = vec![bad, missing, rec("2025-09", "BC", "Uber", "S1", 10.0, 1.0)];

        let buckets = aggregate(&records, &[p("2025-09")], |r| r.region.clone(), |_| true);
        assert_eq!(buckets["BC"].revenue, 10.0);
        assert_eq!(buckets["BC"].orders, 1.0);
        assert_eq!(buckets["BC"].row_count, 3);
    }

    #[test]
    fn test_ad_sales_derived_from_roas() {
        let mut explicit = rec("2025-09", "BC", "Uber", "S1", 0.0, 0.0);
        explicit.spend = Some(100.0);
        explicit.sales = Some(350.0);
        let mut derived = rec("2025-09", "BC", "Uber", "S1", 0.0, 0.0);
        derived.spend = Some(50.0);
        derived.roas = Some(4.0);
        let records = vec![explicit, derived, rec("2025-09", "BC", "Uber", "S1", 10.0, 1.0)];

        let buckets = aggregate(&records, &[p("2025-09")], |r| r.region.clone(), |_| true);
        let bc = buckets["BC"];
        assert_eq!(bc.spend, 150.0);
        assert_eq!(bc.sales, 550.0);
        assert_eq!(bc.ad_row_count, 2);
        assert!(bc.has_ad_data());
    }

    #[test]
    fn test_deterministic() {
        let records = sample();
        let periods = [p("2025-09"), p("2025-10")];
        let a = aggregate(&records, &periods, |r| r.store.clone(), |_| true);
        let b = aggregate(&records, &periods, |r| r.store.clone(), |_| true);
        for (key, bucket) in &a {
            assert_eq!(bucket.revenue.to_bits(), b[key].revenue.to_bits());
        }
    }

    #[test]
    fn test_merged() {
        let a = Bucket { revenue: 1.0, orders: 1.0, row_count: 1, ..Bucket::default() };
        let b = Bucket { revenue: 2.0, spend: 3.0, row_count: 1, ad_row_count: 1, ..Bucket::default() };
        let total = Bucket::merged([&a, &b]).unwrap();
        assert_eq!(total.revenue, 3.0);
        assert_eq!(total.spend, 3.0);
        assert_eq!(total.row_count, 2);
        assert!(Bucket::merged(std::iter::empty::<&Bucket>()).is_none());
    }
}
