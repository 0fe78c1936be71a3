use contracts::dashboards::d400_period_comparison::ComparisonRow;
use contracts::shared::analytics::{SortDirection, SortKey};
use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Value a row exposes for one sort key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortValue<'a> {
    Text(Option<&'a str>),
    Number(Option<f64>),
}

/// Rows that can be ordered by a [`SortKey`].
pub trait Rankable {
    fn sort_value(&self, key: &SortKey) -> SortValue<'_>;
}

impl Rankable for ComparisonRow {
    fn sort_value(&self, key: &SortKey) -> SortValue<'_> {
        match key {
            SortKey::Label => SortValue::Text(Some(self.label.as_str())),
            SortKey::Dimension(dimension) => SortValue::Text(self.dimension_key.get(*dimension)),
            SortKey::Current => SortValue::Number(self.current),
            SortKey::Previous => SortValue::Number(self.previous),
            SortKey::YearAgo => SortValue::Number(self.year_ago),
            SortKey::Mom => SortValue::Number(self.mom),
            SortKey::Yoy => SortValue::Number(self.yoy),
            SortKey::Share => SortValue::Number(self.share),
            SortKey::Metric(metric) => SortValue::Number(self.metric(*metric).current),
        }
    }
}

/// Base letters only: decomposed, combining marks dropped, lowercased.
/// "Éclair" and "eclair" share a key.
fn base_letters(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Decomposed and lowercased, accents kept.
fn with_accents(s: &str) -> String {
    s.nfd().flat_map(char::to_lowercase).collect()
}

/// Collation in three levels: base letters, then accents, then the exact
/// string so the order is total.
fn compare_text(a: &&str, b: &&str) -> Ordering {
    base_letters(a)
        .cmp(&base_letters(b))
        .then_with(|| with_accents(a).cmp(&with_accents(b)))
        .then_with(|| a.cmp(b))
}

fn compare_number(a: &f64, b: &f64) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

/// Missing values go last in both directions; only defined values are
/// affected by `direction`.
fn nulls_last<T>(
    a: Option<T>,
    b: Option<T>,
    direction: SortDirection,
    cmp: impl Fn(&T, &T) -> Ordering,
) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match direction {
            SortDirection::Asc => cmp(&a, &b),
            SortDirection::Desc => cmp(&a, &b).reverse(),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub fn compare_values(a: SortValue<'_>, b: SortValue<'_>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (SortValue::Text(a), SortValue::Text(b)) => nulls_last(a, b, direction, compare_text),
        (SortValue::Number(a), SortValue::Number(b)) => nulls_last(
            a.filter(|v| !v.is_nan()),
            b.filter(|v| !v.is_nan()),
            direction,
            compare_number,
        ),
        _ => Ordering::Equal,
    }
}

/// Stable sort: rows with equal keys keep their input order.
pub fn sort_rows<T: Rankable>(rows: &mut [T], key: SortKey, direction: SortDirection) {
    rows.sort_by(|a, b| compare_values(a.sort_value(&key), b.sort_value(&key), direction));
}
