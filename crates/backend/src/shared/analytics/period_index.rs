use contracts::shared::analytics::{Period, RawRecord};
use std::collections::BTreeSet;

/// Distance between a period and the same month one year earlier.
pub const YEAR_OFFSET: isize = 12;

/// Sorted, de-duplicated list of the periods present in the feed.
///
/// "Previous" and "year-ago" are positional offsets into this list, so a
/// month missing from the feed shifts the comparison to the nearest period
/// that does exist.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeriodIndex {
    periods: Vec<Period>,
}

/// Period sets resolved for one query.
///
/// A set is empty when the comparison is not available.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedPeriods {
    pub current: Vec<Period>,
    pub previous: Vec<Period>,
    pub year_ago: Vec<Period>,
}

impl ResolvedPeriods {
    pub fn current_period(&self) -> Option<Period> {
        self.current.last().copied()
    }

    pub fn previous_period(&self) -> Option<Period> {
        self.previous.last().copied()
    }

    pub fn year_ago_period(&self) -> Option<Period> {
        self.year_ago.last().copied()
    }
}

impl PeriodIndex {
    pub fn from_records(records: &[RawRecord]) -> Self {
        Self::from_periods(records.iter().map(|r| r.period))
    }

    pub fn from_periods(periods: impl IntoIterator<Item = Period>) -> Self {
        let unique: BTreeSet<Period> = periods.into_iter().collect();
        Self {
            periods: unique.into_iter().collect(),
        }
    }

    /// Oldest first.
    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn latest(&self) -> Option<Period> {
        self.periods.last().copied()
    }

    pub fn position(&self, period: Period) -> Option<usize> {
        self.periods.binary_search(&period).ok()
    }

    /// Period at `index(target) + offset`, or `None` when out of bounds or
    /// when `target` is not indexed.
    pub fn offset(&self, target: Period, offset: isize) -> Option<Period> {
        let idx = self.position(target)?.checked_add_signed(offset)?;
        self.periods.get(idx).copied()
    }

    pub fn previous(&self, target: Period) -> Option<Period> {
        self.offset(target, -1)
    }

    pub fn year_ago(&self, target: Period) -> Option<Period> {
        self.offset(target, -YEAR_OFFSET)
    }

    /// Up to `len` consecutive periods ending at `end`, clipped at the start
    /// of the index. Empty when `end` is unknown.
    pub fn window(&self, end: Period, len: usize) -> Vec<Period> {
        let Some(end_idx) = self.position(end) else {
            return Vec::new();
        };
        let start = (end_idx + 1).saturating_sub(len.max(1));
        self.periods[start..=end_idx].to_vec()
    }

    /// Exactly `len` periods ending at `end`, or nothing.
    fn full_window(&self, end: Option<Period>, len: usize) -> Vec<Period> {
        match end {
            Some(end) => {
                let window = self.window(end, len);
                if window.len() == len {
                    window
                } else {
                    Vec::new()
                }
            }
            None => Vec::new(),
        }
    }

    /// Resolve the current trailing window and its two baselines.
    ///
    /// The previous window is the same length immediately before the current
    /// one; the year-ago window is shifted back by twelve periods. Baselines
    /// must be complete, otherwise they are left empty.
    pub fn resolve(&self, target: Period, window: usize) -> ResolvedPeriods {
        // A window longer than the index resolves like the whole index
        let len = window.clamp(1, self.len().max(1));
        let current = self.window(target, len);
        if current.is_empty() {
            return ResolvedPeriods::default();
        }

        let previous = self.full_window(self.offset(target, -(len as isize)), len);
        let year_ago = self.full_window(self.year_ago(target), len);

        ResolvedPeriods {
            current,
            previous,
            year_ago,
        }
    }
}
