//! Period-comparison engine: period resolution, grouped sums, derived ratios,
//! deltas and ranking. Everything here is pure and synchronous.

pub mod aggregator;
pub mod delta;
pub mod period_index;
pub mod ranker;
pub mod ratios;

pub use aggregator::{aggregate, aggregate_series, group_key, matches_all, Bucket};
pub use delta::{compare, delta};
pub use period_index::{PeriodIndex, ResolvedPeriods};
pub use ranker::{sort_rows, Rankable};
