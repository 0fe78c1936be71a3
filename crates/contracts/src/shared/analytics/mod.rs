//! Shared analytics vocabulary: periods, raw feed rows, grouping dimensions
//! and comparable metrics.

mod dimension;
mod metric;
mod period;
mod record;

pub use dimension::{Dimension, DimensionFilter, DimensionKey, DimensionValue};
pub use metric::{Metric, MetricComparison, SortDirection, SortKey};
pub use period::{Period, PeriodParseError};
pub use record::{PeriodsResponse, RawRecord};
