pub mod d400_period_comparison;
pub mod d401_metric_trend;
