pub mod analytics;
pub mod indicators;
