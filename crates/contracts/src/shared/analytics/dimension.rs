use serde::{Deserialize, Serialize};

use super::record::RawRecord;

/// Categorical column a result can be grouped or filtered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Region,
    Platform,
    Store,
}

impl Dimension {
    pub fn id(&self) -> &'static str {
        match self {
            Dimension::Region => "region",
            Dimension::Platform => "platform",
            Dimension::Store => "store",
        }
    }

    /// Value of this dimension on a record.
    pub fn value_of<'a>(&self, record: &'a RawRecord) -> &'a str {
        match self {
            Dimension::Region => &record.region,
            Dimension::Platform => &record.platform,
            Dimension::Store => &record.store,
        }
    }
}

/// One component of a composite grouping key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DimensionValue {
    pub dimension: Dimension,
    pub value: String,
}

/// Composite grouping identity, e.g. `[region=BC, platform=Uber]`.
///
/// An empty key stands for the ungrouped total.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DimensionKey(pub Vec<DimensionValue>);

impl DimensionKey {
    pub fn total() -> Self {
        Self(Vec::new())
    }

    /// Build the key of `record` for the given grouping columns.
    pub fn of(record: &RawRecord, group_by: &[Dimension]) -> Self {
        Self(
            group_by
                .iter()
                .map(|dimension| DimensionValue {
                    dimension: *dimension,
                    value: dimension.value_of(record).to_string(),
                })
                .collect(),
        )
    }

    pub fn is_total(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, dimension: Dimension) -> Option<&str> {
        self.0
            .iter()
            .find(|v| v.dimension == dimension)
            .map(|v| v.value.as_str())
    }

    /// Human readable label: values joined with " / ", or "total".
    pub fn label(&self) -> String {
        if self.0.is_empty() {
            return "total".to_string();
        }
        self.0
            .iter()
            .map(|v| v.value.as_str())
            .collect::<Vec<_>>()
            .join(" / ")
    }
}

/// Equality constraint on one dimension. Several values act as `IN (...)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionFilter {
    pub dimension: Dimension,
    pub values: Vec<String>,
}

impl DimensionFilter {
    pub fn equals(dimension: Dimension, value: &str) -> Self {
        Self {
            dimension,
            values: vec![value.to_string()],
        }
    }

    /// An empty value list does not constrain anything.
    pub fn matches(&self, record: &RawRecord) -> bool {
        if self.values.is_empty() {
            return true;
        }
        let actual = self.dimension.value_of(record);
        self.values.iter().any(|v| v == actual)
    }
}
