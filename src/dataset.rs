use serde::{Deserialize, Serialize};
use std::fmt;

/// Target value for rows considered normal.
pub const NORMAL: u8 = 0;
/// Target value for rows considered anomalous.
pub const ANOMALY: u8 = 1;

/// A native class label as provided by a dataset's source, before
/// normalization: an integer class code or a category string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LabelValue {
    Int(i64),
    Text(String),
}

impl fmt::Display for LabelValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelValue::Int(v) => write!(f, "{v}"),
            LabelValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for LabelValue {
    fn from(v: i64) -> Self {
        LabelValue::Int(v)
    }
}

impl From<&str> for LabelValue {
    fn from(s: &str) -> Self {
        LabelValue::Text(s.to_string())
    }
}

/// One feature cell. The KDD SF subset keeps a categorical column, so cells
/// are not uniformly numeric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FeatureValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Int(v) => write!(f, "{v}"),
            FeatureValue::Float(v) => write!(f, "{v}"),
            FeatureValue::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Raw feature rows plus the parallel native label vector, as handed over by
/// a dataset source. Consumed once by the label normalizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDataset {
    /// Feature column names, without the label column.
    pub columns: Vec<String>,
    pub rows: Vec<Vec<FeatureValue>>,
    /// One native label per row; `rows.len() == labels.len()`.
    pub labels: Vec<LabelValue>,
}

impl RawDataset {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<FeatureValue>>, labels: Vec<LabelValue>) -> Self {
        debug_assert_eq!(rows.len(), labels.len());
        Self { columns, rows, labels }
    }

    pub fn nrow(&self) -> usize {
        self.rows.len()
    }
}

/// Filtered feature rows plus the binary `target` column. `target` holds only
/// 0 (normal) and 1 (anomaly).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedDataset {
    pub name: String,
    /// Feature column names; `target` is kept separately.
    pub columns: Vec<String>,
    pub rows: Vec<Vec<FeatureValue>>,
    pub target: Vec<u8>,
}

impl NormalizedDataset {
    pub fn nrow(&self) -> usize {
        self.rows.len()
    }

    /// Column count as reported in stats; the `target` column counts.
    pub fn ncol(&self) -> usize {
        self.columns.len() + 1
    }

    /// Proportion of rows labeled anomalous, in [0, 1]. Zero for an empty
    /// dataset.
    pub fn anomaly_fraction(&self) -> f64 {
        if self.target.is_empty() {
            return 0.0;
        }
        let anomalies = self.target.iter().filter(|&&t| t == ANOMALY).count();
        anomalies as f64 / self.target.len() as f64
    }
}
