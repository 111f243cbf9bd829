use crate::dataset::{LabelValue, ANOMALY, NORMAL};
use crate::normalize::LabelRule;

/// Labeling rule for the Statlog shuttle dataset.
///
/// Class 4 is excluded entirely; of the remaining classes, 1 (Rad Flow) is
/// normal and everything else is an anomaly.
pub struct ShuttleRule;

impl LabelRule for ShuttleRule {
    fn keep(&self, label: &LabelValue) -> bool {
        !matches!(label, LabelValue::Int(4))
    }

    fn map(&self, label: &LabelValue) -> Option<u8> {
        match label {
            LabelValue::Int(1) => Some(NORMAL),
            LabelValue::Int(4) => None,
            LabelValue::Int(_) => Some(ANOMALY),
            LabelValue::Text(_) => None,
        }
    }
}
