use crate::dataset::{LabelValue, ANOMALY, NORMAL};
use crate::normalize::LabelRule;

/// Labeling rule shared by the KDD Cup '99 SF and http subsets.
///
/// Connections flagged `normal.` are normal; every other attack category
/// (`neptune.`, `smurf.`, ...) counts as an anomaly. No rows are excluded.
/// Only string labels are in the domain; an integer label here means the
/// source handed over the wrong column.
pub struct ConnectionLabelRule;

/// The label the KDD data uses for legitimate connections, trailing dot
/// included.
const NORMAL_CONNECTION: &str = "normal.";

impl LabelRule for ConnectionLabelRule {
    fn map(&self, label: &LabelValue) -> Option<u8> {
        match label {
            LabelValue::Text(s) if s == NORMAL_CONNECTION => Some(NORMAL),
            LabelValue::Text(_) => Some(ANOMALY),
            LabelValue::Int(_) => None,
        }
    }
}
