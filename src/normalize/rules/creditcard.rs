use crate::dataset::{LabelValue, ANOMALY, NORMAL};
use crate::normalize::LabelRule;

/// Labeling rule for the credit-card fraud dataset.
///
/// The source table already carries a binary class column with the same
/// convention (0 = legitimate, 1 = fraud), so normalization is a pass-through
/// rename. The values are still validated: anything other than 0 or 1 is
/// outside the domain and aborts the run instead of silently entering the
/// prepared table.
pub struct PassThroughRule;

impl LabelRule for PassThroughRule {
    fn map(&self, label: &LabelValue) -> Option<u8> {
        match label {
            LabelValue::Int(0) => Some(NORMAL),
            LabelValue::Int(1) => Some(ANOMALY),
            _ => None,
        }
    }
}
