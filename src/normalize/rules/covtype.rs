use crate::dataset::{LabelValue, ANOMALY, NORMAL};
use crate::normalize::LabelRule;

/// Labeling rule for the Forest Cover Type dataset.
///
/// Follows the rules proposed in "Learning hyperparameters for unsupervised
/// anomaly detection" (A. Thomas, S. Clémençon, V. Feuillard, A. Gramfort,
/// Anomaly Detection Workshop, ICML 2016): cover type 2 is considered normal
/// and cover types 4 and 5 abnormal; every other cover type is excluded.
pub struct CoverTypeRule;

impl LabelRule for CoverTypeRule {
    fn keep(&self, label: &LabelValue) -> bool {
        matches!(label, LabelValue::Int(2 | 4 | 5))
    }

    fn map(&self, label: &LabelValue) -> Option<u8> {
        match label {
            LabelValue::Int(2) => Some(NORMAL),
            LabelValue::Int(4 | 5) => Some(ANOMALY),
            _ => None,
        }
    }
}
