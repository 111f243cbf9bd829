pub mod registry;
pub mod rules;

pub use registry::RuleRegistry;

use crate::dataset::{LabelValue, NormalizedDataset, RawDataset};
use crate::error::{PrepError, Result};

/// One dataset's labeling convention: an optional row filter over the native
/// label and a mapping from native label to the binary anomaly convention.
///
/// `map` returns `None` for a label outside the rule's expected domain; the
/// normalizer turns that into an error rather than defaulting a value, so a
/// mislabeled row can never slip into a prepared table.
pub trait LabelRule: Send + Sync {
    /// Row filter applied strictly before mapping. Rows whose native label
    /// is rejected here are dropped entirely, features and label together.
    fn keep(&self, _label: &LabelValue) -> bool {
        true
    }

    /// Map a native label to 0 (normal) or 1 (anomaly).
    fn map(&self, label: &LabelValue) -> Option<u8>;
}

/// Convert one raw dataset into its normalized form under `rule`.
///
/// Pure and deterministic: filtering happens before mapping, every surviving
/// row gets exactly one binary label, and feature columns pass through
/// unchanged.
pub fn normalize(name: &str, raw: RawDataset, rule: &dyn LabelRule) -> Result<NormalizedDataset> {
    let mut rows = Vec::with_capacity(raw.rows.len());
    let mut target = Vec::with_capacity(raw.labels.len());

    for (row, label) in raw.rows.into_iter().zip(raw.labels.into_iter()) {
        if !rule.keep(&label) {
            continue;
        }
        let binary = rule.map(&label).ok_or_else(|| PrepError::UnmappedLabel {
            dataset: name.to_string(),
            label: label.to_string(),
        })?;
        rows.push(row);
        target.push(binary);
    }

    Ok(NormalizedDataset {
        name: name.to_string(),
        columns: raw.columns,
        rows,
        target,
    })
}

#[cfg(test)]
mod tests {
    use super::rules::{ConnectionLabelRule, CoverTypeRule, PassThroughRule, ShuttleRule};
    use super::*;
    use crate::dataset::FeatureValue;

    fn raw_with_labels(labels: Vec<LabelValue>) -> RawDataset {
        let rows = labels
            .iter()
            .enumerate()
            .map(|(i, _)| vec![FeatureValue::Int(i as i64)])
            .collect();
        RawDataset::new(vec!["x0".to_string()], rows, labels)
    }

    #[test]
    fn covtype_filters_then_maps() {
        let raw = raw_with_labels(vec![2.into(), 2.into(), 4.into(), 1.into(), 5.into(), 3.into()]);
        let normalized = normalize("covtype", raw, &CoverTypeRule).unwrap();

        assert_eq!(normalized.nrow(), 4);
        assert_eq!(normalized.target, vec![0, 0, 1, 1]);
        // Rows excluded by the filter are gone, not relabeled: the surviving
        // feature rows are exactly those that carried classes 2, 2, 4, 5.
        let kept: Vec<_> = normalized.rows.iter().map(|r| r[0].clone()).collect();
        assert_eq!(
            kept,
            vec![
                FeatureValue::Int(0),
                FeatureValue::Int(1),
                FeatureValue::Int(2),
                FeatureValue::Int(4)
            ]
        );
    }

    #[test]
    fn connection_labels_map_normal_to_zero() {
        let raw = raw_with_labels(vec![
            "normal.".into(),
            "neptune.".into(),
            "normal.".into(),
            "smurf.".into(),
        ]);
        let normalized = normalize("kddcup_sf", raw, &ConnectionLabelRule).unwrap();
        assert_eq!(normalized.target, vec![0, 1, 0, 1]);
    }

    #[test]
    fn shuttle_drops_class_four_before_mapping() {
        let raw = raw_with_labels(vec![1.into(), 4.into(), 1.into(), 7.into()]);
        let normalized = normalize("shuttle", raw, &ShuttleRule).unwrap();
        assert_eq!(normalized.nrow(), 3);
        assert_eq!(normalized.target, vec![0, 0, 1]);
    }

    #[test]
    fn creditcard_labels_pass_through_unchanged() {
        let raw = raw_with_labels(vec![0.into(), 1.into(), 0.into()]);
        let normalized = normalize("creditcard", raw, &PassThroughRule).unwrap();
        assert_eq!(normalized.target, vec![0, 1, 0]);
    }

    #[test]
    fn target_contains_only_binary_values() {
        let raw = raw_with_labels(vec![2.into(), 4.into(), 5.into(), 2.into()]);
        let normalized = normalize("covtype", raw, &CoverTypeRule).unwrap();
        assert!(normalized.target.iter().all(|&t| t == 0 || t == 1));
    }

    #[test]
    fn normalization_is_deterministic() {
        let labels: Vec<LabelValue> = vec![2.into(), 4.into(), 1.into(), 5.into(), 2.into()];
        let a = normalize("covtype", raw_with_labels(labels.clone()), &CoverTypeRule).unwrap();
        let b = normalize("covtype", raw_with_labels(labels), &CoverTypeRule).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn label_outside_the_domain_is_an_error() {
        let raw = raw_with_labels(vec![0.into(), 2.into(), 0.into()]);
        let err = normalize("creditcard", raw, &PassThroughRule).unwrap_err();
        match err {
            PrepError::UnmappedLabel { dataset, label } => {
                assert_eq!(dataset, "creditcard");
                assert_eq!(label, "2");
            }
            other => panic!("expected UnmappedLabel, got {other}"),
        }
    }

    #[test]
    fn feature_columns_are_unchanged() {
        let raw = raw_with_labels(vec!["normal.".into(), "smurf.".into()]);
        let columns = raw.columns.clone();
        let normalized = normalize("kddcup_http", raw, &ConnectionLabelRule).unwrap();
        assert_eq!(normalized.columns, columns);
    }
}
