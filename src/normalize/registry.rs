use std::collections::HashMap;

use super::rules::{ConnectionLabelRule, CoverTypeRule, PassThroughRule, ShuttleRule};
use super::{normalize, LabelRule};
use crate::constants;
use crate::dataset::{NormalizedDataset, RawDataset};
use crate::error::{PrepError, Result};

/// Registry of per-dataset labeling rules.
///
/// The set of prepared datasets is this explicit mapping, nothing else; a
/// dataset identifier without a registered rule is an error, not a skip.
pub struct RuleRegistry {
    rules: HashMap<String, Box<dyn LabelRule>>,
}

impl RuleRegistry {
    /// Create a registry holding the five fixed benchmark rules.
    pub fn new() -> Self {
        let mut rules: HashMap<String, Box<dyn LabelRule>> = HashMap::new();

        rules.insert(constants::COVTYPE.to_string(), Box::new(CoverTypeRule));
        rules.insert(constants::KDDCUP_SF.to_string(), Box::new(ConnectionLabelRule));
        rules.insert(constants::KDDCUP_HTTP.to_string(), Box::new(ConnectionLabelRule));
        rules.insert(constants::SHUTTLE.to_string(), Box::new(ShuttleRule));
        rules.insert(constants::CREDITCARD.to_string(), Box::new(PassThroughRule));

        Self { rules }
    }

    /// Get the rule registered for a dataset.
    pub fn get_rule(&self, dataset_id: &str) -> Option<&dyn LabelRule> {
        self.rules.get(dataset_id).map(|r| r.as_ref())
    }

    /// Normalize a raw dataset using the rule registered for `dataset_id`.
    pub fn normalize(&self, dataset_id: &str, raw: RawDataset) -> Result<NormalizedDataset> {
        let rule = self
            .get_rule(dataset_id)
            .ok_or_else(|| PrepError::UnknownDataset(dataset_id.to_string()))?;
        normalize(dataset_id, raw, rule)
    }

    /// List all registered dataset identifiers.
    pub fn list_datasets(&self) -> Vec<&str> {
        self.rules.keys().map(|k| k.as_str()).collect()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}
