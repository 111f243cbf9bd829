use super::{parse_cell, DatasetSource};
use crate::constants::CREDITCARD;
use crate::dataset::{LabelValue, RawDataset};
use crate::error::{PrepError, Result};
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;
use tracing::{info, instrument};

const CLASS_COLUMN: &str = "Class";

/// Credit-card fraud dataset (Dal Pozzolo et al., "Calibrating Probability
/// with Undersampling for Unbalanced Classification", CIDM 2015). The file is
/// not freely mirrored, so it is read from a local CSV with a `Class` column
/// that already follows the binary anomaly convention.
pub struct CreditCardSource {
    path: PathBuf,
}

impl CreditCardSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl DatasetSource for CreditCardSource {
    fn dataset_id(&self) -> &'static str {
        CREDITCARD
    }

    #[instrument(skip(self))]
    async fn fetch(&self) -> Result<RawDataset> {
        let mut data = Vec::new();
        File::open(&self.path)
            .and_then(|mut f| f.read_to_end(&mut data))
            .map_err(|e| PrepError::Source {
                dataset: CREDITCARD.to_string(),
                message: format!("cannot read {}: {e}", self.path.display()),
            })?;

        let raw = parse_creditcard(&data)?;
        info!("Read {} credit card transactions from {}", raw.nrow(), self.path.display());
        Ok(raw)
    }
}

/// Parse the transaction CSV. The `Class` column (0 = legitimate, 1 = fraud)
/// becomes the native label vector; the remaining columns stay as features.
fn parse_creditcard(data: &[u8]) -> Result<RawDataset> {
    let mut reader = csv::Reader::from_reader(data);

    let headers = reader.headers()?.clone();
    let class_idx = headers
        .iter()
        .position(|h| h == CLASS_COLUMN)
        .ok_or_else(|| PrepError::MissingColumn {
            dataset: CREDITCARD.to_string(),
            column: CLASS_COLUMN.to_string(),
        })?;
    let columns: Vec<String> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != class_idx)
        .map(|(_, h)| h.to_string())
        .collect();

    let mut rows = Vec::new();
    let mut labels = Vec::new();

    for record in reader.records() {
        let record = record?;
        if record.len() != headers.len() {
            return Err(PrepError::Malformed {
                dataset: CREDITCARD.to_string(),
                message: format!("expected {} fields, found {}", headers.len(), record.len()),
            });
        }

        let mut row = Vec::with_capacity(columns.len());
        for (i, field) in record.iter().enumerate() {
            if i == class_idx {
                let class = field.parse::<i64>().map_err(|_| PrepError::Malformed {
                    dataset: CREDITCARD.to_string(),
                    message: format!("non-integer class value '{field}'"),
                })?;
                labels.push(LabelValue::Int(class));
            } else {
                row.push(parse_cell(field));
            }
        }
        rows.push(row);
    }

    Ok(RawDataset::new(columns, rows, labels))
}
