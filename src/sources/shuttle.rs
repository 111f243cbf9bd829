use super::fetch::CachedFetcher;
use super::DatasetSource;
use crate::constants::SHUTTLE;
use crate::dataset::{FeatureValue, LabelValue, RawDataset};
use crate::error::{PrepError, Result};
use tracing::{info, instrument};

const SHUTTLE_URL: &str = "https://www.openml.org/data/get_csv/16787463/shuttle.csv";
const SHUTTLE_FILE: &str = "shuttle.csv";
const CLASS_COLUMN: &str = "class";

/// Statlog shuttle telemetry: nine integer sensor readings per frame, each
/// assigned one of seven flight phases. Served as a CSV export by OpenML.
pub struct ShuttleSource {
    fetcher: CachedFetcher,
}

impl ShuttleSource {
    pub fn new(fetcher: CachedFetcher) -> Self {
        Self { fetcher }
    }
}

#[async_trait::async_trait]
impl DatasetSource for ShuttleSource {
    fn dataset_id(&self) -> &'static str {
        SHUTTLE
    }

    #[instrument(skip(self))]
    async fn fetch(&self) -> Result<RawDataset> {
        let data = self.fetcher.fetch(SHUTTLE, SHUTTLE_FILE, SHUTTLE_URL).await?;
        let raw = parse_shuttle(&data)?;
        info!("Fetched {} shuttle telemetry rows", raw.nrow());
        Ok(raw)
    }
}

/// Parse the shuttle CSV. The header names the sensors; the `class` column
/// carries the flight phase and becomes the native label vector.
fn parse_shuttle(data: &[u8]) -> Result<RawDataset> {
    let mut reader = csv::Reader::from_reader(data);

    let headers = reader.headers()?.clone();
    let class_idx = headers
        .iter()
        .position(|h| h == CLASS_COLUMN)
        .ok_or_else(|| PrepError::MissingColumn {
            dataset: SHUTTLE.to_string(),
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
                dataset: SHUTTLE.to_string(),
                message: format!("expected {} fields, found {}", headers.len(), record.len()),
            });
        }
        let mut row = Vec::with_capacity(columns.len());
        for (i, field) in record.iter().enumerate() {
            let value = field.parse::<i64>().map_err(|_| PrepError::Malformed {
                dataset: SHUTTLE.to_string(),
                message: format!("non-integer value '{field}'"),
            })?;
            if i == class_idx {
                labels.push(LabelValue::Int(value));
            } else {
                row.push(FeatureValue::Int(value));
            }
        }
        rows.push(row);
    }

    Ok(RawDataset::new(columns, rows, labels))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "A1,A2,A3,A4,A5,A6,A7,A8,A9,class";

    #[test]
    fn parses_sensor_columns_and_class_labels() {
        let data = format!("{HEADER}\n37,0,77,0,28,0,40,48,8,1\n55,0,92,0,-4,0,37,95,58,4\n");
        let raw = parse_shuttle(data.as_bytes()).unwrap();

        assert_eq!(raw.columns.len(), 9);
        assert_eq!(raw.labels, vec![LabelValue::Int(1), LabelValue::Int(4)]);
        assert_eq!(raw.rows[1][4], FeatureValue::Int(-4));
    }

    #[test]
    fn missing_class_column_is_an_error() {
        let err = parse_shuttle(b"A1,A2\n1,2\n").unwrap_err();
        assert!(matches!(err, PrepError::MissingColumn { .. }));
    }

    #[test]
    fn non_integer_telemetry_is_rejected() {
        let data = format!("{HEADER}\n37,0,77,0,28,0,40,48,x,1\n");
        assert!(parse_shuttle(data.as_bytes()).is_err());
    }
}
