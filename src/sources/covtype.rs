use super::fetch::{gunzip, CachedFetcher};
use super::DatasetSource;
use crate::constants::COVTYPE;
use crate::dataset::{FeatureValue, LabelValue, RawDataset};
use crate::error::{PrepError, Result};
use tracing::{info, instrument};

const COVTYPE_URL: &str =
    "https://archive.ics.uci.edu/ml/machine-learning-databases/covtype/covtype.data.gz";
const COVTYPE_FILE: &str = "covtype.data.gz";

/// Number of cartographic feature columns; the 55th column is the cover type.
const FEATURE_COUNT: usize = 54;

/// UCI Forest Cover Type dataset: 581k cells of cartographic variables, each
/// labeled with one of seven forest cover types.
pub struct CovTypeSource {
    fetcher: CachedFetcher,
}

impl CovTypeSource {
    pub fn new(fetcher: CachedFetcher) -> Self {
        Self { fetcher }
    }
}

#[async_trait::async_trait]
impl DatasetSource for CovTypeSource {
    fn dataset_id(&self) -> &'static str {
        COVTYPE
    }

    #[instrument(skip(self))]
    async fn fetch(&self) -> Result<RawDataset> {
        let archive = self.fetcher.fetch(COVTYPE, COVTYPE_FILE, COVTYPE_URL).await?;
        let data = gunzip(&archive)?;
        let raw = parse_covtype(&data)?;
        info!("Fetched {} forest cover rows", raw.nrow());
        Ok(raw)
    }
}

/// Parse the headerless covtype CSV: 54 integer features followed by the
/// integer cover type.
fn parse_covtype(data: &[u8]) -> Result<RawDataset> {
    let mut reader = csv::ReaderBuilder::new().has_headers(false).from_reader(data);

    let columns = (0..FEATURE_COUNT).map(|i| format!("x{i}")).collect();
    let mut rows = Vec::new();
    let mut labels = Vec::new();

    for record in reader.records() {
        let record = record?;
        if record.len() != FEATURE_COUNT + 1 {
            return Err(PrepError::Malformed {
                dataset: COVTYPE.to_string(),
                message: format!("expected {} fields, found {}", FEATURE_COUNT + 1, record.len()),
            });
        }

        let mut row = Vec::with_capacity(FEATURE_COUNT);
        for field in record.iter().take(FEATURE_COUNT) {
            let value = field.parse::<i64>().map_err(|_| PrepError::Malformed {
                dataset: COVTYPE.to_string(),
                message: format!("non-integer feature value '{field}'"),
            })?;
            row.push(FeatureValue::Int(value));
        }
        let class = record[FEATURE_COUNT]
            .parse::<i64>()
            .map_err(|_| PrepError::Malformed {
                dataset: COVTYPE.to_string(),
                message: format!("non-integer cover type '{}'", &record[FEATURE_COUNT]),
            })?;

        rows.push(row);
        labels.push(LabelValue::Int(class));
    }

    Ok(RawDataset::new(columns, rows, labels))
}
