pub mod covtype;
pub mod creditcard;
pub mod fetch;
pub mod kddcup;
pub mod shuttle;

pub use covtype::CovTypeSource;
pub use creditcard::CreditCardSource;
pub use fetch::CachedFetcher;
pub use kddcup::{KddCupSource, KddSubset};
pub use shuttle::ShuttleSource;

use crate::config::Config;
use crate::constants;
use crate::dataset::{FeatureValue, RawDataset};
use crate::error::{PrepError, Result};

/// Core trait that all dataset sources must implement. A source knows how to
/// obtain its raw table — over HTTP or from a local file — and how to split
/// it into feature rows and the native label vector.
#[async_trait::async_trait]
pub trait DatasetSource: Send + Sync {
    /// Unique identifier for this dataset.
    fn dataset_id(&self) -> &'static str;

    /// Fetch the full raw dataset into memory.
    async fn fetch(&self) -> Result<RawDataset>;
}

/// Build the sources for the given dataset identifiers, preserving the order
/// they are passed in.
pub fn build_sources(dataset_ids: &[&str], config: &Config) -> Result<Vec<Box<dyn DatasetSource>>> {
    let fetcher = CachedFetcher::new(&config.fetch)?;
    dataset_ids
        .iter()
        .map(|id| create_source(id, &fetcher, config))
        .collect()
}

fn create_source(
    dataset_id: &str,
    fetcher: &CachedFetcher,
    config: &Config,
) -> Result<Box<dyn DatasetSource>> {
    match dataset_id {
        constants::COVTYPE => Ok(Box::new(CovTypeSource::new(fetcher.clone()))),
        constants::KDDCUP_SF => Ok(Box::new(KddCupSource::new(KddSubset::Sf, fetcher.clone()))),
        constants::KDDCUP_HTTP => Ok(Box::new(KddCupSource::new(KddSubset::Http, fetcher.clone()))),
        constants::SHUTTLE => Ok(Box::new(ShuttleSource::new(fetcher.clone()))),
        constants::CREDITCARD => Ok(Box::new(CreditCardSource::new(&config.creditcard.path))),
        other => Err(PrepError::UnknownDataset(other.to_string())),
    }
}

/// Parse one CSV cell into the narrowest fitting feature value.
pub(crate) fn parse_cell(field: &str) -> FeatureValue {
    if let Ok(v) = field.parse::<i64>() {
        FeatureValue::Int(v)
    } else if let Ok(v) = field.parse::<f64>() {
        FeatureValue::Float(v)
    } else {
        FeatureValue::Text(field.to_string())
    }
}
