use super::fetch::{gunzip, CachedFetcher};
use super::DatasetSource;
use crate::constants::{KDDCUP_HTTP, KDDCUP_SF};
use crate::dataset::{FeatureValue, LabelValue, RawDataset};
use crate::error::{PrepError, Result};
use tracing::{info, instrument};

const KDDCUP_URL: &str =
    "https://archive.ics.uci.edu/ml/machine-learning-databases/kddcup99-mld/kddcup.data_10_percent.gz";
const KDDCUP_FILE: &str = "kddcup.data_10_percent.gz";

// Field positions in the 42-column KDD Cup '99 connection record.
const DURATION: usize = 0;
const SERVICE: usize = 2;
const SRC_BYTES: usize = 4;
const DST_BYTES: usize = 5;
const LOGGED_IN: usize = 11;
const LABEL: usize = 41;
const FIELD_COUNT: usize = 42;

/// Which slice of the KDD Cup '99 data to expose.
///
/// `Sf` keeps connections with a successful login and the four
/// `[duration, service, src_bytes, dst_bytes]` features. `Http` further
/// restricts SF to http traffic and drops the now-constant service column;
/// its three remaining features are log-transformed as `ln(x + 0.1)`, which
/// is how this subset is conventionally defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KddSubset {
    Sf,
    Http,
}

/// KDD Cup '99 network intrusion data, 10% split, cut down to one of the two
/// benchmark subsets.
pub struct KddCupSource {
    subset: KddSubset,
    fetcher: CachedFetcher,
}

impl KddCupSource {
    pub fn new(subset: KddSubset, fetcher: CachedFetcher) -> Self {
        Self { subset, fetcher }
    }
}

#[async_trait::async_trait]
impl DatasetSource for KddCupSource {
    fn dataset_id(&self) -> &'static str {
        match self.subset {
            KddSubset::Sf => KDDCUP_SF,
            KddSubset::Http => KDDCUP_HTTP,
        }
    }

    #[instrument(skip(self), fields(subset = ?self.subset))]
    async fn fetch(&self) -> Result<RawDataset> {
        let archive = self.fetcher.fetch(self.dataset_id(), KDDCUP_FILE, KDDCUP_URL).await?;
        let data = gunzip(&archive)?;
        let raw = parse_kddcup(self.subset, &data)?;
        info!("Fetched {} connection records for subset {:?}", raw.nrow(), self.subset);
        Ok(raw)
    }
}

fn parse_int(dataset: &str, field: &str, what: &str) -> Result<i64> {
    field.parse::<i64>().map_err(|_| PrepError::Malformed {
        dataset: dataset.to_string(),
        message: format!("non-integer {what} value '{field}'"),
    })
}

/// Cut the full connection log down to the requested subset.
fn parse_kddcup(subset: KddSubset, data: &[u8]) -> Result<RawDataset> {
    let dataset = match subset {
        KddSubset::Sf => KDDCUP_SF,
        KddSubset::Http => KDDCUP_HTTP,
    };

    let columns: Vec<String> = match subset {
        KddSubset::Sf => vec!["duration", "service", "src_bytes", "dst_bytes"],
        KddSubset::Http => vec!["duration", "src_bytes", "dst_bytes"],
    }
    .into_iter()
    .map(String::from)
    .collect();

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(data);

    let mut rows = Vec::new();
    let mut labels = Vec::new();

    for record in reader.records() {
        let record = record?;
        if record.is_empty() {
            continue;
        }
        if record.len() != FIELD_COUNT {
            return Err(PrepError::Malformed {
                dataset: dataset.to_string(),
                message: format!("expected {FIELD_COUNT} fields, found {}", record.len()),
            });
        }

        // Both subsets keep only connections with a successful login.
        if parse_int(dataset, &record[LOGGED_IN], "logged_in")? != 1 {
            continue;
        }
        let service = &record[SERVICE];
        if subset == KddSubset::Http && service != "http" {
            continue;
        }

        let duration = parse_int(dataset, &record[DURATION], "duration")?;
        let src_bytes = parse_int(dataset, &record[SRC_BYTES], "src_bytes")?;
        let dst_bytes = parse_int(dataset, &record[DST_BYTES], "dst_bytes")?;

        let row = match subset {
            KddSubset::Sf => vec![
                FeatureValue::Int(duration),
                FeatureValue::Text(service.to_string()),
                FeatureValue::Int(src_bytes),
                FeatureValue::Int(dst_bytes),
            ],
            KddSubset::Http => vec![
                FeatureValue::Float(log_transform(duration)),
                FeatureValue::Float(log_transform(src_bytes)),
                FeatureValue::Float(log_transform(dst_bytes)),
            ],
        };

        rows.push(row);
        labels.push(LabelValue::Text(record[LABEL].to_string()));
    }

    Ok(RawDataset::new(columns, rows, labels))
}

fn log_transform(value: i64) -> f64 {
    (value as f64 + 0.1).ln()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build one 42-field connection record with the fields we care about.
    fn record(duration: i64, service: &str, src: i64, dst: i64, logged_in: i64, label: &str) -> String {
        let mut fields = vec!["0".to_string(); FIELD_COUNT];
        fields[DURATION] = duration.to_string();
        fields[1] = "tcp".to_string();
        fields[SERVICE] = service.to_string();
        fields[3] = "SF".to_string();
        fields[SRC_BYTES] = src.to_string();
        fields[DST_BYTES] = dst.to_string();
        fields[LOGGED_IN] = logged_in.to_string();
        fields[LABEL] = label.to_string();
        fields.join(",")
    }

    #[test]
    fn sf_keeps_logged_in_connections_only() {
        let data = format!(
            "{}\n{}\n{}\n",
            record(5, "http", 100, 200, 1, "normal."),
            record(0, "smtp", 10, 20, 0, "normal."),
            record(3, "ftp", 30, 40, 1, "neptune."),
        );

        let raw = parse_kddcup(KddSubset::Sf, data.as_bytes()).unwrap();
        assert_eq!(raw.nrow(), 2);
        assert_eq!(raw.columns, vec!["duration", "service", "src_bytes", "dst_bytes"]);
        assert_eq!(raw.rows[0][1], FeatureValue::Text("http".to_string()));
        assert_eq!(raw.labels, vec![LabelValue::from("normal."), LabelValue::from("neptune.")]);
    }

    #[test]
    fn http_restricts_to_http_traffic_and_log_transforms() {
        let data = format!(
            "{}\n{}\n",
            record(0, "http", 100, 200, 1, "normal."),
            record(5, "ftp", 10, 20, 1, "normal."),
        );

        let raw = parse_kddcup(KddSubset::Http, data.as_bytes()).unwrap();
        assert_eq!(raw.nrow(), 1);
        assert_eq!(raw.columns, vec!["duration", "src_bytes", "dst_bytes"]);
        let FeatureValue::Float(duration) = raw.rows[0][0] else {
            panic!("expected float duration");
        };
        let FeatureValue::Float(src_bytes) = raw.rows[0][1] else {
            panic!("expected float src_bytes");
        };
        assert!((duration - 0.1_f64.ln()).abs() < 1e-12);
        assert!((src_bytes - 100.1_f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn malformed_records_are_rejected() {
        let err = parse_kddcup(KddSubset::Sf, b"1,2,3\n").unwrap_err();
        assert!(matches!(err, PrepError::Malformed { .. }));
    }
}
