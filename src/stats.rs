use crate::dataset::NormalizedDataset;
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Summary attributes of one prepared dataset. `anomaly_percentage` is the
/// fraction of rows labeled anomalous, in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetStats {
    pub name: String,
    pub ncol: usize,
    pub nrow: usize,
    pub anomaly_percentage: f64,
}

impl DatasetStats {
    pub fn from_dataset(dataset: &NormalizedDataset) -> Self {
        Self {
            name: dataset.name.clone(),
            ncol: dataset.ncol(),
            nrow: dataset.nrow(),
            anomaly_percentage: dataset.anomaly_fraction(),
        }
    }
}

/// Render the stats table as a human-readable report, one row per dataset in
/// processing order.
pub fn render_report(stats: &[DatasetStats]) -> String {
    let name_width = stats
        .iter()
        .map(|s| s.name.len())
        .chain(std::iter::once("name".len()))
        .max()
        .unwrap_or(4);

    let mut report = String::new();
    report.push_str("Attributes of the datasets used\n");
    report.push_str("--------------------------------\n");
    report.push_str(&format!(
        "{:<name_width$}  {:>6}  {:>9}  {:>18}\n",
        "name", "ncol", "nrow", "anomaly_percentage"
    ));
    for row in stats {
        report.push_str(&format!(
            "{:<name_width$}  {:>6}  {:>9}  {:>18.6}\n",
            row.name, row.ncol, row.nrow, row.anomaly_percentage
        ));
    }
    report
}

#[derive(Debug, Serialize)]
struct StatsArtifact<'a> {
    prepared_at: DateTime<Utc>,
    datasets: &'a [DatasetStats],
}

/// Serialize the stats rows as JSON next to the prepared tables. Returns the
/// artifact path.
pub fn write_stats_json(stats: &[DatasetStats], output_dir: &Path) -> Result<String> {
    fs::create_dir_all(output_dir)?;
    let path = output_dir.join("stats.json");

    let artifact = StatsArtifact {
        prepared_at: Utc::now(),
        datasets: stats,
    };
    let json_content = serde_json::to_string_pretty(&artifact)?;
    fs::write(&path, json_content)?;

    Ok(path.to_string_lossy().to_string())
}
