use crate::dataset::NormalizedDataset;
use crate::error::{PrepError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Persistence sink for prepared tables, keyed by dataset name.
#[async_trait]
pub trait DatasetStore: Send + Sync {
    /// Store one normalized dataset durably and return its location.
    async fn store(&self, dataset: &NormalizedDataset) -> Result<String>;
}

/// File-backed store writing one CSV table per dataset under the output
/// directory, feature columns first and `target` last.
pub struct CsvFileStore {
    output_dir: PathBuf,
}

impl CsvFileStore {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    fn write_csv(&self, dataset: &NormalizedDataset) -> Result<String> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(format!("{}.csv", dataset.name));

        let mut writer = csv::Writer::from_path(&path)?;

        let mut header: Vec<&str> = dataset.columns.iter().map(|c| c.as_str()).collect();
        header.push("target");
        writer.write_record(&header)?;

        for (row, target) in dataset.rows.iter().zip(dataset.target.iter()) {
            let mut record: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            record.push(target.to_string());
            writer.write_record(&record)?;
        }
        writer.flush()?;

        Ok(path.to_string_lossy().to_string())
    }
}

#[async_trait]
impl DatasetStore for CsvFileStore {
    async fn store(&self, dataset: &NormalizedDataset) -> Result<String> {
        let location = self.write_csv(dataset).map_err(|e| PrepError::Storage {
            dataset: dataset.name.clone(),
            message: e.to_string(),
        })?;
        debug!("Stored {} ({} rows) at {}", dataset.name, dataset.nrow(), location);
        Ok(location)
    }
}

/// In-memory store implementation for development/testing.
pub struct InMemoryStore {
    datasets: Arc<Mutex<HashMap<String, NormalizedDataset>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            datasets: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn get(&self, name: &str) -> Option<NormalizedDataset> {
        self.datasets.lock().unwrap().get(name).cloned()
    }

    pub fn stored_names(&self) -> Vec<String> {
        self.datasets.lock().unwrap().keys().cloned().collect()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DatasetStore for InMemoryStore {
    async fn store(&self, dataset: &NormalizedDataset) -> Result<String> {
        let mut datasets = self.datasets.lock().unwrap();
        datasets.insert(dataset.name.clone(), dataset.clone());

        debug!("Stored {} in memory", dataset.name);
        Ok(format!("mem:{}", dataset.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::FeatureValue;

    fn sample() -> NormalizedDataset {
        NormalizedDataset {
            name: "sample".to_string(),
            columns: vec!["duration".to_string(), "service".to_string()],
            rows: vec![
                vec![FeatureValue::Int(5), FeatureValue::Text("http".to_string())],
                vec![FeatureValue::Int(0), FeatureValue::Text("smtp".to_string())],
            ],
            target: vec![0, 1],
        }
    }

    #[tokio::test]
    async fn csv_store_writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvFileStore::new(dir.path());

        let location = store.store(&sample()).await.unwrap();
        let contents = fs::read_to_string(&location).unwrap();

        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("duration,service,target"));
        assert_eq!(lines.next(), Some("5,http,0"));
        assert_eq!(lines.next(), Some("0,smtp,1"));
        assert_eq!(lines.next(), None);
    }

    #[tokio::test]
    async fn csv_store_surfaces_write_failures_with_the_dataset_name() {
        // A file where the output directory should be makes the write fail.
        let dir = tempfile::tempdir().unwrap();
        let blocked = dir.path().join("blocked");
        fs::write(&blocked, b"").unwrap();

        let store = CsvFileStore::new(&blocked);
        let err = store.store(&sample()).await.unwrap_err();
        match err {
            PrepError::Storage { dataset, .. } => assert_eq!(dataset, "sample"),
            other => panic!("expected Storage error, got {other}"),
        }
    }

    #[tokio::test]
    async fn in_memory_store_round_trips() {
        let store = InMemoryStore::new();
        let dataset = sample();

        let location = store.store(&dataset).await.unwrap();
        assert_eq!(location, "mem:sample");
        assert_eq!(store.get("sample"), Some(dataset));
        assert!(store.get("other").is_none());
    }
}
