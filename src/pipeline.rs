use crate::constants::display_name;
use crate::dataset::NormalizedDataset;
use crate::error::Result;
use crate::normalize::RuleRegistry;
use crate::sources::DatasetSource;
use crate::stats::{render_report, DatasetStats};
use crate::storage::DatasetStore;
use metrics::{counter, histogram};
use std::sync::Arc;
use tracing::{info, instrument};

/// Result of a complete batch run.
#[derive(Debug)]
pub struct BatchOutcome {
    pub stats: Vec<DatasetStats>,
    /// (dataset identifier, storage location) per stored table.
    pub stored: Vec<(String, String)>,
}

/// Drives the benchmark datasets end to end: fetch, normalize, compute
/// stats, persist. Strictly sequential; the first failure aborts the whole
/// batch.
pub struct BatchProcessor {
    sources: Vec<Box<dyn DatasetSource>>,
    registry: RuleRegistry,
    store: Arc<dyn DatasetStore>,
}

impl BatchProcessor {
    pub fn new(sources: Vec<Box<dyn DatasetSource>>, store: Arc<dyn DatasetStore>) -> Self {
        Self {
            sources,
            registry: RuleRegistry::new(),
            store,
        }
    }

    /// Process one dataset: fetch, normalize, persist.
    #[instrument(skip(self, source), fields(dataset = %source.dataset_id()))]
    async fn process_dataset(
        &self,
        source: &dyn DatasetSource,
    ) -> Result<(NormalizedDataset, String)> {
        let dataset_id = source.dataset_id();

        info!("Fetching {}", display_name(dataset_id));
        println!("📡 Fetching {}...", display_name(dataset_id));
        let t_fetch = std::time::Instant::now();
        let raw = source.fetch().await?;
        histogram!("adprep_fetch_duration_seconds", "dataset" => dataset_id)
            .record(t_fetch.elapsed().as_secs_f64());
        info!("Fetched {} raw rows", raw.nrow());

        let normalized = self.registry.normalize(dataset_id, raw)?;
        info!(
            "Normalized to {} rows, anomaly fraction {:.4}",
            normalized.nrow(),
            normalized.anomaly_fraction()
        );
        counter!("adprep_rows_prepared_total", "dataset" => dataset_id)
            .increment(normalized.nrow() as u64);

        let location = self.store.store(&normalized).await?;
        println!(
            "💾 Stored {} ({} rows) at {}",
            dataset_id,
            normalized.nrow(),
            location
        );

        Ok((normalized, location))
    }

    /// Run the full batch in the configured order and print the stats
    /// report.
    pub async fn run(&self) -> Result<BatchOutcome> {
        counter!("adprep_batch_runs_total").increment(1);
        let t_batch = std::time::Instant::now();

        let mut stats = Vec::with_capacity(self.sources.len());
        let mut stored = Vec::with_capacity(self.sources.len());

        for source in &self.sources {
            let (normalized, location) = self.process_dataset(source.as_ref()).await?;
            stats.push(DatasetStats::from_dataset(&normalized));
            stored.push((source.dataset_id().to_string(), location));
            // The table is dropped here; only its stats row survives.
        }

        histogram!("adprep_batch_duration_seconds").record(t_batch.elapsed().as_secs_f64());
        counter!("adprep_datasets_prepared_total").increment(stats.len() as u64);

        println!();
        println!("{}", render_report(&stats));
        info!("Batch complete: {} datasets prepared", stats.len());

        Ok(BatchOutcome { stats, stored })
    }
}
