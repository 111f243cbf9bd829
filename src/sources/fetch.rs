use crate::config::FetchConfig;
use crate::error::{PrepError, Result};
use flate2::read::GzDecoder;
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

/// HTTP fetcher with a local file cache.
///
/// Downloaded archives are written under the cache directory and read back on
/// later runs, so a batch can be re-run without hitting the dataset mirrors
/// again.
#[derive(Clone)]
pub struct CachedFetcher {
    client: reqwest::Client,
    cache_dir: PathBuf,
}

impl CachedFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            cache_dir: PathBuf::from(&config.cache_dir),
        })
    }

    /// Return the raw bytes for `file_name`, downloading from `url` on a
    /// cache miss. Any retrieval failure is fatal and carries the dataset
    /// identifier.
    pub async fn fetch(&self, dataset_id: &str, file_name: &str, url: &str) -> Result<Vec<u8>> {
        let cache_path = self.cache_dir.join(file_name);
        if cache_path.exists() {
            debug!("Cache hit for {} at {}", dataset_id, cache_path.display());
            return fs::read(&cache_path).map_err(|e| PrepError::Source {
                dataset: dataset_id.to_string(),
                message: format!("failed to read cached file {}: {e}", cache_path.display()),
            });
        }

        info!("Downloading {} from {}", dataset_id, url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| PrepError::Source {
                dataset: dataset_id.to_string(),
                message: format!("download of {url} failed: {e}"),
            })?;
        let bytes = response.bytes().await.map_err(|e| PrepError::Source {
            dataset: dataset_id.to_string(),
            message: format!("download of {url} was interrupted: {e}"),
        })?;

        fs::create_dir_all(&self.cache_dir)?;
        fs::write(&cache_path, &bytes)?;
        info!(
            "Cached {} bytes for {} at {}",
            bytes.len(),
            dataset_id,
            cache_path.display()
        );

        Ok(bytes.to_vec())
    }
}

/// Decompress a gzip archive fully into memory.
pub fn gunzip(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(bytes);
    let mut decompressed = Vec::new();
    decoder.read_to_end(&mut decompressed)?;
    Ok(decompressed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    #[test]
    fn gunzip_round_trips() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"1,2,3\n4,5,6\n").unwrap();
        let compressed = encoder.finish().unwrap();

        let decompressed = gunzip(&compressed).unwrap();
        assert_eq!(decompressed, b"1,2,3\n4,5,6\n");
    }

    #[test]
    fn gunzip_rejects_garbage() {
        assert!(gunzip(b"definitely not gzip").is_err());
    }

    #[tokio::test]
    async fn fetch_prefers_the_cache() {
        let dir = tempfile::tempdir().unwrap();
        let cache_path = dir.path().join("covtype.data.gz");
        fs::write(&cache_path, b"cached bytes").unwrap();

        let fetcher = CachedFetcher::new(&FetchConfig {
            cache_dir: dir.path().to_string_lossy().to_string(),
            timeout_seconds: 1,
        })
        .unwrap();

        // The URL is unreachable on purpose; the cached file must win.
        let bytes = fetcher
            .fetch("covtype", "covtype.data.gz", "http://127.0.0.1:9/covtype.data.gz")
            .await
            .unwrap();
        assert_eq!(bytes, b"cached bytes");
    }

    #[tokio::test]
    async fn fetch_failure_names_the_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = CachedFetcher::new(&FetchConfig {
            cache_dir: dir.path().to_string_lossy().to_string(),
            timeout_seconds: 1,
        })
        .unwrap();

        let err = fetcher
            .fetch("shuttle", "shuttle.csv", "http://127.0.0.1:9/shuttle.csv")
            .await
            .unwrap_err();
        match err {
            PrepError::Source { dataset, .. } => assert_eq!(dataset, "shuttle"),
            other => panic!("expected Source error, got {other}"),
        }
    }
}
