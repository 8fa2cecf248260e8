use std::fmt;
use std::path::{Path, PathBuf};

use reqwest::{Client, Url};

use super::model::{RelativeSeries, Sample, UtcSample};
use super::normalize::{to_relative, to_utc_seconds};
use crate::config::ServiceConfig;
use crate::error::{QuiverError, Result};
use crate::http;

// ---------------------------------------------------------------------------
// Dataset source – where a named recording lives
// ---------------------------------------------------------------------------

/// A resolved dataset location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    Url(Url),
    File(PathBuf),
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetSource::Url(url) => write!(f, "{url}"),
            DatasetSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

// ---------------------------------------------------------------------------
// Loader
// ---------------------------------------------------------------------------

/// Reads `[{time, value}]` recordings and normalizes their time axis.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    http: Client,
    static_root: Option<Url>,
}

impl DatasetLoader {
    pub fn new(config: &ServiceConfig) -> Self {
        Self::with_http_client(Client::new(), config)
    }

    /// Use a caller-provided `reqwest::Client` (shared pool, custom proxy, ...).
    pub fn with_http_client(http: Client, config: &ServiceConfig) -> Self {
        Self {
            http,
            static_root: config.static_root.clone(),
        }
    }

    /// Work out where `name` lives.
    ///
    /// * `http://…` / `https://…` – fetched as-is
    /// * anything else, with a static root configured – joined onto the root
    /// * anything else – a local file path
    pub fn resolve(&self, name: &str) -> Result<DatasetSource> {
        if name.starts_with("http://") || name.starts_with("https://") {
            let url = Url::parse(name)
                .map_err(|e| QuiverError::Config(format!("dataset URL '{name}': {e}")))?;
            return Ok(DatasetSource::Url(url));
        }

        match &self.static_root {
            Some(root) => root
                .join(name.trim_start_matches('/'))
                .map(DatasetSource::Url)
                .map_err(|e| QuiverError::Config(format!("dataset name '{name}': {e}"))),
            None => Ok(DatasetSource::File(PathBuf::from(name))),
        }
    }

    /// Load `name` with every timestamp converted from milliseconds to UTC
    /// seconds.
    pub async fn load_absolute(&self, name: &str) -> Result<Vec<UtcSample>> {
        let source = self
            .resolve(name)
            .inspect_err(|e| log::error!("Error reading JSON file {name}: {e}"))?;
        self.load_absolute_from(&source).await
    }

    /// Load `name` with time measured from its first sample.
    pub async fn load_relative(&self, name: &str) -> Result<RelativeSeries> {
        let source = self
            .resolve(name)
            .inspect_err(|e| log::error!("Error reading JSON file {name}: {e}"))?;
        self.load_relative_from(&source).await
    }

    pub async fn load_absolute_from(&self, source: &DatasetSource) -> Result<Vec<UtcSample>> {
        let samples = self
            .read_samples(source)
            .await
            .inspect_err(|e| log::error!("Error reading JSON file {source}: {e}"))?;

        let series = to_utc_seconds(&samples);
        log::debug!("Loaded {} samples from {source} (UTC seconds)", series.len());
        Ok(series)
    }

    pub async fn load_relative_from(&self, source: &DatasetSource) -> Result<RelativeSeries> {
        let samples = self
            .read_samples(source)
            .await
            .inspect_err(|e| log::error!("Error reading JSON file {source}: {e}"))?;

        let series = to_relative(&samples)
            .ok_or_else(|| QuiverError::EmptyDataset {
                resource: source.to_string(),
            })
            .inspect_err(|e| log::error!("Error normalizing {source}: {e}"))?;

        if let (Some(first), Some(last)) = (samples.first(), samples.last()) {
            log::info!(
                "{source}: start {} end {} duration {}",
                first.time,
                last.time,
                last.time - first.time
            );
        }
        Ok(series)
    }

    async fn read_samples(&self, source: &DatasetSource) -> Result<Vec<Sample>> {
        match source {
            DatasetSource::Url(url) => http::get_json(&self.http, url.clone()).await,
            DatasetSource::File(path) => {
                let bytes = read_file(path).await?;
                http::decode(&path.display().to_string(), &bytes)
            }
        }
    }
}

async fn read_file(path: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(path).await.map_err(|source| QuiverError::Io {
        path: path.to_path_buf(),
        source,
    })
}
