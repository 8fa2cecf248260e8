//! Remote data client for the analysis service.
//!
//! Every endpoint has the same shape:
//!
//! ```text
//! GET {base}/{segment}/{planet}?q={filename}
//! ```
//!
//! and answers with a JSON body this client passes through untouched.

use std::fmt;

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::config::ServiceConfig;
use crate::error::{QuiverError, Result};
use crate::http;

// ---------------------------------------------------------------------------
// Resource – which derived representation to ask for
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// STA/LTA detection series.
    DetectionSeries,
    Spectrogram,
    /// Raw lander / instrument data.
    InstrumentData,
}

impl Resource {
    pub const ALL: [Resource; 3] = [
        Resource::DetectionSeries,
        Resource::Spectrogram,
        Resource::InstrumentData,
    ];

    /// URL path segment.  `spectogram` is spelled the way the service spells it.
    pub fn segment(&self) -> &'static str {
        match self {
            Resource::DetectionSeries => "stalta",
            Resource::Spectrogram => "spectogram",
            Resource::InstrumentData => "landerdata",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Resource::DetectionSeries => "STA/LTA detection",
            Resource::Spectrogram => "Spectrogram",
            Resource::InstrumentData => "Lander data",
        }
    }

    /// Name of the client operation, used in log lines.
    fn operation(&self) -> &'static str {
        match self {
            Resource::DetectionSeries => "fetch_detection_series",
            Resource::Spectrogram => "fetch_spectrogram",
            Resource::InstrumentData => "fetch_instrument_data",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Stateless client for the analysis service.  No retries, no timeout, no
/// caching: one call is one request.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    http: Client,
    base_url: Url,
}

impl RemoteClient {
    pub fn new(config: &ServiceConfig) -> Self {
        Self::with_http_client(Client::new(), config)
    }

    pub fn with_http_client(http: Client, config: &ServiceConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.clone(),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build `{base}/{segment}/{planet}?q={filename}`.
    ///
    /// `planet` always lands in exactly one path segment; `/`, `?` and `#`
    /// in it are percent-encoded.
    pub fn endpoint(&self, resource: Resource, planet: &str, filename: &str) -> Result<Url> {
        if matches!(planet, "" | "." | "..") {
            return Err(QuiverError::Config(format!("bad planet '{planet}'")));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| QuiverError::Config(format!("base URL '{}' cannot be a base", self.base_url)))?
            .pop_if_empty()
            .push(resource.segment())
            .push(planet);
        url.query_pairs_mut().append_pair("q", filename);
        Ok(url)
    }

    /// Shared request path for all three endpoints.
    pub async fn fetch(&self, resource: Resource, planet: &str, filename: &str) -> Result<JsonValue> {
        let op = resource.operation();

        let url = self
            .endpoint(resource, planet, filename)
            .inspect_err(|e| log::error!("{op} failed for {planet}/{filename}: {e}"))?;

        log::debug!("{op}: GET {url}");
        http::get_json(&self.http, url)
            .await
            .inspect_err(|e| log::error!("{op} failed for {planet}/{filename}: {e}"))
    }

    pub async fn fetch_detection_series(&self, planet: &str, filename: &str) -> Result<JsonValue> {
        self.fetch(Resource::DetectionSeries, planet, filename).await
    }

    pub async fn fetch_spectrogram(&self, planet: &str, filename: &str) -> Result<JsonValue> {
        self.fetch(Resource::Spectrogram, planet, filename).await
    }

    pub async fn fetch_instrument_data(&self, planet: &str, filename: &str) -> Result<JsonValue> {
        self.fetch(Resource::InstrumentData, planet, filename).await
    }
}

// ---------------------------------------------------------------------------
// DetectionSummary – optional typed view of a detection response
// ---------------------------------------------------------------------------

/// What the detection endpoint reports for one recording.  Times are
/// seconds relative to the start of the trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionSummary {
    pub planet: String,
    pub filename: String,
    /// Catalogued arrival, only known for training recordings.
    #[serde(rename = "arr_time", default)]
    pub arrival: Option<f64>,
    /// Arrival predicted by the detector.
    #[serde(rename = "arr_time_pred", default)]
    pub predicted_arrival: Option<f64>,
}

impl DetectionSummary {
    /// Read a detection response; `None` if the body has another shape.
    pub fn from_value(value: &JsonValue) -> Option<Self> {
        Self::deserialize(value).ok()
    }
}
