use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Sample – one record of a raw recording
// ---------------------------------------------------------------------------

/// A single `{time, value}` record as stored in the JSON recordings.
/// `time` is in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub time: f64,
    pub value: f64,
}

impl Sample {
    pub fn new(time: f64, value: f64) -> Self {
        Self { time, value }
    }
}

// ---------------------------------------------------------------------------
// Absolute (UTC seconds) series
// ---------------------------------------------------------------------------

/// Seconds since the Unix epoch, UTC.  Serialized as a bare number so chart
/// front-ends can consume it directly.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UtcTimestamp(pub f64);

impl UtcTimestamp {
    pub fn from_millis(ms: f64) -> Self {
        UtcTimestamp(ms / 1000.0)
    }

    pub fn as_secs(&self) -> f64 {
        self.0
    }
}

/// A sample whose time axis has been rescaled to UTC seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UtcSample {
    pub time: UtcTimestamp,
    pub value: f64,
}

// ---------------------------------------------------------------------------
// Relative series
// ---------------------------------------------------------------------------

/// Parallel time / value arrays with time measured from the first sample.
///
/// `times` keeps the raw unit of the recording (milliseconds).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelativeSeries {
    pub times: Vec<f64>,
    pub values: Vec<f64>,
}

impl RelativeSeries {
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Elapsed time of the last sample (0 for an empty series).
    pub fn duration(&self) -> f64 {
        self.times.last().copied().unwrap_or(0.0)
    }

    /// `[t, v]` pairs, the form plotting widgets want.
    pub fn points(&self) -> impl Iterator<Item = [f64; 2]> + '_ {
        self.times
            .iter()
            .zip(self.values.iter())
            .map(|(&t, &v)| [t, v])
    }
}
