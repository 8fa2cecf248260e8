//! Client helpers for the Quiver seismic analysis service.
//!
//! * [`data`] reads `[{time, value}]` recordings and normalizes their time
//!   axis for charting.
//! * [`client`] queries the service for detection, spectrogram and lander
//!   data of a catalogued recording.
//! * [`catalog`] lists the known recordings per planet.

pub mod catalog;
pub mod client;
pub mod config;
pub mod data;
pub mod error;
mod http;

pub use catalog::{Planet, RecordingId};
pub use client::{DetectionSummary, RemoteClient, Resource};
pub use config::ServiceConfig;
pub use data::loader::{DatasetLoader, DatasetSource};
pub use data::model::{RelativeSeries, Sample, UtcSample, UtcTimestamp};
pub use error::{QuiverError, Result};
