//! Background request processing for the viewer.
//!
//! The UI thread never awaits anything.  It posts [`AppTask`]s to a worker
//! thread which owns a tokio runtime, spawns one task per request, and
//! posts each outcome back as an [`AppEvent`].  Several requests can be in
//! flight at once and their completions arrive in any order.

use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use eframe::egui;
use serde_json::Value as JsonValue;

use quiver::{DatasetLoader, DatasetSource, Planet, RelativeSeries, RemoteClient, Resource};

/// The recording a request belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct RecordingKey {
    pub planet: Planet,
    pub filename: String,
}

#[derive(Debug)]
pub(crate) enum AppTask {
    /// Load the waveform of a catalogued recording (relative time axis).
    LoadWaveform(RecordingKey),
    /// Load a dataset file picked by the user.
    OpenFile(PathBuf),
    /// Query the analysis service.
    Fetch(RecordingKey, Resource),
}

#[derive(Debug)]
pub(crate) enum AppEvent {
    WaveformLoaded(RecordingKey, RelativeSeries),
    FileLoaded(PathBuf, RelativeSeries),
    Fetched(RecordingKey, Resource, JsonValue),
    Failed(Failure),
}

/// A request that ended in an error, with enough context to tell whether it
/// is still relevant to what is on screen.
#[derive(Debug)]
pub(crate) struct Failure {
    pub key: Option<RecordingKey>,
    pub resource: Option<Resource>,
    pub message: String,
}

/// Everything the worker needs to serve requests.
#[derive(Clone)]
pub(crate) struct Services {
    pub loader: DatasetLoader,
    pub remote: RemoteClient,
    /// Directory catalogued waveforms are read from when no static root is
    /// configured.
    pub data_dir: PathBuf,
}

/// Spawns the worker thread.  It runs until the task channel closes.
pub(crate) fn spawn_task_worker(
    services: Services,
    task_rx: Receiver<AppTask>,
    event_tx: Sender<AppEvent>,
    repaint: egui::Context,
) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(e) => {
                log::error!("Failed to start async runtime: {e}");
                let _ = event_tx.send(AppEvent::Failed(Failure {
                    key: None,
                    resource: None,
                    message: format!("background worker unavailable: {e}"),
                }));
                return;
            }
        };

        while let Ok(task) = task_rx.recv() {
            let services = services.clone();
            let event_tx = event_tx.clone();
            let repaint = repaint.clone();

            runtime.spawn(async move {
                let event = handle_task(task, &services).await;
                if event_tx.send(event).is_ok() {
                    repaint.request_repaint();
                }
            });
        }
        log::debug!("Task channel closed, worker exiting");
    });
}

async fn handle_task(task: AppTask, services: &Services) -> AppEvent {
    match task {
        AppTask::LoadWaveform(key) => {
            let result = match waveform_source(services, &key.filename) {
                Ok(source) => services.loader.load_relative_from(&source).await,
                Err(e) => Err(e),
            };
            match result {
                Ok(series) => AppEvent::WaveformLoaded(key, series),
                Err(e) => AppEvent::Failed(Failure {
                    key: Some(key),
                    resource: None,
                    message: e.to_string(),
                }),
            }
        }

        AppTask::OpenFile(path) => {
            let source = DatasetSource::File(path.clone());
            match services.loader.load_relative_from(&source).await {
                Ok(series) => AppEvent::FileLoaded(path, series),
                Err(e) => AppEvent::Failed(Failure {
                    key: None,
                    resource: None,
                    message: e.to_string(),
                }),
            }
        }

        AppTask::Fetch(key, resource) => {
            let planet = key.planet.as_str();
            match services.remote.fetch(resource, planet, &key.filename).await {
                Ok(value) => AppEvent::Fetched(key, resource, value),
                Err(e) => AppEvent::Failed(Failure {
                    key: Some(key),
                    resource: Some(resource),
                    message: e.to_string(),
                }),
            }
        }
    }
}

/// Catalog names resolve against the static root when there is one, and
/// against the data directory otherwise.
fn waveform_source(services: &Services, filename: &str) -> quiver::Result<DatasetSource> {
    Ok(match services.loader.resolve(filename)? {
        DatasetSource::File(path) => DatasetSource::File(services.data_dir.join(path)),
        url => url,
    })
}

/// UI-side handle for posting tasks.
pub(crate) struct TaskSender {
    tx: Sender<AppTask>,
}

impl TaskSender {
    pub(crate) fn new(tx: Sender<AppTask>) -> Self {
        Self { tx }
    }

    pub(crate) fn send(&self, task: AppTask) {
        if let Err(e) = self.tx.send(task) {
            log::error!("Background worker is gone, dropping {:?}", e.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiver::ServiceConfig;

    fn services(static_root: Option<&str>) -> Services {
        let config = ServiceConfig::new("http://localhost:8000", static_root).unwrap();
        Services {
            loader: DatasetLoader::new(&config),
            remote: RemoteClient::new(&config),
            data_dir: PathBuf::from("/srv/quiver"),
        }
    }

    #[test]
    fn waveforms_come_from_data_dir_without_static_root() {
        let source = waveform_source(&services(None), "x.json").unwrap();
        assert_eq!(source, DatasetSource::File(PathBuf::from("/srv/quiver/x.json")));
    }

    #[test]
    fn waveforms_come_from_static_root_when_set() {
        let source = waveform_source(&services(Some("http://static.local")), "x.json").unwrap();
        assert_eq!(source.to_string(), "http://static.local/x.json");
    }

    #[tokio::test]
    async fn unreadable_waveform_reports_its_recording() {
        let key = RecordingKey {
            planet: Planet::Moon,
            filename: "missing.json".to_string(),
        };
        let event = handle_task(AppTask::LoadWaveform(key.clone()), &services(None)).await;

        match event {
            AppEvent::Failed(failure) => {
                assert_eq!(failure.key, Some(key));
                assert!(failure.resource.is_none());
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
