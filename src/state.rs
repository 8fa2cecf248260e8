use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use serde_json::Value as JsonValue;

use quiver::{DetectionSummary, Planet, RecordingId, RelativeSeries, Resource};

use crate::tasks::{AppEvent, AppTask, Failure, RecordingKey};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// What the chart is currently showing.
#[derive(Debug, Clone, PartialEq)]
pub enum WaveformOrigin {
    Catalog(RecordingKey),
    File(PathBuf),
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Planet whose catalog populates the recording selector.
    pub planet: Planet,

    /// Currently selected recording (None until the user picks one).
    pub selected: Option<RecordingKey>,

    /// Waveform on screen and where it came from.
    pub waveform: Option<(WaveformOrigin, RelativeSeries)>,

    /// Service responses for the selected recording.
    pub results: HashMap<Resource, JsonValue>,

    /// Requests still in flight for the selected recording.
    pub pending: HashSet<Resource>,

    /// Whether the waveform is still loading.
    pub loading: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            planet: Planet::Mars,
            selected: None,
            waveform: None,
            results: HashMap::new(),
            pending: HashSet::new(),
            loading: false,
            status_message: None,
        }
    }
}

impl AppState {
    /// Switch planet; the recording selection belongs to the old catalog.
    pub fn set_planet(&mut self, planet: Planet) {
        if self.planet != planet {
            self.planet = planet;
            self.selected = None;
            self.results.clear();
            self.pending.clear();
        }
    }

    /// Select a recording and return the requests needed to show it.
    pub fn select_recording(&mut self, filename: &str) -> Vec<AppTask> {
        let key = RecordingKey {
            planet: self.planet,
            filename: filename.to_string(),
        };
        if self.selected.as_ref() == Some(&key) {
            return Vec::new();
        }

        self.selected = Some(key.clone());
        self.results.clear();
        self.pending = HashSet::from([Resource::DetectionSeries]);
        self.loading = true;
        self.status_message = None;

        vec![
            AppTask::LoadWaveform(key.clone()),
            AppTask::Fetch(key, Resource::DetectionSeries),
        ]
    }

    /// Ask the service for another representation of the selected recording.
    pub fn request(&mut self, resource: Resource) -> Option<AppTask> {
        let key = self.selected.clone()?;
        if !self.pending.insert(resource) {
            return None;
        }
        Some(AppTask::Fetch(key, resource))
    }

    pub fn begin_open_file(&mut self) {
        self.loading = true;
        self.status_message = None;
    }

    /// Fold a worker event into the state.  Results for a recording that is
    /// no longer selected are dropped.
    pub fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::WaveformLoaded(key, series) => {
                if !self.is_current(&key) {
                    log::debug!("Dropping stale waveform for {}", key.filename);
                    return;
                }
                log::info!("Loaded {} samples for {}", series.len(), key.filename);
                self.waveform = Some((WaveformOrigin::Catalog(key), series));
                self.loading = false;
            }

            AppEvent::FileLoaded(path, series) => {
                log::info!("Loaded {} samples from {}", series.len(), path.display());
                self.waveform = Some((WaveformOrigin::File(path), series));
                self.loading = false;
            }

            AppEvent::Fetched(key, resource, value) => {
                if !self.is_current(&key) {
                    log::debug!("Dropping stale {resource} for {}", key.filename);
                    return;
                }
                self.pending.remove(&resource);
                self.results.insert(resource, value);
            }

            AppEvent::Failed(failure) => self.apply_failure(failure),
        }
    }

    fn apply_failure(&mut self, failure: Failure) {
        if let Some(key) = &failure.key {
            if !self.is_current(key) {
                return;
            }
        }
        match failure.resource {
            Some(resource) => {
                self.pending.remove(&resource);
                self.status_message = Some(format!("{resource}: {}", failure.message));
            }
            None => {
                self.loading = false;
                self.status_message = Some(format!("Error: {}", failure.message));
            }
        }
    }

    fn is_current(&self, key: &RecordingKey) -> bool {
        self.selected.as_ref() == Some(key)
    }

    /// Arrival times reported for the selected recording, if any.
    pub fn detection(&self) -> Option<DetectionSummary> {
        self.results
            .get(&Resource::DetectionSeries)
            .and_then(DetectionSummary::from_value)
    }

    /// Label for the selected recording in widgets.
    pub fn selected_label(&self) -> String {
        match &self.selected {
            Some(key) => recording_label(&key.filename),
            None => "Select a recording…".to_string(),
        }
    }
}

/// Human-friendly label for a catalog filename, falling back to the name.
pub fn recording_label(filename: &str) -> String {
    RecordingId::parse(filename)
        .map(|id| id.label())
        .unwrap_or_else(|| filename.to_string())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const FILE: &str = "XB.ELYSE.02.BHV.2022-01-02HR04_evid0006.json";

    fn key(filename: &str) -> RecordingKey {
        RecordingKey {
            planet: Planet::Mars,
            filename: filename.to_string(),
        }
    }

    fn series() -> RelativeSeries {
        RelativeSeries {
            times: vec![0.0, 10.0],
            values: vec![1.0, 2.0],
        }
    }

    #[test]
    fn selecting_requests_waveform_and_detection() {
        let mut state = AppState::default();
        let tasks = state.select_recording(FILE);

        assert_eq!(tasks.len(), 2);
        assert!(matches!(&tasks[0], AppTask::LoadWaveform(k) if k == &key(FILE)));
        assert!(matches!(&tasks[1], AppTask::Fetch(_, Resource::DetectionSeries)));
        assert!(state.loading);

        // Re-selecting the same recording is a no-op.
        assert!(state.select_recording(FILE).is_empty());
    }

    #[test]
    fn stale_results_are_dropped() {
        let mut state = AppState::default();
        state.select_recording(FILE);
        state.select_recording("other.json");

        state.apply_event(AppEvent::WaveformLoaded(key(FILE), series()));
        state.apply_event(AppEvent::Fetched(key(FILE), Resource::DetectionSeries, json!({})));

        assert!(state.waveform.is_none());
        assert!(state.results.is_empty());
        assert!(state.loading);
    }

    #[test]
    fn results_land_for_current_recording() {
        let mut state = AppState::default();
        state.select_recording(FILE);

        state.apply_event(AppEvent::WaveformLoaded(key(FILE), series()));
        state.apply_event(AppEvent::Fetched(
            key(FILE),
            Resource::DetectionSeries,
            json!({"planet": "mars", "filename": FILE, "arr_time": null, "arr_time_pred": 42.0}),
        ));

        assert!(!state.loading);
        assert!(state.pending.is_empty());
        assert_eq!(state.detection().unwrap().predicted_arrival, Some(42.0));
    }

    #[test]
    fn failures_surface_as_status() {
        let mut state = AppState::default();
        state.select_recording(FILE);
        state.apply_event(AppEvent::Failed(Failure {
            key: Some(key(FILE)),
            resource: Some(Resource::DetectionSeries),
            message: "HTTP error! status: 500".to_string(),
        }));

        assert!(state.pending.is_empty());
        assert_eq!(
            state.status_message.as_deref(),
            Some("STA/LTA detection: HTTP error! status: 500")
        );
    }

    #[test]
    fn duplicate_requests_are_not_sent() {
        let mut state = AppState::default();
        assert!(state.request(Resource::Spectrogram).is_none());

        state.select_recording(FILE);
        assert!(state.request(Resource::Spectrogram).is_some());
        assert!(state.request(Resource::Spectrogram).is_none());
        assert!(state.request(Resource::DetectionSeries).is_none());
    }

    #[test]
    fn switching_planet_clears_selection() {
        let mut state = AppState::default();
        state.select_recording(FILE);
        state.set_planet(Planet::Moon);
        assert!(state.selected.is_none());
        assert_eq!(state.selected_label(), "Select a recording…");
        assert_eq!(recording_label("plain.json"), "plain.json");
    }
}
