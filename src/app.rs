use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};

use eframe::egui;

use quiver::{DatasetLoader, RemoteClient, ServiceConfig};

use crate::color::ChartColors;
use crate::state::AppState;
use crate::tasks::{self, AppEvent, Services, TaskSender};
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct QuiverApp {
    pub state: AppState,
    tasks: TaskSender,
    events: Receiver<AppEvent>,
    colors: ChartColors,
}

impl QuiverApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: &ServiceConfig, data_dir: PathBuf) -> Self {
        let (task_tx, task_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        let services = Services {
            loader: DatasetLoader::new(config),
            remote: RemoteClient::new(config),
            data_dir,
        };
        tasks::spawn_task_worker(services, task_rx, event_tx, cc.egui_ctx.clone());

        Self {
            state: AppState::default(),
            tasks: TaskSender::new(task_tx),
            events: event_rx,
            colors: ChartColors::default(),
        }
    }
}

impl eframe::App for QuiverApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Drain finished background work ----
        while let Ok(event) = self.events.try_recv() {
            self.state.apply_event(event);
        }

        // ---- Top panel: menu bar + recording selection ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state, &self.tasks);
        });

        // ---- Right side panel: service results ----
        egui::SidePanel::right("results_panel")
            .default_width(300.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::results_panel(ui, &mut self.state, &self.tasks);
            });

        // ---- Central panel: waveform chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::waveform_plot(ui, &self.state, &self.colors);
        });
    }
}
