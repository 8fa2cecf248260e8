use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use quiver::{DetectionSummary, Planet, Resource};

use crate::state::{recording_label, AppState};
use crate::tasks::{AppTask, TaskSender};

/// Longest raw response shown verbatim in the results panel.
const RAW_PREVIEW_CHARS: usize = 4000;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the menu bar with the planet and recording selectors.
pub fn top_bar(ui: &mut Ui, state: &mut AppState, tasks: &TaskSender) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open dataset…").clicked() {
                open_file_dialog(state, tasks);
                ui.close_menu();
            }
        });

        ui.separator();

        for planet in Planet::ALL {
            if ui
                .selectable_label(state.planet == planet, planet.as_str())
                .clicked()
            {
                state.set_planet(planet);
            }
        }

        ui.separator();

        let mut chosen: Option<&'static str> = None;
        egui::ComboBox::from_id_salt("recording")
            .selected_text(state.selected_label())
            .width(320.0)
            .show_ui(ui, |ui: &mut Ui| {
                for &name in state.planet.filenames() {
                    let is_selected = state
                        .selected
                        .as_ref()
                        .is_some_and(|key| key.filename == name);
                    if ui
                        .selectable_label(is_selected, recording_label(name))
                        .on_hover_text(name)
                        .clicked()
                    {
                        chosen = Some(name);
                    }
                }
            });

        if let Some(name) = chosen {
            for task in state.select_recording(name) {
                tasks.send(task);
            }
        }

        if state.loading || !state.pending.is_empty() {
            ui.spinner();
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Right side panel – service results
// ---------------------------------------------------------------------------

/// Render the analysis panel: fetch buttons, detection summary, raw bodies.
pub fn results_panel(ui: &mut Ui, state: &mut AppState, tasks: &TaskSender) {
    ui.heading("Analysis");
    ui.separator();

    if state.selected.is_none() {
        ui.label("No recording selected.");
        return;
    }

    ui.horizontal_wrapped(|ui: &mut Ui| {
        for resource in Resource::ALL {
            let busy = state.pending.contains(&resource);
            if ui
                .add_enabled(!busy, egui::Button::new(resource.label()))
                .on_hover_text(format!("GET /{}/…", resource.segment()))
                .clicked()
            {
                if let Some(task) = state.request(resource) {
                    tasks.send(task);
                }
            }
        }
    });
    ui.separator();

    if let Some(summary) = state.detection() {
        ui.strong("Detection");
        detection_table(ui, &summary);
        ui.separator();
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for resource in Resource::ALL {
                let Some(value) = state.results.get(&resource) else {
                    continue;
                };
                egui::CollapsingHeader::new(RichText::new(resource.label()).strong())
                    .id_salt(resource.segment())
                    .default_open(false)
                    .show(ui, |ui: &mut Ui| {
                        let text = serde_json::to_string_pretty(value)
                            .unwrap_or_else(|_| value.to_string());
                        ui.monospace(preview(&text));
                    });
            }
        });
}

fn detection_table(ui: &mut Ui, summary: &DetectionSummary) {
    let fmt_time = |t: Option<f64>| match t {
        Some(t) => format!("{t:.1} s"),
        None => "—".to_string(),
    };
    let rows = [
        ("Planet", summary.planet.clone()),
        ("File", summary.filename.clone()),
        ("Catalogued arrival", fmt_time(summary.arrival)),
        ("Predicted arrival", fmt_time(summary.predicted_arrival)),
    ];

    ui.push_id("detection_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto())
            .column(Column::remainder())
            .body(|mut body| {
                for (field, value) in rows {
                    body.row(18.0, |mut row| {
                        row.col(|ui: &mut Ui| {
                            ui.strong(field);
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(value);
                        });
                    });
                }
            });
    });
}

fn preview(text: &str) -> String {
    match text.char_indices().nth(RAW_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}\n… ({} more bytes)", &text[..cut], text.len() - cut),
        None => text.to_string(),
    }
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState, tasks: &TaskSender) {
    let file = rfd::FileDialog::new()
        .set_title("Open recording")
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        log::info!("Opening {}", path.display());
        state.begin_open_file();
        tasks.send(AppTask::OpenFile(path));
    }
}
