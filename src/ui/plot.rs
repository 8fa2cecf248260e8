use eframe::egui::Ui;
use egui_plot::{Legend, Line, Plot, PlotPoints, VLine};

use crate::color::ChartColors;
use crate::state::{recording_label, AppState, WaveformOrigin};

// ---------------------------------------------------------------------------
// Waveform plot (central panel)
// ---------------------------------------------------------------------------

/// Render the waveform with any arrival markers the service reported.
pub fn waveform_plot(ui: &mut Ui, state: &AppState, colors: &ChartColors) {
    let Some((origin, series)) = &state.waveform else {
        ui.centered_and_justified(|ui: &mut Ui| {
            if state.loading {
                ui.spinner();
            } else {
                ui.heading("Pick a recording to view its waveform  (or File → Open dataset…)");
            }
        });
        return;
    };

    let name = match origin {
        WaveformOrigin::Catalog(key) => recording_label(&key.filename),
        WaveformOrigin::File(path) => path.display().to_string(),
    };

    // Markers only make sense on the trace they were computed for.
    let detection = match origin {
        WaveformOrigin::Catalog(key) if state.selected.as_ref() == Some(key) => state.detection(),
        _ => None,
    };

    // Series times are milliseconds; arrivals come back in seconds.
    let points: PlotPoints = series.points().map(|[t, v]| [t / 1000.0, v]).collect();

    Plot::new("waveform_plot")
        .legend(Legend::default())
        .x_axis_label("Time since first sample (s)")
        .y_axis_label("Velocity")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(points).name(&name).color(colors.trace).width(1.0));

            if let Some(detection) = detection {
                if let Some(t) = detection.arrival {
                    plot_ui.vline(
                        VLine::new(t)
                            .name("Catalogued arrival")
                            .color(colors.catalogued)
                            .width(2.0),
                    );
                }
                if let Some(t) = detection.predicted_arrival {
                    plot_ui.vline(
                        VLine::new(t)
                            .name("Predicted arrival")
                            .color(colors.predicted)
                            .width(2.0),
                    );
                }
            }
        });
}
