use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, GridMark, Legend, Plot};

use crate::chart::layout::format_decade;
use crate::chart::{BarPanel, Scale};
use crate::color::to_color32;
use crate::state::ViewerState;

// ---------------------------------------------------------------------------
// Figure view (central panel)
// ---------------------------------------------------------------------------

/// Render the selected figure, its panels side by side.
pub fn figure_view(ui: &mut Ui, state: &ViewerState) {
    let Some(entry) = state.current() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No chart was produced");
        });
        return;
    };

    let panels = &entry.figure.panels;
    if panels.is_empty() {
        return;
    }
    ui.columns(panels.len(), |columns: &mut [Ui]| {
        for (i, (col, panel)) in columns.iter_mut().zip(panels).enumerate() {
            col.vertical_centered(|ui: &mut Ui| {
                ui.strong(panel.title.as_str());
            });
            bar_panel(col, &format!("{}_{i}", entry.kind), panel);
        }
    });
}

/// One grouped bar chart. Log panels plot `log10(value)` above the lowest
/// decade and relabel the y axis with powers of ten.
fn bar_panel(ui: &mut Ui, id: &str, panel: &BarPanel) {
    let axis = panel.y_axis();
    let log_base = axis.min.log10().round() as i32;
    let width = panel.bar_width();

    let categories = panel.categories.clone();
    let mut plot = Plot::new(id)
        .legend(Legend::default())
        .x_axis_label(panel.x_label.clone())
        .y_axis_label(panel.y_label.clone())
        .allow_drag(true)
        .allow_zoom(true)
        .allow_scroll(true)
        .x_axis_formatter(move |mark: GridMark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            categories.get(idx as usize).cloned().unwrap_or_default()
        });
    if panel.scale == Scale::Log {
        plot = plot.y_axis_formatter(move |mark: GridMark, _range| {
            let k = mark.value.round();
            if (mark.value - k).abs() > 1e-6 {
                return String::new();
            }
            format_decade(k as i32 + log_base)
        });
    }

    plot.show(ui, |plot_ui| {
        for (s_idx, series) in panel.series.iter().enumerate() {
            let offset = panel.bar_offset(s_idx);
            let bars: Vec<Bar> = series
                .values
                .iter()
                .enumerate()
                .filter_map(|(c_idx, &value)| {
                    let height = match panel.scale {
                        Scale::Linear if value.is_finite() => value,
                        Scale::Log if value.is_finite() && value > 0.0 => {
                            value.log10() - f64::from(log_base)
                        }
                        _ => return None,
                    };
                    Some(
                        Bar::new(c_idx as f64 + offset, height)
                            .width(width)
                            .name(format!("{} {}", series.name, panel.categories[c_idx])),
                    )
                })
                .collect();

            let chart = BarChart::new(bars)
                .name(&series.name)
                .color(to_color32(series.color));
            plot_ui.bar_chart(chart);
        }
    });
}
