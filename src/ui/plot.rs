use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::color::generate_palette;
use crate::data::summary;
use crate::state::{AppState, ChartKind};

// ---------------------------------------------------------------------------
// Chart (central panel)
// ---------------------------------------------------------------------------

const HISTOGRAM_BINS: usize = 10;

/// Render the configured chart for the loaded table.
pub fn metric_chart(ui: &mut Ui, state: &AppState) {
    let Some(table) = &state.table else {
        return;
    };

    if !state.has_numeric_columns() {
        ui.colored_label(
            Color32::YELLOW,
            "No numeric columns found; charting is unavailable for this dataset.",
        );
        return;
    }

    let Some(metric) = state.metric_column.as_deref() else {
        ui.label("Pick a metric column to chart.");
        return;
    };

    match (state.chart_kind, state.group_column.as_deref()) {
        (ChartKind::GroupedMean, Some(group)) => {
            let means = summary::group_means(table, metric, group);
            if means.is_empty() {
                ui.label("No data for the selected columns.");
                return;
            }
            let palette = generate_palette(means.len());

            Plot::new("grouped_mean_chart")
                .legend(Legend::default())
                .x_axis_label(group)
                .y_axis_label(format!("mean {metric}"))
                .show_x(false)
                .show(ui, |plot_ui| {
                    for (i, ((label, mean), color)) in
                        means.iter().zip(palette.into_iter()).enumerate()
                    {
                        let bar = Bar::new(i as f64, *mean).width(0.7).fill(color);
                        plot_ui.bar_chart(BarChart::new(vec![bar]).name(label).color(color));
                    }
                });
        }
        _ => {
            let bins = summary::histogram(table, metric, HISTOGRAM_BINS);
            if bins.is_empty() {
                ui.label("No data for the selected column.");
                return;
            }
            // Equal-width bins: infer the bar width from neighbouring centers.
            let bar_width = if bins.len() > 1 {
                bins[1].0 - bins[0].0
            } else {
                1.0
            };
            let bars: Vec<Bar> = bins
                .iter()
                .map(|&(center, count)| {
                    Bar::new(center, count as f64)
                        .width(bar_width * 0.95)
                        .fill(Color32::LIGHT_BLUE)
                })
                .collect();

            Plot::new("histogram_chart")
                .x_axis_label(metric)
                .y_axis_label("count")
                .show(ui, |plot_ui| {
                    plot_ui.bar_chart(BarChart::new(bars).name(metric));
                });
        }
    }
}
