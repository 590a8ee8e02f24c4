use eframe::egui::{self, Color32, RichText, ScrollArea, TextEdit, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::insight::InsightClient;
use crate::report;
use crate::state::AppState;

const REPORT_TITLE: &str = "AnalytiQ – Executive AI Report";
const REPORT_FILENAME: &str = "AnalytiQ_Report.pdf";
const PREVIEW_ROWS: usize = 5;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open CSV…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some((rows, cols)) = state.dataset_shape() {
            ui.label(format!("Rows: {rows} | Columns: {cols}"));
        } else {
            ui.label("No dataset loaded");
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – chart configuration and statistics
// ---------------------------------------------------------------------------

/// Render the chart-configuration / statistics panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Chart");
    ui.separator();

    let Some(table) = &state.table else {
        ui.label("No dataset loaded.");
        return;
    };

    let numeric: Vec<String> = table.numeric_columns().iter().map(|s| s.to_string()).collect();
    let categorical: Vec<String> = table
        .categorical_columns()
        .iter()
        .map(|s| s.to_string())
        .collect();

    if numeric.is_empty() {
        ui.colored_label(Color32::YELLOW, "No numeric columns to chart.");
    } else {
        ui.strong("Metric");
        let current_metric = state.metric_column.clone().unwrap_or_default();
        egui::ComboBox::from_id_salt("metric_column")
            .selected_text(&current_metric)
            .show_ui(ui, |ui: &mut Ui| {
                for col in &numeric {
                    if ui
                        .selectable_label(current_metric == *col, col)
                        .clicked()
                    {
                        state.set_metric_column(col.clone());
                    }
                }
            });

        ui.add_space(4.0);
        ui.strong("Group by");
        let current_group = state.group_column.clone();
        let group_label = current_group.clone().unwrap_or_else(|| "(none)".to_string());
        egui::ComboBox::from_id_salt("group_column")
            .selected_text(group_label)
            .show_ui(ui, |ui: &mut Ui| {
                if ui
                    .selectable_label(current_group.is_none(), "(none)")
                    .clicked()
                {
                    state.set_group_column(None);
                }
                for col in &categorical {
                    if ui
                        .selectable_label(current_group.as_deref() == Some(col), col)
                        .clicked()
                    {
                        state.set_group_column(Some(col.clone()));
                    }
                }
            });
    }

    ui.separator();
    ui.heading("Statistics");
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            if state.summaries.is_empty() {
                ui.label("No numeric columns.");
                return;
            }
            for (name, s) in &state.summaries {
                egui::CollapsingHeader::new(RichText::new(name).strong())
                    .id_salt(name)
                    .default_open(false)
                    .show(ui, |ui: &mut Ui| {
                        egui::Grid::new(format!("stats_{name}")).show(ui, |ui: &mut Ui| {
                            ui.label("count");
                            ui.label(s.count.to_string());
                            ui.end_row();
                            ui.label("mean");
                            ui.label(format!("{:.4}", s.mean));
                            ui.end_row();
                            ui.label("std");
                            ui.label(format!("{:.4}", s.std_dev));
                            ui.end_row();
                            ui.label("min");
                            ui.label(format!("{:.4}", s.min));
                            ui.end_row();
                            ui.label("25%");
                            ui.label(format!("{:.4}", s.q1));
                            ui.end_row();
                            ui.label("50%");
                            ui.label(format!("{:.4}", s.median));
                            ui.end_row();
                            ui.label("75%");
                            ui.label(format!("{:.4}", s.q3));
                            ui.end_row();
                            ui.label("max");
                            ui.label(format!("{:.4}", s.max));
                            ui.end_row();
                        });
                    });
            }
        });
}

// ---------------------------------------------------------------------------
// Central panel – preview, chart, and AI insights
// ---------------------------------------------------------------------------

/// Render the main content: dataframe preview, chart, question box, answer,
/// and the report download control.
pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    if state.table.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a CSV file to explore it  (File → Open CSV…)");
        });
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading(format!("Preview (first {PREVIEW_ROWS} rows)"));
            preview_table(ui, state);
            ui.separator();

            ui.heading("Chart");
            let chart_height = 260.0;
            ui.allocate_ui([ui.available_width(), chart_height].into(), |ui: &mut Ui| {
                super::plot::metric_chart(ui, state);
            });
            ui.separator();

            insights_section(ui, state);
        });
}

fn preview_table(ui: &mut Ui, state: &AppState) {
    let Some(table) = &state.table else { return };
    let names: Vec<String> = table.column_names().iter().map(|s| s.to_string()).collect();
    let rows = table.head(PREVIEW_ROWS);

    TableBuilder::new(ui)
        .striped(true)
        .columns(TableColumn::auto().resizable(true), names.len())
        .header(20.0, |mut header| {
            for name in &names {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|mut body| {
            for row in &rows {
                body.row(18.0, |mut table_row| {
                    for cell in row {
                        table_row.col(|ui| {
                            ui.label(cell);
                        });
                    }
                });
            }
        });
}

fn insights_section(ui: &mut Ui, state: &mut AppState) {
    ui.heading("AI Insights");
    ui.label("Ask a question about the dataset:");
    ui.add(
        TextEdit::singleline(&mut state.question)
            .hint_text("e.g. what drives revenue?")
            .desired_width(f32::INFINITY),
    );

    let can_ask = !state.question.trim().is_empty() && !state.asking;
    let ask_label = if state.asking { "Asking…" } else { "Ask" };
    if ui.add_enabled(can_ask, egui::Button::new(ask_label)).clicked() {
        ask_assistant(state);
    }

    if let Some(answer) = state.answer.clone() {
        ui.add_space(6.0);
        ui.group(|ui: &mut Ui| {
            ui.label(&answer);
        });
        ui.add_space(4.0);
        // The download control only exists while an answer does.
        if ui.button("Download report (PDF)").clicked() {
            export_report(state);
        }
    }
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open tabular data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_csv_path(&path) {
            Ok(table) => {
                log::info!(
                    "Loaded {} rows with columns {:?}",
                    table.row_count(),
                    table.column_names()
                );
                state.set_table(table);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

/// One synchronous question/answer exchange. The interaction blocks until
/// the hosted service responds or errors; a failure stores no answer.
fn ask_assistant(state: &mut AppState) {
    let Some(shape) = state.dataset_shape() else {
        state.status_message = Some("Load a dataset before asking.".to_string());
        return;
    };

    state.asking = true;
    let stats_dump = crate::data::summary::summary_text_dump(&state.summaries);
    let question = state.question.clone();

    let result = InsightClient::from_env().and_then(|client| {
        client.ask(shape, &stats_dump, &question)
    });

    match result {
        Ok(answer) => {
            log::info!("Assistant answered ({} chars)", answer.len());
            state.set_answer(answer);
        }
        Err(e) => {
            log::error!("Assistant call failed: {e}");
            state.status_message = Some(format!("Assistant error: {e}"));
            state.asking = false;
        }
    }
}

/// Build the report from session state and hand the bytes to a save dialog.
fn export_report(state: &mut AppState) {
    let (Some(answer), Some((rows, cols))) =
        (state.current_answer(), state.dataset_shape())
    else {
        return;
    };

    let metadata = format!("Rows: {rows} | Columns: {cols}");
    let bytes = match report::build_report(REPORT_TITLE, &metadata, answer) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::error!("Report export failed: {e}");
            state.status_message = Some(format!("Export error: {e}"));
            return;
        }
    };

    let target = rfd::FileDialog::new()
        .set_title("Save report")
        .set_file_name(REPORT_FILENAME)
        .add_filter("PDF", &["pdf"])
        .save_file();

    if let Some(path) = target {
        match std::fs::write(&path, &bytes) {
            Ok(()) => {
                log::info!("Report written to {}", path.display());
                state.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to write report: {e}");
                state.status_message = Some(format!("Error writing report: {e}"));
            }
        }
    }
}
