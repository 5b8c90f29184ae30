use eframe::egui::{self, Color32, DragValue, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use modulus_panda::analysis::CurveStatus;
use modulus_panda::color::parse_hex;

use crate::state::AppState;

/// Rows shown in the data preview table.
const PREVIEW_ROWS: usize = 20;

// ---------------------------------------------------------------------------
// Left side panel – analysis settings and groups
// ---------------------------------------------------------------------------

/// Render the left settings / groups panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Analysis");
    ui.separator();

    egui::Grid::new("settings_grid")
        .num_columns(2)
        .spacing([8.0, 4.0])
        .show(ui, |ui: &mut Ui| {
            ui.label("Min strain");
            ui.add(
                DragValue::new(&mut state.settings.min_strain)
                    .speed(0.0001)
                    .range(0.0..=1.0)
                    .max_decimals(5),
            );
            ui.end_row();

            ui.label("Max strain");
            ui.add(
                DragValue::new(&mut state.settings.max_strain)
                    .speed(0.0001)
                    .range(0.0..=1.0)
                    .max_decimals(5),
            );
            ui.end_row();

            ui.label("Smoothing window");
            ui.add(DragValue::new(&mut state.settings.window).range(1..=301));
            ui.end_row();

            ui.label("Polynomial order");
            ui.add(DragValue::new(&mut state.settings.order).range(0..=10));
            ui.end_row();
        });

    ui.checkbox(&mut state.settings.average, "Average curves");
    ui.checkbox(&mut state.show_raw, "Show raw curves");

    if ui
        .add_enabled(!state.sources.is_empty(), egui::Button::new("Run analysis"))
        .clicked()
    {
        state.run_analysis();
    }

    ui.add_space(8.0);
    ui.heading("Groups");
    ui.separator();
    group_list(ui, state);
}

enum GroupAction {
    Assign(String),
    Delete(String),
}

fn group_list(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        let response = ui.text_edit_singleline(&mut state.new_group_name);
        let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if ui.button("Add").clicked() || submitted {
            state.create_group();
        }
    });

    let has_fits = state
        .report
        .as_ref()
        .is_some_and(|r| r.modulus_summary().is_some());

    let mut action = None;
    ScrollArea::vertical()
        .auto_shrink([false, true])
        .show(ui, |ui: &mut Ui| {
            for (name, summary) in state.groups.summary() {
                let color = parse_hex(&summary.color).unwrap_or(Color32::GRAY);
                let stats = summary.stats;
                ui.horizontal(|ui: &mut Ui| {
                    ui.label(RichText::new(&name).color(color).strong());
                    ui.label(format!(
                        "{:.2} ± {:.2} MPa (n={})",
                        stats.mean, stats.stddev, stats.count
                    ));
                });
                ui.horizontal(|ui: &mut Ui| {
                    if ui
                        .add_enabled(has_fits, egui::Button::new("Assign"))
                        .on_hover_text("Add the moduli of the last run to this group")
                        .clicked()
                    {
                        action = Some(GroupAction::Assign(name.clone()));
                    }
                    if ui.small_button("Delete").clicked() {
                        action = Some(GroupAction::Delete(name.clone()));
                    }
                });
                ui.separator();
            }
        });

    match action {
        Some(GroupAction::Assign(name)) => state.assign_to_group(&name),
        Some(GroupAction::Delete(name)) => state.delete_group(&name),
        None => {}
    }
}

// ---------------------------------------------------------------------------
// Bottom panel – per-file results and data preview
// ---------------------------------------------------------------------------

fn status_text(status: CurveStatus<'_>) -> RichText {
    match status {
        CurveStatus::Fitted(_) => RichText::new("fitted"),
        CurveStatus::InsufficientFitData => {
            RichText::new("not enough points in strain range").color(Color32::YELLOW)
        }
        CurveStatus::Failed(e) => RichText::new(e.to_string()).color(Color32::RED),
    }
}

/// Render the results table below the plot.
pub fn results_panel(ui: &mut Ui, state: &AppState) {
    let Some(report) = &state.report else {
        ui.label(format!("{} file(s) loaded.", state.sources.len()));
        return;
    };

    match report.modulus_summary() {
        Some(stats) => ui.strong(format!(
            "Avg Modulus: {:.2} ± {:.2} MPa",
            stats.mean, stats.stddev
        )),
        None => ui.strong("No valid fits."),
    };
    if let Some(average) = &report.average {
        match average {
            Ok(avg) => match (avg.modulus(), avg.r_squared()) {
                (Some(m), Some(r2)) => ui.label(format!(
                    "Averaged curve ({} files): {m:.2} MPa, R²={r2:.3}",
                    avg.n_curves
                )),
                (Some(m), None) => ui.label(format!("Averaged curve: {m:.2} MPa")),
                _ => ui.label("Averaged curve: not enough points in strain range"),
            },
            Err(e) => ui.label(RichText::new(format!("Averaging failed: {e}")).color(Color32::RED)),
        };
    }
    ui.separator();

    ui.push_id("results_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto().at_least(120.0))
            .column(Column::auto())
            .column(Column::auto())
            .column(Column::auto().at_least(80.0))
            .column(Column::auto().at_least(50.0))
            .column(Column::remainder())
            .header(20.0, |mut header| {
                for title in ["File", "Strain column", "Stress column", "Modulus (MPa)", "R²", "Status"] {
                    header.col(|ui: &mut Ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for outcome in &report.outcomes {
                    let curve = outcome.curve();
                    body.row(18.0, |mut row| {
                        row.col(|ui: &mut Ui| {
                            ui.label(&outcome.name);
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(curve.map_or("–", |c| c.strain_column.as_str()));
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(curve.map_or("–", |c| c.stress_column.as_str()));
                        });
                        row.col(|ui: &mut Ui| {
                            let text = curve
                                .and_then(|c| c.modulus())
                                .map_or("–".to_string(), |m| format!("{m:.2}"));
                            ui.label(text);
                        });
                        row.col(|ui: &mut Ui| {
                            let text = curve
                                .and_then(|c| c.r_squared())
                                .map_or("–".to_string(), |r2| format!("{r2:.3}"));
                            ui.label(text);
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(status_text(outcome.status()));
                        });
                    });
                }
            });
    });

    if let Some(first) = report.curves().next() {
        egui::CollapsingHeader::new(format!("Data preview – {}", first.name))
            .default_open(false)
            .show(ui, |ui: &mut Ui| {
                ui.push_id("preview_table", |ui: &mut Ui| {
                    TableBuilder::new(ui)
                        .striped(true)
                        .column(Column::auto().at_least(90.0))
                        .column(Column::remainder())
                        .header(20.0, |mut header| {
                            header.col(|ui: &mut Ui| {
                                ui.strong("Strain");
                            });
                            header.col(|ui: &mut Ui| {
                                ui.strong("Stress (MPa)");
                            });
                        })
                        .body(|mut body| {
                            for (strain, stress) in first.preview(PREVIEW_ROWS) {
                                body.row(18.0, |mut row| {
                                    row.col(|ui: &mut Ui| {
                                        ui.label(format!("{strain:.5}"));
                                    });
                                    row.col(|ui: &mut Ui| {
                                        ui.label(format!("{stress:.3}"));
                                    });
                                });
                            }
                        });
                });
            });
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open CSVs…").clicked() {
                open_files_dialog(state);
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Save session…").clicked() {
                save_session_dialog(state);
                ui.close_menu();
            }
            if ui.button("Load session…").clicked() {
                load_session_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!("{} file(s) selected", state.sources.len()));

        ui.separator();

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_files_dialog(state: &mut AppState) {
    let files = rfd::FileDialog::new()
        .set_title("Open stress–strain CSVs")
        .add_filter("CSV", &["csv", "txt"])
        .pick_files();

    if let Some(paths) = files {
        state.open_files(&paths);
    }
}

pub fn save_session_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Save session")
        .add_filter("JSON", &["json"])
        .set_file_name("session.json")
        .save_file();

    if let Some(path) = file {
        state.save_session(&path);
    }
}

pub fn load_session_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Load session")
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        state.load_session(&path);
    }
}
