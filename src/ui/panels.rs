use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::model::Dimension;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter dropdowns and pie zoom
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    // Clone the domains so we can mutate state inside the loop.
    let domains: Vec<(Dimension, Vec<String>)> = Dimension::ALL
        .iter()
        .map(|&dim| (dim, dataset.domain(dim).to_vec()))
        .collect();

    // ---- One dropdown per dimension, anchored by a synthetic "All" ----
    for (dim, values) in &domains {
        ui.strong(dim.label());
        let current = state.selection.get(*dim).map(str::to_string);
        let selected_text = current.clone().unwrap_or_else(|| "All".to_string());

        egui::ComboBox::from_id_salt(dim.label())
            .selected_text(selected_text)
            .show_ui(ui, |ui: &mut Ui| {
                if ui.selectable_label(current.is_none(), "All").clicked() {
                    state.set_filter(*dim, None);
                }
                for value in values {
                    let is_selected = current.as_deref() == Some(value.as_str());
                    if ui.selectable_label(is_selected, value).clicked() {
                        state.set_filter(*dim, Some(value.clone()));
                    }
                }
            });
        ui.add_space(6.0);
    }

    ui.separator();

    if ui.button("Reset filters").clicked() {
        state.reset_filters();
    }

    ui.add_space(12.0);

    // ---- Pie zoom controls ----
    ui.strong("Pie zoom");
    ui.horizontal(|ui: &mut Ui| {
        if ui.button("−").clicked() {
            state.zoom_pie(-1.0);
        }
        if ui.button("+").clicked() {
            state.zoom_pie(1.0);
        }
        ui.label(format!("{:.0}%", state.pie_zoom * 100.0));
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} responses loaded, {} matching",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open survey data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} survey responses from {}",
                    dataset.len(),
                    path.display()
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error loading the data: {e:#}"));
            }
        }
    }
}
