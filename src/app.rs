use eframe::egui;

use crate::state::AppState;
use crate::ui::{charts, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SurveyDashApp {
    pub state: AppState,
}

impl Default for SurveyDashApp {
    fn default() -> Self {
        Self {
            state: AppState::default(),
        }
    }
}

impl eframe::App for SurveyDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters + pie zoom ----
        egui::SidePanel::left("filter_panel")
            .default_width(200.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: the three charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.dataset.is_none() {
                ui.centered_and_justified(|ui: &mut egui::Ui| {
                    ui.heading("Open a survey file to view charts  (File → Open…)");
                });
                return;
            }

            // Each chart renders independently: bar and pie share the top
            // half, the box plot takes the bottom.
            let half = ui.available_height() / 2.0;
            ui.allocate_ui(egui::vec2(ui.available_width(), half), |ui: &mut egui::Ui| {
                ui.set_min_height(half);
                ui.columns(2, |cols: &mut [egui::Ui]| {
                    charts::bar_chart(&mut cols[0], &self.state);
                    charts::pie_chart(&mut cols[1], &self.state);
                });
            });
            ui.separator();
            charts::box_plot(ui, &self.state);
        });
    }
}
