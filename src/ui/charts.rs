use std::f64::consts::TAU;

use eframe::egui::{self, Color32, Pos2, Shape, Stroke, Ui, Vec2};
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, GridMark, MarkerShape, Plot, Points};

use crate::data::stats::{box_stats_by_chain, count_by_gender, mean_purchase_by_chain};
use crate::state::AppState;

const BAR_FILL: Color32 = Color32::from_rgb(0x4f, 0xc3, 0xf7);
const OUTLIER_COLOR: Color32 = Color32::from_rgb(0xe5, 0x39, 0x35);

// ---------------------------------------------------------------------------
// Shared pieces
// ---------------------------------------------------------------------------

/// Placeholder shown when the current filter matches no records.
fn no_data(ui: &mut Ui) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.weak("No data available");
    });
}

/// Axis tick formatter mapping integer positions to category labels.
fn category_formatter(labels: Vec<String>) -> impl Fn(GridMark, &std::ops::RangeInclusive<f64>) -> String {
    move |mark, _range| {
        let idx = mark.value.round();
        if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        labels.get(idx as usize).cloned().unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Bar chart: average purchase amount by chain
// ---------------------------------------------------------------------------

pub fn bar_chart(ui: &mut Ui, state: &AppState) {
    ui.vertical_centered(|ui: &mut Ui| ui.strong("Average Purchase by Chain"));

    let means = mean_purchase_by_chain(state.visible_records());
    if means.is_empty() {
        no_data(ui);
        return;
    }

    let chains: Vec<String> = means.iter().map(|(c, _)| c.clone()).collect();
    // Horizontal bars: chains on the y-axis, mean purchase along x.
    let bars: Vec<Bar> = means
        .iter()
        .enumerate()
        .map(|(i, (chain, mean))| {
            Bar::new(i as f64, *mean)
                .width(0.6)
                .fill(BAR_FILL)
                .name(format!("{chain}: ${mean:.2}"))
        })
        .collect();

    Plot::new("bar_chart")
        .x_axis_label("Avg purchase ($)")
        .y_axis_formatter(category_formatter(chains))
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show_grid([true, false])
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal());
        });
}

// ---------------------------------------------------------------------------
// Pie chart: respondent count by gender
// ---------------------------------------------------------------------------

/// One wedge of the pie, angles in radians from the top, clockwise.
struct Wedge {
    label: String,
    count: usize,
    start: f64,
    end: f64,
    color: Color32,
}

pub fn pie_chart(ui: &mut Ui, state: &AppState) {
    ui.vertical_centered(|ui: &mut Ui| ui.strong("Gender Distribution"));

    let counts = count_by_gender(state.visible_records());
    let total: usize = counts.iter().map(|(_, c)| c).sum();
    if total == 0 {
        no_data(ui);
        return;
    }

    // Legend row: one swatch-coloured label per gender present.
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for (gender, count) in &counts {
            let color = state.gender_colors.color_for(gender);
            ui.colored_label(color, format!("⏺ {gender} ({count})"));
        }
    });

    // Colours come from the full dataset's domain, so a gender keeps its
    // colour even when filtering collapses the visible domain.
    let mut wedges = Vec::with_capacity(counts.len());
    let mut angle = -TAU / 4.0; // start at twelve o'clock
    for (gender, count) in counts {
        let span = count as f64 / total as f64 * TAU;
        wedges.push(Wedge {
            color: state.gender_colors.color_for(&gender),
            label: gender,
            count,
            start: angle,
            end: angle + span,
        });
        angle += span;
    }

    let side = ui.available_width().min(ui.available_height());
    let (response, painter) =
        ui.allocate_painter(Vec2::splat(side), egui::Sense::hover());
    // Zoomed-in wedges can extend past the allocated square; clip them to
    // the chart's own region so they never paint over the neighbours.
    let painter = painter.with_clip_rect(response.rect);
    let center = response.rect.center();
    let base_radius = (side / 2.0 - 10.0).max(0.0) * state.pie_zoom as f32;

    // Which wedge is under the pointer, if any.
    let hovered = response.hover_pos().and_then(|pos| {
        let offset = pos - center;
        if offset.length() > base_radius {
            return None;
        }
        let mut theta = (offset.y as f64).atan2(offset.x as f64);
        // Normalise into the wedge angle range [-TAU/4, 3*TAU/4).
        if theta < -TAU / 4.0 {
            theta += TAU;
        }
        wedges.iter().position(|w| theta >= w.start && theta < w.end)
    });

    for (i, wedge) in wedges.iter().enumerate() {
        // Hovered wedge grows slightly, mirroring the hover-scale effect.
        let radius = if hovered == Some(i) {
            base_radius * 1.08
        } else {
            base_radius
        };
        paint_wedge(&painter, center, radius, wedge);
    }

    if let Some(i) = hovered {
        let wedge = &wedges[i];
        egui::show_tooltip_at_pointer(
            ui.ctx(),
            ui.layer_id(),
            response.id.with("pie_tooltip"),
            |ui: &mut Ui| {
                ui.label(format!("Gender: {}", wedge.label));
                ui.label(format!("Count: {}", wedge.count));
            },
        );
    }
}

/// Fill a circular sector as a fan of thin triangles (stays correct for
/// spans past 180°, where a single convex polygon would not).
fn paint_wedge(painter: &egui::Painter, center: Pos2, radius: f32, wedge: &Wedge) {
    const STEP: f64 = 0.05; // radians per triangle
    let span = wedge.end - wedge.start;
    let steps = (span / STEP).ceil().max(1.0) as usize;

    let point_at = |theta: f64| -> Pos2 {
        center + Vec2::new(theta.cos() as f32, theta.sin() as f32) * radius
    };

    for s in 0..steps {
        let a0 = wedge.start + span * s as f64 / steps as f64;
        let a1 = wedge.start + span * (s + 1) as f64 / steps as f64;
        painter.add(Shape::convex_polygon(
            vec![center, point_at(a0), point_at(a1)],
            wedge.color,
            Stroke::NONE,
        ));
    }
}

// ---------------------------------------------------------------------------
// Box plot: purchase amount distribution by chain
// ---------------------------------------------------------------------------

pub fn box_plot(ui: &mut Ui, state: &AppState) {
    ui.vertical_centered(|ui: &mut Ui| ui.strong("Purchase Amount by Chain"));

    let stats = box_stats_by_chain(state.visible_records());
    if stats.is_empty() {
        no_data(ui);
        return;
    }

    let chains: Vec<String> = stats.iter().map(|(c, _)| c.clone()).collect();

    let mut boxes = Vec::with_capacity(stats.len());
    let mut outlier_points: Vec<[f64; 2]> = Vec::new();
    for (i, (chain, summary)) in stats.iter().enumerate() {
        let x = i as f64;
        boxes.push(
            BoxElem::new(
                x,
                BoxSpread::new(
                    summary.lower_whisker,
                    summary.q1,
                    summary.median,
                    summary.q3,
                    summary.upper_whisker,
                ),
            )
            .box_width(0.5)
            .whisker_width(0.3)
            .fill(BAR_FILL.gamma_multiply(0.4))
            .stroke(Stroke::new(1.0, BAR_FILL))
            .name(chain),
        );
        // Every outlier is drawn individually, duplicates included.
        outlier_points.extend(summary.outliers.iter().map(|&v| [x, v]));
    }

    Plot::new("box_plot")
        .y_axis_label("Purchase amount ($)")
        .x_axis_formatter(category_formatter(chains))
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show_grid([false, true])
        .show(ui, |plot_ui| {
            plot_ui.box_plot(BoxPlot::new(boxes));
            if !outlier_points.is_empty() {
                plot_ui.points(
                    Points::new(outlier_points)
                        .shape(MarkerShape::Circle)
                        .radius(2.5)
                        .color(OUTLIER_COLOR)
                        .name("Outliers"),
                );
            }
        });
}
