// VgeViewer - ui/figure.rs
//
// Paints a laid-out `Figure` with egui_plot: one plot per grid cell, a
// light grid, solid lines broken at missing values, optional dot markers
// and an optional legend. Tick labels go through axis formatters so
// datetime and categorical axes read as dates and category names.

use crate::core::model::{AxisScale, Figure, Marker, Panel};
use crate::ui::theme;
use egui_plot::{GridMark, Legend, Line, Plot, PlotPoints, Points};
use std::ops::RangeInclusive;

/// Render a whole figure into the available space of `ui`.
///
/// `figure_idx` keeps plot ids distinct between figures of the same file.
pub fn render(ui: &mut egui::Ui, figure: &Figure, figure_idx: usize) {
    let rect = ui.available_rect_before_wrap();
    let (rows, cols) = figure.shape;
    let cell_w = rect.width() / cols.max(1) as f32;
    let cell_h = rect.height() / rows.max(1) as f32;

    for (panel_idx, panel) in figure.panels.iter().enumerate() {
        let (r, c) = panel.cell;
        let cell = egui::Rect::from_min_size(
            egui::pos2(rect.left() + c as f32 * cell_w, rect.top() + r as f32 * cell_h),
            egui::vec2(cell_w, cell_h),
        )
        .shrink(theme::CELL_PADDING);

        ui.scope_builder(egui::UiBuilder::new().max_rect(cell), |ui| {
            paint_panel(ui, panel, (figure_idx, panel_idx), cell);
        });
    }
    ui.allocate_rect(rect, egui::Sense::hover());
}

fn paint_panel(ui: &mut egui::Ui, panel: &Panel, id: (usize, usize), cell: egui::Rect) {
    ui.vertical_centered(|ui| {
        ui.label(egui::RichText::new(&panel.title).size(theme::TITLE_SIZE).strong());
    });

    ui.style_mut().override_font_id = Some(egui::FontId::proportional(panel.tick_label_size));

    let mut plot = Plot::new(("vgeviewer_panel", id.0, id.1))
        .width(cell.width())
        .height(ui.available_height())
        .show_grid(true)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false);

    if let Some(fmt) = axis_formatter(&panel.x_scale, panel.plain_ticks) {
        plot = plot.x_axis_formatter(fmt);
    }
    if let Some(fmt) = axis_formatter(&panel.y_scale, panel.plain_ticks) {
        plot = plot.y_axis_formatter(fmt);
    }
    if panel.legend {
        plot = plot.legend(Legend::default());
    }

    plot.show(ui, |plot_ui| {
        for (idx, series) in panel.series.iter().enumerate() {
            let colour = theme::series_colour(idx);
            for run in segments(&series.points) {
                if panel.marker == Marker::Dot || run.len() == 1 {
                    plot_ui.points(
                        Points::new(PlotPoints::new(run.clone()))
                            .name(&series.label)
                            .color(colour)
                            .radius(theme::MARKER_RADIUS),
                    );
                }
                plot_ui.line(
                    Line::new(PlotPoints::new(run))
                        .name(&series.label)
                        .color(colour)
                        .width(theme::LINE_WIDTH),
                );
            }
        }
    });
}

type AxisFormatter = Box<dyn Fn(GridMark, &RangeInclusive<f64>) -> String>;

/// Label formatter for an axis. `None` keeps the plot's own numeric labels.
fn axis_formatter(scale: &AxisScale, plain: bool) -> Option<AxisFormatter> {
    match scale {
        AxisScale::Numeric if !plain => None,
        _ => {
            let scale = scale.clone();
            Some(Box::new(move |mark: GridMark, _range: &RangeInclusive<f64>| {
                tick_label(mark.value, mark.step_size, &scale)
            }))
        }
    }
}

/// Split a point list into runs of consecutive present points.
pub fn segments(points: &[Option<[f64; 2]>]) -> Vec<Vec<[f64; 2]>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for point in points {
        match point {
            Some(p) => current.push(*p),
            None if !current.is_empty() => runs.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

/// Tick label text for a grid mark at `value` with spacing `step`.
///
/// Numeric labels are plain decimals with as many digits as the spacing
/// needs. Datetime values are seconds since the epoch. Categorical values
/// only label whole category indices.
pub fn tick_label(value: f64, step: f64, scale: &AxisScale) -> String {
    match scale {
        AxisScale::Numeric => {
            let decimals = if step > 0.0 && step < 1.0 {
                (-step.log10().floor()) as usize
            } else {
                0
            };
            let s = format!("{value:.decimals$}");
            if s.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
                "0".to_string()
            } else {
                s
            }
        }
        AxisScale::DateTime => match chrono::DateTime::from_timestamp(value.round() as i64, 0) {
            Some(t) if step >= 86_400.0 => t.format("%Y-%m-%d").to_string(),
            Some(t) => t.format("%m-%d %H:%M:%S").to_string(),
            None => String::new(),
        },
        AxisScale::Categorical(labels) => {
            let idx = value.round();
            if (value - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        }
    }
}
