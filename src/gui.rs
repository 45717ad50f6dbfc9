// VgeViewer - gui.rs
//
// Top-level eframe::App implementation.
// The last figure of the run owns the root viewport; every earlier figure
// gets its own immediate child viewport. Closing a child only hides it.
// Closing the root window ends the process.

use crate::core::model::Figure;
use crate::ui;

/// The VgeViewer figure window set.
pub struct VgeViewerApp {
    /// Figures in run order; the last one is painted in the root viewport.
    figures: Vec<Figure>,
    /// Visibility of each child viewport (all but the last figure).
    child_open: Vec<bool>,
    /// Screen position hint for child windows.
    window_pos: (f32, f32),
}

impl VgeViewerApp {
    pub fn new(figures: Vec<Figure>, window_pos: (f32, f32)) -> Self {
        let child_open = vec![true; figures.len().saturating_sub(1)];
        Self {
            figures,
            child_open,
            window_pos,
        }
    }
}

impl eframe::App for VgeViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let Some((main, children)) = self.figures.split_last() else {
            return;
        };

        for (idx, figure) in children.iter().enumerate() {
            if !self.child_open[idx] {
                continue;
            }
            let id = egui::ViewportId::from_hash_of(("figure", idx));
            let builder = egui::ViewportBuilder::default()
                .with_title(&figure.title)
                .with_inner_size([figure.size_px.0, figure.size_px.1])
                .with_position(self.window_pos);

            let open = &mut self.child_open[idx];
            ctx.show_viewport_immediate(id, builder, |ctx, class| {
                if class == egui::ViewportClass::Embedded {
                    // Backend without multi-window support: fall back to an
                    // in-window panel.
                    egui::Window::new(figure.title.as_str())
                        .id(egui::Id::new(("figure_window", idx)))
                        .default_size([figure.size_px.0 * 0.5, figure.size_px.1 * 0.5])
                        .open(&mut *open)
                        .show(ctx, |ui| ui::figure::render(ui, figure, idx));
                    return;
                }

                egui::CentralPanel::default().show(ctx, |ui| ui::figure::render(ui, figure, idx));
                if ctx.input(|i| i.viewport().close_requested()) {
                    tracing::debug!(figure = %figure.title, "Child figure closed");
                    *open = false;
                }
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui::figure::render(ui, main, children.len());
        });
    }
}
