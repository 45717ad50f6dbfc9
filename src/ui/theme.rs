// VgeViewer - ui/theme.rs
//
// Colour scheme and layout constants for figure painting.
// Grid, axis and text colours follow the active egui visuals.

use egui::Color32;

/// Series colours, cycled by series index.
const SERIES_PALETTE: [Color32; 6] = [
    Color32::from_rgb(31, 119, 180),  // Blue
    Color32::from_rgb(255, 127, 14),  // Orange
    Color32::from_rgb(44, 160, 44),   // Green
    Color32::from_rgb(214, 39, 40),   // Red
    Color32::from_rgb(148, 103, 189), // Purple
    Color32::from_rgb(140, 86, 75),   // Brown
];

/// Colour for the series at `idx` on a panel.
pub fn series_colour(idx: usize) -> Color32 {
    SERIES_PALETTE[idx % SERIES_PALETTE.len()]
}

/// Layout constants (points).
pub const CELL_PADDING: f32 = 6.0;
pub const TITLE_SIZE: f32 = 12.0;
pub const MARKER_RADIUS: f32 = 1.8;
pub const LINE_WIDTH: f32 = 1.2;
