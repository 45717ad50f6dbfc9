// VgeViewer - ui/mod.rs
//
// UI layer: presentation only.
// Dependencies: core (read-only figure models), egui.
// Must NOT depend on: platform, app, direct I/O.

pub mod figure;
pub mod theme;
