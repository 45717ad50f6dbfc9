// VgeViewer - app/mod.rs
//
// Application layer: run orchestration and per-variant dispatch.
// Dependencies: core layer, platform (header sniffing).
// Must NOT depend on: ui.

pub mod run;
pub mod viewer;
