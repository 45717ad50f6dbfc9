// VgeViewer - core/mod.rs
//
// Core business logic layer: classification, loading, derivation,
// diagnostics, figure layout, run planning.
// Must NOT depend on: ui, platform, app.

pub mod derive;
pub mod loader;
pub mod model;
pub mod plan;
pub mod plot;
pub mod report;
pub mod schema;
