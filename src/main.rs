// VgeViewer - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Config loading and logging initialisation (debug mode support)
// 3. Target resolution, classification and run planning
// 4. Per-file diagnostics and figure building
// 5. eframe GUI launch for the collected figures

mod gui;

// Re-export modules from the library crate so that `gui.rs` and other
// binary-side code can still use `crate::core::...`, `crate::ui::...` etc.
pub use vgeviewer::app;
pub use vgeviewer::core;
pub use vgeviewer::platform;
pub use vgeviewer::ui;
pub use vgeviewer::util;

use clap::Parser;
use std::path::PathBuf;
use util::error::{TargetError, VgeViewerError};

/// VgeViewer - viewer for VGE job list and worker result CSV files.
///
/// Point it at CSV files or directories of CSV files to print diagnostics
/// and plot every column.
#[derive(Parser, Debug)]
#[command(name = "vgeviewer", version, about)]
struct Cli {
    /// VGE output CSV files or directories.
    #[arg(required = true)]
    path: Vec<PathBuf>,

    /// Print some information before creating a graph.
    #[arg(short = 'i', long = "info")]
    info: bool,

    /// Remove rows with missing values before creating a graph.
    #[arg(short = 'r', long = "remove")]
    remove: bool,

    /// Add a graph of job execution time for every job list.
    #[arg(long = "aj", visible_alias = "add-jobtime")]
    add_job_time: bool,

    /// Print some information and exit without plotting.
    #[arg(long = "np", visible_alias = "no-plot")]
    no_plot: bool,

    /// Only plot job execution time for job lists.
    #[arg(long = "oj", visible_alias = "only-jobtime")]
    only_job_time: bool,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Config is read before logging so its level can take part in the
    // filter; its warnings are printed once logging is up.
    let platform_paths = platform::config::PlatformPaths::resolve();
    let (config, config_warnings) = platform::config::load_config(&platform_paths.config_dir);

    util::logging::init(cli.debug, config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        paths = cli.path.len(),
        "VgeViewer starting"
    );
    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Config warning");
    }

    let opts = app::run::RunOptions {
        do_plot: !cli.no_plot,
        show_info: cli.info,
        remove_missing: cli.remove,
        add_job_time: cli.add_job_time,
        only_job_time: cli.only_job_time,
    };
    let style = core::plot::PlotStyle {
        marker_row_threshold: config.marker_row_threshold,
        tick_label_size: config.tick_label_size,
    };

    let figures = match run(&cli.path, &opts, &style) {
        Ok(figures) => figures,
        Err(e) => {
            tracing::debug!(error = ?e, "Run aborted");
            match &e {
                VgeViewerError::Target(TargetError::NoTargets) => println!("[Error] {e}"),
                _ => println!("{e}"),
            }
            std::process::exit(1);
        }
    };

    if figures.is_empty() {
        return;
    }

    let (main_w, main_h) = figures
        .last()
        .map_or((800.0, 600.0), |f| f.size_px);
    let main_title = figures
        .last()
        .map_or_else(|| util::constants::APP_NAME.to_string(), |f| f.title.clone());

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(main_title)
            .with_inner_size([main_w, main_h])
            .with_position(config.window_pos),
        ..Default::default()
    };

    let dark_mode = config.dark_mode;
    let window_pos = config.window_pos;
    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(if dark_mode {
                egui::Visuals::dark()
            } else {
                egui::Visuals::light()
            });
            Ok(Box::new(gui::VgeViewerApp::new(figures, window_pos)))
        }),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to open plot windows: {e}");
        std::process::exit(1);
    }
}

/// Resolve, classify, plan and process the command-line targets.
fn run(
    paths: &[PathBuf],
    opts: &app::run::RunOptions,
    style: &core::plot::PlotStyle,
) -> util::error::Result<Vec<core::model::Figure>> {
    let targets = platform::fs::resolve_targets(paths)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let items = app::run::classify_targets(&targets, &mut out).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to write classification warnings");
        Vec::new()
    });
    if items.is_empty() {
        return Err(TargetError::NoTargets.into());
    }

    let plan = core::plan::build_plan(items, opts.add_job_time, opts.only_job_time);
    app::run::execute(&plan, opts, style, &mut out)
}
