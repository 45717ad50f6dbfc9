// VgeViewer - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "vgeviewer";

/// Application identifier used for the config directory.
pub const APP_ID: &str = "vgeviewer";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Schema classification
// =============================================================================

/// Header prefix of a VGE job list file.
pub const HEADER_PREFIX_JOBLIST: &str = "jobid";

/// Header prefix of a VGE worker result file.
pub const HEADER_PREFIX_WORKER_RESULT: &str = "worker_rank";

/// Header prefix of the companion command file (never plotted).
pub const HEADER_PREFIX_COMMAND: &str = "command";

/// File extension picked up when a directory is given on the command line.
pub const TARGET_EXTENSION: &str = "csv";

// =============================================================================
// Loading
// =============================================================================

/// Raw field values treated as missing, in addition to the empty string.
/// Matching is exact: no trimming, case-sensitive.
pub const NA_TOKENS: &[&str] = &[
    "NA", "N/A", "n/a", "NaN", "nan", "-nan", "NULL", "null", "<NA>", "#N/A",
];

// =============================================================================
// Job list columns
// =============================================================================

/// Time at which the job was sent to VGE.
pub const COL_SENDVGETIME: &str = "sendvgetime";

/// Time at which a worker started the job.
pub const COL_START_TIME: &str = "start_time";

/// Time at which the job finished.
pub const COL_FINISH_TIME: &str = "finish_time";

/// The three datetime-bearing job list columns, in report/legend order.
pub const TIME_COLUMNS: [&str; 3] = [COL_SENDVGETIME, COL_START_TIME, COL_FINISH_TIME];

/// Job script file name.
pub const COL_FILENAME: &str = "filename";

/// Job status column.
pub const COL_STATUS: &str = "status";

/// Job return code column.
pub const COL_RETURN_CODE: &str = "return_code";

/// Format of job list timestamps once the fractional part is removed.
pub const JOB_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Trailing job-script suffix removed from `filename` (e.g. `run.sh.42`).
pub const FILENAME_SUFFIX_PATTERN: &str = r"\.sh\.?\d+$";

/// Maximum number of characters kept from a normalised `filename`.
pub const FILENAME_MAX_CHARS: usize = 10;

// =============================================================================
// Plotting
// =============================================================================

/// Pixels per figure inch.
pub const FIGURE_DPI: f32 = 100.0;

/// Job list grid: rows x cols.
pub const JOBLIST_FIGSHAPE: (usize, usize) = (4, 5);

/// Job list figure size in inches.
pub const JOBLIST_FIGSIZE: (f32, f32) = (15.0, 9.0);

/// Worker result grid: rows x cols.
pub const WORKER_RESULT_FIGSHAPE: (usize, usize) = (1, 2);

/// Worker result figure size in inches.
pub const WORKER_RESULT_FIGSIZE: (f32, f32) = (7.5, 4.5);

/// Job time overlay figure size in inches.
pub const JOB_TIME_FIGSIZE: (f32, f32) = (7.5, 4.5);

/// Title of the job time overlay panel.
pub const JOB_TIME_TITLE: &str = "job time";

/// Datasets with at least this many rows are drawn without markers.
pub const DEFAULT_MARKER_ROW_THRESHOLD: usize = 10_000;

/// Upper bound on the configurable marker threshold.
pub const MAX_MARKER_ROW_THRESHOLD: usize = 10_000_000;

/// Default tick label size in points.
pub const DEFAULT_TICK_LABEL_SIZE: f32 = 10.0;

/// Minimum configurable tick label size.
pub const MIN_TICK_LABEL_SIZE: f32 = 6.0;

/// Maximum configurable tick label size.
pub const MAX_TICK_LABEL_SIZE: f32 = 24.0;

/// Default screen position of a figure window (pixels from top-left).
pub const DEFAULT_WINDOW_POS: (f32, f32) = (40.0, 50.0);

/// Upper bound on either window coordinate.
pub const MAX_WINDOW_COORD: f32 = 10_000.0;

/// Number of tick marks requested along each axis.
pub const AXIS_TICK_COUNT: usize = 5;

// =============================================================================
// Logging
// =============================================================================

/// Default log level. Diagnostics own stdout; tracing goes to stderr.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
