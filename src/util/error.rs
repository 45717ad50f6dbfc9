// VgeViewer - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// Errors are grouped by the subsystem that produced them; `source()` keeps
// the causal chain intact for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all viewer operations.
#[derive(Debug)]
pub enum VgeViewerError {
    /// Command-line targets could not be resolved.
    Target(TargetError),

    /// A file header matched no known schema.
    Schema(SchemaError),

    /// A CSV file could not be loaded.
    Load(LoadError),

    /// Load-time column derivation failed.
    Derivation(DerivationError),

    /// A figure could not be laid out.
    Plot(PlotError),
}

impl VgeViewerError {
    /// True for the conditions that terminate the whole run rather than
    /// just the current file.
    pub fn is_run_fatal(&self) -> bool {
        matches!(
            self,
            Self::Target(_) | Self::Load(LoadError::Empty { .. })
        )
    }
}

impl fmt::Display for VgeViewerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Target(e) => write!(f, "{e}"),
            Self::Schema(e) => write!(f, "{e}"),
            Self::Load(e) => write!(f, "{e}"),
            Self::Derivation(e) => write!(f, "Derivation error: {e}"),
            Self::Plot(e) => write!(f, "Plot error: {e}"),
        }
    }
}

impl std::error::Error for VgeViewerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Target(e) => Some(e),
            Self::Schema(e) => Some(e),
            Self::Load(e) => Some(e),
            Self::Derivation(e) => Some(e),
            Self::Plot(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Target errors
// ---------------------------------------------------------------------------

/// Errors resolving command-line paths into target files.
#[derive(Debug)]
pub enum TargetError {
    /// The path does not exist.
    NotFound { path: PathBuf },

    /// The path exists but is neither a regular file nor a directory.
    NotFileOrDirectory { path: PathBuf },

    /// The current directory could not be determined for a relative path.
    CurrentDir { source: io::Error },

    /// The `<dir>/*.csv` pattern could not be built for a directory.
    Glob {
        pattern: String,
        source: glob::PatternError,
    },

    /// No target file survived classification.
    NoTargets,
}

impl fmt::Display for TargetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path } => write!(f, "Path does not exist: {}", path.display()),
            Self::NotFileOrDirectory { path } => {
                write!(f, "{} is not file or directory", path.display())
            }
            Self::CurrentDir { source } => {
                write!(f, "Cannot resolve the current directory: {source}")
            }
            Self::Glob { pattern, source } => {
                write!(f, "Invalid directory pattern '{pattern}': {source}")
            }
            Self::NoTargets => write!(f, "Target csv file to visualize does not exist"),
        }
    }
}

impl std::error::Error for TargetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CurrentDir { source } => Some(source),
            Self::Glob { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<TargetError> for VgeViewerError {
    fn from(e: TargetError) -> Self {
        Self::Target(e)
    }
}

// ---------------------------------------------------------------------------
// Schema errors
// ---------------------------------------------------------------------------

/// Errors classifying a file by its header line.
#[derive(Debug)]
pub enum SchemaError {
    /// The header starts with none of the known prefixes.
    Unrecognised { path: PathBuf },

    /// The header line could not be read.
    Unreadable { path: PathBuf, source: io::Error },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unrecognised { path } => write!(
                f,
                "Header line does not contain jobid, worker_rank, or command in {}",
                path.display()
            ),
            Self::Unreadable { path, source } => {
                write!(f, "Cannot read header line of {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for SchemaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Unreadable { source, .. } => Some(source),
            Self::Unrecognised { .. } => None,
        }
    }
}

impl From<SchemaError> for VgeViewerError {
    fn from(e: SchemaError) -> Self {
        Self::Schema(e)
    }
}

// ---------------------------------------------------------------------------
// Load errors
// ---------------------------------------------------------------------------

/// Errors reading a CSV file into a dataset.
#[derive(Debug)]
pub enum LoadError {
    /// I/O error opening or reading the file.
    Io { path: PathBuf, source: io::Error },

    /// CSV syntax or encoding error.
    Csv { path: PathBuf, source: csv::Error },

    /// No rows remain after the optional missing-value drop.
    Empty { path: PathBuf },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Cannot read '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "Malformed CSV '{}': {source}", path.display())
            }
            Self::Empty { path } => write!(f, "Empty data file: {}", path.display()),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Empty { .. } => None,
        }
    }
}

impl From<LoadError> for VgeViewerError {
    fn from(e: LoadError) -> Self {
        Self::Load(e)
    }
}

// ---------------------------------------------------------------------------
// Derivation errors
// ---------------------------------------------------------------------------

/// Errors normalising columns after load.
#[derive(Debug)]
pub enum DerivationError {
    /// A timestamp cell did not match the job time format.
    Timestamp {
        path: PathBuf,
        column: String,
        row: usize,
        raw: String,
        format: &'static str,
    },

    /// The filename suffix pattern failed to compile.
    Pattern {
        pattern: &'static str,
        source: regex::Error,
    },
}

impl fmt::Display for DerivationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timestamp {
                path,
                column,
                row,
                raw,
                format,
            } => write!(
                f,
                "'{}' column '{column}' row {row}: cannot parse '{raw}' with format '{format}'",
                path.display()
            ),
            Self::Pattern { pattern, source } => {
                write!(f, "invalid pattern '{pattern}': {source}")
            }
        }
    }
}

impl std::error::Error for DerivationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Pattern { source, .. } => Some(source),
            Self::Timestamp { .. } => None,
        }
    }
}

impl From<DerivationError> for VgeViewerError {
    fn from(e: DerivationError) -> Self {
        Self::Derivation(e)
    }
}

// ---------------------------------------------------------------------------
// Plot errors
// ---------------------------------------------------------------------------

/// Errors laying out a figure.
#[derive(Debug)]
pub enum PlotError {
    /// More panels than grid cells.
    GridOverflow {
        path: PathBuf,
        panels: usize,
        rows: usize,
        cols: usize,
    },

    /// A plot spec referenced a column index that does not exist.
    ColumnIndex {
        path: PathBuf,
        index: usize,
        columns: usize,
    },

    /// A per-panel index list is shorter than the number of panels.
    IndexListTooShort {
        path: PathBuf,
        list: &'static str,
        len: usize,
        panels: usize,
    },

    /// A column required by the overlay plot is absent.
    MissingColumn { path: PathBuf, column: String },
}

impl PlotError {
    /// The file whose figure failed.
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::GridOverflow { path, .. }
            | Self::ColumnIndex { path, .. }
            | Self::IndexListTooShort { path, .. }
            | Self::MissingColumn { path, .. } => path,
        }
    }
}

impl fmt::Display for PlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}': ", self.path().display())?;
        match self {
            Self::GridOverflow {
                panels, rows, cols, ..
            } => write!(f, "{panels} panels do not fit a {rows}x{cols} grid"),
            Self::ColumnIndex { index, columns, .. } => write!(
                f,
                "column index {index} is out of range for {columns} columns"
            ),
            Self::IndexListTooShort {
                list, len, panels, ..
            } => write!(f, "{list} has {len} entries but {panels} panels are drawn"),
            Self::MissingColumn { column, .. } => {
                write!(f, "required column '{column}' is absent")
            }
        }
    }
}

impl std::error::Error for PlotError {}

impl From<PlotError> for VgeViewerError {
    fn from(e: PlotError) -> Self {
        Self::Plot(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for viewer results.
pub type Result<T> = std::result::Result<T, VgeViewerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_dataset_is_run_fatal() {
        let e: VgeViewerError = LoadError::Empty {
            path: PathBuf::from("a.csv"),
        }
        .into();
        assert!(e.is_run_fatal());
        assert_eq!(e.to_string(), "Empty data file: a.csv");
    }

    #[test]
    fn test_derivation_error_is_per_file() {
        let e: VgeViewerError = DerivationError::Timestamp {
            path: PathBuf::from("jobs.csv"),
            column: "start_time".to_string(),
            row: 3,
            raw: "yesterday".to_string(),
            format: "%Y-%m-%d %H:%M:%S",
        }
        .into();
        assert!(!e.is_run_fatal());
        assert!(e.to_string().contains("'yesterday'"));
        assert!(e.to_string().contains("'jobs.csv'"));
    }

    #[test]
    fn test_plot_error_names_file() {
        let e: VgeViewerError = PlotError::MissingColumn {
            path: PathBuf::from("jobs.csv"),
            column: "start_time".to_string(),
        }
        .into();
        assert_eq!(
            e.to_string(),
            "Plot error: 'jobs.csv': required column 'start_time' is absent"
        );
    }

    #[test]
    fn test_schema_warning_text_is_bare() {
        let e: VgeViewerError = SchemaError::Unrecognised {
            path: PathBuf::from("x.csv"),
        }
        .into();
        assert_eq!(
            e.to_string(),
            "Header line does not contain jobid, worker_rank, or command in x.csv"
        );
    }

    #[test]
    fn test_io_load_error_keeps_source() {
        use std::error::Error;
        let e = LoadError::Io {
            path: PathBuf::from("gone.csv"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        assert!(e.source().is_some());
    }
}
