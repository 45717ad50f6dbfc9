// VgeViewer - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers.

use chrono::NaiveDateTime;
use std::path::PathBuf;

// =============================================================================
// Variants and the run plan
// =============================================================================

/// Schema-determined processing mode of a file.
///
/// `JobTime` reuses a job list dataset and only changes the plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantKind {
    Joblist,
    WorkerResult,
    JobTime,
}

impl VariantKind {
    /// Human-readable label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            VariantKind::Joblist => "joblist",
            VariantKind::WorkerResult => "worker result",
            VariantKind::JobTime => "job time",
        }
    }
}

impl std::fmt::Display for VariantKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One unit of work: a resolved file and the variant to process it with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunItem {
    pub path: PathBuf,
    pub variant: VariantKind,
}

impl RunItem {
    pub fn new(path: impl Into<PathBuf>, variant: VariantKind) -> Self {
        Self {
            path: path.into(),
            variant,
        }
    }
}

// =============================================================================
// Dataset
// =============================================================================

/// A single cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Missing,
    Int(i64),
    Float(f64),
    Text(String),
    DateTime(NaiveDateTime),
}

impl Value {
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Numeric view of the cell; `None` for missing, text, and datetimes.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Missing => f.write_str("NaN"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Text(s) => f.write_str(s),
            Value::DateTime(t) => write!(f, "{}", t.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

/// Column type, inferred at load time and possibly replaced by derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Float,
    Text,
    DateTime,
}

/// A named column; `values.len()` equals the dataset row count.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
    pub values: Vec<Value>,
}

impl Column {
    /// Number of missing cells.
    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_missing()).count()
    }

    /// Iterator over the non-missing cells with their row index.
    pub fn present(&self) -> impl Iterator<Item = (usize, &Value)> {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.is_missing())
    }
}

/// An ordered table loaded from one CSV file.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Source file (used for window titles and messages).
    pub path: PathBuf,

    /// Zero-based data row index in the source file for each loaded row.
    /// Rows dropped for missing values leave gaps.
    pub row_ids: Vec<usize>,

    /// Columns in header order.
    pub columns: Vec<Column>,
}

impl Dataset {
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    /// Source row index of the row at `position`, or `position` itself if
    /// no mapping was recorded.
    pub fn source_row(&self, position: usize) -> usize {
        self.row_ids.get(position).copied().unwrap_or(position)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// The current column set, in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.name == name)
    }

    /// True if any cell in any column is missing.
    pub fn has_missing(&self) -> bool {
        self.columns.iter().any(|c| c.values.iter().any(Value::is_missing))
    }
}

// =============================================================================
// Plot specification
// =============================================================================

/// Figure arrangement for one rendering pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// One panel per included column, row-major.
    Grid { rows: usize, cols: usize },
    /// A single panel with several named series.
    Overlay,
}

/// Where each panel takes its x values from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XMapping {
    /// Row position 0..n.
    RowPosition,
    /// The same column for every panel.
    Fixed(usize),
    /// One column per panel, indexed by panel position.
    PerPanel(Vec<usize>),
}

impl XMapping {
    /// Column used as x for the panel at position `panel`.
    pub fn column_for(&self, panel: usize) -> Option<usize> {
        match self {
            XMapping::RowPosition => None,
            XMapping::Fixed(idx) => Some(*idx),
            XMapping::PerPanel(idxs) => idxs.get(panel).copied(),
        }
    }
}

/// Description of one rendering pass over a dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSpec {
    pub layout: Layout,
    pub x: XMapping,
    /// Explicit y column per panel; `None` plots the panel's own column.
    pub y_idxs: Option<Vec<usize>>,
    /// Column indices that get no panel.
    pub exclude: Vec<usize>,
    /// Figure size in inches.
    pub figsize: (f32, f32),
    /// Whether this figure keeps the process alive until it is closed.
    pub hold_open: bool,
}

impl PlotSpec {
    /// Grid spec plotting every column against its row position.
    pub fn grid(rows: usize, cols: usize, figsize: (f32, f32)) -> Self {
        Self {
            layout: Layout::Grid { rows, cols },
            x: XMapping::RowPosition,
            y_idxs: None,
            exclude: Vec::new(),
            figsize,
            hold_open: false,
        }
    }

    /// Single-panel overlay spec.
    pub fn overlay(figsize: (f32, f32)) -> Self {
        Self {
            layout: Layout::Overlay,
            x: XMapping::RowPosition,
            y_idxs: None,
            exclude: Vec::new(),
            figsize,
            hold_open: false,
        }
    }
}

// =============================================================================
// Figure (backend-independent plot output)
// =============================================================================

/// How values along an axis are interpreted and labelled.
#[derive(Debug, Clone, PartialEq)]
pub enum AxisScale {
    /// Plain numbers (including row positions).
    Numeric,
    /// Seconds since the Unix epoch, labelled as dates.
    DateTime,
    /// Category index, labelled with the category text.
    Categorical(Vec<String>),
}

/// Point marker style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    None,
    Dot,
}

/// Line style between consecutive points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
}

/// One line on a panel. `None` points are gaps.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub points: Vec<Option<[f64; 2]>>,
}

/// One subplot.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub title: String,
    /// Grid cell (row, col).
    pub cell: (usize, usize),
    pub x_scale: AxisScale,
    pub y_scale: AxisScale,
    pub series: Vec<Series>,
    pub marker: Marker,
    pub line: LineStyle,
    pub legend: bool,
    /// Plain tick labels (no scientific notation, no offset).
    pub plain_ticks: bool,
    pub tick_label_size: f32,
}

/// A complete figure for one run item.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    /// Window title (the source file path).
    pub title: String,
    /// Grid shape (rows, cols).
    pub shape: (usize, usize),
    /// Size in pixels.
    pub size_px: (f32, f32),
    pub panels: Vec<Panel>,
    pub hold_open: bool,
}
