// VgeViewer - core/plot.rs
//
// Figure layout. Turns a dataset plus a `PlotSpec` into a backend-neutral
// `Figure`; painting happens in `ui::figure`.
//
// Grid mode walks every column index `i`, skips the excluded ones and keeps
// a separate panel counter `ii` that only advances for included columns.
// `ii` places the panel and picks the per-panel x column; `i` names it.

use crate::core::model::{
    AxisScale, Column, ColumnKind, Dataset, Figure, Layout, LineStyle, Marker, Panel, PlotSpec,
    Series, Value, XMapping,
};
use crate::util::constants;
use crate::util::error::PlotError;
use std::collections::HashMap;

/// Rendering knobs that come from configuration rather than the variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotStyle {
    /// Datasets with at least this many rows get no markers.
    pub marker_row_threshold: usize,
    pub tick_label_size: f32,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            marker_row_threshold: constants::DEFAULT_MARKER_ROW_THRESHOLD,
            tick_label_size: constants::DEFAULT_TICK_LABEL_SIZE,
        }
    }
}

/// Small dots for readable datasets, bare lines for dense ones.
pub fn marker_for(rows: usize, style: &PlotStyle) -> Marker {
    if rows < style.marker_row_threshold {
        Marker::Dot
    } else {
        Marker::None
    }
}

/// Lay out one panel per included column.
pub fn plot_columns(
    dataset: &Dataset,
    spec: &PlotSpec,
    style: &PlotStyle,
) -> Result<Figure, PlotError> {
    let (rows, cols) = match spec.layout {
        Layout::Grid { rows, cols } => (rows, cols),
        Layout::Overlay => (1, 1),
    };
    let n_columns = dataset.column_count();

    let included: Vec<usize> = (0..n_columns)
        .filter(|i| !spec.exclude.contains(i))
        .collect();
    if included.len() > rows * cols {
        return Err(PlotError::GridOverflow {
            path: dataset.path.clone(),
            panels: included.len(),
            rows,
            cols,
        });
    }
    if let XMapping::PerPanel(ref xs) = spec.x {
        if xs.len() < included.len() {
            return Err(PlotError::IndexListTooShort {
                path: dataset.path.clone(),
                list: "x column list",
                len: xs.len(),
                panels: included.len(),
            });
        }
    }
    if let Some(ref ys) = spec.y_idxs {
        if ys.len() < included.len() {
            return Err(PlotError::IndexListTooShort {
                path: dataset.path.clone(),
                list: "y column list",
                len: ys.len(),
                panels: included.len(),
            });
        }
    }

    let marker = marker_for(dataset.row_count(), style);

    let mut panels = Vec::with_capacity(included.len());
    for (ii, &i) in included.iter().enumerate() {
        let (x_idx, y_idx) = match spec.x.column_for(ii) {
            Some(x) => (
                Some(x),
                spec.y_idxs.as_ref().map_or(i, |ys| ys[ii]),
            ),
            None => (None, ii),
        };

        let y_column = column_at(dataset, y_idx)?;
        let (ys, y_scale) = axis_values(y_column);
        let (xs, x_scale) = match x_idx {
            Some(x) => axis_values(column_at(dataset, x)?),
            None => row_positions(dataset.row_count()),
        };

        let plain_ticks = plain_tick_format(&x_scale, &y_scale).map_or_else(
            |reason| {
                tracing::debug!(panel = %dataset.columns[i].name, reason, "Keeping default tick format");
                false
            },
            |()| true,
        );

        panels.push(Panel {
            title: dataset.columns[i].name.clone(),
            cell: (ii / cols.max(1), ii % cols.max(1)),
            x_scale,
            y_scale,
            series: vec![Series {
                label: y_column.name.clone(),
                points: zip_points(&xs, &ys),
            }],
            marker,
            line: LineStyle::Solid,
            legend: false,
            plain_ticks,
            tick_label_size: style.tick_label_size,
        });
    }

    Ok(Figure {
        title: dataset.path.display().to_string(),
        shape: (rows, cols),
        size_px: figure_pixels(spec.figsize),
        panels,
        hold_open: spec.hold_open,
    })
}

/// Overlay the three job time columns on one panel against row position.
pub fn plot_job_time(
    dataset: &Dataset,
    spec: &PlotSpec,
    style: &PlotStyle,
) -> Result<Figure, PlotError> {
    let marker = marker_for(dataset.row_count(), style);
    let (xs, x_scale) = row_positions(dataset.row_count());

    let mut series = Vec::with_capacity(constants::TIME_COLUMNS.len());
    let mut y_scale = AxisScale::Numeric;
    for (n, name) in constants::TIME_COLUMNS.iter().enumerate() {
        let column = dataset.column(name).ok_or_else(|| PlotError::MissingColumn {
            path: dataset.path.clone(),
            column: (*name).to_string(),
        })?;
        let (ys, scale) = axis_values(column);
        if n == 0 {
            y_scale = scale;
        }
        series.push(Series {
            label: (*name).to_string(),
            points: zip_points(&xs, &ys),
        });
    }

    let plain_ticks = plain_tick_format(&x_scale, &y_scale).is_ok();
    Ok(Figure {
        title: dataset.path.display().to_string(),
        shape: (1, 1),
        size_px: figure_pixels(spec.figsize),
        panels: vec![Panel {
            title: constants::JOB_TIME_TITLE.to_string(),
            cell: (0, 0),
            x_scale,
            y_scale,
            series,
            marker,
            line: LineStyle::Solid,
            legend: true,
            plain_ticks,
            tick_label_size: style.tick_label_size,
        }],
        hold_open: spec.hold_open,
    })
}

fn column_at(dataset: &Dataset, idx: usize) -> Result<&Column, PlotError> {
    dataset.columns.get(idx).ok_or_else(|| PlotError::ColumnIndex {
        path: dataset.path.clone(),
        index: idx,
        columns: dataset.column_count(),
    })
}

/// Plain (non-scientific, offset-free) labels only exist for numeric axes.
fn plain_tick_format(x: &AxisScale, y: &AxisScale) -> Result<(), &'static str> {
    match (x, y) {
        (AxisScale::Numeric, AxisScale::Numeric) => Ok(()),
        _ => Err("plain format needs numeric axes"),
    }
}

fn figure_pixels(figsize: (f32, f32)) -> (f32, f32) {
    (
        figsize.0 * constants::FIGURE_DPI,
        figsize.1 * constants::FIGURE_DPI,
    )
}

fn row_positions(rows: usize) -> (Vec<Option<f64>>, AxisScale) {
    ((0..rows).map(|r| Some(r as f64)).collect(), AxisScale::Numeric)
}

fn zip_points(xs: &[Option<f64>], ys: &[Option<f64>]) -> Vec<Option<[f64; 2]>> {
    xs.iter()
        .zip(ys)
        .map(|(x, y)| Some([(*x)?, (*y)?]))
        .collect()
}

/// Map a column onto plot coordinates. Missing cells become gaps; text is
/// categorical in first-appearance order; datetimes are epoch seconds.
pub fn axis_values(column: &Column) -> (Vec<Option<f64>>, AxisScale) {
    match column.kind {
        ColumnKind::Integer | ColumnKind::Float => {
            (column.values.iter().map(Value::as_f64).collect(), AxisScale::Numeric)
        }
        ColumnKind::DateTime => (
            column
                .values
                .iter()
                .map(|v| match v {
                    Value::DateTime(t) => Some(t.and_utc().timestamp() as f64),
                    _ => None,
                })
                .collect(),
            AxisScale::DateTime,
        ),
        ColumnKind::Text => {
            let mut categories: Vec<String> = Vec::new();
            let mut index: HashMap<String, usize> = HashMap::new();
            let values: Vec<Option<f64>> = column
                .values
                .iter()
                .map(|v| {
                    if v.is_missing() {
                        return None;
                    }
                    let key = v.to_string();
                    let next = categories.len();
                    let idx = *index.entry(key.clone()).or_insert(next);
                    if idx == next {
                        categories.push(key);
                    }
                    Some(idx as f64)
                })
                .collect();
            (values, AxisScale::Categorical(categories))
        }
    }
}
