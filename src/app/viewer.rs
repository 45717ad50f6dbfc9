// VgeViewer - app/viewer.rs
//
// One loaded run item: dataset plus the variant's handler set.
// Variants dispatch through a table of plain function pointers.

use crate::core::derive;
use crate::core::loader;
use crate::core::model::{Dataset, Figure, PlotSpec, RunItem, VariantKind, XMapping};
use crate::core::plot::{self, PlotStyle};
use crate::core::report::{self, DiagnosticSession};
use crate::util::constants;
use crate::util::error::{DerivationError, PlotError, Result};
use std::io::{self, Write};

/// Per-variant behaviour.
pub struct VariantHandler<W: Write> {
    /// Load-time column derivation.
    pub derive: fn(&mut Dataset) -> std::result::Result<(), DerivationError>,
    /// Diagnostic report.
    pub report: fn(&mut DiagnosticSession<W>, &Dataset) -> io::Result<()>,
    /// Figure description for a loaded dataset.
    pub plot_spec: fn(&Dataset) -> PlotSpec,
    /// Figure builder.
    pub plot: fn(&Dataset, &PlotSpec, &PlotStyle) -> std::result::Result<Figure, PlotError>,
}

/// Handler table lookup.
pub fn handler<W: Write>(kind: VariantKind) -> VariantHandler<W> {
    match kind {
        VariantKind::Joblist => VariantHandler {
            derive: derive::derive_joblist,
            report: report::report_joblist::<W>,
            plot_spec: joblist_spec,
            plot: plot::plot_columns,
        },
        VariantKind::WorkerResult => VariantHandler {
            derive: derive::derive_none,
            report: report::report_base::<W>,
            plot_spec: worker_result_spec,
            plot: plot::plot_columns,
        },
        VariantKind::JobTime => VariantHandler {
            derive: derive::derive_joblist,
            report: report::report_joblist::<W>,
            plot_spec: job_time_spec,
            plot: plot::plot_job_time,
        },
    }
}

/// Every column against its row position, five per grid row. The grid
/// grows beyond four rows when the file has more than twenty columns.
pub fn joblist_spec(dataset: &Dataset) -> PlotSpec {
    let (base_rows, cols) = constants::JOBLIST_FIGSHAPE;
    let rows = base_rows.max(dataset.column_count().div_ceil(cols));
    PlotSpec::grid(rows, cols, constants::JOBLIST_FIGSIZE)
}

/// Columns 1 and 2 against column 0.
pub fn worker_result_spec(_dataset: &Dataset) -> PlotSpec {
    let (rows, cols) = constants::WORKER_RESULT_FIGSHAPE;
    PlotSpec {
        x: XMapping::Fixed(0),
        y_idxs: Some(vec![1, 2]),
        exclude: vec![0],
        ..PlotSpec::grid(rows, cols, constants::WORKER_RESULT_FIGSIZE)
    }
}

/// Single overlay of the three job time columns.
pub fn job_time_spec(_dataset: &Dataset) -> PlotSpec {
    PlotSpec::overlay(constants::JOB_TIME_FIGSIZE)
}

/// A loaded and derived run item.
#[derive(Debug)]
pub struct Viewer {
    pub item: RunItem,
    pub dataset: Dataset,
}

impl Viewer {
    /// Load the item's file and run its variant's derivation.
    pub fn open(item: RunItem, remove_missing: bool) -> Result<Self> {
        let mut dataset = loader::load(&item.path, remove_missing)?;
        let h = handler::<io::Sink>(item.variant);
        (h.derive)(&mut dataset)?;
        tracing::debug!(
            path = %item.path.display(),
            variant = %item.variant,
            rows = dataset.row_count(),
            "Viewer opened"
        );
        Ok(Self { item, dataset })
    }

    /// Print the variant's diagnostics. Section numbering starts at 1 for
    /// each viewer.
    pub fn print_all_info<W: Write>(&self, out: W) -> io::Result<()> {
        let mut session = DiagnosticSession::new(out);
        (handler::<W>(self.item.variant).report)(&mut session, &self.dataset)
    }

    /// Build the variant's figure.
    pub fn figure(&self, hold_open: bool, style: &PlotStyle) -> Result<Figure> {
        let h = handler::<io::Sink>(self.item.variant);
        let mut spec = (h.plot_spec)(&self.dataset);
        spec.hold_open = hold_open;
        Ok((h.plot)(&self.dataset, &spec, style)?)
    }
}
