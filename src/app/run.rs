// VgeViewer - app/run.rs
//
// Run orchestration: header classification of resolved targets and the
// per-item load -> derive -> report/plot loop.
//
// Per-file failures print a `[Warning]` and the run moves on; an empty
// dataset ends the whole run.

use crate::app::viewer::Viewer;
use crate::core::model::{Figure, RunItem};
use crate::core::plot::PlotStyle;
use crate::core::schema::{self, Classification, SkipReason};
use crate::platform::fs;
use crate::util::error::{Result, SchemaError, VgeViewerError};
use std::io::{self, Write};
use std::path::PathBuf;

/// Behaviour switches for one run, taken from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunOptions {
    /// Build figures (false for `--no-plot`).
    pub do_plot: bool,
    /// Print diagnostics before plotting.
    pub show_info: bool,
    /// Drop rows with any missing cell.
    pub remove_missing: bool,
    pub add_job_time: bool,
    pub only_job_time: bool,
}

/// Classify each target by its header line, in order.
///
/// Command files are skipped silently; unreadable or unrecognised headers
/// print a warning and are skipped.
pub fn classify_targets<W: Write>(paths: &[PathBuf], out: &mut W) -> io::Result<Vec<RunItem>> {
    let mut items = Vec::with_capacity(paths.len());

    for path in paths {
        let header = match fs::read_header_line(path) {
            Ok(h) => h,
            Err(e) => {
                let err = SchemaError::Unreadable {
                    path: path.clone(),
                    source: e,
                };
                write_warning(out, &err.into())?;
                continue;
            }
        };

        match schema::classify_header(&header) {
            Classification::Variant(kind) => items.push(RunItem::new(path.clone(), kind)),
            Classification::Skip(SkipReason::Companion) => {
                tracing::debug!(path = %path.display(), "Skipping command file");
            }
            Classification::Skip(SkipReason::Unrecognised) => {
                let err = SchemaError::Unrecognised { path: path.clone() };
                write_warning(out, &err.into())?;
            }
        }
    }

    tracing::debug!(targets = paths.len(), classified = items.len(), "Classification done");
    Ok(items)
}

/// Process every plan item and collect the figures to show.
///
/// With `do_plot` unset nothing is plotted and every item prints its
/// diagnostics. The last collected figure is the hold-open one.
pub fn execute<W: Write>(
    plan: &[RunItem],
    opts: &RunOptions,
    style: &PlotStyle,
    out: &mut W,
) -> Result<Vec<Figure>> {
    let mut figures = Vec::new();
    let last = plan.len().saturating_sub(1);

    for (i, item) in plan.iter().enumerate() {
        let viewer = match Viewer::open(item.clone(), opts.remove_missing) {
            Ok(v) => v,
            Err(e) if e.is_run_fatal() => return Err(e),
            Err(e) => {
                warn(out, &e);
                continue;
            }
        };

        if !opts.do_plot || opts.show_info {
            if let Err(e) = viewer.print_all_info(&mut *out) {
                tracing::warn!(path = %item.path.display(), error = %e, "Failed to write diagnostics");
            }
        }

        if opts.do_plot {
            match viewer.figure(i == last, style) {
                Ok(fig) => figures.push(fig),
                Err(e) => warn(out, &e),
            }
        }
    }

    if let Some(fig) = figures.last_mut() {
        fig.hold_open = true;
    }
    tracing::info!(items = plan.len(), figures = figures.len(), "Run complete");
    Ok(figures)
}

/// `[Warning] <error>` on the diagnostics stream.
fn write_warning<W: Write>(out: &mut W, err: &VgeViewerError) -> io::Result<()> {
    tracing::debug!(error = ?err, "Per-file failure");
    writeln!(out, "[Warning] {err}")
}

fn warn<W: Write>(out: &mut W, err: &VgeViewerError) {
    if let Err(e) = write_warning(out, err) {
        tracing::warn!(error = %e, "Failed to write warning");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::VariantKind;
    use crate::util::error::LoadError;
    use std::fs as stdfs;

    const JOBLIST: &str = "jobid,status,return_code,sendvgetime,start_time,finish_time,filename\n\
                           0,OK,0,2024-01-01 00:00:05.1,2024-01-01 00:00:06.2,2024-01-01 00:00:07.3,run1.sh.0\n";

    #[test]
    fn test_classify_skips_command_and_warns_unknown() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.csv");
        let b = dir.path().join("b.csv");
        let c = dir.path().join("c.csv");
        stdfs::write(&a, JOBLIST).unwrap();
        stdfs::write(&b, "command,x\nls,1\n").unwrap();
        stdfs::write(&c, "foo,bar\n1,2\n").unwrap();

        let mut out = Vec::new();
        let items = classify_targets(&[a.clone(), b, c], &mut out).unwrap();
        assert_eq!(items, vec![RunItem::new(a, VariantKind::Joblist)]);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with(
            "[Warning] Header line does not contain jobid, worker_rank, or command in "
        ));
    }

    #[test]
    fn test_no_plot_prints_info_only() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.csv");
        stdfs::write(&a, JOBLIST).unwrap();

        let opts = RunOptions::default();
        let mut out = Vec::new();
        let figures = execute(
            &[RunItem::new(&a, VariantKind::Joblist)],
            &opts,
            &PlotStyle::default(),
            &mut out,
        )
        .unwrap();
        assert!(figures.is_empty());
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Job status"));
    }

    #[test]
    fn test_plot_without_info_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.csv");
        stdfs::write(&a, JOBLIST).unwrap();

        let opts = RunOptions {
            do_plot: true,
            ..RunOptions::default()
        };
        let plan = [
            RunItem::new(&a, VariantKind::Joblist),
            RunItem::new(&a, VariantKind::JobTime),
        ];
        let mut out = Vec::new();
        let figures = execute(&plan, &opts, &PlotStyle::default(), &mut out).unwrap();
        assert!(out.is_empty());
        assert_eq!(figures.len(), 2);
        assert!(!figures[0].hold_open);
        assert!(figures[1].hold_open);
    }

    #[test]
    fn test_empty_dataset_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.csv");
        stdfs::write(&a, "jobid,status\n").unwrap();

        let opts = RunOptions {
            do_plot: true,
            ..RunOptions::default()
        };
        let mut out = Vec::new();
        let result = execute(
            &[RunItem::new(&a, VariantKind::Joblist)],
            &opts,
            &PlotStyle::default(),
            &mut out,
        );
        assert!(matches!(
            result,
            Err(VgeViewerError::Load(LoadError::Empty { .. }))
        ));
    }

    #[test]
    fn test_bad_timestamp_warns_and_continues() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.csv");
        let good = dir.path().join("good.csv");
        stdfs::write(
            &bad,
            "jobid,sendvgetime,start_time,finish_time,filename\n0,yesterday,x,y,a.sh.0\n",
        )
        .unwrap();
        stdfs::write(&good, JOBLIST).unwrap();

        let opts = RunOptions {
            do_plot: true,
            ..RunOptions::default()
        };
        let plan = [
            RunItem::new(&bad, VariantKind::Joblist),
            RunItem::new(&good, VariantKind::Joblist),
        ];
        let mut out = Vec::new();
        let figures = execute(&plan, &opts, &PlotStyle::default(), &mut out).unwrap();
        assert_eq!(figures.len(), 1);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("[Warning] "), "{text}");
        assert!(text.contains(&format!("'{}'", bad.display())), "{text}");
        assert!(text.contains("'yesterday'"), "{text}");
    }
}
