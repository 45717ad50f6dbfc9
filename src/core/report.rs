// VgeViewer - core/report.rs
//
// Text diagnostics for a loaded dataset.
//
// Every section is numbered by a `DiagnosticSession`, which is created per
// file so numbering restarts at [1]. The aggregate helpers are one-pass
// scans with no state kept across files. Output goes to any `Write`.

use crate::core::model::{Column, Dataset, Value};
use crate::util::constants;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::io::{self, Write};
use std::path::Path;

// =============================================================================
// Tables
// =============================================================================

/// A small labelled table rendered in the familiar dataframe layout:
/// a header row of value-column names, a left-aligned index column and
/// right-aligned values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<(String, Vec<String>)>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| (*h).to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, index: impl Into<String>, values: Vec<String>) {
        self.rows.push((index.into(), values));
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let index_width = self
            .rows
            .iter()
            .map(|(idx, _)| idx.chars().count())
            .max()
            .unwrap_or(0);

        let widths: Vec<usize> = self
            .headers
            .iter()
            .enumerate()
            .map(|(c, h)| {
                self.rows
                    .iter()
                    .filter_map(|(_, vals)| vals.get(c))
                    .map(|v| v.chars().count())
                    .chain(std::iter::once(h.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        write!(f, "{:<index_width$}", "")?;
        for (h, &w) in self.headers.iter().zip(&widths) {
            write!(f, "  {h:>w$}")?;
        }
        writeln!(f)?;

        for (idx, vals) in &self.rows {
            write!(f, "{idx:<index_width$}")?;
            for (c, &w) in widths.iter().enumerate() {
                let v = vals.get(c).map(String::as_str).unwrap_or("");
                write!(f, "  {v:>w$}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// =============================================================================
// Session
// =============================================================================

/// Numbered diagnostic output for one file.
pub struct DiagnosticSession<W: Write> {
    out: W,
    next_section: usize,
}

impl<W: Write> DiagnosticSession<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            next_section: 1,
        }
    }

    /// Number of sections written so far.
    pub fn sections_written(&self) -> usize {
        self.next_section - 1
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// `[File] <path>` followed by a blank line. Not numbered.
    pub fn file_banner(&mut self, path: &Path) -> io::Result<()> {
        writeln!(self.out, "[File] {}\n", path.display())
    }

    /// A numbered notice with no table.
    pub fn notice(&mut self, msg: &str) -> io::Result<()> {
        self.heading(msg)?;
        writeln!(self.out)
    }

    /// A numbered section followed by its table.
    pub fn table(&mut self, msg: &str, table: &Table) -> io::Result<()> {
        self.heading(msg)?;
        write!(self.out, "{table}")?;
        writeln!(self.out)
    }

    fn heading(&mut self, msg: &str) -> io::Result<()> {
        writeln!(self.out, "[{}] {msg}", self.next_section)?;
        self.next_section += 1;
        Ok(())
    }
}

// =============================================================================
// Aggregates
// =============================================================================

/// Per-column missing cell counts, only for columns with at least one.
pub fn missing_value_counts(dataset: &Dataset) -> Vec<(String, usize)> {
    dataset
        .columns
        .iter()
        .map(|c| (c.name.clone(), c.missing_count()))
        .filter(|(_, n)| *n > 0)
        .collect()
}

/// Distinct present values with their frequency, most frequent first.
/// Ties keep first-appearance order.
pub fn value_counts(column: &Column) -> Vec<(String, usize)> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for (_, value) in column.present() {
        let key = value.to_string();
        let n = counts.entry(key.clone()).or_insert(0);
        if *n == 0 {
            order.push(key);
        }
        *n += 1;
    }

    let mut out: Vec<(String, usize)> = order
        .into_iter()
        .map(|k| {
            let n = counts.get(&k).copied().unwrap_or(0);
            (k, n)
        })
        .collect();
    // Stable sort keeps first-appearance order among equal counts.
    out.sort_by(|a, b| b.1.cmp(&a.1));
    out
}

/// Present return codes that are not numerically zero, with their source
/// row index. Text that does not parse as a number counts as non-zero.
pub fn non_zero_return_codes(dataset: &Dataset) -> Vec<(usize, Value)> {
    let Some(column) = dataset.column(constants::COL_RETURN_CODE) else {
        return Vec::new();
    };
    column
        .present()
        .filter(|(_, v)| match v {
            Value::Int(n) => *n != 0,
            Value::Float(x) => *x != 0.0,
            Value::Text(s) => s.trim().parse::<f64>().map_or(true, |x| x != 0.0),
            _ => true,
        })
        .map(|(pos, v)| (dataset.source_row(pos), v.clone()))
        .collect()
}

/// Minimum and maximum present value of a column.
pub fn min_max(column: &Column) -> Option<(Value, Value)> {
    let mut present = column.present().map(|(_, v)| v);
    let first = present.next()?;
    let (lo, hi) = present.fold((first, first), |(lo, hi), v| {
        let lo = if compare(v, lo) == Ordering::Less { v } else { lo };
        let hi = if compare(v, hi) == Ordering::Greater { v } else { hi };
        (lo, hi)
    });
    Some((lo.clone(), hi.clone()))
}

/// Order two present values of the same column.
fn compare(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::DateTime(x), Value::DateTime(y)) => x.cmp(y),
        (Value::Text(x), Value::Text(y)) => x.cmp(y),
        _ => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            _ => a.to_string().cmp(&b.to_string()),
        },
    }
}

// =============================================================================
// Reports
// =============================================================================

/// Missing-value section; every variant gets this.
pub fn print_missing_value_report<W: Write>(
    session: &mut DiagnosticSession<W>,
    dataset: &Dataset,
) -> io::Result<()> {
    let counts = missing_value_counts(dataset);
    if counts.is_empty() {
        return session.notice("No missing values");
    }

    let mut table = Table::new(&["count"]);
    for (name, n) in counts {
        table.push(name, vec![n.to_string()]);
    }
    session.table("Columns have missing values", &table)
}

/// Job time range section; needs all three time columns.
pub fn print_time_ranges<W: Write>(
    session: &mut DiagnosticSession<W>,
    dataset: &Dataset,
) -> io::Result<()> {
    let columns: Option<Vec<&Column>> = constants::TIME_COLUMNS
        .iter()
        .map(|name| dataset.column(name))
        .collect();
    let Some(columns) = columns else {
        return Ok(());
    };

    let mut table = Table::new(&["min", "max"]);
    for column in columns {
        let (lo, hi) = match min_max(column) {
            Some((lo, hi)) => (lo.to_string(), hi.to_string()),
            None => ("NaT".to_string(), "NaT".to_string()),
        };
        table.push(column.name.clone(), vec![lo, hi]);
    }
    session.table("Job execution time", &table)
}

/// Status frequency and non-zero return code sections.
pub fn print_value_counts<W: Write>(
    session: &mut DiagnosticSession<W>,
    dataset: &Dataset,
) -> io::Result<()> {
    if let Some(status) = dataset.column(constants::COL_STATUS) {
        let counts = value_counts(status);
        if !counts.is_empty() {
            let mut table = Table::new(&[status.name.as_str()]);
            for (value, n) in counts {
                table.push(value, vec![n.to_string()]);
            }
            session.table("Job status", &table)?;
        }
    }

    if let Some(rc) = dataset.column(constants::COL_RETURN_CODE) {
        let non_zero = non_zero_return_codes(dataset);
        if !non_zero.is_empty() {
            let mut table = Table::new(&[rc.name.as_str()]);
            for (row, value) in non_zero {
                table.push(row.to_string(), vec![value.to_string()]);
            }
            session.table("Non-zero return code found", &table)?;
        }
    }
    Ok(())
}

/// Banner and missing values; the whole report for worker results.
pub fn report_base<W: Write>(
    session: &mut DiagnosticSession<W>,
    dataset: &Dataset,
) -> io::Result<()> {
    session.file_banner(&dataset.path)?;
    print_missing_value_report(session, dataset)
}

/// Full job list report.
pub fn report_joblist<W: Write>(
    session: &mut DiagnosticSession<W>,
    dataset: &Dataset,
) -> io::Result<()> {
    report_base(session, dataset)?;
    print_time_ranges(session, dataset)?;
    print_value_counts(session, dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::loader::load_from_reader;
    use std::path::PathBuf;

    fn load(csv: &str) -> Dataset {
        load_from_reader(csv.as_bytes(), &PathBuf::from("r.csv"), false).unwrap()
    }

    fn render<F>(ds: &Dataset, f: F) -> String
    where
        F: FnOnce(&mut DiagnosticSession<Vec<u8>>, &Dataset) -> io::Result<()>,
    {
        let mut session = DiagnosticSession::new(Vec::new());
        f(&mut session, ds).unwrap();
        String::from_utf8(session.into_inner()).unwrap()
    }

    #[test]
    fn test_value_counts_descending() {
        let ds = load("status\nA\nA\nB\n");
        let counts = value_counts(ds.column("status").unwrap());
        assert_eq!(counts, vec![("A".to_string(), 2), ("B".to_string(), 1)]);
    }

    #[test]
    fn test_value_counts_ties_keep_first_appearance() {
        let ds = load("status\nB\nA\nA\nB\nC\n");
        let counts = value_counts(ds.column("status").unwrap());
        assert_eq!(
            counts,
            vec![
                ("B".to_string(), 2),
                ("A".to_string(), 2),
                ("C".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_non_zero_return_codes_keep_rows() {
        let ds = load("return_code\n0\n1\n\n0\n-9\n");
        let rc = non_zero_return_codes(&ds);
        assert_eq!(rc, vec![(1, Value::Int(1)), (4, Value::Int(-9))]);
    }

    #[test]
    fn test_non_zero_return_codes_float_and_text() {
        let ds = load("return_code\n0.0\n2.5\n");
        let rc = non_zero_return_codes(&ds);
        assert_eq!(rc, vec![(1, Value::Float(2.5))]);

        let ds = load("return_code\n0\nkilled\n");
        let rc = non_zero_return_codes(&ds);
        assert_eq!(rc, vec![(1, Value::Text("killed".to_string()))]);
    }

    #[test]
    fn test_non_zero_return_codes_use_source_rows_after_removal() {
        let csv = "jobid,status,return_code\n1,,0\n2,OK,5\n";
        let ds = load_from_reader(csv.as_bytes(), &PathBuf::from("r.csv"), true).unwrap();
        assert_eq!(non_zero_return_codes(&ds), vec![(1, Value::Int(5))]);

        let out = render(&ds, print_value_counts);
        let table: Vec<&str> = out.lines().skip_while(|l| !l.contains("Non-zero")).collect();
        assert!(table.iter().any(|l| l.starts_with("1 ") && l.ends_with('5')), "{out}");
    }

    #[test]
    fn test_missing_report_lists_only_gappy_columns() {
        let ds = load("a,b,c\n1,,3\n4,,\n");
        let out = render(&ds, print_missing_value_report);
        assert!(out.starts_with("[1] Columns have missing values\n"));
        assert!(out.contains("b      2") || out.contains("b  "), "{out}");
        assert!(!out.lines().any(|l| l.starts_with("a ")), "{out}");
        assert_eq!(missing_value_counts(&ds), vec![("b".to_string(), 2), ("c".to_string(), 1)]);
    }

    #[test]
    fn test_missing_report_notice_when_clean() {
        let ds = load("a\n1\n");
        let out = render(&ds, print_missing_value_report);
        assert_eq!(out, "[1] No missing values\n\n");
    }

    #[test]
    fn test_sections_are_numbered() {
        let ds = load("jobid,status,return_code\n1,OK,0\n2,NG,3\n");
        let mut buf = Vec::new();
        let mut session = DiagnosticSession::new(&mut buf);
        report_joblist(&mut session, &ds).unwrap();
        assert_eq!(session.sections_written(), 3);
        let out = String::from_utf8(buf).unwrap();
        assert!(out.starts_with("[File] r.csv\n\n[1] No missing values\n"));
        assert!(out.contains("[2] Job status\n"));
        assert!(out.contains("[3] Non-zero return code found\n"));
    }

    #[test]
    fn test_time_ranges_need_all_three_columns() {
        let ds = load("jobid,start_time,finish_time\n1,a,b\n");
        let out = render(&ds, print_time_ranges);
        assert!(out.is_empty());
    }

    #[test]
    fn test_min_max_numeric() {
        let ds = load("x\n3\n-1\n\n7\n");
        assert_eq!(
            min_max(ds.column("x").unwrap()),
            Some((Value::Int(-1), Value::Int(7)))
        );
    }

    #[test]
    fn test_table_layout() {
        let mut table = Table::new(&["count"]);
        table.push("sendvgetime", vec!["2".to_string()]);
        table.push("status", vec!["10".to_string()]);
        let text = table.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "             count");
        assert_eq!(lines[1], "sendvgetime      2");
        assert_eq!(lines[2], "status          10");
    }
}
