// VgeViewer - core/loader.rs
//
// CSV -> Dataset. Column order follows the header exactly; each column's
// kind is inferred from its non-missing cells (integer, then float, else
// text). Short rows are padded with missing cells, long rows truncated.

use crate::core::model::{Column, ColumnKind, Dataset, Value};
use crate::util::constants;
use crate::util::error::LoadError;
use std::io::Read;
use std::path::Path;

/// Load a CSV file.
///
/// With `remove_missing`, every row holding at least one missing cell is
/// dropped. Returns `LoadError::Empty` if no rows remain.
pub fn load(path: &Path, remove_missing: bool) -> Result<Dataset, LoadError> {
    let file = std::fs::File::open(path).map_err(|e| LoadError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    load_from_reader(file, path, remove_missing)
}

/// Load CSV content from any reader. `path` is recorded on the dataset and
/// used in error messages.
pub fn load_from_reader<R: Read>(
    reader: R,
    path: &Path,
    remove_missing: bool,
) -> Result<Dataset, LoadError> {
    let csv_err = |e: csv::Error| LoadError::Csv {
        path: path.to_path_buf(),
        source: e,
    };

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();
    let width = headers.len();

    let mut rows: Vec<Vec<Option<String>>> = Vec::new();
    let mut row_ids = Vec::new();
    let mut dropped = 0usize;
    for (row_id, result) in csv_reader.records().enumerate() {
        let record = result.map_err(csv_err)?;
        let row: Vec<Option<String>> = (0..width)
            .map(|i| record.get(i).and_then(normalise_field))
            .collect();

        if remove_missing && row.iter().any(Option::is_none) {
            dropped += 1;
            continue;
        }
        rows.push(row);
        row_ids.push(row_id);
    }

    if rows.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }

    let columns = headers
        .into_iter()
        .enumerate()
        .map(|(idx, name)| build_column(name, rows.iter().map(|r| r[idx].as_deref())))
        .collect();

    tracing::debug!(
        path = %path.display(),
        rows = rows.len(),
        columns = width,
        dropped,
        "Loaded CSV"
    );

    Ok(Dataset {
        path: path.to_path_buf(),
        row_ids,
        columns,
    })
}

/// `None` for empty fields and exact NA tokens, the raw text otherwise.
/// Whitespace-only fields are kept as text.
fn normalise_field(raw: &str) -> Option<String> {
    if raw.is_empty() || constants::NA_TOKENS.contains(&raw) {
        None
    } else {
        Some(raw.to_string())
    }
}

/// Infer the column kind and convert every cell.
fn build_column<'a, I>(name: String, cells: I) -> Column
where
    I: Iterator<Item = Option<&'a str>> + Clone,
{
    let mut present = cells.clone().flatten().map(str::trim).peekable();
    let kind = if present.peek().is_none() {
        ColumnKind::Text
    } else if cells
        .clone()
        .flatten()
        .all(|s| s.trim().parse::<i64>().is_ok())
    {
        ColumnKind::Integer
    } else if cells
        .clone()
        .flatten()
        .all(|s| s.trim().parse::<f64>().is_ok())
    {
        ColumnKind::Float
    } else {
        ColumnKind::Text
    };

    let values = cells
        .map(|cell| match cell {
            None => Value::Missing,
            Some(s) => match kind {
                ColumnKind::Integer => s.trim().parse().map_or(Value::Missing, Value::Int),
                ColumnKind::Float => s.trim().parse().map_or(Value::Missing, Value::Float),
                _ => Value::Text(s.to_string()),
            },
        })
        .collect();

    Column { name, kind, values }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn load_str(content: &str, remove_missing: bool) -> Result<Dataset, LoadError> {
        load_from_reader(content.as_bytes(), &PathBuf::from("test.csv"), remove_missing)
    }

    #[test]
    fn test_preserves_header_order_and_infers_kinds() {
        let ds = load_str("jobid,elapsed,status\n1,0.5,done\n2,1.25,failed\n", false).unwrap();
        assert_eq!(ds.column_names(), vec!["jobid", "elapsed", "status"]);
        assert_eq!(ds.columns[0].kind, ColumnKind::Integer);
        assert_eq!(ds.columns[1].kind, ColumnKind::Float);
        assert_eq!(ds.columns[2].kind, ColumnKind::Text);
        assert_eq!(ds.columns[1].values[1], Value::Float(1.25));
        assert_eq!(ds.row_count(), 2);
    }

    #[test]
    fn test_empty_and_na_fields_are_missing() {
        let ds = load_str("a,b\n1,\nNA,x\n", false).unwrap();
        assert_eq!(ds.columns[0].values, vec![Value::Int(1), Value::Missing]);
        assert_eq!(
            ds.columns[1].values,
            vec![Value::Missing, Value::Text("x".to_string())]
        );
    }

    #[test]
    fn test_remove_missing_drops_rows_with_any_gap() {
        let ds = load_str("a,b,c\n1,2,3\n4,,6\n7,8,9\n", true).unwrap();
        assert_eq!(ds.row_count(), 2);
        assert!(!ds.has_missing());
        assert_eq!(ds.columns[0].values, vec![Value::Int(1), Value::Int(7)]);
    }

    #[test]
    fn test_remove_missing_keeps_source_row_ids() {
        let ds = load_str("jobid,status,return_code\n1,,0\n2,OK,5\n", true).unwrap();
        assert_eq!(ds.row_count(), 1);
        assert_eq!(ds.row_ids, vec![1]);

        let kept = load_str("jobid,status,return_code\n1,,0\n2,OK,5\n", false).unwrap();
        assert_eq!(kept.row_ids, vec![0, 1]);
    }

    #[test]
    fn test_whitespace_cells_are_not_missing() {
        let ds = load_str("a,b\n1, \n2,x\n", true).unwrap();
        assert_eq!(ds.row_count(), 2);
        assert_eq!(ds.columns[1].values[0], Value::Text(" ".to_string()));
        assert_eq!(ds.columns[1].missing_count(), 0);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let ds = load_str("a,b,c\n1,2\n", false).unwrap();
        assert_eq!(ds.columns[2].values, vec![Value::Missing]);
    }

    #[test]
    fn test_header_only_is_empty() {
        let result = load_str("a,b\n", false);
        assert!(matches!(result, Err(LoadError::Empty { .. })));
    }

    #[test]
    fn test_all_rows_dropped_is_empty() {
        let result = load_str("a,b\n1,\n,2\n", true);
        assert!(matches!(result, Err(LoadError::Empty { .. })));
    }

    #[test]
    fn test_all_missing_column_is_text() {
        let ds = load_str("a,b\n1,\n2,\n", false).unwrap();
        assert_eq!(ds.columns[1].kind, ColumnKind::Text);
        assert_eq!(ds.columns[1].missing_count(), 2);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load(Path::new("/nonexistent/vgeviewer/none.csv"), false);
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }
}
