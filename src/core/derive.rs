// VgeViewer - core/derive.rs
//
// Load-time column derivation for job list datasets.
//
// Only the documented columns are touched, in place: the three job time
// columns become datetimes and `filename` is shortened for display. Column
// order and row count never change.

use crate::core::model::{Column, ColumnKind, Dataset, Value};
use crate::util::constants;
use crate::util::error::DerivationError;
use chrono::NaiveDateTime;
use regex::Regex;
use std::path::Path;

/// Derive job list columns. Columns that are absent are skipped.
pub fn derive_joblist(dataset: &mut Dataset) -> Result<(), DerivationError> {
    let Dataset {
        path,
        row_ids,
        columns,
    } = &mut *dataset;

    for name in constants::TIME_COLUMNS {
        if let Some(column) = columns.iter_mut().find(|c| c.name == name) {
            derive_datetime_column(column, path, row_ids)?;
        }
    }

    if let Some(column) = dataset.column_mut(constants::COL_FILENAME) {
        derive_filename_column(column)?;
    }

    Ok(())
}

/// Worker result files are used as loaded.
pub fn derive_none(_dataset: &mut Dataset) -> Result<(), DerivationError> {
    Ok(())
}

/// Parse every present cell of `column` as a job timestamp.
///
/// All cells are parsed before the column is replaced, so a failure leaves
/// the column untouched. Errors report the source row from `row_ids`.
fn derive_datetime_column(
    column: &mut Column,
    path: &Path,
    row_ids: &[usize],
) -> Result<(), DerivationError> {
    let mut parsed = Vec::with_capacity(column.values.len());
    for (pos, value) in column.values.iter().enumerate() {
        let derived = match value {
            Value::Missing => Value::Missing,
            Value::DateTime(t) => Value::DateTime(*t),
            other => {
                let raw = other.to_string();
                let t = parse_job_time(&raw).ok_or_else(|| DerivationError::Timestamp {
                    path: path.to_path_buf(),
                    column: column.name.clone(),
                    row: row_ids.get(pos).copied().unwrap_or(pos),
                    raw: raw.clone(),
                    format: constants::JOB_TIME_FORMAT,
                })?;
                Value::DateTime(t)
            }
        };
        parsed.push(derived);
    }

    column.values = parsed;
    column.kind = ColumnKind::DateTime;
    Ok(())
}

/// Strip the sub-second suffix (everything from the last `.`) and parse the
/// remainder with the job time format.
pub fn parse_job_time(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    let whole_seconds = match trimmed.rfind('.') {
        Some(pos) => &trimmed[..pos],
        None => trimmed,
    };
    NaiveDateTime::parse_from_str(whole_seconds, constants::JOB_TIME_FORMAT).ok()
}

fn derive_filename_column(column: &mut Column) -> Result<(), DerivationError> {
    let suffix = Regex::new(constants::FILENAME_SUFFIX_PATTERN).map_err(|e| {
        DerivationError::Pattern {
            pattern: constants::FILENAME_SUFFIX_PATTERN,
            source: e,
        }
    })?;

    for value in column.values.iter_mut() {
        if value.is_missing() {
            continue;
        }
        *value = Value::Text(shorten_filename(&suffix, &value.to_string()));
    }
    column.kind = ColumnKind::Text;
    Ok(())
}

/// Remove a trailing `.sh.<digits>` job-script suffix and keep at most
/// `FILENAME_MAX_CHARS` characters.
pub fn shorten_filename(suffix: &Regex, name: &str) -> String {
    suffix
        .replace(name, "")
        .chars()
        .take(constants::FILENAME_MAX_CHARS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::loader::load_from_reader;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn suffix() -> Regex {
        Regex::new(constants::FILENAME_SUFFIX_PATTERN).unwrap()
    }

    fn dt(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_parse_job_time_strips_fraction() {
        assert_eq!(parse_job_time("2024-01-01 00:00:00.123"), Some(dt(0, 0, 0)));
        assert_eq!(parse_job_time("2024-01-01 10:20:30"), Some(dt(10, 20, 30)));
    }

    #[test]
    fn test_parse_job_time_rejects_other_formats() {
        assert_eq!(parse_job_time("2024/01/01 00:00:00"), None);
        assert_eq!(parse_job_time("yesterday"), None);
    }

    #[test]
    fn test_shorten_filename() {
        let re = suffix();
        assert_eq!(shorten_filename(&re, "run1.sh.42"), "run1");
        assert_eq!(shorten_filename(&re, "run1.sh42"), "run1");
        assert_eq!(shorten_filename(&re, "very_long_job_name.sh.7"), "very_long_");
        assert_eq!(shorten_filename(&re, "a.sh.42.txt"), "a.sh.42.tx");
        assert_eq!(shorten_filename(&re, "plain"), "plain");
    }

    #[test]
    fn test_shorten_filename_counts_characters() {
        let re = suffix();
        assert_eq!(shorten_filename(&re, "ジョブジョブジョブジョブ.sh.1"), "ジョブジョブジョブジ");
    }

    #[test]
    fn test_derive_joblist_in_place() {
        let csv = "jobid,start_time,filename,status\n\
                   1,2024-01-01 00:00:01.5,job.sh.3,done\n\
                   2,,other.sh.4,done\n";
        let mut ds = load_from_reader(csv.as_bytes(), &PathBuf::from("j.csv"), false).unwrap();
        derive_joblist(&mut ds).unwrap();

        assert_eq!(ds.column_names(), vec!["jobid", "start_time", "filename", "status"]);
        assert_eq!(ds.row_count(), 2);
        let start = ds.column("start_time").unwrap();
        assert_eq!(start.kind, ColumnKind::DateTime);
        assert_eq!(start.values, vec![Value::DateTime(dt(0, 0, 1)), Value::Missing]);
        let names = ds.column("filename").unwrap();
        assert_eq!(
            names.values,
            vec![Value::Text("job".to_string()), Value::Text("other".to_string())]
        );
    }

    #[test]
    fn test_bad_timestamp_names_column_and_row() {
        let csv = "jobid,finish_time\n1,2024-01-01 00:00:00\n2,not a time\n";
        let mut ds = load_from_reader(csv.as_bytes(), &PathBuf::from("j.csv"), false).unwrap();
        let err = derive_joblist(&mut ds).unwrap_err();
        match err {
            DerivationError::Timestamp {
                path,
                column,
                row,
                raw,
                ..
            } => {
                assert_eq!(path, PathBuf::from("j.csv"));
                assert_eq!(column, "finish_time");
                assert_eq!(row, 1);
                assert_eq!(raw, "not a time");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        // Failed column is left as loaded.
        assert_eq!(ds.column("finish_time").unwrap().kind, ColumnKind::Text);
    }

    #[test]
    fn test_bad_timestamp_row_counts_dropped_rows() {
        let csv = "jobid,status,start_time\n1,,2024-01-01 00:00:00\n2,OK,soon\n";
        let mut ds = load_from_reader(csv.as_bytes(), &PathBuf::from("j.csv"), true).unwrap();
        assert_eq!(ds.row_count(), 1);
        match derive_joblist(&mut ds).unwrap_err() {
            DerivationError::Timestamp { row, raw, .. } => {
                assert_eq!(row, 1);
                assert_eq!(raw, "soon");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_worker_result_untouched() {
        let csv = "worker_rank,job_count\n0,3\n";
        let mut ds = load_from_reader(csv.as_bytes(), &PathBuf::from("w.csv"), false).unwrap();
        let before = ds.clone();
        derive_none(&mut ds).unwrap();
        assert_eq!(ds, before);
    }
}
