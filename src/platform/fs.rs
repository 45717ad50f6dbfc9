// VgeViewer - platform/fs.rs
//
// Filesystem helpers: target path resolution and header sniffing.

use crate::util::constants;
use crate::util::error::TargetError;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

/// Read the first line of a file without its line terminator.
///
/// Invalid UTF-8 is replaced rather than rejected; an empty file yields an
/// empty string.
pub fn read_header_line(path: &Path) -> io::Result<String> {
    let file = std::fs::File::open(path)?;
    let mut reader = io::BufReader::new(file);
    let mut buf = Vec::new();
    reader.read_until(b'\n', &mut buf)?;
    let line = String::from_utf8_lossy(&buf);
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Expand command-line paths into a flat, ordered list of absolute files.
///
/// Files are taken as given. Directories contribute their `*.csv`
/// children (non-recursive, sorted by name). Anything else is fatal.
pub fn resolve_targets(paths: &[PathBuf]) -> Result<Vec<PathBuf>, TargetError> {
    let mut targets = Vec::new();

    for path in paths {
        let abs = absolute(path)?;
        let meta = match std::fs::metadata(&abs) {
            Ok(m) => m,
            Err(e) => {
                tracing::debug!(path = %abs.display(), error = %e, "Target metadata unavailable");
                return Err(TargetError::NotFound { path: abs });
            }
        };

        if meta.is_dir() {
            let found = csv_children(&abs)?;
            tracing::debug!(dir = %abs.display(), files = found.len(), "Expanded directory");
            targets.extend(found);
        } else if meta.is_file() {
            targets.push(abs);
        } else {
            return Err(TargetError::NotFileOrDirectory { path: abs });
        }
    }

    Ok(targets)
}

fn absolute(path: &Path) -> Result<PathBuf, TargetError> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(|e| TargetError::CurrentDir { source: e })?;
    Ok(cwd.join(path))
}

fn csv_children(dir: &Path) -> Result<Vec<PathBuf>, TargetError> {
    let pattern = format!(
        "{}/*.{}",
        glob::Pattern::escape(&dir.to_string_lossy()),
        constants::TARGET_EXTENSION
    );
    let entries = glob::glob(&pattern).map_err(|e| TargetError::Glob {
        pattern: pattern.clone(),
        source: e,
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(p) if p.is_file() => Some(p),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Skipping unreadable directory entry");
                None
            }
        })
        .collect();
    files.sort();
    Ok(files)
}
