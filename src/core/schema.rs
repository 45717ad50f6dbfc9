// VgeViewer - core/schema.rs
//
// Header-based schema classification. Only the first line of a file is
// inspected; the caller decides how to surface each skip reason.

use crate::core::model::VariantKind;
use crate::util::constants;

/// Why a file was left out of the run plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Companion `command` file; skipped silently.
    Companion,
    /// Header matches no known schema; the caller warns.
    Unrecognised,
}

/// Result of classifying a header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Variant(VariantKind),
    Skip(SkipReason),
}

/// Classify a raw header line. First match wins, case-sensitive.
pub fn classify_header(line: &str) -> Classification {
    let header = line
        .strip_prefix('\u{feff}')
        .unwrap_or(line)
        .trim_end_matches(['\r', '\n']);

    if header.starts_with(constants::HEADER_PREFIX_JOBLIST) {
        Classification::Variant(VariantKind::Joblist)
    } else if header.starts_with(constants::HEADER_PREFIX_WORKER_RESULT) {
        Classification::Variant(VariantKind::WorkerResult)
    } else if header.starts_with(constants::HEADER_PREFIX_COMMAND) {
        Classification::Skip(SkipReason::Companion)
    } else {
        Classification::Skip(SkipReason::Unrecognised)
    }
}
