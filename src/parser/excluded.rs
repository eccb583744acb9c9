//! Excluded marker list parser.

use ahash::AHashSet;
use anyhow::{Context, Result};
use std::io::BufRead;
use std::path::Path;

use crate::error::{parse_u32, RecordError};
use crate::parser::util::open_input;

/// Marker ids that are skipped silently during resolution.
pub type ExcludedMarkers = AHashSet<u32>;

/// Length of the marker-type tag some ids carry (`rs`, `ss`).
const MARKER_TAG_LEN: usize = 2;

/// Parse one excluded id, bare (`123`) or tagged (`rs123`).
pub fn parse_excluded_id(line: &str) -> Result<u32, RecordError> {
    let trimmed = line.trim();
    let digits = match trimmed.get(..MARKER_TAG_LEN) {
        Some(tag) if tag.chars().all(|c| c.is_ascii_alphabetic()) => &trimmed[MARKER_TAG_LEN..],
        _ => trimmed,
    };
    parse_u32("excluded marker id", digits)
}

/// Load an excluded marker list (plain or gzip).
pub fn parse_excluded(path: &Path) -> Result<ExcludedMarkers> {
    let reader = open_input(path).context("Failed to open excluded marker list")?;
    parse_excluded_reader(reader)
}

/// Load excluded ids from a reader. Blank lines are ignored.
pub fn parse_excluded_reader<R: BufRead>(reader: R) -> Result<ExcludedMarkers> {
    let mut excluded = ExcludedMarkers::new();
    for (index, line_result) in reader.lines().enumerate() {
        let line = line_result.context("Failed to read excluded marker line")?;
        if line.trim().is_empty() {
            continue;
        }
        let id = parse_excluded_id(&line)
            .with_context(|| format!("Malformed excluded marker at line {}", index + 1))?;
        excluded.insert(id);
    }
    Ok(excluded)
}
