//! Marker list parser with gzip support.
//!
//! Each line is `marker_id \t chromosome \t contig \t position`, trailing
//! columns are ignored.

use anyhow::{Context, Result};
use std::io::BufRead;
use std::path::Path;

use crate::error::{parse_u32, RecordError};
use crate::parser::util::{open_input, trim_newline};
use crate::types::{Chromosome, Marker};

/// Minimum number of fields in a marker line.
pub const MIN_MARKER_FIELDS: usize = 4;

/// Parse one marker line.
///
/// Returns `Ok(None)` for blank lines and for markers whose chromosome is not
/// recognized; those are skipped without being reported.
pub fn parse_marker_line(line: &str) -> Result<Option<Marker>, RecordError> {
    if line.trim().is_empty() {
        return Ok(None);
    }
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < MIN_MARKER_FIELDS {
        return Err(RecordError::TooFewFields {
            expected: MIN_MARKER_FIELDS,
            found: fields.len(),
        });
    }

    let Some(chromosome) = Chromosome::parse(fields[1]) else {
        return Ok(None);
    };
    let id = parse_u32("marker id", fields[0])?;
    let position = parse_u32("marker position", fields[3])?;

    Ok(Some(Marker::new(id, chromosome, fields[2].to_string(), position)))
}

/// Streaming marker list reader.
///
/// Yields markers in file order. Errors carry the 1-based line number.
pub struct MarkerReader {
    reader: Box<dyn BufRead + Send>,
    line: String,
    line_number: usize,
}

impl MarkerReader {
    /// Open a marker list (plain or gzip).
    pub fn new(path: &Path) -> Result<Self> {
        let reader = open_input(path).context("Failed to open marker list")?;
        Ok(Self::from_reader(reader))
    }

    /// Read markers from an already opened reader.
    pub fn from_reader(reader: Box<dyn BufRead + Send>) -> Self {
        MarkerReader {
            reader,
            line: String::new(),
            line_number: 0,
        }
    }

    /// Read the next marker, skipping lines that do not yield one.
    pub fn read_marker(&mut self) -> Result<Option<Marker>> {
        loop {
            self.line.clear();
            let bytes_read = self
                .reader
                .read_line(&mut self.line)
                .context("Failed to read marker line")?;
            if bytes_read == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let parsed = parse_marker_line(trim_newline(&self.line))
                .with_context(|| format!("Malformed marker at line {}", self.line_number))?;
            if let Some(marker) = parsed {
                return Ok(Some(marker));
            }
        }
    }
}

impl Iterator for MarkerReader {
    type Item = Result<Marker>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_marker().transpose()
    }
}
