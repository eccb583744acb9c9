//! Utility functions for file parsing.

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// First two bytes of every gzip member.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Opens a file as a buffered reader that transparently handles gzip.
///
/// Compression is detected from the gzip magic bytes rather than the file
/// extension, so a database named `seq_gene.md` that is actually gzipped is
/// still read correctly. Concatenated gzip members are read as one stream.
pub fn open_input(path: &Path) -> Result<Box<dyn BufRead + Send>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    wrap_reader(file).with_context(|| format!("Failed to read {}", path.display()))
}

/// Wrap any byte source in a buffered reader, decompressing if needed.
pub fn wrap_reader<R: Read + Send + 'static>(inner: R) -> Result<Box<dyn BufRead + Send>> {
    let mut reader = BufReader::new(inner);
    let is_gzip = reader.fill_buf()?.starts_with(&GZIP_MAGIC);
    if is_gzip {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(reader))))
    } else {
        Ok(Box::new(reader))
    }
}

/// Strip a trailing `\n` or `\r\n` from a line read with `read_line`.
pub fn trim_newline(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}
