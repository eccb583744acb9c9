//! Output formatting for snpflank results.
//!
//! This module writes annotation rows, the database dump and the report of
//! markers whose contig was not found.

use anyhow::Result;

use std::io::Write;

use crate::config::AssemblyPolicy;
use crate::index::GenomicAnnotationIndex;
use crate::types::{Annotation, AssemblySource, Strand};

/// Header line of the unresolved marker report.
pub const UNRESOLVED_HEADER: &str = "# The following markers were not found in the database:";

/// Format a single annotation row.
///
/// Columns: marker id, gene id, gene name, distance, side (5 or 3).
pub fn format_annotation_line(annotation: &Annotation<'_>) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}",
        annotation.marker_id,
        annotation.gene_id,
        annotation.gene_name,
        annotation.distance,
        annotation.side
    )
}

/// Write a single annotation row.
pub fn write_annotation<W: Write>(writer: &mut W, annotation: &Annotation<'_>) -> Result<()> {
    writeln!(writer, "{}", format_annotation_line(annotation))?;
    Ok(())
}

/// Write the unresolved marker report: the header, then one id per line.
pub fn write_unresolved_report<W: Write>(writer: &mut W, unresolved: &[u32]) -> Result<()> {
    writeln!(writer, "{}", UNRESOLVED_HEADER)?;
    for id in unresolved {
        writeln!(writer, "{}", id)?;
    }
    Ok(())
}

/// Write every gene of the index as a fixed-width line.
///
/// Columns: chromosome number, contig, gene id, gene name, 5' coordinate,
/// 3' coordinate, strand, source tag. Plus-strand genes of a contig come
/// before its minus-strand genes. Returns the number of lines written.
pub fn write_database_dump<W: Write>(
    writer: &mut W,
    index: &GenomicAnnotationIndex,
    policy: &AssemblyPolicy,
) -> Result<usize> {
    let mut lines = 0;
    for (chromosome, contigs) in index.chromosomes() {
        for (contig, sets) in contigs {
            for strand in [Strand::Positive, Strand::Negative] {
                for (gene_id, gene) in sets.genes(strand) {
                    let tag = match gene.source {
                        AssemblySource::Primary => &policy.primary_tag,
                        AssemblySource::Alternate => &policy.alternate_tag,
                    };
                    writeln!(
                        writer,
                        "{:>2}{:>16}{:>12}{:>18}{:>10}{:>10}{:>3}{:>16}",
                        chromosome.number(),
                        contig,
                        gene_id,
                        gene.name,
                        gene.p5,
                        gene.p3,
                        strand.as_str(),
                        tag
                    )?;
                    lines += 1;
                }
            }
        }
    }
    Ok(lines)
}
