//! Two-pass construction of the gene index.
//!
//! The primary pass reads genes from the primary assembly. The alternate
//! pass reads the alternate assembly of the special chromosome and only adds
//! genes the primary pass never saw on that chromosome. The primary pass
//! returns the set of gene ids it saw there, and the alternate pass takes it
//! as input.

use ahash::AHashSet;
use anyhow::{Context, Result};
use log::{debug, info};
use std::io::BufRead;
use std::path::Path;

use crate::config::{AssemblyPolicy, CoordinateMode};
use crate::error::RecordError;
use crate::index::GenomicAnnotationIndex;
use crate::parser::annotation::{AnnotationRecord, RawRecord};
use crate::parser::util::{open_input, trim_newline};
use crate::types::{AssemblySource, GeneInfo};

/// Gene ids the primary pass placed on the alternate chromosome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrimaryChromosomeGenes {
    ids: AHashSet<u32>,
}

impl PrimaryChromosomeGenes {
    pub fn contains(&self, gene_id: u32) -> bool {
        self.ids.contains(&gene_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Counters for one ingestion pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Non-comment lines read.
    pub lines: usize,
    /// Records that passed every filter of the pass.
    pub accepted: usize,
    /// Gene entries created by the pass.
    pub created: usize,
}

/// Builds a [`GenomicAnnotationIndex`] from database records.
pub struct IndexBuilder<'a> {
    policy: &'a AssemblyPolicy,
    mode: CoordinateMode,
    index: GenomicAnnotationIndex,
}

impl<'a> IndexBuilder<'a> {
    pub fn new(policy: &'a AssemblyPolicy, mode: CoordinateMode) -> Self {
        IndexBuilder {
            policy,
            mode,
            index: GenomicAnnotationIndex::new(),
        }
    }

    /// Ingest the primary assembly.
    ///
    /// A gene seen again on the same contig and strand keeps its name and
    /// source but takes the coordinates of the latest record.
    pub fn primary_pass<R: BufRead>(
        &mut self,
        reader: R,
    ) -> Result<(PrimaryChromosomeGenes, PassStats)> {
        let policy = self.policy;
        let mode = self.mode;
        let mut seen = PrimaryChromosomeGenes::default();
        let mut stats = PassStats::default();

        for_each_line(reader, &mut stats, |line, stats| {
            let raw = RawRecord::split(line)?;
            if !raw.is_gene() {
                return Ok(());
            }
            let Some(chromosome) = raw.chromosome() else {
                return Ok(());
            };
            if !policy.primary_label.is_match(raw.group_label()) {
                return Ok(());
            }
            let record = raw.parse(chromosome, mode)?;
            stats.accepted += 1;

            self.insert_primary(&record, stats);
            if record.chromosome == policy.alternate_chromosome {
                seen.ids.insert(record.gene_id);
            }
            Ok(())
        })?;

        info!(
            "Primary pass: {} lines, {} gene records accepted, {} genes indexed",
            stats.lines, stats.accepted, stats.created
        );
        Ok((seen, stats))
    }

    /// Ingest the alternate assembly of the special chromosome.
    ///
    /// Genes listed in `seen` are skipped entirely; others are added once
    /// and never refreshed by later records.
    pub fn alternate_pass<R: BufRead>(
        &mut self,
        reader: R,
        seen: &PrimaryChromosomeGenes,
    ) -> Result<PassStats> {
        let policy = self.policy;
        let mode = self.mode;
        let mut stats = PassStats::default();

        for_each_line(reader, &mut stats, |line, stats| {
            let raw = RawRecord::split(line)?;
            let Some(chromosome) = raw.chromosome() else {
                return Ok(());
            };
            if chromosome != policy.alternate_chromosome
                || !raw.is_gene()
                || !policy.alternate_label.is_match(raw.group_label())
            {
                return Ok(());
            }
            let record = raw.parse(chromosome, mode)?;
            stats.accepted += 1;

            if seen.contains(record.gene_id) {
                debug!(
                    "Alternate gene {} already placed by the primary assembly",
                    record.gene_id
                );
                return Ok(());
            }
            self.insert_alternate(&record, stats);
            Ok(())
        })?;

        info!(
            "Alternate pass: {} records accepted, {} genes added",
            stats.accepted, stats.created
        );
        Ok(stats)
    }

    /// Finish building and hand out the read-only index.
    pub fn finish(self) -> GenomicAnnotationIndex {
        self.index
    }

    fn insert_primary(&mut self, record: &AnnotationRecord<'_>, stats: &mut PassStats) {
        let ends = record.strand.assign_ends(record.first, record.second);
        let genes = self
            .index
            .contig_mut(record.chromosome, record.contig)
            .genes_mut(record.strand);

        genes
            .entry(record.gene_id)
            .or_insert_with(|| {
                stats.created += 1;
                GeneInfo::new(record.gene_name.to_string(), ends, AssemblySource::Primary)
            })
            .set_ends(ends);
    }

    fn insert_alternate(&mut self, record: &AnnotationRecord<'_>, stats: &mut PassStats) {
        let genes = self
            .index
            .contig_mut(record.chromosome, record.contig)
            .genes_mut(record.strand);

        if !genes.contains_key(&record.gene_id) {
            let ends = record.strand.assign_ends(record.first, record.second);
            genes.insert(
                record.gene_id,
                GeneInfo::new(record.gene_name.to_string(), ends, AssemblySource::Alternate),
            );
            stats.created += 1;
        }
    }
}

/// Drive one pass over a database stream.
///
/// `handle` receives every non-comment, non-blank line without its line
/// terminator. Any error aborts the pass with the offending line number.
fn for_each_line<R, F>(mut reader: R, stats: &mut PassStats, mut handle: F) -> Result<()>
where
    R: BufRead,
    F: FnMut(&str, &mut PassStats) -> Result<(), RecordError>,
{
    let mut line = String::new();
    let mut line_number = 0usize;

    loop {
        line.clear();
        let bytes_read = reader
            .read_line(&mut line)
            .context("Failed to read gene database line")?;
        if bytes_read == 0 {
            break;
        }
        line_number += 1;

        let content = trim_newline(&line);
        if content.is_empty() || content.starts_with('#') {
            continue;
        }
        stats.lines += 1;

        handle(content, stats)
            .with_context(|| format!("Malformed gene database record at line {line_number}"))?;
    }

    Ok(())
}

/// Build the index from a database file, running both passes.
///
/// The file is opened once per pass and released before the next one.
pub fn build_index(
    path: &Path,
    policy: &AssemblyPolicy,
    mode: CoordinateMode,
) -> Result<GenomicAnnotationIndex> {
    let mut builder = IndexBuilder::new(policy, mode);

    info!("Reading gene database (primary assembly): {}", path.display());
    let seen = {
        let reader = open_input(path).context("Failed to open gene database")?;
        let (seen, _) = builder.primary_pass(reader)?;
        seen
    };
    info!(
        "{} genes on chromosome {} from the primary assembly",
        seen.len(),
        policy.alternate_chromosome
    );

    info!("Reading gene database (alternate assembly): {}", path.display());
    {
        let reader = open_input(path).context("Failed to open gene database")?;
        builder.alternate_pass(reader, &seen)?;
    }

    let index = builder.finish();
    info!(
        "Gene index built: {} contigs, {} genes",
        index.contig_count(),
        index.gene_count()
    );
    Ok(index)
}
