//! Nearest flanking gene resolution for markers.
//!
//! For every gene on a marker's contig, a 5' and a 3' distance is computed.
//! A marker inside the gene's extended window is at distance 0 from both
//! ends. The retained candidates of both sides become output rows.

use anyhow::Result;
use indexmap::IndexSet;
use log::{debug, info};
use std::io::Write;

use crate::index::{GeneMap, GenomicAnnotationIndex};
use crate::matcher::candidates::{DistanceCandidateSet, RetentionStrategy};
use crate::output::write_annotation;
use crate::parser::ExcludedMarkers;
use crate::types::{Annotation, GeneDistanceCandidate, GeneEnds, Marker, Side, Strand};

/// Bases the window extends upstream of a gene's 5' end.
pub const FIVE_PRIME_FLANK: u32 = 2000;

/// Bases the window extends downstream of a gene's 3' end.
pub const THREE_PRIME_FLANK: u32 = 500;

/// The extended window around a gene, as `(low, high)` coordinates.
///
/// Plus strand: `[p5 - 2000, p3 + 500]`. Minus strand: `[p3 - 500,
/// p5 + 2000]`. The lower bound floors at 0.
pub fn flank_window(strand: Strand, ends: GeneEnds) -> (u32, u32) {
    match strand {
        Strand::Positive => (
            ends.p5.saturating_sub(FIVE_PRIME_FLANK),
            ends.p3.saturating_add(THREE_PRIME_FLANK),
        ),
        Strand::Negative => (
            ends.p3.saturating_sub(THREE_PRIME_FLANK),
            ends.p5.saturating_add(FIVE_PRIME_FLANK),
        ),
    }
}

/// Inclusive containment; bounds given in either order.
pub fn is_between(a: u32, b: u32, position: u32) -> bool {
    let (low, high) = if a > b { (b, a) } else { (a, b) };
    low <= position && position <= high
}

/// The 5' and 3' distances of a marker position to a gene.
pub fn gene_distances(strand: Strand, ends: GeneEnds, position: u32) -> (u32, u32) {
    let (low, high) = flank_window(strand, ends);
    if is_between(low, high, position) {
        (0, 0)
    } else {
        (position.abs_diff(ends.p5), position.abs_diff(ends.p3))
    }
}

/// What happened to one marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerOutcome {
    /// The marker's contig was found; carries the number of rows emitted.
    Annotated(usize),
    /// The marker is on the exclusion list.
    Excluded,
    /// No gene record places anything on the marker's contig.
    Unresolved,
}

/// Resolves markers against a built index.
///
/// Holds the only state shared between markers: the two reusable candidate
/// sets and the list of unresolved marker ids.
pub struct SnpResolver<'a, S> {
    index: &'a GenomicAnnotationIndex,
    excluded: &'a ExcludedMarkers,
    five_prime: DistanceCandidateSet<'a, S>,
    three_prime: DistanceCandidateSet<'a, S>,
    unresolved: IndexSet<u32>,
}

impl<'a, S: RetentionStrategy + Clone> SnpResolver<'a, S> {
    pub fn new(index: &'a GenomicAnnotationIndex, excluded: &'a ExcludedMarkers, strategy: S) -> Self {
        SnpResolver {
            index,
            excluded,
            five_prime: DistanceCandidateSet::new(strategy.clone()),
            three_prime: DistanceCandidateSet::new(strategy),
            unresolved: IndexSet::new(),
        }
    }

    /// Resolve one marker, appending its rows to `out`.
    ///
    /// Rows for the 5' side come first, then the 3' side. The order of tied
    /// candidates within a side is not meaningful.
    pub fn resolve(&mut self, marker: &Marker, out: &mut Vec<Annotation<'a>>) -> MarkerOutcome {
        if self.excluded.contains(&marker.id) {
            return MarkerOutcome::Excluded;
        }
        let index = self.index;
        let Some(genes) = index.contig(marker.chromosome, &marker.contig) else {
            debug!(
                "Marker {} on chromosome {} contig {} has no indexed genes",
                marker.id, marker.chromosome, marker.contig
            );
            self.unresolved.insert(marker.id);
            return MarkerOutcome::Unresolved;
        };

        self.five_prime.remove_all();
        self.three_prime.remove_all();
        self.push_strand(Strand::Positive, &genes.plus, marker.position);
        self.push_strand(Strand::Negative, &genes.minus, marker.position);

        let before = out.len();
        drain_into(&mut self.five_prime, marker.id, Side::FivePrime, out);
        drain_into(&mut self.three_prime, marker.id, Side::ThreePrime, out);
        MarkerOutcome::Annotated(out.len() - before)
    }

    /// Unresolved marker ids, in first-seen order, each listed once.
    pub fn unresolved(&self) -> impl Iterator<Item = u32> + '_ {
        self.unresolved.iter().copied()
    }

    pub fn into_unresolved(self) -> Vec<u32> {
        self.unresolved.into_iter().collect()
    }

    fn push_strand(&mut self, strand: Strand, genes: &'a GeneMap, position: u32) {
        for (&gene_id, gene) in genes {
            let (d5, d3) = gene_distances(strand, gene.ends(), position);
            self.five_prime
                .push(GeneDistanceCandidate::new(gene_id, &gene.name, d5));
            self.three_prime
                .push(GeneDistanceCandidate::new(gene_id, &gene.name, d3));
        }
    }
}

fn drain_into<'a, S: RetentionStrategy>(
    set: &mut DistanceCandidateSet<'a, S>,
    marker_id: u32,
    side: Side,
    out: &mut Vec<Annotation<'a>>,
) {
    while let Some(candidate) = set.pop() {
        out.push(Annotation {
            marker_id,
            gene_id: candidate.gene_id,
            gene_name: candidate.gene_name,
            distance: candidate.distance,
            side,
        });
    }
}

/// Totals for a resolution run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionSummary {
    /// Markers read with a recognized chromosome.
    pub markers: usize,
    pub annotated: usize,
    pub excluded: usize,
    /// Unresolved marker ids, in first-seen order.
    pub unresolved: Vec<u32>,
    /// Annotation rows written.
    pub lines: usize,
}

/// Resolve a stream of markers and write annotation rows in input order.
///
/// The first marker error aborts the run.
pub fn annotate_markers<'a, I, W, S>(
    index: &'a GenomicAnnotationIndex,
    excluded: &'a ExcludedMarkers,
    strategy: S,
    markers: I,
    writer: &mut W,
) -> Result<ResolutionSummary>
where
    I: IntoIterator<Item = Result<Marker>>,
    W: Write,
    S: RetentionStrategy + Clone,
{
    let mut resolver = SnpResolver::new(index, excluded, strategy);
    let mut summary = ResolutionSummary::default();
    let mut rows = Vec::new();

    for marker in markers {
        let marker = marker?;
        summary.markers += 1;

        rows.clear();
        match resolver.resolve(&marker, &mut rows) {
            MarkerOutcome::Annotated(_) => summary.annotated += 1,
            MarkerOutcome::Excluded => summary.excluded += 1,
            MarkerOutcome::Unresolved => {}
        }
        for row in &rows {
            write_annotation(writer, row)?;
        }
        summary.lines += rows.len();
    }

    summary.unresolved = resolver.into_unresolved();
    info!(
        "Resolved {} markers: {} annotated, {} excluded, {} not found; {} lines written",
        summary.markers,
        summary.annotated,
        summary.excluded,
        summary.unresolved.len(),
        summary.lines
    );
    Ok(summary)
}
