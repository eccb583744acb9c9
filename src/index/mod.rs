//! In-memory gene position index.
//!
//! One slot per chromosome, each mapping contig ids to the plus- and
//! minus-strand genes placed on that contig. Maps keep insertion order so
//! that resolution and dumps are reproducible for a given database.

pub mod builder;

use indexmap::IndexMap;

use crate::types::{Chromosome, GeneInfo, Strand, CHROMOSOME_SLOTS};

pub use builder::{build_index, IndexBuilder, PrimaryChromosomeGenes};

/// Genes keyed by numeric gene id.
pub type GeneMap = IndexMap<u32, GeneInfo>;

/// The genes of one contig, separated by strand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrientedGeneSets {
    pub plus: GeneMap,
    pub minus: GeneMap,
}

impl OrientedGeneSets {
    pub fn genes(&self, strand: Strand) -> &GeneMap {
        match strand {
            Strand::Positive => &self.plus,
            Strand::Negative => &self.minus,
        }
    }

    pub fn genes_mut(&mut self, strand: Strand) -> &mut GeneMap {
        match strand {
            Strand::Positive => &mut self.plus,
            Strand::Negative => &mut self.minus,
        }
    }

    /// Total genes on both strands.
    pub fn len(&self) -> usize {
        self.plus.len() + self.minus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plus.is_empty() && self.minus.is_empty()
    }
}

/// Contigs of one chromosome.
pub type ContigMap = IndexMap<String, OrientedGeneSets>;

/// The gene database: 24 chromosome slots of contig maps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenomicAnnotationIndex {
    slots: [ContigMap; CHROMOSOME_SLOTS],
}

impl Default for GenomicAnnotationIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl GenomicAnnotationIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        GenomicAnnotationIndex {
            slots: std::array::from_fn(|_| ContigMap::new()),
        }
    }

    /// The genes of a contig, if any record placed a gene there.
    pub fn contig(&self, chromosome: Chromosome, contig: &str) -> Option<&OrientedGeneSets> {
        self.slots[chromosome.slot()].get(contig)
    }

    /// The genes of a contig, created empty on first use.
    pub fn contig_mut(&mut self, chromosome: Chromosome, contig: &str) -> &mut OrientedGeneSets {
        let contigs = &mut self.slots[chromosome.slot()];
        if !contigs.contains_key(contig) {
            contigs.insert(contig.to_string(), OrientedGeneSets::default());
        }
        &mut contigs[contig]
    }

    /// Look up a single gene.
    pub fn gene(
        &self,
        chromosome: Chromosome,
        contig: &str,
        strand: Strand,
        gene_id: u32,
    ) -> Option<&GeneInfo> {
        self.contig(chromosome, contig)?.genes(strand).get(&gene_id)
    }

    /// Iterate over chromosomes and their contig maps, in slot order.
    pub fn chromosomes(&self) -> impl Iterator<Item = (Chromosome, &ContigMap)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(slot, contigs)| (Chromosome(slot as u8 + 1), contigs))
    }

    /// Number of distinct contigs across all chromosomes.
    pub fn contig_count(&self) -> usize {
        self.slots.iter().map(|contigs| contigs.len()).sum()
    }

    /// Number of gene entries across all contigs and strands.
    pub fn gene_count(&self) -> usize {
        self.slots
            .iter()
            .flat_map(|contigs| contigs.values())
            .map(OrientedGeneSets::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.contig_count() == 0
    }
}
