//! Core data structures for snpflank.
//!
//! This module contains the fundamental types shared by the gene index,
//! the distance resolver and the output writers.

use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

use crate::error::RecordError;

/// Number of chromosome slots in the index: 1-22, X and Y.
pub const CHROMOSOME_SLOTS: usize = 24;

lazy_static! {
    /// Chromosome label: 1-22, X or Y, optionally followed by `|` and a suffix.
    static ref CHROMOSOME_PATTERN: Regex =
        Regex::new(r"^([1-9][0-9]?|[Xx]|[Yy])(\|.+)?$").expect("chromosome pattern is valid");
}

/// Strand orientation for genomic features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strand {
    Positive,
    Negative,
}

impl FromStr for Strand {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Strand::Positive),
            "-" => Ok(Strand::Negative),
            _ => Err(RecordError::UnknownOrientation(s.to_string())),
        }
    }
}

impl Strand {
    /// Convert strand to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Strand::Positive => "+",
            Strand::Negative => "-",
        }
    }

    /// Assign a record's two coordinates to the gene's biological ends.
    ///
    /// The first and second coordinates are taken in record order. On the
    /// plus strand the first is the 5' end; on the minus strand the roles
    /// are swapped.
    pub fn assign_ends(&self, first: u32, second: u32) -> GeneEnds {
        match self {
            Strand::Positive => GeneEnds {
                p5: first,
                p3: second,
            },
            Strand::Negative => GeneEnds {
                p5: second,
                p3: first,
            },
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The 5' and 3' coordinates of a gene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneEnds {
    pub p5: u32,
    pub p3: u32,
}

/// A chromosome number in 1..=24, where 23 is X and 24 is Y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Chromosome(pub(crate) u8);

impl Chromosome {
    pub const X: Chromosome = Chromosome(23);
    pub const Y: Chromosome = Chromosome(24);

    /// Build a chromosome from its number, if it is in 1..=24.
    pub fn new(number: u8) -> Option<Self> {
        (1..=CHROMOSOME_SLOTS as u8)
            .contains(&number)
            .then_some(Chromosome(number))
    }

    /// Parse a chromosome label such as `7`, `X`, `y` or `7|NT_007819.17`.
    ///
    /// Returns `None` for anything that is not a recognized chromosome, which
    /// callers treat as a record to skip.
    pub fn parse(label: &str) -> Option<Self> {
        let caps = CHROMOSOME_PATTERN.captures(label)?;
        match &caps[1] {
            "X" | "x" => Some(Chromosome::X),
            "Y" | "y" => Some(Chromosome::Y),
            digits => digits.parse().ok().and_then(Chromosome::new),
        }
    }

    /// The chromosome number (1-based).
    pub fn number(&self) -> u8 {
        self.0
    }

    /// Zero-based slot in the index.
    pub fn slot(&self) -> usize {
        self.0 as usize - 1
    }
}

impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which assembly effort supplied a gene record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssemblySource {
    /// The primary reference assembly.
    Primary,
    /// The alternate assembly of the special chromosome.
    Alternate,
}

/// A gene stored in the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneInfo {
    pub name: String,
    pub p5: u32,
    pub p3: u32,
    pub source: AssemblySource,
}

impl GeneInfo {
    pub fn new(name: String, ends: GeneEnds, source: AssemblySource) -> Self {
        GeneInfo {
            name,
            p5: ends.p5,
            p3: ends.p3,
            source,
        }
    }

    /// Overwrite both ends, keeping name and source.
    pub fn set_ends(&mut self, ends: GeneEnds) {
        self.p5 = ends.p5;
        self.p3 = ends.p3;
    }

    pub fn ends(&self) -> GeneEnds {
        GeneEnds {
            p5: self.p5,
            p3: self.p3,
        }
    }
}

/// Which end of a gene a distance refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    FivePrime,
    ThreePrime,
}

impl Side {
    /// The digit written in the output side column.
    pub fn as_digit(&self) -> u8 {
        match self {
            Side::FivePrime => 5,
            Side::ThreePrime => 3,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_digit())
    }
}

/// A gene considered for one marker and one side.
///
/// Borrows the gene name from the index it was computed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneDistanceCandidate<'a> {
    pub gene_id: u32,
    pub gene_name: &'a str,
    pub distance: u32,
}

impl<'a> GeneDistanceCandidate<'a> {
    pub fn new(gene_id: u32, gene_name: &'a str, distance: u32) -> Self {
        GeneDistanceCandidate {
            gene_id,
            gene_name,
            distance,
        }
    }
}

/// A marker (SNP) to annotate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub id: u32,
    pub chromosome: Chromosome,
    pub contig: String,
    pub position: u32,
}

impl Marker {
    pub fn new(id: u32, chromosome: Chromosome, contig: String, position: u32) -> Self {
        Marker {
            id,
            chromosome,
            contig,
            position,
        }
    }
}

/// One output row: a retained candidate for a marker on one side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation<'a> {
    pub marker_id: u32,
    pub gene_id: u32,
    pub gene_name: &'a str,
    pub distance: u32,
    pub side: Side,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strand_parsing() {
        assert_eq!("+".parse::<Strand>(), Ok(Strand::Positive));
        assert_eq!("-".parse::<Strand>(), Ok(Strand::Negative));
        assert_eq!(
            ".".parse::<Strand>(),
            Err(RecordError::UnknownOrientation(".".to_string()))
        );
    }

    #[test]
    fn test_assign_ends_positive() {
        let ends = Strand::Positive.assign_ends(1000, 2000);
        assert_eq!(ends, GeneEnds { p5: 1000, p3: 2000 });
    }

    #[test]
    fn test_assign_ends_negative_swaps() {
        // Same physical coordinates, opposite biological roles
        let ends = Strand::Negative.assign_ends(1000, 2000);
        assert_eq!(ends, GeneEnds { p5: 2000, p3: 1000 });
    }

    #[test]
    fn test_chromosome_numeric() {
        assert_eq!(Chromosome::parse("1").map(|c| c.number()), Some(1));
        assert_eq!(Chromosome::parse("22").map(|c| c.slot()), Some(21));
        assert_eq!(Chromosome::parse("7|NT_007819.17").map(|c| c.number()), Some(7));
    }

    #[test]
    fn test_chromosome_sex() {
        assert_eq!(Chromosome::parse("X"), Some(Chromosome::X));
        assert_eq!(Chromosome::parse("x"), Some(Chromosome::X));
        assert_eq!(Chromosome::parse("Y|PAR"), Some(Chromosome::Y));
        assert_eq!(Chromosome::X.slot(), 22);
        assert_eq!(Chromosome::Y.slot(), 23);
        // Numeric encodings of X and Y are accepted
        assert_eq!(Chromosome::parse("23"), Some(Chromosome::X));
    }

    #[test]
    fn test_chromosome_rejected() {
        assert_eq!(Chromosome::parse("0"), None);
        assert_eq!(Chromosome::parse("25"), None);
        assert_eq!(Chromosome::parse("MT"), None);
        assert_eq!(Chromosome::parse("Un"), None);
        assert_eq!(Chromosome::parse("7|"), None);
        assert_eq!(Chromosome::parse(""), None);
        assert_eq!(Chromosome::parse("07"), None);
    }

    #[test]
    fn test_side_digits() {
        assert_eq!(Side::FivePrime.to_string(), "5");
        assert_eq!(Side::ThreePrime.to_string(), "3");
    }

    #[test]
    fn test_gene_info_set_ends_keeps_source() {
        let mut gene = GeneInfo::new(
            "GENEA".to_string(),
            GeneEnds { p5: 1, p3: 2 },
            AssemblySource::Primary,
        );
        gene.set_ends(GeneEnds { p5: 10, p3: 20 });
        assert_eq!(gene.ends(), GeneEnds { p5: 10, p3: 20 });
        assert_eq!(gene.source, AssemblySource::Primary);
        assert_eq!(gene.name, "GENEA");
    }
}
