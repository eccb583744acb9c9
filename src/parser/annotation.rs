//! Gene annotation record parser.
//!
//! Parses the tab-separated `seq_gene.md` style table that the gene index is
//! built from. Filtering is split from field parsing so that records a pass
//! rejects by label are never checked for malformed numbers.

use crate::config::CoordinateMode;
use crate::error::{parse_u32, RecordError};
use crate::types::{Chromosome, Strand};

/// Minimum number of fields in a database record.
pub const MIN_FIELDS: usize = 13;

/// Feature type of gene records.
pub const GENE_FEATURE: &str = "GENE";

/// Length of the assembly tag in front of every gene id (`GeneID:`).
pub const GENE_ID_PREFIX_LEN: usize = 7;

const FIELD_CHROMOSOME: usize = 1;
const FIELD_CHR_START: usize = 2;
const FIELD_CHR_END: usize = 3;
const FIELD_CONTIG: usize = 5;
const FIELD_CONTIG_START: usize = 6;
const FIELD_CONTIG_END: usize = 7;
const FIELD_ORIENTATION: usize = 8;
const FIELD_GENE_NAME: usize = 9;
const FIELD_GENE_ID: usize = 10;
const FIELD_FEATURE_TYPE: usize = 11;
const FIELD_GROUP_LABEL: usize = 12;

/// A database line split into fields, not yet interpreted.
#[derive(Debug, Clone)]
pub struct RawRecord<'a> {
    fields: Vec<&'a str>,
}

impl<'a> RawRecord<'a> {
    /// Split a line on tabs, requiring at least [`MIN_FIELDS`] fields.
    pub fn split(line: &'a str) -> Result<Self, RecordError> {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < MIN_FIELDS {
            return Err(RecordError::TooFewFields {
                expected: MIN_FIELDS,
                found: fields.len(),
            });
        }
        Ok(RawRecord { fields })
    }

    /// Whether the record describes a gene (as opposed to RNA, CDS, ...).
    pub fn is_gene(&self) -> bool {
        self.fields[FIELD_FEATURE_TYPE] == GENE_FEATURE
    }

    /// The normalized chromosome, or `None` if unrecognized.
    pub fn chromosome(&self) -> Option<Chromosome> {
        Chromosome::parse(self.fields[FIELD_CHROMOSOME])
    }

    /// The assembly group label.
    pub fn group_label(&self) -> &'a str {
        self.fields[FIELD_GROUP_LABEL]
    }

    /// Interpret the remaining fields of a record that passed filtering.
    pub fn parse(
        &self,
        chromosome: Chromosome,
        mode: CoordinateMode,
    ) -> Result<AnnotationRecord<'a>, RecordError> {
        let (first_field, second_field) = match mode {
            CoordinateMode::Contig => (FIELD_CONTIG_START, FIELD_CONTIG_END),
            CoordinateMode::Chromosome => (FIELD_CHR_START, FIELD_CHR_END),
        };

        let strand: Strand = self.fields[FIELD_ORIENTATION].parse()?;
        let first = parse_u32("start coordinate", self.fields[first_field])?;
        let second = parse_u32("end coordinate", self.fields[second_field])?;
        let gene_id = parse_gene_id(self.fields[FIELD_GENE_ID])?;

        Ok(AnnotationRecord {
            chromosome,
            contig: self.fields[FIELD_CONTIG],
            strand,
            first,
            second,
            gene_id,
            gene_name: self.fields[FIELD_GENE_NAME],
            group_label: self.group_label(),
        })
    }
}

/// A gene record with typed fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationRecord<'a> {
    pub chromosome: Chromosome,
    pub contig: &'a str,
    pub strand: Strand,
    /// First coordinate in record order.
    pub first: u32,
    /// Second coordinate in record order.
    pub second: u32,
    pub gene_id: u32,
    pub gene_name: &'a str,
    pub group_label: &'a str,
}

impl<'a> AnnotationRecord<'a> {
    /// Parse a line into a gene record.
    ///
    /// Returns `Ok(None)` for records that are not genes or whose chromosome
    /// is unrecognized; malformed fields of a gene record are errors.
    pub fn parse_line(line: &'a str, mode: CoordinateMode) -> Result<Option<Self>, RecordError> {
        let raw = RawRecord::split(line)?;
        if !raw.is_gene() {
            return Ok(None);
        }
        let Some(chromosome) = raw.chromosome() else {
            return Ok(None);
        };
        raw.parse(chromosome, mode).map(Some)
    }
}

/// Strip the assembly tag from a gene id field and parse the number.
fn parse_gene_id(field: &str) -> Result<u32, RecordError> {
    let digits = field
        .get(GENE_ID_PREFIX_LEN..)
        .ok_or_else(|| RecordError::MissingGeneIdPrefix(field.to_string()))?;
    parse_u32("gene id", digits)
}
