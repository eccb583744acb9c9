//! Configuration and defaults for snpflank.
//!
//! This module contains the configuration structure and default values
//! that control database ingestion and nearest-gene resolution.

use regex::Regex;

use crate::error::RecordError;
use crate::types::Chromosome;

/// Group label pattern of the primary assembly.
pub const DEFAULT_PRIMARY_PATTERN: &str = r"^GRCh37\.p10";

/// Group label pattern of the alternate chromosome 7 assembly.
pub const DEFAULT_ALTERNATE_PATTERN: &str = r"^CRA_TCAGchr7v2";

/// Source tag written for genes from the primary assembly.
pub const PRIMARY_SOURCE_TAG: &str = "GRCh37";

/// Source tag written for genes from the alternate assembly.
pub const ALTERNATE_SOURCE_TAG: &str = "CRA_TCAGchr7v2";

/// The chromosome covered by the alternate assembly.
pub const ALTERNATE_CHROMOSOME: u8 = 7;

/// How far from a marker a gene may be and still be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceThreshold {
    /// Keep only the genes tied for the smallest distance.
    #[default]
    Nearest,
    /// Keep every gene within this many bases.
    Within(u64),
}

/// Parse a distance threshold such as `-1`, `5000` or `10k`.
///
/// The `k` suffix (either case) multiplies by 1000. Negative values select
/// nearest-gene mode.
pub fn parse_distance_threshold(value: &str) -> Result<DistanceThreshold, RecordError> {
    let lowered = value.trim().to_lowercase();
    let (digits, multiplier) = match lowered.strip_suffix('k') {
        Some(digits) => (digits, 1000),
        None => (lowered.as_str(), 1),
    };
    let parsed: i64 = digits
        .parse()
        .map_err(|_| RecordError::InvalidThreshold(value.to_string()))?;
    let distance = parsed
        .checked_mul(multiplier)
        .ok_or_else(|| RecordError::InvalidThreshold(value.to_string()))?;

    if distance < 0 {
        Ok(DistanceThreshold::Nearest)
    } else {
        Ok(DistanceThreshold::Within(distance as u64))
    }
}

/// Which coordinate columns of the database are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordinateMode {
    /// Positions relative to the contig start.
    #[default]
    Contig,
    /// Positions relative to the chromosome start.
    Chromosome,
}

/// Which records each ingestion pass accepts and how genes are tagged.
#[derive(Debug, Clone)]
pub struct AssemblyPolicy {
    /// Group labels accepted by the primary pass.
    pub primary_label: Regex,
    /// Group labels accepted by the alternate pass.
    pub alternate_label: Regex,
    /// The only chromosome the alternate pass reads.
    pub alternate_chromosome: Chromosome,
    pub primary_tag: String,
    pub alternate_tag: String,
}

impl AssemblyPolicy {
    /// Build a policy from group label patterns.
    pub fn new(primary_pattern: &str, alternate_pattern: &str) -> Result<Self, regex::Error> {
        Ok(AssemblyPolicy {
            primary_label: Regex::new(primary_pattern)?,
            alternate_label: Regex::new(alternate_pattern)?,
            alternate_chromosome: Chromosome(ALTERNATE_CHROMOSOME),
            primary_tag: PRIMARY_SOURCE_TAG.to_string(),
            alternate_tag: ALTERNATE_SOURCE_TAG.to_string(),
        })
    }
}

impl Default for AssemblyPolicy {
    fn default() -> Self {
        AssemblyPolicy::new(DEFAULT_PRIMARY_PATTERN, DEFAULT_ALTERNATE_PATTERN)
            .expect("default assembly patterns are valid")
    }
}

/// Configuration for ingestion and resolution.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Retention policy for candidate genes.
    pub threshold: DistanceThreshold,
    /// Coordinate columns read from the database.
    pub coordinate_mode: CoordinateMode,
    /// Assembly acceptance and tagging rules.
    pub assembly: AssemblyPolicy,
}

impl Config {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.threshold, DistanceThreshold::Nearest);
        assert_eq!(config.coordinate_mode, CoordinateMode::Contig);
        assert_eq!(config.assembly.alternate_chromosome.number(), 7);
        assert_eq!(config.assembly.primary_tag, "GRCh37");
        assert_eq!(config.assembly.alternate_tag, "CRA_TCAGchr7v2");
    }

    #[test]
    fn test_default_assembly_patterns() {
        let policy = AssemblyPolicy::default();
        assert!(policy.primary_label.is_match("GRCh37.p10-Primary Assembly"));
        assert!(!policy.primary_label.is_match("HuRef-Primary Assembly"));
        assert!(!policy.primary_label.is_match("GRCh37p10"));
        assert!(policy.alternate_label.is_match("CRA_TCAGchr7v2-Primary Assembly"));
        assert!(!policy.alternate_label.is_match("GRCh37.p10-Primary Assembly"));
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(AssemblyPolicy::new("(", DEFAULT_ALTERNATE_PATTERN).is_err());
    }

    #[test]
    fn test_parse_threshold_negative_is_nearest() {
        assert_eq!(parse_distance_threshold("-1"), Ok(DistanceThreshold::Nearest));
        assert_eq!(parse_distance_threshold("-5k"), Ok(DistanceThreshold::Nearest));
    }

    #[test]
    fn test_parse_threshold_plain() {
        assert_eq!(parse_distance_threshold("0"), Ok(DistanceThreshold::Within(0)));
        assert_eq!(
            parse_distance_threshold("2500"),
            Ok(DistanceThreshold::Within(2500))
        );
    }

    #[test]
    fn test_parse_threshold_kilo_suffix() {
        assert_eq!(
            parse_distance_threshold("10k"),
            Ok(DistanceThreshold::Within(10_000))
        );
        assert_eq!(
            parse_distance_threshold("20K"),
            Ok(DistanceThreshold::Within(20_000))
        );
    }

    #[test]
    fn test_parse_threshold_invalid() {
        assert!(parse_distance_threshold("k").is_err());
        assert!(parse_distance_threshold("ten").is_err());
        assert!(parse_distance_threshold("1.5k").is_err());
        assert!(parse_distance_threshold("").is_err());
    }
}
