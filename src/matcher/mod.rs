//! Nearest-gene matching of markers against the gene index.

pub mod candidates;
pub mod resolver;

pub use candidates::{DistanceCandidateSet, Nearest, Retention, RetentionStrategy, WithinDistance};
pub use resolver::{annotate_markers, gene_distances, MarkerOutcome, ResolutionSummary, SnpResolver};
