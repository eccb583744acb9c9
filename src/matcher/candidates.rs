//! Per-marker accumulation of gene distance candidates.
//!
//! A [`DistanceCandidateSet`] collects the genes considered for one side of
//! one marker and keeps only those its [`RetentionStrategy`] admits. The
//! strategy is chosen once for the run; the set is cleared and reused for
//! every marker.

use crate::config::DistanceThreshold;
use crate::types::GeneDistanceCandidate;

/// Decides which candidates a set keeps.
pub trait RetentionStrategy {
    /// Offer `candidate` to the currently `retained` candidates.
    fn push<'a>(
        &self,
        retained: &mut Vec<GeneDistanceCandidate<'a>>,
        candidate: GeneDistanceCandidate<'a>,
    );
}

/// Keep only the candidates tied for the smallest distance seen so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Nearest;

impl RetentionStrategy for Nearest {
    fn push<'a>(
        &self,
        retained: &mut Vec<GeneDistanceCandidate<'a>>,
        candidate: GeneDistanceCandidate<'a>,
    ) {
        // The first element always holds the current minimum
        match retained.first().map(|c| c.distance) {
            None => retained.push(candidate),
            Some(min) if candidate.distance < min => {
                retained.clear();
                retained.push(candidate);
            }
            Some(min) if candidate.distance == min => retained.push(candidate),
            Some(_) => {}
        }
    }
}

/// Keep every candidate whose distance is at most `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WithinDistance {
    pub max: u64,
}

impl RetentionStrategy for WithinDistance {
    fn push<'a>(
        &self,
        retained: &mut Vec<GeneDistanceCandidate<'a>>,
        candidate: GeneDistanceCandidate<'a>,
    ) {
        if u64::from(candidate.distance) <= self.max {
            retained.push(candidate);
        }
    }
}

/// Either strategy, for callers that pick one from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retention {
    Nearest(Nearest),
    WithinDistance(WithinDistance),
}

impl From<DistanceThreshold> for Retention {
    fn from(threshold: DistanceThreshold) -> Self {
        match threshold {
            DistanceThreshold::Nearest => Retention::Nearest(Nearest),
            DistanceThreshold::Within(max) => Retention::WithinDistance(WithinDistance { max }),
        }
    }
}

/// The retained candidates for one marker and one side.
#[derive(Debug, Clone)]
pub struct DistanceCandidateSet<'a, S> {
    strategy: S,
    candidates: Vec<GeneDistanceCandidate<'a>>,
}

impl<'a, S: RetentionStrategy> DistanceCandidateSet<'a, S> {
    pub fn new(strategy: S) -> Self {
        DistanceCandidateSet {
            strategy,
            candidates: Vec::with_capacity(2),
        }
    }

    /// Offer a candidate; the strategy decides whether it is kept.
    pub fn push(&mut self, candidate: GeneDistanceCandidate<'a>) {
        self.strategy.push(&mut self.candidates, candidate);
    }

    /// Drop every candidate, keeping the allocation for the next marker.
    pub fn remove_all(&mut self) {
        self.candidates.clear();
    }

    /// Remove and return the most recently retained candidate.
    pub fn pop(&mut self) -> Option<GeneDistanceCandidate<'a>> {
        self.candidates.pop()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Distance of the first retained candidate.
    ///
    /// Under [`Nearest`] this is the minimum distance seen since the last
    /// [`remove_all`](Self::remove_all).
    pub fn min_distance(&self) -> Option<u32> {
        self.candidates.first().map(|c| c.distance)
    }

    /// Whether a gene is among the retained candidates.
    pub fn contains_gene(&self, gene_id: u32) -> bool {
        self.candidates.iter().any(|c| c.gene_id == gene_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GeneDistanceCandidate<'a>> {
        self.candidates.iter()
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }
}
