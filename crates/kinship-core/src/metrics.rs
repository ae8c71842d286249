//! # Family Metrics
//!
//! Summary counts over a snapshot, for status displays.

use crate::audit::audit;
use crate::layout::compute_generations;
use crate::FamilyGraph;
use serde::{Deserialize, Serialize};

/// Counts extracted from one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMetrics {
    /// Total number of persons.
    pub people: usize,
    /// Couples paired by the layout (both spouses on the same level).
    pub couples: usize,
    /// Persons the layout shows on their own.
    pub singles: usize,
    /// Number of non-empty generations.
    pub generations: usize,
    /// Highest generation level present (0 for an empty graph).
    pub deepest_level: u32,
    pub deceased: usize,
    /// Number of issues reported by the link audit.
    pub link_issues: usize,
}

impl FamilyMetrics {
    /// Compute metrics for a snapshot.
    #[must_use]
    pub fn from_graph(graph: &FamilyGraph) -> Self {
        let generations = compute_generations(graph);

        Self {
            people: graph.len(),
            couples: generations.iter().map(|g| g.couples.len()).sum(),
            singles: generations.iter().map(|g| g.singles.len()).sum(),
            generations: generations.len(),
            deepest_level: generations.last().map_or(0, |g| g.level),
            deceased: graph.people().filter(|p| p.is_deceased).count(),
            link_issues: audit(graph).len(),
        }
    }
}
