//! Diagnostics and statistics
//!
//! Per-generation bookkeeping for interactive runs. There is no fitness to
//! summarize; what is worth watching is how many designs evaluated, how many
//! failed, how many clusters could actually be formed and what the user
//! picked.

use serde::{Deserialize, Serialize};

use crate::clustering::assignment::ClusterAssignment;
use crate::population::population::Population;

/// Statistics for a single generation
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Generation number
    pub generation: usize,
    /// Chromosomes in the generation
    pub population_size: usize,
    /// Chromosomes with a phenotype
    pub evaluated: usize,
    /// Chromosomes whose evaluation failed
    pub failed: usize,
    /// Chromosomes not yet evaluated
    pub pending: usize,
    /// Chromosomes picked by the user
    pub selected: usize,
    /// Clusters asked for (0 before clustering)
    pub requested_clusters: usize,
    /// Clusters formed; less than requested when too few designs evaluated
    pub effective_clusters: usize,
    /// Formed clusters without members, so without a representative
    pub empty_clusters: usize,
    /// Lloyd iterations of the clustering step
    pub kmeans_iterations: usize,
}

impl GenerationStats {
    /// Compute statistics from a population and its clustering, if any
    pub fn from_population<G: Clone>(
        population: &Population<G>,
        clusters: Option<&ClusterAssignment>,
    ) -> Self {
        let evaluated = population.iter().filter(|c| c.is_evaluated()).count();
        let failed = population.failed_count();
        Self {
            generation: population.generation(),
            population_size: population.len(),
            evaluated,
            failed,
            pending: population.len() - evaluated - failed,
            selected: population.selected().count(),
            requested_clusters: clusters.map_or(0, |c| c.requested_k()),
            effective_clusters: clusters.map_or(0, |c| c.effective_k()),
            empty_clusters: clusters.map_or(0, |c| c.empty_clusters()),
            kmeans_iterations: clusters.map_or(0, |c| c.iterations()),
        }
    }

    /// True when fewer representatives than requested clusters could be shown
    pub fn is_degenerate_clustering(&self) -> bool {
        self.effective_clusters.saturating_sub(self.empty_clusters) < self.requested_clusters
    }
}

/// Statistics collector for an entire run
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EvolutionStats {
    /// Statistics per retired generation
    pub generations: Vec<GenerationStats>,
}

impl EvolutionStats {
    /// Create a new stats collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a generation's statistics
    pub fn record(&mut self, stats: GenerationStats) {
        self.generations.push(stats);
    }

    /// Get the number of generations recorded
    pub fn num_generations(&self) -> usize {
        self.generations.len()
    }

    /// Total evaluation failures over the run
    pub fn total_failures(&self) -> usize {
        self.generations.iter().map(|g| g.failed).sum()
    }

    /// Generations whose clustering came up short of the requested size
    pub fn degenerate_generations(&self) -> Vec<usize> {
        self.generations
            .iter()
            .filter(|g| g.is_degenerate_clustering())
            .map(|g| g.generation)
            .collect()
    }
}

pub mod prelude {
    pub use super::{EvolutionStats, GenerationStats};
}
