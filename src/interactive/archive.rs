//! Archive of retired generations
//!
//! When a new generation is bred the old one is dropped from the active
//! population. Hosts that display history (a population tree, a timeline)
//! can keep a read-only snapshot of it here; nothing in the archive is ever
//! fed back into breeding.

use serde::{Deserialize, Serialize};

use crate::population::chromosome::{Chromosome, ChromosomeId};
use crate::population::population::Population;

/// Display copy of one retired chromosome
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArchivedChromosome {
    pub id: ChromosomeId,
    pub genes: Vec<f64>,
    pub performance: Vec<f64>,
    pub criteria: Vec<String>,
    pub cluster_id: Option<usize>,
    pub selected: bool,
    pub evaluation_failed: bool,
}

impl ArchivedChromosome {
    fn from_chromosome<G: Clone>(chromo: &Chromosome<G>) -> Self {
        let (performance, criteria) = chromo
            .phenotype()
            .map(|p| (p.performance().to_vec(), p.criteria().to_vec()))
            .unwrap_or_default();
        Self {
            id: chromo.id(),
            genes: chromo.genes().genes().to_vec(),
            performance,
            criteria,
            cluster_id: chromo.cluster_id(),
            selected: chromo.is_selected(),
            evaluation_failed: chromo.is_failed(),
        }
    }
}

/// Snapshot of a whole retired generation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationSnapshot {
    pub generation: usize,
    pub chromosomes: Vec<ArchivedChromosome>,
}

impl GenerationSnapshot {
    /// Copy the display data of a population
    pub fn capture<G: Clone>(population: &Population<G>) -> Self {
        Self {
            generation: population.generation(),
            chromosomes: population
                .iter()
                .map(ArchivedChromosome::from_chromosome)
                .collect(),
        }
    }

    /// Chromosomes the user picked in this generation
    pub fn selected(&self) -> impl Iterator<Item = &ArchivedChromosome> {
        self.chromosomes.iter().filter(|c| c.selected)
    }
}

/// Ordered history of retired generations
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PopulationArchive {
    snapshots: Vec<GenerationSnapshot>,
}

impl PopulationArchive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a snapshot of a population about to be retired
    pub fn push<G: Clone>(&mut self, population: &Population<G>) {
        self.snapshots.push(GenerationSnapshot::capture(population));
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Snapshot of a given generation
    pub fn generation(&self, generation: usize) -> Option<&GenerationSnapshot> {
        self.snapshots.iter().find(|s| s.generation == generation)
    }

    pub fn snapshots(&self) -> &[GenerationSnapshot] {
        &self.snapshots
    }

    /// Lineage of user picks: the selected ids of every archived generation
    pub fn selection_history(&self) -> Vec<(usize, Vec<ChromosomeId>)> {
        self.snapshots
            .iter()
            .map(|s| (s.generation, s.selected().map(|c| c.id).collect()))
            .collect()
    }
}
