//! Population type
//!
//! This module provides the Population container: one generation of
//! chromosomes sharing a gene-vector length and a generation number.

use rand::Rng;

use crate::genome::gene_vector::GeneVector;
use crate::population::chromosome::{Chromosome, ChromosomeId};

/// One generation of chromosomes
#[derive(Clone, Debug)]
pub struct Population<G> {
    chromosomes: Vec<Chromosome<G>>,
    generation: usize,
    vector_length: usize,
}

impl<G: Clone> Population<G> {
    /// Create a random population at generation 0
    ///
    /// Ids are assigned consecutively starting at `first_id`.
    pub fn random<R: Rng>(size: usize, vector_length: usize, first_id: usize, rng: &mut R) -> Self {
        let chromosomes = (0..size)
            .map(|i| {
                Chromosome::new(
                    ChromosomeId(first_id + i),
                    GeneVector::random(vector_length, rng),
                    0,
                )
            })
            .collect();
        Self {
            chromosomes,
            generation: 0,
            vector_length,
        }
    }

    /// Assemble a population from already-built chromosomes
    ///
    /// Returns `None` if any chromosome disagrees on generation or gene length.
    pub fn from_chromosomes(
        chromosomes: Vec<Chromosome<G>>,
        generation: usize,
        vector_length: usize,
    ) -> Option<Self> {
        let consistent = chromosomes
            .iter()
            .all(|c| c.generation() == generation && c.genes().len() == vector_length);
        consistent.then_some(Self {
            chromosomes,
            generation,
            vector_length,
        })
    }

    /// Get the current generation
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Gene-vector length shared by every chromosome
    pub fn vector_length(&self) -> usize {
        self.vector_length
    }

    /// Get the population size
    pub fn len(&self) -> usize {
        self.chromosomes.len()
    }

    /// Check if the population is empty
    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }

    /// Get a chromosome by index
    pub fn get(&self, index: usize) -> Option<&Chromosome<G>> {
        self.chromosomes.get(index)
    }

    /// Position of the chromosome with this id
    pub fn position(&self, id: ChromosomeId) -> Option<usize> {
        self.chromosomes.iter().position(|c| c.id() == id)
    }

    /// Get a chromosome by id
    pub fn find(&self, id: ChromosomeId) -> Option<&Chromosome<G>> {
        self.chromosomes.iter().find(|c| c.id() == id)
    }

    /// Get an iterator over the chromosomes
    pub fn iter(&self) -> impl Iterator<Item = &Chromosome<G>> {
        self.chromosomes.iter()
    }

    /// Get the underlying chromosomes
    pub fn chromosomes(&self) -> &[Chromosome<G>] {
        &self.chromosomes
    }

    pub(crate) fn chromosomes_mut(&mut self) -> &mut [Chromosome<G>] {
        &mut self.chromosomes
    }

    /// Indices of chromosomes whose evaluation succeeded
    pub fn eligible_indices(&self) -> Vec<usize> {
        self.chromosomes
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_evaluated())
            .map(|(i, _)| i)
            .collect()
    }

    /// Chromosomes picked by the user this generation
    pub fn selected(&self) -> impl Iterator<Item = &Chromosome<G>> {
        self.chromosomes.iter().filter(|c| c.is_selected())
    }

    /// Number of chromosomes that failed evaluation
    pub fn failed_count(&self) -> usize {
        self.chromosomes.iter().filter(|c| c.is_failed()).count()
    }

    /// Unset every selection flag
    pub fn clear_selection(&mut self) {
        for c in &mut self.chromosomes {
            c.selected = false;
        }
    }

    /// Unset every cluster assignment
    pub fn clear_clusters(&mut self) {
        for c in &mut self.chromosomes {
            c.cluster_id = None;
        }
    }

    /// Take the chromosomes out of this population
    pub fn into_chromosomes(self) -> Vec<Chromosome<G>> {
        self.chromosomes
    }
}
