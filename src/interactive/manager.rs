//! Population manager
//!
//! Drives one interactive run: seeds generation 0, evaluates chromosomes on
//! the host, clusters the generation for presentation, records the user's
//! picks and breeds the next generation from them.
//!
//! The manager is the single writer of its population. Methods that change
//! it take `&mut self`, so clustering and breeding never observe a
//! half-updated generation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::Rng;

use crate::clustering::assignment::ClusterAssignment;
use crate::clustering::kmeans::KMeansPlusPlus;
use crate::diagnostics::{EvolutionStats, GenerationStats};
use crate::error::{EvoResult, EvolutionError};
use crate::host::shared::SharedHost;
use crate::host::traits::DesignHost;
use crate::interactive::archive::PopulationArchive;
use crate::interactive::config::{IgaBuilder, IgaConfig};
use crate::operators::crossover::UniformCrossover;
use crate::operators::mutation::ResetMutation;
use crate::operators::traits::{CrossoverOperator, MutationOperator};
use crate::population::chromosome::{Chromosome, ChromosomeId};
use crate::population::population::Population;

/// Outcome of evaluating one generation
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvaluationSummary {
    /// Chromosomes evaluated successfully by this call
    pub evaluated: usize,
    /// Chromosomes whose evaluation failed in this call
    pub failed: Vec<ChromosomeId>,
}

/// Owner of the active generation of an interactive run
pub struct PopulationManager<G, C = UniformCrossover, M = ResetMutation> {
    config: IgaConfig,
    crossover: C,
    mutation: M,
    population: Option<Population<G>>,
    clusters: Option<ClusterAssignment>,
    archive: PopulationArchive,
    stats: EvolutionStats,
    next_id: usize,
    cancelled: Arc<AtomicBool>,
}

impl<G: Clone> PopulationManager<G> {
    /// Create a manager with uniform crossover and reset mutation
    pub fn new(config: IgaConfig) -> EvoResult<Self> {
        let mutation = ResetMutation::new(config.mutation_rate)?;
        Self::with_operators(config, UniformCrossover::new(), mutation)
    }

    /// Start building a configuration
    pub fn builder() -> IgaBuilder {
        IgaBuilder::new()
    }
}

impl<G, C, M> PopulationManager<G, C, M>
where
    G: Clone,
    C: CrossoverOperator,
    M: MutationOperator,
{
    /// Create a manager with custom operators
    pub fn with_operators(config: IgaConfig, crossover: C, mutation: M) -> EvoResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            crossover,
            mutation,
            population: None,
            clusters: None,
            archive: PopulationArchive::new(),
            stats: EvolutionStats::new(),
            next_id: 0,
            cancelled: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &IgaConfig {
        &self.config
    }

    /// The active generation, once initialized
    pub fn population(&self) -> Option<&Population<G>> {
        self.population.as_ref()
    }

    /// Current generation number
    pub fn generation(&self) -> Option<usize> {
        self.population.as_ref().map(Population::generation)
    }

    /// Gene-vector length fixed at initialization
    pub fn vector_length(&self) -> Option<usize> {
        self.population.as_ref().map(Population::vector_length)
    }

    /// Retired generations kept for display
    pub fn archive(&self) -> &PopulationArchive {
        &self.archive
    }

    /// Statistics of every retired generation
    pub fn history(&self) -> &EvolutionStats {
        &self.stats
    }

    /// Statistics of the active generation
    pub fn stats(&self) -> Option<GenerationStats> {
        self.population
            .as_ref()
            .map(|p| GenerationStats::from_population(p, self.clusters.as_ref()))
    }

    /// Handle that aborts [`evaluate_all`](Self::evaluate_all) between evaluations
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    fn population_mut(&mut self) -> EvoResult<&mut Population<G>> {
        self.population.as_mut().ok_or(EvolutionError::EmptyPopulation)
    }

    /// Seed generation 0 with `size` random gene vectors of length `vector_length`
    ///
    /// Replaces any previous run.
    pub fn initialize<R: Rng>(
        &mut self,
        size: usize,
        vector_length: usize,
        rng: &mut R,
    ) -> EvoResult<()> {
        if size == 0 {
            return Err(EvolutionError::Configuration(
                "population size must be at least 1".into(),
            ));
        }
        if vector_length == 0 {
            return Err(EvolutionError::Configuration(
                "no controls wired to the genome".into(),
            ));
        }
        self.config.population_size = size;
        self.population = Some(Population::random(size, vector_length, self.next_id, rng));
        self.next_id += size;
        self.clusters = None;
        self.archive = PopulationArchive::new();
        self.stats = EvolutionStats::new();
        self.cancelled.store(false, Ordering::Relaxed);

        log::info!(
            "initialized population: size={} genes={}",
            size,
            vector_length
        );
        Ok(())
    }

    /// Seed generation 0 sized from the host's current control wiring
    pub fn initialize_from_host<H, R>(&mut self, host: &SharedHost<H>, rng: &mut R) -> EvoResult<()>
    where
        H: DesignHost<Geometry = G>,
        R: Rng,
    {
        let wiring = host.inspect()?;
        log::debug!(
            "host wiring: {} sliders, gene pools {:?}",
            wiring.slider_count(),
            wiring.gene_pool_sizes
        );
        self.initialize(self.config.population_size, wiring.vector_length(), rng)
    }

    /// Evaluate every chromosome still lacking a phenotype
    ///
    /// A failure on one chromosome marks it failed and moves on. Wiring
    /// changes and a poisoned host lock abort the loop with the error. If
    /// the cancel handle is set, no further chromosome is submitted and
    /// [`EvolutionError::Cancelled`] is returned; chromosomes evaluated so far
    /// keep their phenotypes.
    pub fn evaluate_all<H>(&mut self, host: &SharedHost<H>) -> EvoResult<EvaluationSummary>
    where
        H: DesignHost<Geometry = G>,
    {
        let cancelled = Arc::clone(&self.cancelled);
        let population = self.population_mut()?;
        let mut summary = EvaluationSummary::default();

        for chromo in population.chromosomes_mut() {
            if !chromo.is_pending() {
                continue;
            }
            if cancelled.load(Ordering::Relaxed) {
                log::warn!(
                    "evaluation cancelled after {} chromosomes",
                    summary.evaluated + summary.failed.len()
                );
                return Err(EvolutionError::Cancelled {
                    evaluated: summary.evaluated + summary.failed.len(),
                });
            }
            match chromo.evaluate(host) {
                Ok(()) => summary.evaluated += 1,
                Err(EvolutionError::EvaluationFailure { id, source }) => {
                    log::warn!("{} excluded from this generation: {}", id, source);
                    summary.failed.push(id);
                }
                Err(e) => return Err(e),
            }
        }

        log::debug!(
            "evaluated {} chromosomes, {} failed",
            summary.evaluated,
            summary.failed.len()
        );
        Ok(summary)
    }

    /// Cluster the evaluated chromosomes into the configured number of groups
    pub fn cluster<R: Rng>(&mut self, rng: &mut R) -> EvoResult<&ClusterAssignment> {
        self.cluster_with_k(self.config.cluster_count, rng)
    }

    /// Cluster the evaluated chromosomes into `k` groups
    ///
    /// With fewer evaluated chromosomes than `k`, each becomes its own
    /// cluster; see [`ClusterAssignment::is_degenerate`].
    pub fn cluster_with_k<R: Rng>(&mut self, k: usize, rng: &mut R) -> EvoResult<&ClusterAssignment> {
        let engine = KMeansPlusPlus::new(k)?
            .with_max_iterations(self.config.max_kmeans_iterations)
            .with_tolerance(self.config.convergence_tolerance);
        let population = self.population_mut()?;
        let assignment = ClusterAssignment::compute(population, &engine, rng);
        Ok(&*self.clusters.insert(assignment))
    }

    /// The clustering of the active generation, if computed
    pub fn clusters(&self) -> Option<&ClusterAssignment> {
        self.clusters.as_ref()
    }

    /// Representative chromosome of a cluster
    pub fn representative(&self, cluster_id: usize) -> Option<&Chromosome<G>> {
        let index = self.clusters.as_ref()?.representative_index(cluster_id)?;
        self.population.as_ref()?.get(index)
    }

    /// One representative per non-empty cluster, in cluster order
    pub fn representatives(&self) -> Vec<&Chromosome<G>> {
        match (&self.clusters, &self.population) {
            (Some(clusters), Some(population)) => clusters
                .representative_indices()
                .filter_map(|i| population.get(i))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Mark a chromosome as picked by the user
    ///
    /// May be called for several chromosomes per generation; repeating a
    /// pick is harmless. Only chromosomes with a phenotype can be picked;
    /// pending and failed ones were never shown to the user.
    pub fn record_selection(&mut self, id: ChromosomeId) -> EvoResult<()> {
        let population = self.population_mut()?;
        let index = population
            .position(id)
            .ok_or(EvolutionError::UnknownChromosome(id))?;
        let chromo = &mut population.chromosomes_mut()[index];
        if !chromo.is_evaluated() {
            return Err(EvolutionError::IneligibleChromosome(id));
        }
        chromo.selected = true;
        Ok(())
    }

    /// Undo every pick of the active generation
    pub fn clear_selection(&mut self) -> EvoResult<()> {
        self.population_mut()?.clear_selection();
        Ok(())
    }

    /// Ids picked in the active generation
    pub fn selected_ids(&self) -> Vec<ChromosomeId> {
        self.population
            .as_ref()
            .map(|p| p.selected().map(Chromosome::id).collect())
            .unwrap_or_default()
    }

    /// Replace the active generation with children of the selected chromosomes
    ///
    /// Each of the `P` children comes from two parents drawn uniformly with
    /// replacement from the selected set, then crossover, then mutation.
    /// A single selected parent breeds with itself. With no selection the
    /// population is left untouched and [`EvolutionError::EmptyParentPool`]
    /// is returned.
    pub fn breed_next_generation<R: Rng>(&mut self, rng: &mut R) -> EvoResult<&Population<G>> {
        let current = self.population.as_ref().ok_or(EvolutionError::EmptyPopulation)?;
        let parents: Vec<&Chromosome<G>> = current.selected().collect();
        if parents.is_empty() {
            return Err(EvolutionError::EmptyParentPool);
        }

        let size = current.len();
        let next_generation = current.generation() + 1;
        let mut children = Vec::with_capacity(size);
        for offset in 0..size {
            let p1 = parents[rng.gen_range(0..parents.len())];
            let p2 = parents[rng.gen_range(0..parents.len())];
            let mut genes = self.crossover.crossover(p1.genes(), p2.genes(), rng)?;
            self.mutation.mutate(&mut genes, rng);
            children.push(Chromosome::new(
                ChromosomeId(self.next_id + offset),
                genes,
                next_generation,
            ));
        }

        log::info!(
            "bred generation {} from {} selected parents",
            next_generation,
            parents.len()
        );

        let next = Population::from_chromosomes(children, next_generation, current.vector_length())
            .ok_or_else(|| {
                EvolutionError::Configuration("operator changed gene-vector length".into())
            })?;

        self.stats
            .record(GenerationStats::from_population(current, self.clusters.as_ref()));
        if self.config.archive_generations {
            self.archive.push(current);
        }
        self.next_id += size;
        self.clusters = None;
        Ok(&*self.population.insert(next))
    }
}
