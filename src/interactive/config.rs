//! Run configuration
//!
//! [`IgaConfig`] holds every tunable of an interactive run. It is plain
//! serde data so hosts can keep it next to their own settings, and it is
//! validated once when a [`PopulationManager`](super::manager::PopulationManager)
//! is built.

use serde::{Deserialize, Serialize};

use crate::error::{EvoResult, EvolutionError};

/// Configuration for an interactive run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IgaConfig {
    /// Chromosomes per generation, constant across the run
    pub population_size: usize,
    /// Clusters presented per generation (the presentation grid size)
    pub cluster_count: usize,
    /// Per-gene probability of a uniform reset after crossover
    pub mutation_rate: f64,
    /// Cap on Lloyd iterations per clustering
    pub max_kmeans_iterations: usize,
    /// Centroid movement below which clustering stops early
    pub convergence_tolerance: f64,
    /// Keep display snapshots of retired generations
    pub archive_generations: bool,
}

impl Default for IgaConfig {
    fn default() -> Self {
        Self {
            population_size: 12,
            cluster_count: 12,
            mutation_rate: 0.01,
            max_kmeans_iterations: 100,
            convergence_tolerance: 1e-9,
            archive_generations: true,
        }
    }
}

impl IgaConfig {
    /// Check every field for a usable value
    pub fn validate(&self) -> EvoResult<()> {
        if self.population_size == 0 {
            return Err(EvolutionError::Configuration(
                "population_size must be at least 1".into(),
            ));
        }
        if self.cluster_count == 0 {
            return Err(EvolutionError::Configuration(
                "cluster_count must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(EvolutionError::Configuration(format!(
                "mutation_rate must be in [0, 1], got {}",
                self.mutation_rate
            )));
        }
        if self.max_kmeans_iterations == 0 {
            return Err(EvolutionError::Configuration(
                "max_kmeans_iterations must be at least 1".into(),
            ));
        }
        if self.convergence_tolerance.is_nan() || self.convergence_tolerance < 0.0 {
            return Err(EvolutionError::Configuration(format!(
                "convergence_tolerance must be non-negative, got {}",
                self.convergence_tolerance
            )));
        }
        if self.mutation_rate == 0.0 || self.mutation_rate == 1.0 {
            log::warn!(
                "mutation_rate {} disables exploration or inheritance",
                self.mutation_rate
            );
        }
        Ok(())
    }

    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json_str(json: &str) -> EvoResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| EvolutionError::Configuration(format!("invalid JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize this configuration to pretty JSON
    pub fn to_json_string(&self) -> EvoResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| EvolutionError::Configuration(format!("serialization failed: {}", e)))
    }
}

/// Builder for [`IgaConfig`]
#[derive(Clone, Debug, Default)]
pub struct IgaBuilder {
    config: IgaConfig,
}

impl IgaBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the population size
    pub fn population_size(mut self, size: usize) -> Self {
        self.config.population_size = size;
        self
    }

    /// Set the number of clusters shown per generation
    pub fn cluster_count(mut self, k: usize) -> Self {
        self.config.cluster_count = k;
        self
    }

    /// Set the per-gene mutation rate
    pub fn mutation_rate(mut self, rate: f64) -> Self {
        self.config.mutation_rate = rate;
        self
    }

    /// Set the clustering iteration cap
    pub fn max_kmeans_iterations(mut self, max: usize) -> Self {
        self.config.max_kmeans_iterations = max;
        self
    }

    /// Set the clustering convergence tolerance
    pub fn convergence_tolerance(mut self, tolerance: f64) -> Self {
        self.config.convergence_tolerance = tolerance;
        self
    }

    /// Enable or disable archiving of retired generations
    pub fn archive_generations(mut self, enabled: bool) -> Self {
        self.config.archive_generations = enabled;
        self
    }

    /// Validate and return the configuration
    pub fn build_config(self) -> EvoResult<IgaConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
