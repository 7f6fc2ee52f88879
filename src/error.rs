//! Error types for biomorph
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

use crate::population::chromosome::ChromosomeId;

/// Error type for genome encoding and decoding
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GenomeError {
    /// Gene vector length no longer matches the live control wiring
    #[error("Encoding mismatch: expected {expected} genes, got {actual}")]
    EncodingMismatch { expected: usize, actual: usize },

    /// A gene lies outside the normalized unit interval
    #[error("Gene {index} out of [0, 1]: {value}")]
    OutOfUnitRange { index: usize, value: f64 },

    /// A control reported by the host cannot be encoded
    #[error("Invalid control: {0}")]
    InvalidControl(String),
}

/// Error type for operator failures
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OperatorError {
    /// Crossover operation failed
    #[error("Crossover failed: {0}")]
    CrossoverFailed(String),

    /// Invalid operator configuration
    #[error("Invalid operator configuration: {0}")]
    InvalidConfiguration(String),
}

/// Failure of a single design evaluation on the host
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvaluationError {
    /// The host produced no geometry for the design
    #[error("Host produced no geometry")]
    EmptyGeometry,

    /// Performance values and criterion labels disagree in length
    #[error("Performance readings mismatch: {values} values, {labels} labels")]
    ReadingsMismatch { values: usize, labels: usize },

    /// The host reported an error of its own
    #[error("Host error: {0}")]
    Host(String),
}

/// Top-level error type for evolution operations
#[derive(Debug, Error)]
pub enum EvolutionError {
    /// Genome error
    #[error("Genome error: {0}")]
    Genome(#[from] GenomeError),

    /// Operator error
    #[error("Operator error: {0}")]
    Operator(#[from] OperatorError),

    /// The control wiring changed mid-run; the run must be aborted or re-seeded
    #[error("Encoding mismatch: run uses {expected} genes, host now wires {actual}")]
    EncodingMismatch { expected: usize, actual: usize },

    /// A single chromosome failed to evaluate
    #[error("Evaluation of {id} failed: {source}")]
    EvaluationFailure {
        id: ChromosomeId,
        #[source]
        source: EvaluationError,
    },

    /// Breeding was requested without any user selection
    #[error("No chromosome selected; cannot breed the next generation")]
    EmptyParentPool,

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// The host lock was poisoned by a panicking evaluation
    #[error("Design host unavailable: lock poisoned")]
    HostUnavailable,

    /// The run was aborted between evaluations
    #[error("Run cancelled after {evaluated} evaluations")]
    Cancelled { evaluated: usize },

    /// Operation requires an initialized population
    #[error("Empty population")]
    EmptyPopulation,

    /// The chromosome already holds a phenotype or a failure
    #[error("{0} was already evaluated this generation")]
    AlreadyEvaluated(ChromosomeId),

    /// No chromosome with this id in the current generation
    #[error("Unknown chromosome: {0}")]
    UnknownChromosome(ChromosomeId),

    /// The chromosome has no phenotype and cannot be selected
    #[error("{0} is not eligible for selection")]
    IneligibleChromosome(ChromosomeId),
}

impl EvolutionError {
    /// Returns true for errors that end the run rather than a single step
    pub fn is_run_fatal(&self) -> bool {
        matches!(
            self,
            Self::EncodingMismatch { .. }
                | Self::Genome(GenomeError::EncodingMismatch { .. })
                | Self::HostUnavailable
        )
    }
}

/// Result type alias for evolution operations
pub type EvoResult<T> = Result<T, EvolutionError>;
