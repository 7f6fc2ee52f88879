//! Operator traits
//!
//! This module defines the reproduction operator traits used when breeding
//! the next generation from user-selected parents.

use rand::Rng;

use crate::error::OperatorError;
use crate::genome::gene_vector::GeneVector;

/// Crossover operator trait
///
/// Combines genetic material from two parents into one child.
pub trait CrossoverOperator: Send + Sync {
    /// Produce a child from two parents of equal length
    fn crossover<R: Rng>(
        &self,
        parent1: &GeneVector,
        parent2: &GeneVector,
        rng: &mut R,
    ) -> Result<GeneVector, OperatorError>;
}

/// Mutation operator trait
///
/// Applies random changes to a gene vector. Implementations must keep every
/// gene inside `[0, 1]`.
pub trait MutationOperator: Send + Sync {
    /// Apply mutation to a gene vector in place
    fn mutate<R: Rng>(&self, genes: &mut GeneVector, rng: &mut R);

    /// Get the mutation probability per gene
    fn mutation_probability(&self) -> f64;
}
