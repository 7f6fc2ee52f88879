//! Crossover operators

use rand::Rng;

use crate::error::OperatorError;
use crate::genome::gene_vector::GeneVector;
use crate::operators::traits::CrossoverOperator;

/// Uniform crossover
///
/// Each gene is independently inherited from either parent. The genome mixes
/// continuous sliders with gene-pool entries, and per-gene inheritance is
/// the one rule that suits both; blending is not used.
#[derive(Clone, Debug)]
pub struct UniformCrossover {
    /// Probability of choosing from parent1 (default: 0.5)
    pub bias: f64,
}

impl UniformCrossover {
    /// Create a new uniform crossover
    pub fn new() -> Self {
        Self { bias: 0.5 }
    }

    /// Create with a specific bias towards parent1
    pub fn with_bias(bias: f64) -> Result<Self, OperatorError> {
        if !(0.0..=1.0).contains(&bias) {
            return Err(OperatorError::InvalidConfiguration(format!(
                "bias must be in [0, 1], got {}",
                bias
            )));
        }
        Ok(Self { bias })
    }
}

impl Default for UniformCrossover {
    fn default() -> Self {
        Self::new()
    }
}

impl CrossoverOperator for UniformCrossover {
    fn crossover<R: Rng>(
        &self,
        parent1: &GeneVector,
        parent2: &GeneVector,
        rng: &mut R,
    ) -> Result<GeneVector, OperatorError> {
        if parent1.len() != parent2.len() {
            return Err(OperatorError::CrossoverFailed(format!(
                "parent lengths differ: {} vs {}",
                parent1.len(),
                parent2.len()
            )));
        }

        let genes = parent1
            .genes()
            .iter()
            .zip(parent2.genes())
            .map(|(&a, &b)| if rng.gen::<f64>() < self.bias { a } else { b })
            .collect();

        GeneVector::from_genes(genes)
            .map_err(|e| OperatorError::CrossoverFailed(e.to_string()))
    }
}
