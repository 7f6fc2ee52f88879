//! Mutation operators

use rand::Rng;

use crate::error::OperatorError;
use crate::genome::gene_vector::GeneVector;
use crate::operators::traits::MutationOperator;

/// Uniform reset mutation
///
/// Each gene is independently replaced, with probability `rate`, by a fresh
/// uniform value in `[0, 1]`.
#[derive(Clone, Debug)]
pub struct ResetMutation {
    rate: f64,
}

impl ResetMutation {
    /// Create a reset mutation with the given per-gene rate
    ///
    /// The closed interval is accepted: 0 disables mutation and 1 re-draws
    /// every gene.
    pub fn new(rate: f64) -> Result<Self, OperatorError> {
        if !(0.0..=1.0).contains(&rate) {
            return Err(OperatorError::InvalidConfiguration(format!(
                "mutation rate must be in [0, 1], got {}",
                rate
            )));
        }
        Ok(Self { rate })
    }
}

impl MutationOperator for ResetMutation {
    fn mutate<R: Rng>(&self, genes: &mut GeneVector, rng: &mut R) {
        for gene in genes.genes_mut() {
            if rng.gen::<f64>() < self.rate {
                *gene = rng.gen_range(0.0..=1.0);
            }
        }
    }

    fn mutation_probability(&self) -> f64 {
        self.rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_rate_zero_leaves_genes() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        let original = GeneVector::from_genes(vec![0.25; 32]).unwrap();
        let mut genes = original.clone();
        ResetMutation::new(0.0).unwrap().mutate(&mut genes, &mut rng);
        assert_eq!(genes, original);
    }

    #[test]
    fn test_rate_one_redraws_every_gene() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        let mut genes = GeneVector::from_genes(vec![0.25; 32]).unwrap();
        ResetMutation::new(1.0).unwrap().mutate(&mut genes, &mut rng);
        assert!(genes.genes().iter().all(|&g| g != 0.25));
        assert!(genes.genes().iter().all(|g| (0.0..=1.0).contains(g)));
    }

    #[test]
    fn test_partial_rate_resets_some_genes() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let mut genes = GeneVector::from_genes(vec![0.25; 1000]).unwrap();
        ResetMutation::new(0.1).unwrap().mutate(&mut genes, &mut rng);

        let changed = genes.genes().iter().filter(|&&g| g != 0.25).count();
        assert!(changed > 50 && changed < 150);
        assert_eq!(genes.len(), 1000);
        assert!(genes.genes().iter().all(|g| (0.0..=1.0).contains(g)));
    }

    #[test]
    fn test_invalid_rate() {
        assert!(ResetMutation::new(-0.1).is_err());
        assert!(ResetMutation::new(1.1).is_err());
        assert!(ResetMutation::new(f64::NAN).is_err());
        assert_eq!(ResetMutation::new(0.3).unwrap().mutation_probability(), 0.3);
    }
}
