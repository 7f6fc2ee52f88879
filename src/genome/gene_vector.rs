//! Normalized gene vector
//!
//! The genotype of every chromosome: a fixed-length vector of reals, each in
//! `[0, 1]`. Scalar controls occupy the front of the vector and gene-pool
//! entries the back; see [`GenomeCodec`](crate::genome::codec::GenomeCodec).

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::GenomeError;

/// Fixed-length vector of genes normalized to `[0, 1]`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneVector {
    genes: Vec<f64>,
}

impl GeneVector {
    /// Create a gene vector, rejecting values outside `[0, 1]`
    pub fn from_genes(genes: Vec<f64>) -> Result<Self, GenomeError> {
        if let Some((index, &value)) = genes
            .iter()
            .enumerate()
            .find(|(_, g)| !(0.0..=1.0).contains(*g))
        {
            return Err(GenomeError::OutOfUnitRange { index, value });
        }
        Ok(Self { genes })
    }

    /// Uniformly random genes in `[0, 1]^len`
    pub fn random<R: Rng>(len: usize, rng: &mut R) -> Self {
        Self {
            genes: (0..len).map(|_| rng.gen_range(0.0..=1.0)).collect(),
        }
    }

    /// Number of genes
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// True for a zero-length vector
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Get a reference to the genes
    pub fn genes(&self) -> &[f64] {
        &self.genes
    }

    /// Mutable access for operators that only write values in `[0, 1]`
    pub(crate) fn genes_mut(&mut self) -> &mut [f64] {
        &mut self.genes
    }

    /// Replace a single gene
    pub fn set(&mut self, index: usize, value: f64) -> Result<(), GenomeError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(GenomeError::OutOfUnitRange { index, value });
        }
        match self.genes.get_mut(index) {
            Some(gene) => {
                *gene = value;
                Ok(())
            }
            None => Err(GenomeError::EncodingMismatch {
                expected: index + 1,
                actual: self.genes.len(),
            }),
        }
    }

    /// Squared Euclidean distance to a point in gene space
    pub fn distance_squared_to(&self, point: &[f64]) -> f64 {
        squared_distance(&self.genes, point)
    }

    /// Euclidean distance to another gene vector
    pub fn distance(&self, other: &Self) -> f64 {
        self.distance_squared_to(&other.genes).sqrt()
    }

    /// Get the underlying vector
    pub fn into_inner(self) -> Vec<f64> {
        self.genes
    }
}

/// Squared Euclidean distance between two equal-length points
pub fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum()
}

impl std::ops::Index<usize> for GeneVector {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.genes[index]
    }
}

impl TryFrom<Vec<f64>> for GeneVector {
    type Error = GenomeError;

    fn try_from(genes: Vec<f64>) -> Result<Self, Self::Error> {
        Self::from_genes(genes)
    }
}

impl From<GeneVector> for Vec<f64> {
    fn from(genome: GeneVector) -> Self {
        genome.genes
    }
}

impl<'a> IntoIterator for &'a GeneVector {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.genes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;

    #[test]
    fn test_from_genes_accepts_unit_interval() {
        let v = GeneVector::from_genes(vec![0.0, 0.5, 1.0]).unwrap();
        assert_eq!(v.len(), 3);
        assert_eq!(v.genes(), &[0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_from_genes_rejects_out_of_range() {
        let err = GeneVector::from_genes(vec![0.2, 1.5]).unwrap_err();
        assert_eq!(
            err,
            GenomeError::OutOfUnitRange {
                index: 1,
                value: 1.5
            }
        );
        assert!(GeneVector::from_genes(vec![f64::NAN]).is_err());
    }

    #[test]
    fn test_random_within_unit_cube() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let v = GeneVector::random(50, &mut rng);
        assert_eq!(v.len(), 50);
        assert!(v.genes().iter().all(|g| (0.0..=1.0).contains(g)));
    }

    #[test]
    fn test_set() {
        let mut v = GeneVector::from_genes(vec![0.0, 0.0]).unwrap();
        v.set(1, 0.25).unwrap();
        assert_eq!(v[1], 0.25);
        assert!(v.set(0, -0.1).is_err());
        assert!(v.set(5, 0.1).is_err());
    }

    #[test]
    fn test_distance() {
        let v1 = GeneVector::from_genes(vec![0.0, 0.0]).unwrap();
        let v2 = GeneVector::from_genes(vec![0.3, 0.4]).unwrap();
        assert_relative_eq!(v1.distance(&v2), 0.5);
        assert_relative_eq!(v1.distance_squared_to(v2.genes()), 0.25);
    }
}
