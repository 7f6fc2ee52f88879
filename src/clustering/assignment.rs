//! Per-generation cluster assignment
//!
//! Runs [`KMeansPlusPlus`] over the evaluation-succeeded chromosomes of a
//! population and writes each chromosome's cluster id back onto it. The
//! returned [`ClusterAssignment`] holds population indices only; it is
//! rebuilt every generation and never outlives the population it describes.

use rand::Rng;

use crate::clustering::kmeans::{Clustering, KMeansPlusPlus};
use crate::population::population::Population;

/// Grouping of one generation into clusters
#[derive(Clone, Debug, PartialEq)]
pub struct ClusterAssignment {
    generation: usize,
    /// Population index of each clustered point
    indices: Vec<usize>,
    clustering: Clustering,
    /// Population index of each cluster's representative
    representatives: Vec<Option<usize>>,
}

impl ClusterAssignment {
    /// Cluster the eligible chromosomes of `population`
    ///
    /// Failed and unevaluated chromosomes are left without a cluster id.
    pub fn compute<G: Clone, R: Rng>(
        population: &mut Population<G>,
        engine: &KMeansPlusPlus,
        rng: &mut R,
    ) -> Self {
        population.clear_clusters();
        let indices = population.eligible_indices();

        let (clustering, local_reps) = {
            let chromosomes = population.chromosomes();
            let points: Vec<&[f64]> = indices
                .iter()
                .map(|&i| chromosomes[i].genes().genes())
                .collect();
            let clustering = engine.fit(&points, rng);
            let reps = clustering.representatives(&points);
            (clustering, reps)
        };

        let chromosomes = population.chromosomes_mut();
        for (&i, &c) in indices.iter().zip(&clustering.assignments) {
            chromosomes[i].cluster_id = Some(c);
        }

        let representatives = local_reps
            .into_iter()
            .map(|r| r.map(|local| indices[local]))
            .collect();

        Self {
            generation: population.generation(),
            indices,
            clustering,
            representatives,
        }
    }

    /// Generation this assignment was computed for
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Number of clusters asked for
    pub fn requested_k(&self) -> usize {
        self.clustering.requested_k
    }

    /// Number of clusters formed
    pub fn effective_k(&self) -> usize {
        self.clustering.effective_k()
    }

    /// True when fewer eligible chromosomes than requested clusters existed
    pub fn is_degenerate(&self) -> bool {
        self.clustering.is_degenerate()
    }

    /// Clusters that ended up without members
    pub fn empty_clusters(&self) -> usize {
        self.clustering.empty_clusters()
    }

    /// Clusters with a representative to show
    pub fn occupied_k(&self) -> usize {
        self.clustering.occupied_k()
    }

    /// Lloyd iterations performed
    pub fn iterations(&self) -> usize {
        self.clustering.iterations
    }

    /// Centroid of a cluster in gene space
    pub fn centroid(&self, cluster_id: usize) -> Option<&[f64]> {
        self.clustering.centroids.get(cluster_id).map(Vec::as_slice)
    }

    /// Population indices of a cluster's members, in population order
    pub fn members(&self, cluster_id: usize) -> Vec<usize> {
        self.indices
            .iter()
            .zip(&self.clustering.assignments)
            .filter(|(_, c)| **c == cluster_id)
            .map(|(&i, _)| i)
            .collect()
    }

    /// Population index of the member nearest the cluster's centroid
    pub fn representative_index(&self, cluster_id: usize) -> Option<usize> {
        self.representatives.get(cluster_id).copied().flatten()
    }

    /// Population indices of every cluster's representative, in cluster order
    pub fn representative_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.representatives.iter().filter_map(|r| *r)
    }

    /// Gene vectors of each cluster's members, one branch per cluster
    pub fn grouped_genes<G: Clone>(&self, population: &Population<G>) -> Vec<Vec<Vec<f64>>> {
        (0..self.effective_k())
            .map(|c| {
                self.members(c)
                    .into_iter()
                    .filter_map(|i| population.get(i))
                    .map(|chromo| chromo.genes().genes().to_vec())
                    .collect()
            })
            .collect()
    }
}
