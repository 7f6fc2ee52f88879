//! k-means++ clustering in gene space
//!
//! Groups points with Lloyd's algorithm after k-means++ seeding: the first
//! centroid is a uniformly random point, each further centroid is a
//! not-yet-chosen point sampled with probability proportional to its squared
//! distance to the nearest chosen centroid.
//!
//! All randomness comes from the caller's RNG, so a seeded RNG reproduces
//! the same clustering.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::OperatorError;
use crate::genome::gene_vector::squared_distance;

/// k-means++ clusterer
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KMeansPlusPlus {
    k: usize,
    max_iterations: usize,
    tolerance: f64,
}

/// Result of one clustering run
#[derive(Clone, Debug, PartialEq)]
pub struct Clustering {
    /// Cluster index of every input point
    pub assignments: Vec<usize>,
    /// One centroid per cluster
    pub centroids: Vec<Vec<f64>>,
    /// Number of clusters asked for
    pub requested_k: usize,
    /// Lloyd iterations performed
    pub iterations: usize,
    /// True if assignments stabilized before the iteration cap
    pub converged: bool,
}

impl Clustering {
    /// Number of clusters actually formed
    pub fn effective_k(&self) -> usize {
        self.centroids.len()
    }

    /// True when fewer points than requested clusters were available
    pub fn is_degenerate(&self) -> bool {
        self.effective_k() < self.requested_k
    }

    /// Clusters left without members, e.g. when many points coincide
    pub fn empty_clusters(&self) -> usize {
        self.members().iter().filter(|m| m.is_empty()).count()
    }

    /// Clusters with at least one member
    pub fn occupied_k(&self) -> usize {
        self.effective_k() - self.empty_clusters()
    }

    /// Indices of the points in each cluster, in input order
    pub fn members(&self) -> Vec<Vec<usize>> {
        let mut members = vec![Vec::new(); self.effective_k()];
        for (i, &c) in self.assignments.iter().enumerate() {
            members[c].push(i);
        }
        members
    }

    /// For each cluster, the member nearest its centroid
    ///
    /// Ties go to the lowest point index; an empty cluster has no
    /// representative.
    pub fn representatives(&self, points: &[&[f64]]) -> Vec<Option<usize>> {
        self.members()
            .iter()
            .zip(&self.centroids)
            .map(|(members, centroid)| {
                let mut best: Option<(usize, f64)> = None;
                for &i in members {
                    let d = squared_distance(points[i], centroid);
                    if best.map_or(true, |(_, bd)| d < bd) {
                        best = Some((i, d));
                    }
                }
                best.map(|(i, _)| i)
            })
            .collect()
    }
}

impl KMeansPlusPlus {
    /// Create a clusterer for `k` groups
    pub fn new(k: usize) -> Result<Self, OperatorError> {
        if k == 0 {
            return Err(OperatorError::InvalidConfiguration(
                "cluster count must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            k,
            max_iterations: 100,
            tolerance: 1e-9,
        })
    }

    /// Cap on Lloyd iterations
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations.max(1);
        self
    }

    /// Centroid movement below which the run counts as converged
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance.max(0.0);
        self
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Cluster `points`; all points must share one dimension
    ///
    /// With at most `k` points, every point becomes its own cluster and no
    /// Lloyd pass runs.
    pub fn fit<R: Rng>(&self, points: &[&[f64]], rng: &mut R) -> Clustering {
        if points.len() <= self.k {
            if points.len() < self.k {
                log::info!(
                    "degenerate clustering: {} points for {} requested clusters",
                    points.len(),
                    self.k
                );
            }
            return Clustering {
                assignments: (0..points.len()).collect(),
                centroids: points.iter().map(|p| p.to_vec()).collect(),
                requested_k: self.k,
                iterations: 0,
                converged: true,
            };
        }
        let k = self.k;

        let mut centroids: Vec<Vec<f64>> = seed_centroids(points, k, rng)
            .into_iter()
            .map(|i| points[i].to_vec())
            .collect();
        let mut assignments = assign(points, &centroids);
        let mut iterations = 1;
        let mut converged = false;

        while iterations < self.max_iterations {
            let shift = update_centroids(points, &assignments, &mut centroids);
            let next = assign(points, &centroids);
            iterations += 1;
            let stable = next == assignments;
            assignments = next;
            if stable || shift <= self.tolerance {
                converged = true;
                break;
            }
        }

        log::debug!(
            "k-means++ finished: k={} iterations={} converged={}",
            k,
            iterations,
            converged
        );

        Clustering {
            assignments,
            centroids,
            requested_k: self.k,
            iterations,
            converged,
        }
    }
}

/// Choose `k` distinct seed points by k-means++ weighting
pub fn seed_centroids<R: Rng>(points: &[&[f64]], k: usize, rng: &mut R) -> Vec<usize> {
    let k = k.min(points.len());
    if k == 0 {
        return Vec::new();
    }
    let mut chosen = Vec::with_capacity(k);
    chosen.push(rng.gen_range(0..points.len()));
    while chosen.len() < k {
        match sample_next_centroid(points, &chosen, rng) {
            Some(i) => chosen.push(i),
            None => break,
        }
    }
    chosen
}

/// Sample the next seed among points not yet chosen
///
/// Each candidate is weighted by its squared distance to the nearest chosen
/// seed. When every remaining candidate coincides with a seed, one is drawn
/// uniformly so duplicate designs still fill the requested slots.
pub fn sample_next_centroid<R: Rng>(
    points: &[&[f64]],
    chosen: &[usize],
    rng: &mut R,
) -> Option<usize> {
    let candidates: Vec<usize> = (0..points.len()).filter(|i| !chosen.contains(i)).collect();
    if candidates.is_empty() {
        return None;
    }

    let weights: Vec<f64> = candidates
        .iter()
        .map(|&i| {
            chosen
                .iter()
                .map(|&c| squared_distance(points[i], points[c]))
                .fold(f64::INFINITY, f64::min)
        })
        .collect();

    match WeightedIndex::new(&weights) {
        Ok(dist) => Some(candidates[dist.sample(rng)]),
        Err(_) => Some(candidates[rng.gen_range(0..candidates.len())]),
    }
}

/// Index of the nearest centroid, ties to the lowest index
fn nearest(point: &[f64], centroids: &[Vec<f64>]) -> usize {
    let mut best = 0;
    let mut best_d = f64::INFINITY;
    for (c, centroid) in centroids.iter().enumerate() {
        let d = squared_distance(point, centroid);
        if d < best_d {
            best = c;
            best_d = d;
        }
    }
    best
}

#[cfg(feature = "parallel")]
fn assign(points: &[&[f64]], centroids: &[Vec<f64>]) -> Vec<usize> {
    points.par_iter().map(|p| nearest(p, centroids)).collect()
}

#[cfg(not(feature = "parallel"))]
fn assign(points: &[&[f64]], centroids: &[Vec<f64>]) -> Vec<usize> {
    points.iter().map(|p| nearest(p, centroids)).collect()
}

/// Move each centroid to the mean of its members; returns the largest move
///
/// Empty clusters keep their previous centroid.
fn update_centroids(points: &[&[f64]], assignments: &[usize], centroids: &mut [Vec<f64>]) -> f64 {
    let dim = centroids.first().map_or(0, Vec::len);
    let mut sums = vec![vec![0.0; dim]; centroids.len()];
    let mut counts = vec![0usize; centroids.len()];
    for (p, &c) in points.iter().zip(assignments) {
        counts[c] += 1;
        for (s, x) in sums[c].iter_mut().zip(p.iter()) {
            *s += x;
        }
    }

    let mut max_shift: f64 = 0.0;
    for ((centroid, sum), &count) in centroids.iter_mut().zip(sums).zip(&counts) {
        if count == 0 {
            continue;
        }
        let mean: Vec<f64> = sum.into_iter().map(|s| s / count as f64).collect();
        max_shift = max_shift.max(squared_distance(centroid, &mean).sqrt());
        *centroid = mean;
    }
    max_shift
}
