//! Clustering engine
//!
//! Partitions a generation into a fixed number of groups so the user is shown
//! a diverse sample instead of near-duplicates.

pub mod assignment;
pub mod kmeans;

pub mod prelude {
    pub use super::assignment::ClusterAssignment;
    pub use super::kmeans::{seed_centroids, sample_next_centroid, Clustering, KMeansPlusPlus};
}
