//! Genome encoding
//!
//! This module provides the normalized gene vector and the codec that maps it
//! onto host controls.

pub mod bounds;
pub mod codec;
pub mod gene_vector;

pub mod prelude {
    pub use super::bounds::*;
    pub use super::codec::*;
    pub use super::gene_vector::*;
}
