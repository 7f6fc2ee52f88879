//! Genetic operators
//!
//! This module provides the crossover and mutation operators used to breed
//! children from selected parents.

pub mod crossover;
pub mod mutation;
pub mod traits;

pub mod prelude {
    pub use super::crossover::*;
    pub use super::mutation::*;
    pub use super::traits::*;
}
