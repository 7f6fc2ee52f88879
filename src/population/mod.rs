//! Population management
//!
//! This module provides the Chromosome and Population types.

pub mod chromosome;
#[allow(clippy::module_inception)]
pub mod population;

pub mod prelude {
    pub use super::chromosome::*;
    pub use super::population::*;
}
