//! # biomorph
//!
//! An interactive genetic algorithm engine for parametric design hosts.
//!
//! The host exposes numeric sliders and gene pools; the engine evolves
//! normalized gene vectors that drive them. There is no fitness function:
//! every generation is clustered with k-means++ so the user sees a diverse
//! handful of designs, and the designs the user picks become the parents of
//! the next generation.
//!
//! ## Core Concepts
//!
//! - **Genome codec**: gene vectors live in `[0, 1]` and are decoded against the
//!   host's live control wiring at evaluation time
//! - **Chromosome**: a gene vector plus its evaluated phenotype (geometry and
//!   performance readings), cluster id and selection flag
//! - **Clustering**: k-means++ over gene vectors picks one representative per cluster
//! - **Breeding**: uniform crossover and per-gene reset mutation over the user's picks
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use biomorph::prelude::*;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let host = SharedHost::new(my_host);
//! let mut manager = PopulationManager::new(IgaConfig::default())?;
//!
//! manager.initialize_from_host(&host, &mut rng)?;
//! manager.evaluate_all(&host)?;
//! manager.cluster(&mut rng)?;
//! let pick = manager.representatives()[0].id();
//! manager.record_selection(pick)?;
//! manager.breed_next_generation(&mut rng)?;
//! ```

pub mod clustering;
pub mod diagnostics;
pub mod error;
pub mod genome;
pub mod host;
pub mod interactive;
pub mod operators;
pub mod population;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::clustering::prelude::*;
    pub use crate::diagnostics::prelude::*;
    pub use crate::error::*;
    pub use crate::genome::prelude::*;
    pub use crate::host::prelude::*;
    pub use crate::interactive::prelude::*;
    pub use crate::operators::prelude::*;
    pub use crate::population::prelude::*;
}
