//! Interactive run driver
//!
//! The user is the fitness function. Each generation the host evaluates every
//! chromosome, the manager clusters the results, the user picks favourites
//! from the cluster representatives and the picks are bred into the next
//! generation.
//!
//! # Example
//!
//! ```rust,ignore
//! use biomorph::prelude::*;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let host = SharedHost::new(my_host);
//! let config = IgaBuilder::new().population_size(24).cluster_count(12).build_config()?;
//! let mut manager = PopulationManager::new(config)?;
//!
//! manager.initialize_from_host(&host, &mut rng)?;
//! loop {
//!     manager.evaluate_all(&host)?;
//!     manager.cluster(&mut rng)?;
//!     for id in present_to_user(manager.representatives()) {
//!         manager.record_selection(id)?;
//!     }
//!     manager.breed_next_generation(&mut rng)?;
//! }
//! ```

pub mod archive;
pub mod config;
pub mod manager;

/// Prelude for convenient imports
pub mod prelude {
    pub use super::archive::{ArchivedChromosome, GenerationSnapshot, PopulationArchive};
    pub use super::config::{IgaBuilder, IgaConfig};
    pub use super::manager::{EvaluationSummary, PopulationManager};
}
