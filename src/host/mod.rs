//! External design host
//!
//! Traits for the modeling host that owns the controls and recomputes
//! designs, plus the lock that serializes access to it.

pub mod shared;
pub mod traits;

pub mod prelude {
    pub use super::shared::{Evaluation, SharedHost};
    pub use super::traits::{ControlInspector, DesignEvaluator, DesignHost, DesignOutput};
}
