//! Host collaborator traits
//!
//! The modeling host owns the design graph. It exposes the controls the
//! genome is wired to and recomputes geometry and performance values after
//! new control values are applied. Both roles act on one piece of mutable
//! host state, so they are always used together behind
//! [`SharedHost`](super::shared::SharedHost).

use serde::{Deserialize, Serialize};

use crate::error::EvaluationError;
use crate::genome::codec::ControlAssignment;

/// Reads the control wiring from the host
pub trait ControlInspector {
    /// `(min, max)` of each scalar control, in wiring order
    fn control_bounds(&self) -> Vec<(f64, f64)>;

    /// Entry count of each gene pool, in wiring order
    fn gene_pool_sizes(&self) -> Vec<usize>;
}

/// Applies control values to the host and reads back the resulting design
pub trait DesignEvaluator {
    /// Opaque handle to a piece of geometry produced by the host
    type Geometry: Clone;

    /// Set the controls, recompute the design and read its phenotype
    ///
    /// May be non-deterministic; may fail for an individual design.
    fn apply(
        &mut self,
        assignment: &ControlAssignment,
    ) -> Result<DesignOutput<Self::Geometry>, EvaluationError>;
}

/// A host that can both be inspected and evaluate designs
pub trait DesignHost: ControlInspector + DesignEvaluator {}

impl<T: ControlInspector + DesignEvaluator> DesignHost for T {}

/// Raw readout of one evaluated design
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DesignOutput<G> {
    /// Geometry handles
    pub geometry: Vec<G>,
    /// Performance values
    pub performance: Vec<f64>,
    /// Criterion label of each performance value
    pub criteria: Vec<String>,
}

impl<G> DesignOutput<G> {
    /// Create an output with geometry and no performance readings
    pub fn new(geometry: Vec<G>) -> Self {
        Self {
            geometry,
            performance: Vec::new(),
            criteria: Vec::new(),
        }
    }

    /// Add a labelled performance reading
    pub fn with_reading(mut self, value: f64, label: impl Into<String>) -> Self {
        self.performance.push(value);
        self.criteria.push(label.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_design_output_readings() {
        let out = DesignOutput::new(vec!["mesh"])
            .with_reading(1.5, "area")
            .with_reading(3.0, "volume");
        assert_eq!(out.performance, vec![1.5, 3.0]);
        assert_eq!(out.criteria, vec!["area", "volume"]);
    }
}
