//! Chromosome type
//!
//! This module provides the Chromosome type that pairs a gene vector with its
//! realized phenotype and the per-generation bookkeeping of an interactive
//! run.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EvaluationError, EvoResult, EvolutionError};
use crate::genome::gene_vector::GeneVector;
use crate::host::shared::SharedHost;
use crate::host::traits::{DesignHost, DesignOutput};

/// Identifier of a chromosome, unique within a run
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct ChromosomeId(pub usize);

impl fmt::Display for ChromosomeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Chromosome({})", self.0)
    }
}

/// Realized design: geometry plus labelled performance readings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Phenotype<G> {
    geometry: Vec<G>,
    performance: Vec<f64>,
    criteria: Vec<String>,
}

impl<G> Phenotype<G> {
    /// Validate a host readout
    ///
    /// Empty geometry and unequal value/label lists are evaluation failures.
    pub fn from_output(output: DesignOutput<G>) -> Result<Self, EvaluationError> {
        if output.geometry.is_empty() {
            return Err(EvaluationError::EmptyGeometry);
        }
        if output.performance.len() != output.criteria.len() {
            return Err(EvaluationError::ReadingsMismatch {
                values: output.performance.len(),
                labels: output.criteria.len(),
            });
        }
        Ok(Self {
            geometry: output.geometry,
            performance: output.performance,
            criteria: output.criteria,
        })
    }

    pub fn geometry(&self) -> &[G] {
        &self.geometry
    }

    pub fn performance(&self) -> &[f64] {
        &self.performance
    }

    pub fn criteria(&self) -> &[String] {
        &self.criteria
    }

    /// Number of performance criteria reported
    pub fn criteria_count(&self) -> usize {
        self.performance.len()
    }

    /// Iterate `(value, label)` pairs
    pub fn readings(&self) -> impl Iterator<Item = (f64, &str)> {
        self.performance
            .iter()
            .copied()
            .zip(self.criteria.iter().map(String::as_str))
    }
}

/// Evaluation state of a chromosome
#[derive(Clone, Debug, PartialEq)]
pub enum EvaluationStatus<G> {
    /// Not yet evaluated this generation
    Pending,
    /// Evaluated successfully; the phenotype is immutable from here on
    Evaluated(Phenotype<G>),
    /// The host failed to produce a valid design
    Failed(EvaluationError),
}

/// One individual of an interactive run
#[derive(Clone, Debug)]
pub struct Chromosome<G> {
    id: ChromosomeId,
    genes: GeneVector,
    pub(crate) status: EvaluationStatus<G>,
    /// Cluster assigned in the current generation
    pub(crate) cluster_id: Option<usize>,
    /// Picked by the user in the current generation
    pub(crate) selected: bool,
    generation: usize,
}

impl<G: Clone> Chromosome<G> {
    /// Create an unevaluated chromosome
    pub fn new(id: ChromosomeId, genes: GeneVector, generation: usize) -> Self {
        Self {
            id,
            genes,
            status: EvaluationStatus::Pending,
            cluster_id: None,
            selected: false,
            generation,
        }
    }

    pub fn id(&self) -> ChromosomeId {
        self.id
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Get a reference to the genes
    pub fn genes(&self) -> &GeneVector {
        &self.genes
    }


    pub fn status(&self) -> &EvaluationStatus<G> {
        &self.status
    }

    /// The phenotype, if evaluation succeeded
    pub fn phenotype(&self) -> Option<&Phenotype<G>> {
        match &self.status {
            EvaluationStatus::Evaluated(p) => Some(p),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.status, EvaluationStatus::Pending)
    }

    pub fn is_evaluated(&self) -> bool {
        matches!(self.status, EvaluationStatus::Evaluated(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, EvaluationStatus::Failed(_))
    }

    pub fn cluster_id(&self) -> Option<usize> {
        self.cluster_id
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Evaluate this chromosome on the host
    ///
    /// A chromosome is evaluated at most once: once it holds a phenotype or
    /// a failure, the host is not called again and
    /// [`EvolutionError::AlreadyEvaluated`] is returned. A failed design is
    /// recorded as [`EvaluationStatus::Failed`] and returned as
    /// [`EvolutionError::EvaluationFailure`]; wiring and lock errors are
    /// fatal and leave the status untouched.
    pub fn evaluate<H>(&mut self, host: &SharedHost<H>) -> EvoResult<()>
    where
        H: DesignHost<Geometry = G>,
    {
        if !self.is_pending() {
            return Err(EvolutionError::AlreadyEvaluated(self.id));
        }
        let outcome = host
            .evaluate(self.genes.len(), &self.genes)?
            .and_then(Phenotype::from_output);
        match outcome {
            Ok(phenotype) => {
                self.status = EvaluationStatus::Evaluated(phenotype);
                Ok(())
            }
            Err(source) => {
                self.status = EvaluationStatus::Failed(source.clone());
                Err(EvolutionError::EvaluationFailure {
                    id: self.id,
                    source,
                })
            }
        }
    }

    /// Performance value of the first criterion with this label
    pub fn performance_of(&self, label: &str) -> Option<f64> {
        self.phenotype()?
            .readings()
            .find(|(_, l)| *l == label)
            .map(|(v, _)| v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::codec::ControlAssignment;
    use crate::host::shared::Evaluation;
    use crate::host::traits::{ControlInspector, DesignEvaluator};

    struct SumHost {
        fail: bool,
        calls: usize,
    }

    impl ControlInspector for SumHost {
        fn control_bounds(&self) -> Vec<(f64, f64)> {
            vec![(0.0, 1.0); 3]
        }

        fn gene_pool_sizes(&self) -> Vec<usize> {
            Vec::new()
        }
    }

    impl DesignEvaluator for SumHost {
        type Geometry = String;

        fn apply(&mut self, assignment: &ControlAssignment) -> Evaluation<String> {
            self.calls += 1;
            if self.fail {
                return Ok(DesignOutput::new(Vec::new()));
            }
            let sum: f64 = assignment.sliders.iter().sum();
            Ok(DesignOutput::new(vec!["mesh".to_string()]).with_reading(sum, "sum"))
        }
    }

    fn chromosome() -> Chromosome<String> {
        let genes = GeneVector::from_genes(vec![0.1, 0.2, 0.3]).unwrap();
        Chromosome::new(ChromosomeId(0), genes, 0)
    }

    #[test]
    fn test_new_is_pending() {
        let c = chromosome();
        assert!(c.is_pending());
        assert!(c.phenotype().is_none());
        assert_eq!(c.cluster_id(), None);
        assert!(!c.is_selected());
        assert_eq!(c.generation(), 0);
    }

    #[test]
    fn test_evaluate_records_phenotype() {
        let host = SharedHost::new(SumHost { fail: false, calls: 0 });
        let mut c = chromosome();
        c.evaluate(&host).unwrap();

        assert!(c.is_evaluated());
        let p = c.phenotype().unwrap();
        assert_eq!(p.criteria_count(), 1);
        assert_eq!(p.geometry(), &["mesh".to_string()]);
        assert!((c.performance_of("sum").unwrap() - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_evaluate_failure_marks_chromosome() {
        let host = SharedHost::new(SumHost { fail: true, calls: 0 });
        let mut c = chromosome();
        let err = c.evaluate(&host).unwrap_err();

        assert!(matches!(
            err,
            EvolutionError::EvaluationFailure {
                source: EvaluationError::EmptyGeometry,
                ..
            }
        ));
        assert!(c.is_failed());
    }

    #[test]
    fn test_second_evaluation_keeps_phenotype() {
        let host = SharedHost::new(SumHost { fail: false, calls: 0 });
        let mut c = chromosome();
        c.evaluate(&host).unwrap();
        let first = c.phenotype().unwrap().clone();

        host.with_host(|h| h.fail = true).unwrap();
        let err = c.evaluate(&host).unwrap_err();
        assert!(matches!(err, EvolutionError::AlreadyEvaluated(ChromosomeId(0))));
        assert_eq!(c.phenotype(), Some(&first));
        assert_eq!(host.with_host(|h| h.calls).unwrap(), 1);
    }

    #[test]
    fn test_failed_chromosome_is_not_retried() {
        let host = SharedHost::new(SumHost { fail: true, calls: 0 });
        let mut c = chromosome();
        assert!(c.evaluate(&host).is_err());

        host.with_host(|h| h.fail = false).unwrap();
        assert!(matches!(
            c.evaluate(&host),
            Err(EvolutionError::AlreadyEvaluated(_))
        ));
        assert!(c.is_failed());
        assert_eq!(host.with_host(|h| h.calls).unwrap(), 1);
    }

    #[test]
    fn test_phenotype_rejects_mismatched_readings() {
        let output = DesignOutput {
            geometry: vec![1u8],
            performance: vec![1.0, 2.0],
            criteria: vec!["a".to_string()],
        };
        assert_eq!(
            Phenotype::from_output(output),
            Err(EvaluationError::ReadingsMismatch {
                values: 2,
                labels: 1
            })
        );
    }
}
