//! Genome codec
//!
//! Maps a normalized [`GeneVector`] to and from the control values of the
//! host. The first `slider_count` genes drive scalar sliders and are
//! rescaled into each slider's bounds; the remaining genes are split across
//! gene pools in declaration order and passed through unchanged.
//!
//! Gene positions are positional. If the host wiring changes length
//! mid-run every stored chromosome is corrupted, so a length mismatch is
//! always surfaced as [`GenomeError::EncodingMismatch`].

use serde::{Deserialize, Serialize};

use crate::error::GenomeError;
use crate::genome::bounds::Bounds;
use crate::genome::gene_vector::GeneVector;
use crate::host::traits::ControlInspector;

/// Snapshot of the host's control wiring
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlWiring {
    /// Bounds of each scalar control, in wiring order
    pub sliders: Vec<Bounds>,
    /// Number of entries in each gene pool, in wiring order
    pub gene_pool_sizes: Vec<usize>,
}

impl ControlWiring {
    /// Create a wiring snapshot
    pub fn new(sliders: Vec<Bounds>, gene_pool_sizes: Vec<usize>) -> Self {
        Self {
            sliders,
            gene_pool_sizes,
        }
    }

    /// Read the wiring from a control inspector
    ///
    /// The caller must hold the host lock for the duration of the call.
    pub fn inspect<I: ControlInspector + ?Sized>(inspector: &I) -> Result<Self, GenomeError> {
        let sliders = inspector
            .control_bounds()
            .into_iter()
            .enumerate()
            .map(|(i, (min, max))| {
                Bounds::try_new(min, max).map_err(|e| {
                    GenomeError::InvalidControl(format!("slider {}: {}", i, e))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            sliders,
            gene_pool_sizes: inspector.gene_pool_sizes(),
        })
    }

    /// Number of scalar controls
    pub fn slider_count(&self) -> usize {
        self.sliders.len()
    }

    /// Total number of genes: sliders plus every gene-pool entry
    pub fn vector_length(&self) -> usize {
        self.sliders.len() + self.gene_pool_sizes.iter().sum::<usize>()
    }
}

/// Values to write back onto the host controls
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlAssignment {
    /// Slider values, rescaled into each slider's bounds
    pub sliders: Vec<f64>,
    /// Normalized values for each gene pool, one vector per pool
    pub gene_pools: Vec<Vec<f64>>,
}

/// Translates between gene vectors and control assignments
#[derive(Clone, Debug, PartialEq)]
pub struct GenomeCodec {
    wiring: ControlWiring,
}

impl GenomeCodec {
    /// Create a codec for the given wiring
    pub fn new(wiring: ControlWiring) -> Self {
        Self { wiring }
    }

    /// The wiring this codec encodes against
    pub fn wiring(&self) -> &ControlWiring {
        &self.wiring
    }

    /// Length every gene vector must have
    pub fn vector_length(&self) -> usize {
        self.wiring.vector_length()
    }

    /// Fail unless `len` matches this codec's vector length
    pub fn ensure_length(&self, len: usize) -> Result<(), GenomeError> {
        let expected = self.vector_length();
        if len != expected {
            return Err(GenomeError::EncodingMismatch {
                expected,
                actual: len,
            });
        }
        Ok(())
    }

    /// Decode a gene vector into control values
    pub fn decode(&self, genes: &GeneVector) -> Result<ControlAssignment, GenomeError> {
        self.ensure_length(genes.len())?;
        let genes = genes.genes();
        let slider_count = self.wiring.slider_count();

        let sliders = self
            .wiring
            .sliders
            .iter()
            .zip(&genes[..slider_count])
            .map(|(bounds, &g)| bounds.denormalize(g))
            .collect();

        let mut offset = slider_count;
        let gene_pools = self
            .wiring
            .gene_pool_sizes
            .iter()
            .map(|&size| {
                let pool = genes[offset..offset + size].to_vec();
                offset += size;
                pool
            })
            .collect();

        Ok(ControlAssignment {
            sliders,
            gene_pools,
        })
    }

    /// Encode control values back into a gene vector
    ///
    /// Sliders are normalized against their bounds; a slider with
    /// `min == max` encodes to 0.
    pub fn encode(&self, assignment: &ControlAssignment) -> Result<GeneVector, GenomeError> {
        if assignment.sliders.len() != self.wiring.slider_count() {
            return Err(GenomeError::EncodingMismatch {
                expected: self.wiring.slider_count(),
                actual: assignment.sliders.len(),
            });
        }
        let pools_match = assignment.gene_pools.len() == self.wiring.gene_pool_sizes.len()
            && assignment
                .gene_pools
                .iter()
                .zip(&self.wiring.gene_pool_sizes)
                .all(|(pool, &size)| pool.len() == size);
        if !pools_match {
            let actual = assignment.sliders.len()
                + assignment.gene_pools.iter().map(Vec::len).sum::<usize>();
            return Err(GenomeError::EncodingMismatch {
                expected: self.vector_length(),
                actual,
            });
        }

        let mut genes = Vec::with_capacity(self.vector_length());
        genes.extend(
            self.wiring
                .sliders
                .iter()
                .zip(&assignment.sliders)
                .map(|(bounds, &v)| bounds.normalize(v)),
        );
        for pool in &assignment.gene_pools {
            genes.extend_from_slice(pool);
        }
        GeneVector::from_genes(genes)
    }
}
