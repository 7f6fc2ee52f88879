//! Exclusive access to the design host
//!
//! The host has a single implicit state: its current control values. Two
//! evaluations interleaved on it would corrupt both readouts, so every
//! inspection and every apply-and-readback sequence runs under one lock.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{EvaluationError, EvoResult, EvolutionError};
use crate::genome::codec::{ControlWiring, GenomeCodec};
use crate::genome::gene_vector::GeneVector;
use crate::host::traits::{DesignHost, DesignOutput};

/// Outcome of one design evaluation that did not abort the run
pub type Evaluation<G> = Result<DesignOutput<G>, EvaluationError>;

/// A design host shared behind an exclusive lock
pub struct SharedHost<H> {
    inner: Arc<Mutex<H>>,
}

impl<H> Clone for SharedHost<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<H: DesignHost> SharedHost<H> {
    /// Wrap a host
    pub fn new(host: H) -> Self {
        Self {
            inner: Arc::new(Mutex::new(host)),
        }
    }

    /// Share a host that is already behind a lock elsewhere
    pub fn from_arc(inner: Arc<Mutex<H>>) -> Self {
        Self { inner }
    }

    /// Acquire the host for exclusive use
    pub fn lock(&self) -> EvoResult<MutexGuard<'_, H>> {
        self.inner.lock().map_err(|_| EvolutionError::HostUnavailable)
    }

    /// Run `f` with exclusive access to the host
    pub fn with_host<T>(&self, f: impl FnOnce(&mut H) -> T) -> EvoResult<T> {
        let mut guard = self.lock()?;
        Ok(f(&mut guard))
    }

    /// Read the current control wiring
    pub fn inspect(&self) -> EvoResult<ControlWiring> {
        let guard = self.lock()?;
        Ok(ControlWiring::inspect(&*guard)?)
    }

    /// Decode `genes` against the live wiring, apply them and read back
    ///
    /// The outer error is fatal to the run: the wiring no longer has
    /// `expected_len` genes, or the lock is poisoned. The inner result is
    /// the per-design outcome.
    pub fn evaluate(
        &self,
        expected_len: usize,
        genes: &GeneVector,
    ) -> EvoResult<Evaluation<H::Geometry>> {
        let mut guard = self.lock()?;
        let codec = GenomeCodec::new(ControlWiring::inspect(&*guard)?);
        if codec.vector_length() != expected_len {
            return Err(EvolutionError::EncodingMismatch {
                expected: expected_len,
                actual: codec.vector_length(),
            });
        }
        let assignment = codec.decode(genes)?;
        Ok(guard.apply(&assignment))
    }
}
