//! Bounds for scalar controls
//!
//! A slider on the host exposes an inclusive `[min, max]` range. Genes are
//! always stored normalized to `[0, 1]` and rescaled into these bounds on
//! decode.

use serde::{Deserialize, Serialize};

use crate::error::GenomeError;

/// Inclusive range of a single scalar control
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Lower bound (inclusive)
    pub min: f64,
    /// Upper bound (inclusive)
    pub max: f64,
}

impl Bounds {
    /// Create new bounds
    ///
    /// # Panics
    /// Panics if min > max or either bound is not finite
    pub fn new(min: f64, max: f64) -> Self {
        match Self::try_new(min, max) {
            Ok(b) => b,
            Err(e) => panic!("{}", e),
        }
    }

    /// Create new bounds, rejecting inverted or non-finite ranges
    pub fn try_new(min: f64, max: f64) -> Result<Self, GenomeError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(GenomeError::InvalidControl(format!(
                "non-finite bounds [{}, {}]",
                min, max
            )));
        }
        if min > max {
            return Err(GenomeError::InvalidControl(format!(
                "min ({}) must be <= max ({})",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    /// Unit bounds [0, 1]
    pub fn unit() -> Self {
        Self { min: 0.0, max: 1.0 }
    }

    /// Get the range (max - min)
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// True when the control admits a single value only
    pub fn is_degenerate(&self) -> bool {
        self.range() == 0.0
    }

    /// Check if a value is within bounds
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamp a value to be within bounds
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Normalize a value from bounds to [0, 1]
    ///
    /// Degenerate bounds map every value to 0.
    pub fn normalize(&self, value: f64) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        ((value - self.min) / self.range()).clamp(0.0, 1.0)
    }

    /// Denormalize a value from [0, 1] to bounds
    pub fn denormalize(&self, value: f64) -> f64 {
        // Clamp guards against rounding past max when range is large.
        self.clamp(self.min + value * self.range())
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::unit()
    }
}

impl TryFrom<(f64, f64)> for Bounds {
    type Error = GenomeError;

    fn try_from((min, max): (f64, f64)) -> Result<Self, Self::Error> {
        Self::try_new(min, max)
    }
}
