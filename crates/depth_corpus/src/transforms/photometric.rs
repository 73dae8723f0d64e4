//! Value normalization.

use crate::sample::SamplePair;
use crate::transforms::Transform;
use anyhow::{ensure, Result};

// ============================================================================
// Normalize
// ============================================================================

/// Rescales pixel intensities by a fixed divisor. Applied to both the image
/// and the depth map so the whole pair ends up in one canonical range.
///
/// # Example
/// ```ignore
/// let norm = Normalize::unit_range(); // [0, 255] -> [0, 1]
/// let normalized = norm.apply(pair)?;
/// ```
#[derive(Debug, Clone)]
pub struct Normalize {
    divisor: f32,
}

impl Normalize {
    pub fn new(divisor: f32) -> Result<Self> {
        ensure!(
            divisor > 0.0,
            "normalization divisor must be positive (got {})",
            divisor
        );
        Ok(Self { divisor })
    }

    /// Standard 8-bit rescale to `[0, 1]`.
    pub fn unit_range() -> Self {
        Self { divisor: 255.0 }
    }
}

impl Transform for Normalize {
    fn apply(&self, pair: SamplePair) -> Result<SamplePair> {
        let divisor = self.divisor;
        Ok(SamplePair::new(
            pair.image.mapv(|v| v / divisor),
            pair.depth.mapv(|v| v / divisor),
        ))
    }
}
