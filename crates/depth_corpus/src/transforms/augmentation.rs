//! Random flips.
//!
//! Each flip draws its own coin at call time, so consecutive invocations of
//! one pipeline produce independently flipped samples. The draw is shared by
//! the image and the depth map: the pair flips together or not at all.

use crate::rng::draw_bool;
use crate::sample::SamplePair;
use crate::transforms::Transform;
use anyhow::{ensure, Result};
use ndarray::s;

// ============================================================================
// RandomHorizontalFlip
// ============================================================================

/// Mirrors the pair left-to-right with probability `p`.
#[derive(Debug, Clone)]
pub struct RandomHorizontalFlip {
    p: f64,
}

impl RandomHorizontalFlip {
    pub fn new(p: f64) -> Result<Self> {
        ensure!(
            (0.0..=1.0).contains(&p),
            "probability must be in [0.0, 1.0] range (got {})",
            p
        );
        Ok(Self { p })
    }
}

impl Transform for RandomHorizontalFlip {
    fn apply(&self, pair: SamplePair) -> Result<SamplePair> {
        let flip = match self.p {
            0.0 => false,
            1.0 => true,
            _ => draw_bool(self.p),
        };
        if !flip {
            return Ok(pair);
        }
        Ok(SamplePair::new(
            pair.image.slice(s![.., ..;-1, ..]).to_owned(),
            pair.depth.slice(s![.., ..;-1]).to_owned(),
        ))
    }
}

// ============================================================================
// RandomVerticalFlip
// ============================================================================

/// Mirrors the pair top-to-bottom with probability `p`.
#[derive(Debug, Clone)]
pub struct RandomVerticalFlip {
    p: f64,
}

impl RandomVerticalFlip {
    pub fn new(p: f64) -> Result<Self> {
        ensure!(
            (0.0..=1.0).contains(&p),
            "probability must be in [0.0, 1.0] range (got {})",
            p
        );
        Ok(Self { p })
    }
}

impl Transform for RandomVerticalFlip {
    fn apply(&self, pair: SamplePair) -> Result<SamplePair> {
        let flip = match self.p {
            0.0 => false,
            1.0 => true,
            _ => draw_bool(self.p),
        };
        if !flip {
            return Ok(pair);
        }
        Ok(SamplePair::new(
            pair.image.slice(s![..;-1, .., ..]).to_owned(),
            pair.depth.slice(s![..;-1, ..]).to_owned(),
        ))
    }
}
