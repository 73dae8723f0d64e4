//! Composable sample transforms.
//!
//! Every transform maps one [`SamplePair`] to another; geometric and
//! photometric parameters apply jointly to the image and its depth map so
//! the pair stays aligned. Randomized transforms draw their parameters at
//! call time from the pipeline RNG (see [`crate::rng`]).
//!
//! ```text
//! transforms/
//! ├── geometric.rs     → resize, crop, rotate
//! ├── photometric.rs   → value normalization
//! ├── augmentation.rs  → random flips
//! └── conversion.rs    → (H, W, C) → (C, H, W) layout
//! ```
//!
//! Pipelines are assembled declaratively from [`Compose`] and [`OneOf`], so
//! augmentation policy lives entirely in the pipeline's construction:
//!
//! ```ignore
//! let pipeline = Compose::new(vec![
//!     Box::new(RandomVerticalFlip::new(0.5)?),
//!     Box::new(RandomHorizontalFlip::new(0.5)?),
//!     Box::new(OneOf::new(Scale::new(228)?, RandomCrop::new((228, 304))?, 0.25)?),
//!     Box::new(Normalize::unit_range()),
//!     Box::new(ToChannelFirst),
//! ]);
//! ```

pub mod augmentation;
pub mod conversion;
pub mod geometric;
pub mod photometric;

pub use augmentation::{RandomHorizontalFlip, RandomVerticalFlip};
pub use conversion::ToChannelFirst;
pub use geometric::{CenterCrop, RandomCrop, RandomRotation, Scale, ScaleExact};
pub use photometric::Normalize;

use crate::rng::draw_uniform;
use crate::sample::SamplePair;
use anyhow::{ensure, Context, Result};

/// A stateless operation over an image/depth pair.
///
/// Implementations must be `Send + Sync`; a materialized corpus may be read
/// concurrently and the pipeline objects are shared by reference.
pub trait Transform: Send + Sync {
    fn apply(&self, pair: SamplePair) -> Result<SamplePair>;
}

// ============================================================================
// Compose
// ============================================================================

/// Applies an ordered list of transforms left to right.
///
/// Each stage receives the previous stage's output. An empty list is the
/// identity. If any stage fails the whole composition fails; there is no
/// internal recovery.
pub struct Compose {
    stages: Vec<Box<dyn Transform>>,
}

impl Compose {
    pub fn new(stages: Vec<Box<dyn Transform>>) -> Self {
        Self { stages }
    }
}

impl Transform for Compose {
    fn apply(&self, pair: SamplePair) -> Result<SamplePair> {
        let mut current = pair;
        for (stage_index, stage) in self.stages.iter().enumerate() {
            current = stage
                .apply(current)
                .with_context(|| format!("pipeline stage {} failed", stage_index))?;
        }
        Ok(current)
    }
}

// ============================================================================
// OneOf
// ============================================================================

/// Probabilistic either-or branch between two transforms.
///
/// One uniform value is drawn per invocation; branch `a` is applied if the
/// draw is `< prob_a`, branch `b` otherwise. When both branches produce the
/// same output shape by different paths (e.g. rotate+crop vs.
/// random-crop+rescale) the mix stays shape-consistent while being
/// geometrically diverse.
pub struct OneOf<A, B> {
    a: A,
    b: B,
    prob_a: f64,
}

impl<A: Transform, B: Transform> OneOf<A, B> {
    pub fn new(a: A, b: B, prob_a: f64) -> Result<Self> {
        ensure!(
            (0.0..=1.0).contains(&prob_a),
            "branch probability must be in [0.0, 1.0] range (got {})",
            prob_a
        );
        Ok(Self { a, b, prob_a })
    }
}

impl<A: Transform, B: Transform> Transform for OneOf<A, B> {
    fn apply(&self, pair: SamplePair) -> Result<SamplePair> {
        if draw_uniform(0.0, 1.0) < self.prob_a {
            self.a.apply(pair)
        } else {
            self.b.apply(pair)
        }
    }
}
