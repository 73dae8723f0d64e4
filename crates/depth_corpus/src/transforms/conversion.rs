//! Final layout conversion.

use crate::sample::SamplePair;
use crate::transforms::Transform;
use anyhow::Result;

// ============================================================================
// ToChannelFirst
// ============================================================================

/// Converts the image from `(H, W, C)` to the channel-first `(C, H, W)`
/// layout consumed by training. The depth map keeps its `(H, W)` shape.
///
/// This is the terminal stage of every pipeline; no geometric transform may
/// follow it.
#[derive(Debug, Clone)]
pub struct ToChannelFirst;

impl Transform for ToChannelFirst {
    fn apply(&self, pair: SamplePair) -> Result<SamplePair> {
        let image = pair
            .image
            .permuted_axes([2, 0, 1])
            .as_standard_layout()
            .into_owned();
        Ok(SamplePair::new(image, pair.depth))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, Array3};

    #[test]
    fn test_channel_first_layout() -> Result<()> {
        let image = Array3::from_shape_fn((4, 6, 3), |(r, c, ch)| {
            (r * 100 + c * 10 + ch) as f32
        });
        let pair = SamplePair::new(image, Array2::zeros((4, 6)));

        let out = ToChannelFirst.apply(pair)?;
        assert_eq!(out.image.dim(), (3, 4, 6));
        assert_eq!(out.depth.dim(), (4, 6));
        // Pixel (r=2, c=5, ch=1) moves to [ch=1, r=2, c=5].
        assert_eq!(out.image[[1, 2, 5]], 251.0);
        assert!(out.image.is_standard_layout());
        Ok(())
    }
}
