use anyhow::{ensure, Result};
use ndarray::{Array2, Array3};

/// A paired image/depth sample flowing through the preparation pipeline.
///
/// The image is a 3-channel `f32` array and the depth map a single-channel
/// `f32` array. Up to the layout-conversion stage the image is `(H, W, C)`
/// and shares its spatial dimensions with the depth map; after
/// [`ToChannelFirst`](crate::transforms::ToChannelFirst) the image is
/// `(C, H, W)`, the layout consumed by training.
///
/// Raw values arrive in `[0, 255]`; [`Normalize`](crate::transforms::Normalize)
/// rescales them to `[0, 1]`.
#[derive(Debug, Clone)]
pub struct SamplePair {
    pub image: Array3<f32>,
    pub depth: Array2<f32>,
}

impl SamplePair {
    pub fn new(image: Array3<f32>, depth: Array2<f32>) -> Self {
        Self { image, depth }
    }

    /// Creates a pair after verifying that the image (assumed `(H, W, C)`)
    /// and the depth map agree on their spatial dimensions.
    pub fn checked(image: Array3<f32>, depth: Array2<f32>) -> Result<Self> {
        let (ih, iw, _) = image.dim();
        let (dh, dw) = depth.dim();
        ensure!(
            (ih, iw) == (dh, dw),
            "image and depth dimensions mismatch: image is {}x{}, depth is {}x{}",
            ih,
            iw,
            dh,
            dw
        );
        Ok(Self { image, depth })
    }

    /// Spatial `(height, width)` of the pair, read from the depth map so it
    /// is valid in both image layouts.
    pub fn spatial_dims(&self) -> (usize, usize) {
        self.depth.dim()
    }
}
