//! Spatial transforms: resize, crop, rotate.
//!
//! All transforms here operate on `(H, W, C)` images paired with `(H, W)`
//! depth maps and apply identical geometry to both. Interpolation is
//! bilinear with pixel-center alignment; rotation fills pixels that fall
//! outside the source with zero.

use crate::rng::{draw_index, draw_uniform};
use crate::sample::SamplePair;
use crate::transforms::Transform;
use anyhow::{ensure, Result};
use ndarray::{s, Array2, Array3};

/// Verifies the pair is in `(H, W, C)` layout with aligned spatial
/// dimensions and returns `(height, width)`.
fn aligned_dims(pair: &SamplePair) -> Result<(usize, usize)> {
    let (ih, iw, _) = pair.image.dim();
    let (dh, dw) = pair.depth.dim();
    ensure!(
        (ih, iw) == (dh, dw),
        "geometric transform requires aligned (H, W, C) image and (H, W) depth \
         (image is {}x{}, depth is {}x{})",
        ih,
        iw,
        dh,
        dw
    );
    Ok((ih, iw))
}

#[inline]
fn sample_bilinear_2d(src: &Array2<f32>, y: f32, x: f32) -> f32 {
    let (h, w) = src.dim();
    let y = y.clamp(0.0, (h - 1) as f32);
    let x = x.clamp(0.0, (w - 1) as f32);
    let y0 = y.floor() as usize;
    let x0 = x.floor() as usize;
    let y1 = (y0 + 1).min(h - 1);
    let x1 = (x0 + 1).min(w - 1);
    let fy = y - y0 as f32;
    let fx = x - x0 as f32;
    let top = src[[y0, x0]] * (1.0 - fx) + src[[y0, x1]] * fx;
    let bottom = src[[y1, x0]] * (1.0 - fx) + src[[y1, x1]] * fx;
    top * (1.0 - fy) + bottom * fy
}

#[inline]
fn sample_bilinear_3d(src: &Array3<f32>, y: f32, x: f32, channel: usize) -> f32 {
    let (h, w, _) = src.dim();
    let y = y.clamp(0.0, (h - 1) as f32);
    let x = x.clamp(0.0, (w - 1) as f32);
    let y0 = y.floor() as usize;
    let x0 = x.floor() as usize;
    let y1 = (y0 + 1).min(h - 1);
    let x1 = (x0 + 1).min(w - 1);
    let fy = y - y0 as f32;
    let fx = x - x0 as f32;
    let top = src[[y0, x0, channel]] * (1.0 - fx) + src[[y0, x1, channel]] * fx;
    let bottom = src[[y1, x0, channel]] * (1.0 - fx) + src[[y1, x1, channel]] * fx;
    top * (1.0 - fy) + bottom * fy
}

/// Bilinear resize of an `(H, W, C)` image to `(out_h, out_w, C)`.
pub(crate) fn resize_image(src: &Array3<f32>, out_h: usize, out_w: usize) -> Array3<f32> {
    let (h, w, channels) = src.dim();
    let scale_y = h as f32 / out_h as f32;
    let scale_x = w as f32 / out_w as f32;
    Array3::from_shape_fn((out_h, out_w, channels), |(r, c, ch)| {
        let y = (r as f32 + 0.5) * scale_y - 0.5;
        let x = (c as f32 + 0.5) * scale_x - 0.5;
        sample_bilinear_3d(src, y, x, ch)
    })
}

/// Bilinear resize of an `(H, W)` depth map to `(out_h, out_w)`.
pub(crate) fn resize_depth(src: &Array2<f32>, out_h: usize, out_w: usize) -> Array2<f32> {
    let (h, w) = src.dim();
    let scale_y = h as f32 / out_h as f32;
    let scale_x = w as f32 / out_w as f32;
    Array2::from_shape_fn((out_h, out_w), |(r, c)| {
        let y = (r as f32 + 0.5) * scale_y - 0.5;
        let x = (c as f32 + 0.5) * scale_x - 0.5;
        sample_bilinear_2d(src, y, x)
    })
}

// ============================================================================
// Scale
// ============================================================================

/// Rescales the pair so its shorter side equals `short_side`, preserving the
/// aspect ratio. A 480x640 pair scaled to 228 comes out exactly 228x304.
#[derive(Debug, Clone)]
pub struct Scale {
    short_side: usize,
}

impl Scale {
    pub fn new(short_side: usize) -> Result<Self> {
        ensure!(
            short_side > 0,
            "target short side must be positive (got {})",
            short_side
        );
        Ok(Self { short_side })
    }
}

impl Transform for Scale {
    fn apply(&self, pair: SamplePair) -> Result<SamplePair> {
        let (h, w) = aligned_dims(&pair)?;
        let (out_h, out_w) = if h <= w {
            let out_w = (w as f64 * self.short_side as f64 / h as f64).round() as usize;
            (self.short_side, out_w.max(1))
        } else {
            let out_h = (h as f64 * self.short_side as f64 / w as f64).round() as usize;
            (out_h.max(1), self.short_side)
        };
        Ok(SamplePair::new(
            resize_image(&pair.image, out_h, out_w),
            resize_depth(&pair.depth, out_h, out_w),
        ))
    }
}

// ============================================================================
// ScaleExact
// ============================================================================

/// Rescales the pair to an exact `(height, width)`, ignoring aspect ratio.
#[derive(Debug, Clone)]
pub struct ScaleExact {
    shape: (usize, usize),
}

impl ScaleExact {
    pub fn new(shape: (usize, usize)) -> Result<Self> {
        ensure!(
            shape.0 > 0 && shape.1 > 0,
            "target shape must be positive (got {}x{})",
            shape.0,
            shape.1
        );
        Ok(Self { shape })
    }
}

impl Transform for ScaleExact {
    fn apply(&self, pair: SamplePair) -> Result<SamplePair> {
        aligned_dims(&pair)?;
        let (out_h, out_w) = self.shape;
        Ok(SamplePair::new(
            resize_image(&pair.image, out_h, out_w),
            resize_depth(&pair.depth, out_h, out_w),
        ))
    }
}

// ============================================================================
// CenterCrop
// ============================================================================

/// Crops a fixed `(height, width)` window from the center of the pair.
/// Fails when the pair is smaller than the crop window.
#[derive(Debug, Clone)]
pub struct CenterCrop {
    shape: (usize, usize),
}

impl CenterCrop {
    pub fn new(shape: (usize, usize)) -> Result<Self> {
        ensure!(
            shape.0 > 0 && shape.1 > 0,
            "crop shape must be positive (got {}x{})",
            shape.0,
            shape.1
        );
        Ok(Self { shape })
    }
}

impl Transform for CenterCrop {
    fn apply(&self, pair: SamplePair) -> Result<SamplePair> {
        let (h, w) = aligned_dims(&pair)?;
        let (crop_h, crop_w) = self.shape;
        ensure!(
            crop_h <= h && crop_w <= w,
            "crop window {}x{} exceeds sample size {}x{}",
            crop_h,
            crop_w,
            h,
            w
        );
        let top = (h - crop_h) / 2;
        let left = (w - crop_w) / 2;
        Ok(SamplePair::new(
            pair.image
                .slice(s![top..top + crop_h, left..left + crop_w, ..])
                .to_owned(),
            pair.depth
                .slice(s![top..top + crop_h, left..left + crop_w])
                .to_owned(),
        ))
    }
}

// ============================================================================
// RandomCrop
// ============================================================================

/// Crops a fixed `(height, width)` window at a uniformly drawn position.
/// The same window is cut from the image and the depth map.
#[derive(Debug, Clone)]
pub struct RandomCrop {
    shape: (usize, usize),
}

impl RandomCrop {
    pub fn new(shape: (usize, usize)) -> Result<Self> {
        ensure!(
            shape.0 > 0 && shape.1 > 0,
            "crop shape must be positive (got {}x{})",
            shape.0,
            shape.1
        );
        Ok(Self { shape })
    }
}

impl Transform for RandomCrop {
    fn apply(&self, pair: SamplePair) -> Result<SamplePair> {
        let (h, w) = aligned_dims(&pair)?;
        let (crop_h, crop_w) = self.shape;
        ensure!(
            crop_h <= h && crop_w <= w,
            "crop window {}x{} exceeds sample size {}x{}",
            crop_h,
            crop_w,
            h,
            w
        );
        let top = draw_index(h - crop_h + 1);
        let left = draw_index(w - crop_w + 1);
        Ok(SamplePair::new(
            pair.image
                .slice(s![top..top + crop_h, left..left + crop_w, ..])
                .to_owned(),
            pair.depth
                .slice(s![top..top + crop_h, left..left + crop_w])
                .to_owned(),
        ))
    }
}

// ============================================================================
// RandomRotation
// ============================================================================

/// Rotates the pair by a uniform angle in `[-max_degrees, max_degrees]`
/// around its center. The output keeps the input shape; pixels sampled from
/// outside the source are filled with zero, which a following center crop is
/// expected to remove.
#[derive(Debug, Clone)]
pub struct RandomRotation {
    max_degrees: f64,
}

impl RandomRotation {
    pub fn new(max_degrees: f64) -> Result<Self> {
        ensure!(
            max_degrees > 0.0,
            "rotation range must be positive (got {})",
            max_degrees
        );
        Ok(Self { max_degrees })
    }

    fn rotate_pair(pair: &SamplePair, radians: f32) -> SamplePair {
        let (h, w, channels) = pair.image.dim();
        let cy = (h as f32 - 1.0) / 2.0;
        let cx = (w as f32 - 1.0) / 2.0;
        let (sin, cos) = radians.sin_cos();

        // Inverse mapping: for each output pixel find its source location.
        let source_of = |r: usize, c: usize| -> Option<(f32, f32)> {
            let dy = r as f32 - cy;
            let dx = c as f32 - cx;
            let sy = cy + dy * cos - dx * sin;
            let sx = cx + dy * sin + dx * cos;
            if sy < 0.0 || sx < 0.0 || sy > (h - 1) as f32 || sx > (w - 1) as f32 {
                None
            } else {
                Some((sy, sx))
            }
        };

        let image = Array3::from_shape_fn((h, w, channels), |(r, c, ch)| {
            match source_of(r, c) {
                Some((sy, sx)) => sample_bilinear_3d(&pair.image, sy, sx, ch),
                None => 0.0,
            }
        });
        let depth = Array2::from_shape_fn((h, w), |(r, c)| match source_of(r, c) {
            Some((sy, sx)) => sample_bilinear_2d(&pair.depth, sy, sx),
            None => 0.0,
        });
        SamplePair::new(image, depth)
    }
}

impl Transform for RandomRotation {
    fn apply(&self, pair: SamplePair) -> Result<SamplePair> {
        aligned_dims(&pair)?;
        let degrees = draw_uniform(-self.max_degrees, self.max_degrees);
        let radians = (degrees.to_radians()) as f32;
        Ok(Self::rotate_pair(&pair, radians))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, Array3};

    fn gradient_pair(h: usize, w: usize) -> SamplePair {
        let image = Array3::from_shape_fn((h, w, 3), |(r, c, ch)| {
            (r * w + c) as f32 + ch as f32 * 0.1
        });
        let depth = Array2::from_shape_fn((h, w), |(r, c)| (r * w + c) as f32);
        SamplePair::new(image, depth)
    }

    #[test]
    fn test_scale_short_side_preserves_aspect() -> Result<()> {
        let out = Scale::new(228)?.apply(gradient_pair(480, 640))?;
        assert_eq!(out.image.dim(), (228, 304, 3));
        assert_eq!(out.depth.dim(), (228, 304));
        Ok(())
    }

    #[test]
    fn test_scale_portrait_orientation() -> Result<()> {
        let out = Scale::new(100)?.apply(gradient_pair(200, 100))?;
        assert_eq!(out.depth.dim(), (200, 100));
        Ok(())
    }

    #[test]
    fn test_scale_exact_ignores_aspect() -> Result<()> {
        let out = ScaleExact::new((228, 304))?.apply(gradient_pair(100, 100))?;
        assert_eq!(out.image.dim(), (228, 304, 3));
        assert_eq!(out.depth.dim(), (228, 304));
        Ok(())
    }

    #[test]
    fn test_resize_identity_keeps_values() {
        let pair = gradient_pair(8, 8);
        let resized = resize_depth(&pair.depth, 8, 8);
        for (a, b) in pair.depth.iter().zip(resized.iter()) {
            assert!((a - b).abs() < 1e-4);
        }
    }

    #[test]
    fn test_center_crop_takes_middle_window() -> Result<()> {
        let out = CenterCrop::new((2, 2))?.apply(gradient_pair(4, 4))?;
        assert_eq!(out.depth.dim(), (2, 2));
        // Rows 1..3, cols 1..3 of a 4x4 row-major gradient.
        assert_eq!(out.depth[[0, 0]], 5.0);
        assert_eq!(out.depth[[1, 1]], 10.0);
        Ok(())
    }

    #[test]
    fn test_center_crop_rejects_oversized_window() {
        let result = CenterCrop::new((10, 10)).unwrap().apply(gradient_pair(4, 4));
        assert!(result.is_err());
    }

    #[test]
    fn test_random_crop_shape_and_bounds() -> Result<()> {
        crate::rng::init_pipeline_rng(3);
        let source = gradient_pair(10, 12);
        for _ in 0..20 {
            let out = RandomCrop::new((4, 5))?.apply(source.clone())?;
            assert_eq!(out.image.dim(), (4, 5, 3));
            assert_eq!(out.depth.dim(), (4, 5));
            // Every cropped value must exist in the source.
            assert!(out.depth.iter().all(|&v| v < 120.0));
        }
        Ok(())
    }

    #[test]
    fn test_rotation_preserves_shape() -> Result<()> {
        crate::rng::init_pipeline_rng(11);
        let out = RandomRotation::new(30.0)?.apply(gradient_pair(16, 20))?;
        assert_eq!(out.image.dim(), (16, 20, 3));
        assert_eq!(out.depth.dim(), (16, 20));
        Ok(())
    }

    #[test]
    fn test_rotation_fills_outside_with_zero() {
        // A 45 degree rotation of a constant-one square must leave zero
        // corners in the output.
        let pair = SamplePair::new(
            Array3::ones((32, 32, 3)),
            Array2::ones((32, 32)),
        );
        let rotated = RandomRotation::rotate_pair(&pair, std::f32::consts::FRAC_PI_4);
        assert_eq!(rotated.depth[[0, 0]], 0.0);
        assert_eq!(rotated.depth[[0, 31]], 0.0);
        assert_eq!(rotated.depth[[31, 0]], 0.0);
        assert_eq!(rotated.depth[[31, 31]], 0.0);
        // Center stays inside the source.
        assert!((rotated.depth[[16, 16]] - 1.0).abs() < 1e-4);
    }
}
