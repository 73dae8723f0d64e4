//! Container-style raw dataset access.
//!
//! Indoor-scene datasets such as NYUv2 ship as one container file with two
//! top-level arrays, `images` and `depths`, indexed by integer position and
//! stored channel-major: images `(C, W, H)`, depths `(W, H)`. Opening and
//! reading the container format is a collaborator concern; the materializer
//! only consumes [`DepthArchive`] and reorders entries to the semantic
//! `(H, W, C)` / `(H, W)` layout.

use anyhow::{anyhow, ensure, Result};
use ndarray::{Array2, Array3};

/// Narrow interface over a container-file raw dataset.
///
/// Implementations return entries in the container's stored layout; use
/// [`semantic_image`] / [`semantic_depth`] to reorder.
pub trait DepthArchive: Send + Sync {
    /// Number of image/depth entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Image entry at `index` in stored `(C, W, H)` layout.
    fn image(&self, index: usize) -> Result<Array3<f32>>;

    /// Depth entry at `index` in stored `(W, H)` layout.
    fn depth(&self, index: usize) -> Result<Array2<f32>>;
}

/// Reorders a stored `(C, W, H)` image to semantic `(H, W, C)`.
pub fn semantic_image(stored: Array3<f32>) -> Array3<f32> {
    stored.permuted_axes([2, 1, 0]).as_standard_layout().into_owned()
}

/// Reorders a stored `(W, H)` depth map to semantic `(H, W)`.
pub fn semantic_depth(stored: Array2<f32>) -> Array2<f32> {
    stored.reversed_axes().as_standard_layout().into_owned()
}

/// A [`DepthArchive`] over pre-extracted in-memory arrays.
///
/// Used for datasets already pulled out of their container and as the test
/// double for the materializer.
pub struct InMemoryArchive {
    images: Vec<Array3<f32>>,
    depths: Vec<Array2<f32>>,
}

impl InMemoryArchive {
    pub fn new(images: Vec<Array3<f32>>, depths: Vec<Array2<f32>>) -> Result<Self> {
        ensure!(
            images.len() == depths.len(),
            "archive arrays must pair up ({} images, {} depths)",
            images.len(),
            depths.len()
        );
        Ok(Self { images, depths })
    }
}

impl DepthArchive for InMemoryArchive {
    fn len(&self) -> usize {
        self.images.len()
    }

    fn image(&self, index: usize) -> Result<Array3<f32>> {
        self.images
            .get(index)
            .cloned()
            .ok_or_else(|| anyhow!("archive image index {} out of range ({} entries)", index, self.len()))
    }

    fn depth(&self, index: usize) -> Result<Array2<f32>> {
        self.depths
            .get(index)
            .cloned()
            .ok_or_else(|| anyhow!("archive depth index {} out of range ({} entries)", index, self.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, Array3};

    #[test]
    fn test_semantic_reorder_round_trip() {
        // Stored NYU layout: (C, W, H) = (3, 4, 2).
        let stored = Array3::from_shape_fn((3, 4, 2), |(c, w, h)| {
            (c * 100 + w * 10 + h) as f32
        });
        let semantic = semantic_image(stored);
        assert_eq!(semantic.dim(), (2, 4, 3));
        // Element (h=1, w=3, c=2) came from stored (2, 3, 1).
        assert_eq!(semantic[[1, 3, 2]], 231.0);
        assert!(semantic.is_standard_layout());

        let depth = Array2::from_shape_fn((4, 2), |(w, h)| (w * 10 + h) as f32);
        let semantic = semantic_depth(depth);
        assert_eq!(semantic.dim(), (2, 4));
        assert_eq!(semantic[[1, 3]], 31.0);
    }

    #[test]
    fn test_in_memory_archive_indexing() -> Result<()> {
        let archive = InMemoryArchive::new(
            vec![Array3::zeros((3, 4, 2))],
            vec![Array2::zeros((4, 2))],
        )?;
        assert_eq!(archive.len(), 1);
        assert!(archive.image(0).is_ok());
        assert!(archive.depth(1).is_err());
        Ok(())
    }

    #[test]
    fn test_in_memory_archive_rejects_unpaired_arrays() {
        let result = InMemoryArchive::new(vec![Array3::zeros((3, 4, 2))], vec![]);
        assert!(result.is_err());
    }
}
