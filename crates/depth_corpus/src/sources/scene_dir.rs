//! Directory-based scene dataset.
//!
//! Expected layout: `root/{train,val}/{image,depth}/<name>.<ext>`. Image
//! entries define the available identifiers; each identifier maps to its
//! depth map by swapping the directory segment and fixing the extension to
//! `.jpg`.

use crate::sample::SamplePair;
use crate::transforms::geometric::{resize_depth, resize_image};
use anyhow::{anyhow, bail, Context, Result};
use ndarray::{Array2, Array3};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Enumerates and loads image/depth pairs for one split of a scene dataset.
pub struct SceneDirSource {
    image_paths: Vec<PathBuf>,
    depth_dir: PathBuf,
}

impl SceneDirSource {
    /// Opens the `split` subtree of `root` and enumerates its image entries.
    ///
    /// Image files are matched case-insensitively against jpg/jpeg/png,
    /// symlinks and non-files are skipped, and the result is sorted so the
    /// identifier order is stable across runs.
    pub fn open(root: impl AsRef<Path>, split: &str) -> Result<Self> {
        let root = root.as_ref();
        let image_dir = root.join(split).join("image");
        let depth_dir = root.join(split).join("depth");

        let metadata = fs::metadata(&image_dir)
            .with_context(|| format!("failed to access image directory: {}", image_dir.display()))?;
        if !metadata.is_dir() {
            bail!("image path is not a directory: {}", image_dir.display());
        }

        let mut image_paths = Vec::new();
        for entry in WalkDir::new(&image_dir) {
            let entry = entry.map_err(|e| anyhow!("failed to read directory entry: {}", e))?;
            if entry.path_is_symlink() || !entry.file_type().is_file() {
                continue;
            }
            let matches = entry
                .path()
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.to_lowercase().as_str()));
            if matches {
                image_paths.push(entry.path().to_path_buf());
            }
        }
        image_paths.sort();

        Ok(Self {
            image_paths,
            depth_dir,
        })
    }

    /// Number of available identifiers.
    pub fn len(&self) -> usize {
        self.image_paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.image_paths.is_empty()
    }

    /// Loads the pair for `id` and resizes both arrays to exactly
    /// `(height, width)`.
    pub fn load(&self, id: usize, shape: (usize, usize)) -> Result<SamplePair> {
        let image_path = self
            .image_paths
            .get(id)
            .ok_or_else(|| anyhow!("sample identifier {} out of range ({} entries)", id, self.len()))?;
        let stem = image_path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| anyhow!("unusable image file name: {}", image_path.display()))?;
        let depth_path = self.depth_dir.join(format!("{stem}.jpg"));

        let image = read_image_array(image_path)?;
        let depth = read_depth_array(&depth_path)?;
        let (out_h, out_w) = shape;
        Ok(SamplePair::new(
            resize_image(&image, out_h, out_w),
            resize_depth(&depth, out_h, out_w),
        ))
    }
}

/// Decodes an image file into an `(H, W, 3)` f32 array in `[0, 255]`.
fn read_image_array(path: &Path) -> Result<Array3<f32>> {
    let rgb = image::open(path)
        .with_context(|| format!("failed to open image: {}", path.display()))?
        .to_rgb8();
    let (width, height) = rgb.dimensions();
    let data: Vec<f32> = rgb.into_raw().into_iter().map(f32::from).collect();
    Array3::from_shape_vec((height as usize, width as usize, 3), data)
        .with_context(|| format!("decoded image has inconsistent shape: {}", path.display()))
}

/// Decodes a depth map file into an `(H, W)` f32 array in `[0, 255]`.
fn read_depth_array(path: &Path) -> Result<Array2<f32>> {
    let luma = image::open(path)
        .with_context(|| format!("failed to open depth map: {}", path.display()))?
        .to_luma8();
    let (width, height) = luma.dimensions();
    let data: Vec<f32> = luma.into_raw().into_iter().map(f32::from).collect();
    Array2::from_shape_vec((height as usize, width as usize), data)
        .with_context(|| format!("decoded depth map has inconsistent shape: {}", path.display()))
}
