//! Corpus materialization and access.
//!
//! The materializer runs two sequential passes. The base pass loads every
//! sample of the requested split through the default pipeline; any failure
//! there is fatal because base-pass correctness is required. The augmentation
//! pass then draws raw samples uniformly with replacement and runs the
//! randomized pipeline a configured number of times; each attempt is
//! best-effort — a failed attempt is logged, counted and skipped, never
//! aborting the pass. Once built the corpus is immutable and may be read
//! concurrently by a batching consumer.

use crate::error::CorpusError;
use crate::pipeline::{augmentation_pipeline, container_default_pipeline, default_pipeline};
use crate::rng::draw_index;
use crate::sample::SamplePair;
use crate::sources::{semantic_depth, semantic_image, DepthArchive, SceneDirSource};
use crate::transforms::{Compose, Transform};
use anyhow::{ensure, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Shape and policy knobs shared by both materialization policies.
#[derive(Debug, Clone)]
pub struct CorpusConfig {
    /// Final `(height, width)` every materialized sample must have.
    pub output_shape: (usize, usize),
    /// `(height, width)` raw pairs are reloaded at for augmentation.
    pub working_shape: (usize, usize),
    /// Target shorter side for aspect-preserving rescales.
    pub scale_short_side: usize,
    /// Rotation bound in degrees for the rotate+crop augmentation path.
    pub rotation_degrees: f64,
    /// Probability of the plain-rescale branch over the crop branches.
    pub plain_rescale_prob: f64,
    /// Number of augmentation attempts; 0 disables the augmentation pass.
    pub augment_size: usize,
    /// Attempt interval between progress log lines.
    pub progress_interval: usize,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            output_shape: (228, 304),
            working_shape: (480, 640),
            scale_short_side: 228,
            rotation_degrees: 30.0,
            plain_rescale_prob: 0.25,
            augment_size: 0,
            progress_interval: 500,
        }
    }
}

/// An eagerly materialized, immutable collection of prepared samples.
///
/// Samples are stored in an `Arc` slice, so cloning the corpus is cheap and
/// concurrent read access from a batching layer is safe.
#[derive(Clone, Debug)]
pub struct MaterializedCorpus {
    samples: Arc<[SamplePair]>,
    augment_failures: usize,
}

impl MaterializedCorpus {
    /// Materializes one split of a directory-based scene dataset.
    ///
    /// The base pass loads every image under `root/<split>/image/`, resized
    /// exactly to the output shape. The augmentation pass reloads drawn
    /// samples at the working resolution.
    pub fn from_scene_dir(
        root: impl AsRef<Path>,
        split: &str,
        config: &CorpusConfig,
    ) -> Result<Self> {
        let source = SceneDirSource::open(root, split)?;
        Self::materialize(
            source.len(),
            |id| source.load(id, config.output_shape),
            |id| source.load(id, config.working_shape),
            &default_pipeline(),
            &augmentation_pipeline(config)?,
            config,
        )
    }

    /// Materializes the given index list of a container-style dataset.
    ///
    /// `indices` normally comes from a persisted [`Split`](crate::Split).
    /// Entries are reordered from the container's stored layout to
    /// `(H, W, C)` / `(H, W)` before entering the pipelines.
    pub fn from_archive(
        archive: &dyn DepthArchive,
        indices: &[usize],
        config: &CorpusConfig,
    ) -> Result<Self> {
        Self::from_archive_with_pipelines(
            archive,
            indices,
            &container_default_pipeline(config)?,
            &augmentation_pipeline(config)?,
            config,
        )
    }

    /// Archive materialization with caller-supplied pipelines, for custom
    /// augmentation policies.
    pub fn from_archive_with_pipelines(
        archive: &dyn DepthArchive,
        indices: &[usize],
        base_pipeline: &Compose,
        augment_pipeline: &Compose,
        config: &CorpusConfig,
    ) -> Result<Self> {
        let load = |position: usize| -> Result<SamplePair> {
            let index = indices[position];
            let image = semantic_image(archive.image(index)?);
            let depth = semantic_depth(archive.depth(index)?);
            SamplePair::checked(image, depth)
        };
        Self::materialize(
            indices.len(),
            &load,
            &load,
            base_pipeline,
            augment_pipeline,
            config,
        )
    }

    fn materialize<B, A>(
        count: usize,
        base_load: B,
        augment_load: A,
        base_pipeline: &Compose,
        augment_pipeline: &Compose,
        config: &CorpusConfig,
    ) -> Result<Self>
    where
        B: Fn(usize) -> Result<SamplePair>,
        A: Fn(usize) -> Result<SamplePair>,
    {
        ensure!(
            config.progress_interval > 0,
            "progress_interval must be positive"
        );

        let mut samples = Vec::with_capacity(count + config.augment_size);
        for id in 0..count {
            let pair = base_load(id)
                .and_then(|raw| base_pipeline.apply(raw))
                .map_err(|error| CorpusError::FatalLoad {
                    id,
                    message: format!("{error:#}"),
                })?;
            samples.push(pair);
        }

        let mut augment_failures = 0;
        if config.augment_size > 0 {
            ensure!(
                count > 0,
                "cannot run the augmentation pass over an empty raw source"
            );
            for attempt in 0..config.augment_size {
                if attempt % config.progress_interval == 0 {
                    info!(
                        attempt,
                        total = config.augment_size,
                        "generating augmented samples"
                    );
                }
                let id = draw_index(count);
                match augment_load(id).and_then(|raw| augment_pipeline.apply(raw)) {
                    Ok(pair) => samples.push(pair),
                    Err(error) => {
                        augment_failures += 1;
                        warn!(
                            attempt,
                            source_id = id,
                            "skipping failed augmentation attempt: {error:#}"
                        );
                    }
                }
            }
        }

        Ok(Self {
            samples: samples.into(),
            augment_failures,
        })
    }

    /// Number of materialized samples (base + successful augmentations).
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The pair at `position`. Fails with
    /// [`CorpusError::IndexOutOfRange`] when `position >= len()`.
    pub fn get(&self, position: usize) -> Result<&SamplePair> {
        self.samples.get(position).ok_or_else(|| {
            CorpusError::IndexOutOfRange {
                index: position,
                len: self.samples.len(),
            }
            .into()
        })
    }

    /// Iterates the samples in materialization order.
    pub fn iter(&self) -> impl Iterator<Item = &SamplePair> {
        self.samples.iter()
    }

    /// Number of augmentation attempts that failed and were skipped.
    pub fn augmentation_failures(&self) -> usize {
        self.augment_failures
    }
}
