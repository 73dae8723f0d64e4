//! Canonical pipeline definitions.
//!
//! Both raw-source policies share these builders; the augmentation policy is
//! defined once and parameterized by [`CorpusConfig`] instead of being
//! re-assembled per source.

use crate::corpus::CorpusConfig;
use crate::transforms::{
    CenterCrop, Compose, Normalize, OneOf, RandomCrop, RandomHorizontalFlip, RandomRotation,
    RandomVerticalFlip, Scale, ScaleExact, ToChannelFirst,
};
use anyhow::Result;

/// Pipeline for "as-is" base samples already at the output shape:
/// normalize, then convert to the training layout.
pub fn default_pipeline() -> Compose {
    Compose::new(vec![
        Box::new(Normalize::unit_range()),
        Box::new(ToChannelFirst),
    ])
}

/// Base pipeline for container samples, which arrive at their native
/// resolution: scale the shorter side to the canonical size first.
pub fn container_default_pipeline(config: &CorpusConfig) -> Result<Compose> {
    Ok(Compose::new(vec![
        Box::new(Scale::new(config.scale_short_side)?),
        Box::new(Normalize::unit_range()),
        Box::new(ToChannelFirst),
    ]))
}

/// The randomized augmentation pipeline.
///
/// Flips, then one of three geometric paths to the output shape: a plain
/// short-side rescale (probability `plain_rescale_prob`), or an even choice
/// between rotate+center-crop and random-crop+exact-rescale. Given working
/// resolution 480x640 and output 228x304, all three paths agree on the final
/// shape.
pub fn augmentation_pipeline(config: &CorpusConfig) -> Result<Compose> {
    let rotate_crop = Compose::new(vec![
        Box::new(RandomRotation::new(config.rotation_degrees)?),
        Box::new(CenterCrop::new(config.output_shape)?),
    ]);
    let crop_rescale = Compose::new(vec![
        Box::new(RandomCrop::new(config.output_shape)?),
        Box::new(ScaleExact::new(config.output_shape)?),
    ]);
    let geometry = OneOf::new(
        Scale::new(config.scale_short_side)?,
        OneOf::new(rotate_crop, crop_rescale, 0.5)?,
        config.plain_rescale_prob,
    )?;

    Ok(Compose::new(vec![
        Box::new(RandomVerticalFlip::new(0.5)?),
        Box::new(RandomHorizontalFlip::new(0.5)?),
        Box::new(geometry),
        Box::new(Normalize::unit_range()),
        Box::new(ToChannelFirst),
    ]))
}
