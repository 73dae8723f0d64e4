//! Raw image/depth sources.
//!
//! Two raw-source shapes feed the materializer: a directory-based scene
//! dataset ([`SceneDirSource`]) addressed by file path, and a
//! container-style indoor-scene dataset addressed by integer position behind
//! the [`DepthArchive`] trait. The actual container format (HDF5 etc.) is a
//! collaborator concern; this crate only consumes the trait.

pub mod container;
pub mod scene_dir;

pub use container::{semantic_depth, semantic_image, DepthArchive, InMemoryArchive};
pub use scene_dir::SceneDirSource;
