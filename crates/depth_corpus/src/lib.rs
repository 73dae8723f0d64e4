//! Training-corpus preparation for monocular depth estimation.
//!
//! Paired image/depth samples are read from a raw source (a directory-based
//! scene dataset or a container-style archive), pushed through composable
//! randomized transforms, and materialized into a fixed in-memory collection
//! a batching training loop can index into. Train/val/test splits are
//! generated once and persisted as JSON so experiments stay repeatable.

pub mod corpus;
pub mod error;
pub mod pipeline;
pub mod rng;
pub mod sample;
pub mod sources;
pub mod split;
pub mod transforms;

pub use corpus::{CorpusConfig, MaterializedCorpus};
pub use error::CorpusError;
pub use sample::SamplePair;
pub use split::Split;
pub use transforms::{Compose, OneOf, Transform};
