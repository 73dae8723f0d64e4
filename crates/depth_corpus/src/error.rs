//! Typed errors for the failure classes callers need to tell apart.
//!
//! Most plumbing uses `anyhow` directly; these variants exist where the
//! public contract distinguishes outcomes (split loading, accessor range
//! checks, base-pass loads). They travel inside `anyhow::Error` and are
//! recovered with `downcast_ref`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CorpusError {
    /// Persisted split file does not exist.
    #[error("split file not found: {path}")]
    SplitNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// Persisted split file is unreadable or missing a required key.
    #[error("malformed split file {path}: {message}")]
    SplitFormat {
        /// Path of the offending file.
        path: PathBuf,
        /// Description of what was invalid.
        message: String,
    },

    /// A base-pass sample could not be read or prepared. Base samples are
    /// required, so this aborts materialization.
    #[error("failed to materialize base sample {id}: {message}")]
    FatalLoad {
        /// Identifier of the sample within its source.
        id: usize,
        /// Description of the underlying failure.
        message: String,
    },

    /// Out-of-range access on a materialized corpus.
    #[error("index {index} out of range for corpus of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}
