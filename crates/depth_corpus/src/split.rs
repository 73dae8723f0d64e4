//! Train/validation/test split generation and persistence.
//!
//! A split partitions the index range `[0, last_id)` of a raw dataset into
//! three pairwise-disjoint sets. It is generated once with an explicit RNG
//! handle and persisted as a small JSON file, so every later run works with
//! the same partition.

use crate::error::CorpusError;
use anyhow::{ensure, Context, Result};
use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A persisted partition of `[0, last_id)` into train/val/test index sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Split {
    pub train: Vec<usize>,
    pub val: Vec<usize>,
    pub test: Vec<usize>,
}

impl Split {
    /// Generates a fresh split of `[0, last_id)`.
    ///
    /// `floor(last_id * train_fraction)` distinct indices are sampled without
    /// replacement for train. The remainder is partitioned at random: half
    /// (rounded down) becomes test, the rest val, so an odd remainder puts
    /// the extra index in val.
    pub fn generate<R: Rng + ?Sized>(
        last_id: usize,
        train_fraction: f64,
        rng: &mut R,
    ) -> Result<Self> {
        ensure!(last_id > 0, "last_id must be positive (got {})", last_id);
        ensure!(
            train_fraction > 0.0 && train_fraction < 1.0,
            "train_fraction must lie in (0, 1) (got {})",
            train_fraction
        );

        let train_len = (last_id as f64 * train_fraction) as usize;
        let train = index::sample(rng, last_id, train_len).into_vec();

        let mut in_train = vec![false; last_id];
        for &id in &train {
            in_train[id] = true;
        }
        let rest: Vec<usize> = (0..last_id).filter(|&id| !in_train[id]).collect();

        let mut in_test = vec![false; rest.len()];
        for position in index::sample(rng, rest.len(), rest.len() / 2) {
            in_test[position] = true;
        }
        let mut val = Vec::with_capacity(rest.len() - rest.len() / 2);
        let mut test = Vec::with_capacity(rest.len() / 2);
        for (position, &id) in rest.iter().enumerate() {
            if in_test[position] {
                test.push(id);
            } else {
                val.push(id);
            }
        }

        Ok(Self { train, val, test })
    }

    /// Total number of indices across the three sets.
    pub fn len(&self) -> usize {
        self.train.len() + self.val.len() + self.test.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Serializes the split to `path` as a JSON object with the keys
    /// `train`, `val` and `test`. Creates the parent directory if absent.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create split directory: {}", parent.display())
                })?;
            }
        }
        let text = serde_json::to_string(self).context("failed to serialize split")?;
        fs::write(path, text)
            .with_context(|| format!("failed to write split file: {}", path.display()))
    }

    /// Loads a previously persisted split.
    ///
    /// Fails with [`CorpusError::SplitNotFound`] when `path` does not exist
    /// and [`CorpusError::SplitFormat`] when the file cannot be parsed or a
    /// required key is missing.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                return Err(CorpusError::SplitNotFound {
                    path: path.to_path_buf(),
                }
                .into())
            }
            Err(error) => {
                return Err(error)
                    .with_context(|| format!("failed to read split file: {}", path.display()))
            }
        };
        serde_json::from_str(&text).map_err(|error| {
            CorpusError::SplitFormat {
                path: path.to_path_buf(),
                message: error.to_string(),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_generate_partitions_full_range() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(42);
        let split = Split::generate(1448, 0.8, &mut rng)?;

        assert_eq!(split.train.len(), (1448.0 * 0.8) as usize);
        assert_eq!(split.len(), 1448);

        let mut seen = HashSet::new();
        for &id in split.train.iter().chain(&split.val).chain(&split.test) {
            assert!(id < 1448);
            assert!(seen.insert(id), "index {} appears twice", id);
        }
        assert_eq!(seen.len(), 1448);
        Ok(())
    }

    #[test]
    fn test_generate_odd_remainder_favors_val() -> Result<()> {
        // 10 ids, fraction 0.5 -> 5 train, remainder 5 -> test 2, val 3.
        let mut rng = StdRng::seed_from_u64(1);
        let split = Split::generate(10, 0.5, &mut rng)?;
        assert_eq!(split.train.len(), 5);
        assert_eq!(split.test.len(), 2);
        assert_eq!(split.val.len(), 3);
        Ok(())
    }

    #[test]
    fn test_generate_is_deterministic_per_seed() -> Result<()> {
        let a = Split::generate(100, 0.7, &mut StdRng::seed_from_u64(9))?;
        let b = Split::generate(100, 0.7, &mut StdRng::seed_from_u64(9))?;
        assert_eq!(a, b);
        Ok(())
    }

    #[test]
    fn test_generate_rejects_bad_arguments() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(Split::generate(0, 0.5, &mut rng).is_err());
        assert!(Split::generate(10, 0.0, &mut rng).is_err());
        assert!(Split::generate(10, 1.0, &mut rng).is_err());
    }
}
