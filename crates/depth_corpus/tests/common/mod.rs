use anyhow::{anyhow, Result};
use depth_corpus::sources::InMemoryArchive;
use depth_corpus::transforms::Transform;
use depth_corpus::SamplePair;
use ndarray::{Array2, Array3};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Archive fixture in stored NYU layout: images `(C, W, H)`, depths `(W, H)`.
/// Entry `i` holds the constant value `i * 10`.
pub fn make_archive(entries: usize, w: usize, h: usize) -> InMemoryArchive {
    let images = (0..entries)
        .map(|i| Array3::from_elem((3, w, h), (i * 10) as f32))
        .collect();
    let depths = (0..entries)
        .map(|i| Array2::from_elem((w, h), (i * 10) as f32))
        .collect();
    InMemoryArchive::new(images, depths).unwrap()
}

/// Transform that fails on every invocation.
pub struct FailAlways;

impl Transform for FailAlways {
    fn apply(&self, _pair: SamplePair) -> Result<SamplePair> {
        Err(anyhow!("injected failure"))
    }
}

/// Transform that fails only on its `nth` invocation (1-based) and passes
/// the pair through unchanged otherwise.
pub struct FailOnNth {
    nth: usize,
    calls: AtomicUsize,
}

impl FailOnNth {
    pub fn new(nth: usize) -> Self {
        Self {
            nth,
            calls: AtomicUsize::new(0),
        }
    }
}

impl Transform for FailOnNth {
    fn apply(&self, pair: SamplePair) -> Result<SamplePair> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call == self.nth {
            Err(anyhow!("injected failure on call {}", call))
        } else {
            Ok(pair)
        }
    }
}
