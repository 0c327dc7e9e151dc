/// Level length from which pair hashing is spread over the rayon pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1 << 12;

/// Build-time options for [`MerkleTree`](crate::MerkleTree).
///
/// The tree's contents never depend on the configuration; only how the work
/// is scheduled does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct TreeConfig {
    /// Minimum level length hashed in parallel. Ignored unless the
    /// `parallel` feature is enabled.
    pub parallel_threshold: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        TreeConfig {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl TreeConfig {
    /// A configuration that never hashes in parallel.
    pub fn sequential() -> Self {
        TreeConfig {
            parallel_threshold: usize::MAX,
        }
    }

    /// Replace the parallel threshold.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Whether a level of `level_len` digests should be hashed in parallel.
    pub fn hashes_in_parallel(&self, level_len: usize) -> bool {
        cfg!(feature = "parallel") && level_len >= self.parallel_threshold
    }
}
