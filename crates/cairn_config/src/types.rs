//! Configuration types deserialized from `cairn.toml`.

use cairn_common::HashAlgorithm;
use serde::Deserialize;

/// The top-level cache configuration parsed from `cairn.toml`.
///
/// Every section is optional; an empty file yields [`CacheConfig::default`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CacheConfig {
    /// Content hashing settings.
    #[serde(default)]
    pub hashing: HashingConfig,
}

/// Selects the hash algorithms for the two source hashing paths.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HashingConfig {
    /// Algorithm used for sources backed by a file.
    #[serde(default)]
    pub file_algorithm: HashAlgorithm,
    /// Algorithm used for in-memory sources.
    #[serde(default)]
    pub text_algorithm: HashAlgorithm,
    /// Whether file digests are memoized by path, length and modification time.
    #[serde(default = "default_true")]
    pub cache_file_hashes: bool,
    /// Reject configurations where the two paths would hash identical
    /// content to different digests.
    #[serde(default)]
    pub require_path_agreement: bool,
}

impl HashingConfig {
    /// Returns `true` if file-backed and text-backed sources with the same
    /// content produce equal digests.
    pub fn paths_agree(&self) -> bool {
        self.file_algorithm == self.text_algorithm
    }
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            file_algorithm: HashAlgorithm::default(),
            text_algorithm: HashAlgorithm::default(),
            cache_file_hashes: true,
            require_path_agreement: false,
        }
    }
}

fn default_true() -> bool {
    true
}
