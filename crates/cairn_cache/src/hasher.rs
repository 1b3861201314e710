//! Script source hashing.
//!
//! A [`ScriptSourceHasher`] maps a [`ScriptSource`] to a [`ContentHash`]. Sources
//! backed by a file are hashed through a [`FileHasher`]; in-memory sources are
//! hashed as UTF-8 through a fresh accumulator obtained from a
//! [`ContentHasherFactory`].

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use cairn_common::{ContentHash, HashAlgorithm, StreamingHasher};
use cairn_config::HashingConfig;
use cairn_source::ScriptSource;
use rayon::prelude::*;

use crate::error::HashError;
use crate::file_cache::CachingFileHasher;

/// Read buffer size for streaming file contents into a hasher.
const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Hashes the contents of a file on disk.
pub trait FileHasher: Send + Sync {
    /// Reads `path` and returns the hash of its bytes.
    fn hash(&self, path: &Path) -> Result<ContentHash, HashError>;
}

/// A single-use incremental hash state.
pub trait ContentAccumulator: Send {
    /// Feeds more bytes into the hash.
    fn update(&mut self, bytes: &[u8]);

    /// Consumes the accumulator and returns the digest.
    fn finish(self: Box<Self>) -> ContentHash;
}

/// Supplies a fresh [`ContentAccumulator`] for every hashing operation.
pub trait ContentHasherFactory: Send + Sync {
    /// Creates a new accumulator with empty state.
    fn create(&self) -> Box<dyn ContentAccumulator>;
}

impl ContentAccumulator for StreamingHasher {
    fn update(&mut self, bytes: &[u8]) {
        StreamingHasher::update(self, bytes);
    }

    fn finish(self: Box<Self>) -> ContentHash {
        StreamingHasher::finish(*self)
    }
}

/// Creates accumulators for a fixed [`HashAlgorithm`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AlgorithmHasherFactory {
    algorithm: HashAlgorithm,
}

impl AlgorithmHasherFactory {
    /// Creates a factory for the given algorithm.
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self { algorithm }
    }

    /// Returns the algorithm used by created accumulators.
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }
}

impl ContentHasherFactory for AlgorithmHasherFactory {
    fn create(&self) -> Box<dyn ContentAccumulator> {
        Box::new(StreamingHasher::new(self.algorithm))
    }
}

/// Streams a file's bytes through a fresh hasher on every call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DefaultFileHasher {
    algorithm: HashAlgorithm,
}

impl DefaultFileHasher {
    /// Creates a file hasher using the given algorithm.
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self { algorithm }
    }
}

impl FileHasher for DefaultFileHasher {
    fn hash(&self, path: &Path) -> Result<ContentHash, HashError> {
        let mut file = std::fs::File::open(path).map_err(|e| HashError::io(path, e))?;
        let mut hasher = StreamingHasher::new(self.algorithm);
        let mut buf = vec![0u8; READ_BUFFER_SIZE];
        loop {
            match file.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => hasher.update(&buf[..n]),
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(HashError::io(path, e)),
            }
        }
        Ok(hasher.finish())
    }
}

/// Computes content hashes for script sources.
///
/// The hasher holds no mutable state of its own and may be shared across
/// threads. Whether file-backed and text-backed sources with identical
/// content hash equal depends on the two collaborators using the same
/// algorithm; see [`HashingConfig::paths_agree`].
#[derive(Clone)]
pub struct ScriptSourceHasher {
    file_hasher: Arc<dyn FileHasher>,
    content_hasher_factory: Arc<dyn ContentHasherFactory>,
}

impl ScriptSourceHasher {
    /// Creates a hasher from its two collaborators.
    pub fn new(
        file_hasher: impl FileHasher + 'static,
        content_hasher_factory: impl ContentHasherFactory + 'static,
    ) -> Self {
        Self {
            file_hasher: Arc::new(file_hasher),
            content_hasher_factory: Arc::new(content_hasher_factory),
        }
    }

    /// Builds a hasher from configuration.
    ///
    /// When `cache_file_hashes` is set, file digests are memoized by a
    /// [`CachingFileHasher`].
    pub fn from_config(config: &HashingConfig) -> Self {
        let factory = AlgorithmHasherFactory::new(config.text_algorithm);
        let file_hasher = DefaultFileHasher::new(config.file_algorithm);
        if config.cache_file_hashes {
            Self::new(CachingFileHasher::new(file_hasher), factory)
        } else {
            Self::new(file_hasher, factory)
        }
    }

    /// Hashes a single source.
    ///
    /// File-backed sources are read from disk and any I/O failure is returned
    /// unchanged. In-memory sources are hashed over their UTF-8 bytes.
    pub fn hash(&self, source: &ScriptSource) -> Result<ContentHash, HashError> {
        if let Some(path) = source.file() {
            return self.file_hasher.hash(path);
        }
        let text = source.resource().text().map_err(|e| HashError::Text {
            resource: source.display_name().to_string(),
            source: e,
        })?;
        let mut accumulator = self.content_hasher_factory.create();
        accumulator.update(text.as_bytes());
        Ok(accumulator.finish())
    }

    /// Hashes many sources in parallel.
    ///
    /// Returns one result per source, in input order. A failure for one
    /// source does not affect the others.
    pub fn hash_all(&self, sources: &[ScriptSource]) -> Vec<Result<ContentHash, HashError>> {
        sources.par_iter().map(|source| self.hash(source)).collect()
    }
}

impl Default for ScriptSourceHasher {
    fn default() -> Self {
        Self::from_config(&HashingConfig::default())
    }
}

impl std::fmt::Debug for ScriptSourceHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptSourceHasher").finish_non_exhaustive()
    }
}
