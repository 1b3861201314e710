//! Memoized file hashing keyed by file metadata.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use cairn_common::ContentHash;
use dashmap::DashMap;

use crate::error::HashError;
use crate::hasher::FileHasher;

/// Length and modification time of a file at the moment it was hashed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fingerprint {
    len: u64,
    modified: SystemTime,
}

impl Fingerprint {
    fn of(path: &Path) -> Result<Self, HashError> {
        let metadata = std::fs::metadata(path).map_err(|e| HashError::io(path, e))?;
        let modified = metadata.modified().map_err(|e| HashError::io(path, e))?;
        Ok(Self {
            len: metadata.len(),
            modified,
        })
    }
}

#[derive(Debug, Clone)]
struct CachedHash {
    fingerprint: Fingerprint,
    hash: ContentHash,
}

/// Wraps a [`FileHasher`], reusing earlier digests while a file's length and
/// modification time are unchanged.
///
/// A rewrite that preserves both the length and the modification timestamp
/// (possible on filesystems with coarse timestamps) is not detected; call
/// [`invalidate`](Self::invalidate) when that matters.
///
/// Entries are never evicted on their own: the map holds one digest per
/// distinct path ever hashed, until the file disappears or the caller runs
/// [`invalidate`](Self::invalidate) or [`clear`](Self::clear). Long-lived
/// processes hashing an unbounded set of paths should clear it periodically.
#[derive(Debug)]
pub struct CachingFileHasher<H> {
    inner: H,
    entries: DashMap<PathBuf, CachedHash>,
}

impl<H: FileHasher> CachingFileHasher<H> {
    /// Creates an empty cache in front of `inner`.
    pub fn new(inner: H) -> Self {
        Self {
            inner,
            entries: DashMap::new(),
        }
    }

    /// Forgets the cached digest for `path`.
    pub fn invalidate(&self, path: &Path) {
        self.entries.remove(path);
    }

    /// Forgets every cached digest.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Returns the number of cached digests.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn lookup(&self, path: &Path, fingerprint: Fingerprint) -> Option<ContentHash> {
        let entry = self.entries.get(path)?;
        (entry.fingerprint == fingerprint).then(|| entry.hash.clone())
    }
}

impl<H: FileHasher> FileHasher for CachingFileHasher<H> {
    fn hash(&self, path: &Path) -> Result<ContentHash, HashError> {
        let fingerprint = match Fingerprint::of(path) {
            Ok(fingerprint) => fingerprint,
            Err(err) => {
                self.entries.remove(path);
                return Err(err);
            }
        };
        if let Some(hash) = self.lookup(path, fingerprint) {
            tracing::trace!(path = %path.display(), "file hash cache hit");
            return Ok(hash);
        }

        tracing::debug!(path = %path.display(), len = fingerprint.len, "hashing file");
        let hash = self.inner.hash(path)?;
        self.entries.insert(
            path.to_path_buf(),
            CachedHash {
                fingerprint,
                hash: hash.clone(),
            },
        );
        Ok(hash)
    }
}
