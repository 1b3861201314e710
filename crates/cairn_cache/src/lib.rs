//! Content identity primitives for the build cache.
//!
//! This crate provides the two building blocks the cache layer uses to key
//! and persist entries: [`ScriptSourceHasher`], which computes a deterministic
//! [`ContentHash`](cairn_common::ContentHash) for a script source, and
//! [`ArtifactIdentifierCodec`], a lossless binary codec for artifact
//! identifiers stored in the cache index.

#![warn(missing_docs)]

pub mod codec;
pub mod error;
pub mod file_cache;
pub mod hasher;
pub mod identifier;

pub use codec::{
    ArtifactIdentifierCodec, ComponentIdentifierCodec, DefaultComponentIdentifierCodec,
};
pub use error::{CodecError, HashError};
pub use file_cache::CachingFileHasher;
pub use hasher::{
    AlgorithmHasherFactory, ContentAccumulator, ContentHasherFactory, DefaultFileHasher,
    FileHasher, ScriptSourceHasher,
};
pub use identifier::{
    ArtifactName, ComponentArtifactIdentifier, ComponentFileArtifactIdentifier,
    ComponentIdentifier, ModuleComponentArtifactIdentifier, ModuleComponentIdentifier,
    OpaqueArtifactIdentifier, ProjectComponentIdentifier,
};
