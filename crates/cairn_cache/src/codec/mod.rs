//! Binary encoding of artifact identifiers for the cache index.
//!
//! Identifiers are written field by field with fixed-width little-endian
//! length prefixes. Optional strings carry a one-byte presence flag. The
//! owning component is written by a pluggable [`ComponentIdentifierCodec`].

mod artifact;
mod component;
pub(crate) mod wire;

pub use artifact::ArtifactIdentifierCodec;
pub use component::{ComponentIdentifierCodec, DefaultComponentIdentifierCodec};
pub use wire::MAX_FIELD_BYTES;
