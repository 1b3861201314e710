//! Shared foundational types used across the cairn build cache.
//!
//! This crate provides the content hash that identifies source text and
//! cached artifacts, together with the incremental hasher that produces it.

#![warn(missing_docs)]

pub mod hash;

pub use hash::{ContentHash, HashAlgorithm, ParseContentHashError, StreamingHasher};
