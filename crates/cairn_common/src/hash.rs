//! Content hashing for cache keys and change detection.

use serde::{Deserialize, Serialize};
use sha2::Digest as _;
use std::fmt;
use std::str::FromStr;

/// The hash function that produced a [`ContentHash`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum HashAlgorithm {
    /// XXH3 with a 128-bit output. Fast, non-cryptographic.
    #[default]
    #[serde(rename = "xxh3-128")]
    Xxh3_128,
    /// SHA-256.
    #[serde(rename = "sha256")]
    Sha256,
}

impl HashAlgorithm {
    /// Returns the digest length in bytes.
    pub fn digest_len(self) -> usize {
        match self {
            HashAlgorithm::Xxh3_128 => 16,
            HashAlgorithm::Sha256 => 32,
        }
    }

    /// Returns the canonical lowercase name, as used in `cairn.toml`.
    pub fn as_str(self) -> &'static str {
        match self {
            HashAlgorithm::Xxh3_128 => "xxh3-128",
            HashAlgorithm::Sha256 => "sha256",
        }
    }

    /// Infers the algorithm from a raw digest length.
    fn from_digest_len(len: usize) -> Option<Self> {
        match len {
            16 => Some(HashAlgorithm::Xxh3_128),
            32 => Some(HashAlgorithm::Sha256),
            _ => None,
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable content digest.
///
/// Two hashes are equal when they carry the same bytes from the same
/// algorithm. Hashes are opaque: beyond equality the only meaningful
/// operations are rendering to and parsing from lowercase hex.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawContentHash")]
pub struct ContentHash {
    algorithm: HashAlgorithm,
    bytes: Box<[u8]>,
}

/// Unchecked serde shape of a [`ContentHash`], validated on conversion.
#[derive(Deserialize)]
struct RawContentHash {
    algorithm: HashAlgorithm,
    bytes: Vec<u8>,
}

impl TryFrom<RawContentHash> for ContentHash {
    type Error = ParseContentHashError;

    fn try_from(raw: RawContentHash) -> Result<Self, Self::Error> {
        ContentHash::from_digest(raw.algorithm, &raw.bytes)
    }
}

impl ContentHash {
    /// Computes a content hash from a byte slice using XXH3-128.
    pub fn from_bytes(data: &[u8]) -> Self {
        Self::compute(HashAlgorithm::Xxh3_128, data)
    }

    /// Computes a content hash of `data` with the given algorithm.
    pub fn compute(algorithm: HashAlgorithm, data: &[u8]) -> Self {
        let mut hasher = StreamingHasher::new(algorithm);
        hasher.update(data);
        hasher.finish()
    }

    /// Wraps an already computed digest.
    ///
    /// Fails if `bytes` has the wrong length for `algorithm`.
    pub fn from_digest(
        algorithm: HashAlgorithm,
        bytes: &[u8],
    ) -> Result<Self, ParseContentHashError> {
        if bytes.len() != algorithm.digest_len() {
            return Err(ParseContentHashError::InvalidLength(bytes.len() * 2));
        }
        Ok(Self {
            algorithm,
            bytes: bytes.into(),
        })
    }

    /// Returns the algorithm that produced this hash.
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Returns the raw digest bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.bytes.iter() {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({}:", self.algorithm)?;
        for byte in self.bytes.iter().take(2) {
            write!(f, "{byte:02x}")?;
        }
        f.write_str("..)")
    }
}

/// Error returned when parsing a [`ContentHash`] from hex.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseContentHashError {
    /// The hex string length matches no supported algorithm.
    #[error("invalid content hash length: {0} hex digits")]
    InvalidLength(usize),
    /// The string contains a non-hex character.
    #[error("invalid hex digit in content hash: '{0}'")]
    InvalidDigit(char),
}

impl FromStr for ContentHash {
    type Err = ParseContentHashError;

    /// Parses a lowercase or uppercase hex digest. The algorithm is inferred
    /// from the length: 32 digits for XXH3-128, 64 for SHA-256.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() % 2 != 0 {
            return Err(ParseContentHashError::InvalidLength(s.len()));
        }
        let algorithm = HashAlgorithm::from_digest_len(s.len() / 2)
            .ok_or(ParseContentHashError::InvalidLength(s.len()))?;

        let mut bytes = Vec::with_capacity(s.len() / 2);
        let mut chars = s.chars();
        while let (Some(hi), Some(lo)) = (chars.next(), chars.next()) {
            let hi = hi.to_digit(16).ok_or(ParseContentHashError::InvalidDigit(hi))?;
            let lo = lo.to_digit(16).ok_or(ParseContentHashError::InvalidDigit(lo))?;
            bytes.push((hi << 4 | lo) as u8);
        }
        Self::from_digest(algorithm, &bytes)
    }
}

/// An incremental hasher producing a [`ContentHash`].
///
/// Each instance is single-use: [`finish`](Self::finish) consumes it.
pub struct StreamingHasher {
    state: HasherState,
}

enum HasherState {
    Xxh3(Box<xxhash_rust::xxh3::Xxh3>),
    Sha256(sha2::Sha256),
}

impl StreamingHasher {
    /// Creates a fresh hasher for the given algorithm.
    pub fn new(algorithm: HashAlgorithm) -> Self {
        let state = match algorithm {
            HashAlgorithm::Xxh3_128 => {
                HasherState::Xxh3(Box::new(xxhash_rust::xxh3::Xxh3::new()))
            }
            HashAlgorithm::Sha256 => HasherState::Sha256(sha2::Sha256::new()),
        };
        Self { state }
    }

    /// Returns the algorithm this hasher computes.
    pub fn algorithm(&self) -> HashAlgorithm {
        match self.state {
            HasherState::Xxh3(_) => HashAlgorithm::Xxh3_128,
            HasherState::Sha256(_) => HashAlgorithm::Sha256,
        }
    }

    /// Feeds more bytes into the hash state.
    pub fn update(&mut self, data: &[u8]) {
        match &mut self.state {
            HasherState::Xxh3(state) => state.update(data),
            HasherState::Sha256(state) => state.update(data),
        }
    }

    /// Consumes the hasher and returns the digest.
    pub fn finish(self) -> ContentHash {
        let (algorithm, bytes): (HashAlgorithm, Box<[u8]>) = match self.state {
            HasherState::Xxh3(state) => (
                HashAlgorithm::Xxh3_128,
                state.digest128().to_le_bytes().into(),
            ),
            HasherState::Sha256(state) => {
                (HashAlgorithm::Sha256, state.finalize().to_vec().into())
            }
        };
        ContentHash { algorithm, bytes }
    }
}

impl fmt::Debug for StreamingHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamingHasher")
            .field("algorithm", &self.algorithm())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        let a = ContentHash::from_bytes(b"hello world");
        let b = ContentHash::from_bytes(b"hello world");
        assert_eq!(a, b);
    }

    #[test]
    fn different_inputs_differ() {
        let a = ContentHash::from_bytes(b"hello");
        let b = ContentHash::from_bytes(b"world");
        assert_ne!(a, b);
    }

    #[test]
    fn streaming_matches_one_shot() {
        for algorithm in [HashAlgorithm::Xxh3_128, HashAlgorithm::Sha256] {
            let mut hasher = StreamingHasher::new(algorithm);
            hasher.update(b"hello ");
            hasher.update(b"world");
            assert_eq!(
                hasher.finish(),
                ContentHash::compute(algorithm, b"hello world")
            );
        }
    }

    #[test]
    fn xxh3_matches_reference_function() {
        let h = ContentHash::from_bytes(b"abc");
        let expected = xxhash_rust::xxh3::xxh3_128(b"abc").to_le_bytes();
        assert_eq!(h.as_bytes(), &expected);
    }

    #[test]
    fn algorithms_never_compare_equal() {
        let a = ContentHash::compute(HashAlgorithm::Xxh3_128, b"same");
        let b = ContentHash::compute(HashAlgorithm::Sha256, b"same");
        assert_ne!(a, b);
        assert_eq!(a.as_bytes().len(), 16);
        assert_eq!(b.as_bytes().len(), 32);
    }

    #[test]
    fn sha256_known_vector() {
        let h = ContentHash::compute(HashAlgorithm::Sha256, b"abc");
        assert_eq!(
            h.to_hex(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn display_format() {
        let h = ContentHash::from_bytes(b"test");
        let s = format!("{h}");
        assert_eq!(s.len(), 32, "Display should be 32 hex chars");
        assert!(s.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn debug_abbreviated() {
        let h = ContentHash::from_bytes(b"test");
        let s = format!("{h:?}");
        assert!(s.starts_with("ContentHash(xxh3-128:"));
        assert!(s.ends_with(")"));
    }

    #[test]
    fn hex_parse_roundtrip() {
        for algorithm in [HashAlgorithm::Xxh3_128, HashAlgorithm::Sha256] {
            let h = ContentHash::compute(algorithm, b"parse me");
            let parsed: ContentHash = h.to_hex().parse().unwrap();
            assert_eq!(parsed, h);
            assert_eq!(parsed.algorithm(), algorithm);
        }
    }

    #[test]
    fn hex_parse_rejects_bad_input() {
        assert_eq!(
            "abc".parse::<ContentHash>(),
            Err(ParseContentHashError::InvalidLength(3))
        );
        assert_eq!(
            "00ff".parse::<ContentHash>(),
            Err(ParseContentHashError::InvalidLength(4))
        );
        let bad = "zz".repeat(16);
        assert_eq!(
            bad.parse::<ContentHash>(),
            Err(ParseContentHashError::InvalidDigit('z'))
        );
    }

    #[test]
    fn from_digest_checks_length() {
        assert!(ContentHash::from_digest(HashAlgorithm::Xxh3_128, &[0u8; 16]).is_ok());
        assert!(ContentHash::from_digest(HashAlgorithm::Sha256, &[0u8; 16]).is_err());
    }

    #[test]
    fn serde_roundtrip() {
        let h = ContentHash::from_bytes(b"serde test");
        let json = serde_json::to_string(&h).unwrap();
        let back: ContentHash = serde_json::from_str(&json).unwrap();
        assert_eq!(h, back);
    }

    #[test]
    fn serde_rejects_wrong_digest_length() {
        let empty = serde_json::from_str::<ContentHash>(r#"{"algorithm":"sha256","bytes":[]}"#);
        assert!(empty.is_err());
        let short =
            serde_json::from_str::<ContentHash>(r#"{"algorithm":"sha256","bytes":[1,2,3,4,5]}"#);
        assert!(short.is_err());
        let swapped = serde_json::to_string(&ContentHash::from_bytes(b"x"))
            .unwrap()
            .replace("xxh3-128", "sha256");
        assert!(serde_json::from_str::<ContentHash>(&swapped).is_err());
    }

    #[test]
    fn streaming_hasher_reports_algorithm() {
        let hasher = StreamingHasher::new(HashAlgorithm::Sha256);
        assert_eq!(hasher.algorithm(), HashAlgorithm::Sha256);
        assert!(format!("{hasher:?}").contains("Sha256"));
    }

    #[test]
    fn algorithm_serde_names() {
        let json = serde_json::to_string(&HashAlgorithm::Sha256).unwrap();
        assert_eq!(json, "\"sha256\"");
        let back: HashAlgorithm = serde_json::from_str("\"xxh3-128\"").unwrap();
        assert_eq!(back, HashAlgorithm::Xxh3_128);
    }
}
