//! Primitive field encoding shared by the identifier codecs.

use std::io::Read;

use bincode::config::Config;
use bincode::error::{DecodeError, EncodeError};

use crate::error::CodecError;

/// Largest string field, in bytes, accepted by the encoder and decoder.
///
/// A corrupted length prefix beyond this limit is reported as malformed
/// instead of triggering a huge allocation.
pub const MAX_FIELD_BYTES: usize = 1 << 20;

/// Bytes bincode counts against its limit besides the string itself: the
/// optional presence flag and the `u64` length prefix. The exact field limit
/// is checked separately on both sides.
const FIELD_FRAMING_BYTES: usize = 1 + 8;

fn config() -> impl Config {
    bincode::config::standard()
        .with_little_endian()
        .with_fixed_int_encoding()
        .with_limit::<{ MAX_FIELD_BYTES + FIELD_FRAMING_BYTES }>()
}

pub(crate) fn write_u8(
    out: &mut Vec<u8>,
    field: &'static str,
    value: u8,
) -> Result<(), CodecError> {
    bincode::encode_into_std_write(value, out, config())
        .map(drop)
        .map_err(|e| encode_error(field, e))
}

pub(crate) fn write_str(
    out: &mut Vec<u8>,
    field: &'static str,
    value: &str,
) -> Result<(), CodecError> {
    check_len(field, value)?;
    bincode::encode_into_std_write(value, out, config())
        .map(drop)
        .map_err(|e| encode_error(field, e))
}

pub(crate) fn write_opt_str(
    out: &mut Vec<u8>,
    field: &'static str,
    value: Option<&str>,
) -> Result<(), CodecError> {
    if let Some(value) = value {
        check_len(field, value)?;
    }
    bincode::encode_into_std_write(value, out, config())
        .map(drop)
        .map_err(|e| encode_error(field, e))
}

pub(crate) fn read_u8(input: &mut dyn Read, field: &'static str) -> Result<u8, CodecError> {
    decode(input, field)
}

pub(crate) fn read_string(
    input: &mut dyn Read,
    field: &'static str,
) -> Result<String, CodecError> {
    let value: String = decode(input, field)?;
    if let Some(reason) = oversize(&value) {
        return Err(CodecError::Malformed { field, reason });
    }
    Ok(value)
}

pub(crate) fn read_opt_string(
    input: &mut dyn Read,
    field: &'static str,
) -> Result<Option<String>, CodecError> {
    let value: Option<String> = decode(input, field)?;
    if let Some(reason) = value.as_deref().and_then(oversize) {
        return Err(CodecError::Malformed { field, reason });
    }
    Ok(value)
}

fn decode<D: bincode::Decode<()>>(
    input: &mut dyn Read,
    field: &'static str,
) -> Result<D, CodecError> {
    let mut reader = input;
    bincode::decode_from_std_read(&mut reader, config()).map_err(|e| decode_error(field, e))
}

fn check_len(field: &'static str, value: &str) -> Result<(), CodecError> {
    match oversize(value) {
        Some(reason) => Err(CodecError::Encode { field, reason }),
        None => Ok(()),
    }
}

fn oversize(value: &str) -> Option<String> {
    (value.len() > MAX_FIELD_BYTES).then(|| {
        format!(
            "{} bytes exceeds the {MAX_FIELD_BYTES} byte field limit",
            value.len()
        )
    })
}

fn encode_error(field: &'static str, err: EncodeError) -> CodecError {
    CodecError::Encode {
        field,
        reason: err.to_string(),
    }
}

fn decode_error(field: &'static str, err: DecodeError) -> CodecError {
    match err {
        DecodeError::Io { inner, .. } if inner.kind() != std::io::ErrorKind::UnexpectedEof => {
            CodecError::Io(inner)
        }
        other => CodecError::Malformed {
            field,
            reason: other.to_string(),
        },
    }
}
