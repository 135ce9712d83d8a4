//! Null-terminated strings padded to a multiple of four bytes.
//!
//! The reward wire format stores free-form labels as UTF-8 bytes, a NUL
//! terminator, and zero padding until the field length is a multiple of 4.
//! The padding is relative to the field, not the stream position, so the
//! codec works at any byte offset.

use crate::bitstream::{BitReader, BitWriter};
use crate::{Error, Result};

/// Zero bytes needed behind `len + 1` payload bytes to reach a multiple of 4.
fn pad_len(len: usize) -> usize {
    (4 - (len + 1) % 4) % 4
}

/// Encodes a string as UTF-8 bytes + NUL, zero-padded to a 4-byte multiple.
pub fn encode(writer: &mut BitWriter, value: &str) {
    writer.write_bytes(value.as_bytes());
    writer.write_u8(0);
    for _ in 0..pad_len(value.len()) {
        writer.write_u8(0);
    }
}

/// Decodes a NUL-terminated string and skips its padding bytes.
pub fn decode(reader: &mut BitReader) -> Result<String> {
    let mut bytes = Vec::new();
    loop {
        let b = reader.read_u8()?;
        if b == 0 {
            break;
        }
        bytes.push(b);
    }
    for _ in 0..pad_len(bytes.len()) {
        reader.read_u8()?;
    }
    String::from_utf8(bytes).map_err(|e| Error::InvalidString(e.to_string()))
}
