//! Bit-level reader and writer over byte buffers.
//!
//! The save format packs fields MSB-first: the first bit consumed at a
//! position is the most significant remaining bit of the current byte.
//! A byte-aligned multi-byte read is therefore a big-endian read, which is
//! what the console expects.

use crate::{Error, Result};

/// Reads bit-width fields from a borrowed byte slice, MSB first.
///
/// Die Position wird rein in Bits gefuehrt; Byte-Offsets ergeben sich aus
/// `pos / 8`. Kein Akkumulator: die Records sind klein, Indexzugriff reicht.
#[derive(Clone, Copy)]
pub struct BitReader<'a> {
    data: &'a [u8],
    /// Bit position, 0 ..= data.len() * 8.
    pos: usize,
}

impl<'a> BitReader<'a> {
    /// Creates a new `BitReader` over the given byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the current bit position.
    pub fn bit_position(&self) -> usize {
        self.pos
    }

    /// Returns the number of bits left to read.
    pub fn remaining_bits(&self) -> usize {
        self.data.len() * 8 - self.pos
    }

    fn underrun(&self, requested: usize) -> Error {
        Error::BufferUnderrun {
            position: self.pos,
            requested,
            available: self.remaining_bits(),
        }
    }

    /// Reads `n` bits (0..=64) and returns them in the low bits of a `u64`.
    ///
    /// The position is unchanged when the read fails.
    pub fn read_bits(&mut self, n: u8) -> Result<u64> {
        debug_assert!(n <= 64, "bit count must be 0..=64, got {n}");
        let n = n as usize;
        if n > self.remaining_bits() {
            return Err(self.underrun(n));
        }
        let mut val = 0u64;
        let mut left = n;
        while left > 0 {
            let byte = self.data[self.pos / 8];
            let avail = 8 - self.pos % 8;
            let take = avail.min(left);
            let mask = ((1u16 << take) - 1) as u8;
            let chunk = (byte >> (avail - take)) & mask;
            val = (val << take) | u64::from(chunk);
            self.pos += take;
            left -= take;
        }
        Ok(val)
    }

    /// Reads a single bit as a flag.
    pub fn read_bool_bit(&mut self) -> Result<bool> {
        Ok(self.read_bits(1)? != 0)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bits(8)? as u8)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(self.read_bits(16)? as u16)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(self.read_bits(32)? as u32)
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        self.read_bits(64)
    }

    /// Two's-complement reinterpretation of a 16-bit read.
    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(self.read_u16()? as i16)
    }

    /// Two's-complement reinterpretation of a 32-bit read.
    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(self.read_u32()? as i32)
    }

    /// Reads 4 bytes at the current position without advancing.
    ///
    /// Exact lookahead: fails with `BufferUnderrun` and consumes nothing when
    /// fewer than 32 bits remain.
    pub fn peek_u32(&self) -> Result<u32> {
        let mut probe = *self;
        probe.read_u32()
    }

    /// Reads `n` bytes into a fresh buffer, honoring the current bit offset.
    pub fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; n];
        self.read_into(&mut buf)?;
        Ok(buf)
    }

    /// Fills `buf` from the stream. Fast path when byte-aligned, otherwise a
    /// per-byte bit copy.
    pub fn read_into(&mut self, buf: &mut [u8]) -> Result<()> {
        if buf.len() * 8 > self.remaining_bits() {
            return Err(self.underrun(buf.len() * 8));
        }
        if self.pos % 8 == 0 {
            let start = self.pos / 8;
            buf.copy_from_slice(&self.data[start..start + buf.len()]);
            self.pos += buf.len() * 8;
        } else {
            for slot in buf.iter_mut() {
                *slot = self.read_bits(8)? as u8;
            }
        }
        Ok(())
    }

    /// Advances to the next multiple of `granularity` bits, discarding the
    /// skipped bits without looking at them. No-op when already aligned.
    pub fn align(&mut self, granularity: usize) -> Result<()> {
        debug_assert!(granularity > 0);
        let rem = self.pos % granularity;
        if rem == 0 {
            return Ok(());
        }
        let skip = granularity - rem;
        if skip > self.remaining_bits() {
            return Err(self.underrun(skip));
        }
        self.pos += skip;
        Ok(())
    }

    /// Moves the cursor to an absolute bit position.
    pub fn seek(&mut self, bit_pos: usize) -> Result<()> {
        let length = self.data.len() * 8;
        if bit_pos > length {
            return Err(Error::BufferOverrun {
                position: bit_pos,
                length,
            });
        }
        self.pos = bit_pos;
        Ok(())
    }
}

/// Writes bit-width fields into a growable byte buffer, MSB first.
///
/// Der Buffer waechst bei Bedarf; partielle Bytes sind immer mit Nullen
/// aufgefuellt, `into_vec()` liefert daher direkt das fertige Ergebnis.
/// Feste Blockbudgets prueft der Container-Codec, nicht der Writer.
#[derive(Default)]
pub struct BitWriter {
    buf: Vec<u8>,
    /// Number of bits written so far.
    bits: usize,
}

impl BitWriter {
    /// Creates a new empty `BitWriter`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current bit position (number of bits written).
    pub fn bit_position(&self) -> usize {
        self.bits
    }

    /// Returns the output length in whole bytes, counting a partial byte.
    pub fn byte_len(&self) -> usize {
        self.buf.len()
    }

    /// Writes the lower `n` bits of `value`, MSB first. `n` in 0..=64.
    pub fn write_bits(&mut self, value: u64, n: u8) {
        debug_assert!(n <= 64, "bit count must be 0..=64, got {n}");
        let mut left = n as usize;
        while left > 0 {
            if self.bits / 8 == self.buf.len() {
                self.buf.push(0);
            }
            let off = self.bits % 8;
            let free = 8 - off;
            let take = free.min(left);
            let mask = ((1u16 << take) - 1) as u8;
            let chunk = ((value >> (left - take)) as u8) & mask;
            self.buf[self.bits / 8] |= chunk << (free - take);
            self.bits += take;
            left -= take;
        }
    }

    /// Writes a single flag bit.
    pub fn write_bool_bit(&mut self, value: bool) {
        self.write_bits(u64::from(value), 1);
    }

    pub fn write_u8(&mut self, value: u8) {
        self.write_bits(u64::from(value), 8);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.write_bits(u64::from(value), 16);
    }

    pub fn write_u32(&mut self, value: u32) {
        self.write_bits(u64::from(value), 32);
    }

    pub fn write_u64(&mut self, value: u64) {
        self.write_bits(value, 64);
    }

    pub fn write_i16(&mut self, value: i16) {
        self.write_u16(value as u16);
    }

    pub fn write_i32(&mut self, value: i32) {
        self.write_u32(value as u32);
    }

    /// Writes a byte slice. Direct copy when byte-aligned, otherwise a
    /// per-byte bit copy.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        if self.bits % 8 == 0 {
            self.buf.extend_from_slice(bytes);
            self.bits += bytes.len() * 8;
        } else {
            for &b in bytes {
                self.write_bits(u64::from(b), 8);
            }
        }
    }

    /// Zero-fills up to the next multiple of `granularity` bits. No-op when
    /// already aligned. Serves both byte alignment and the large block pad.
    pub fn align(&mut self, granularity: usize) {
        debug_assert!(granularity > 0);
        let rem = self.bits % granularity;
        if rem == 0 {
            return;
        }
        let target = self.bits + (granularity - rem);
        // Bitweise bis zur Byte-Grenze, dann ganze Null-Bytes in einem Zug.
        while self.bits < target && self.bits % 8 != 0 {
            self.write_bits(0, 1);
        }
        let whole = (target - self.bits) / 8;
        if whole > 0 {
            self.buf.resize(self.buf.len() + whole, 0);
            self.bits += whole * 8;
        }
        while self.bits < target {
            self.write_bits(0, 1);
        }
    }

    /// Finalises the writer and returns the buffer. Any partial last byte is
    /// already zero-padded.
    pub fn into_vec(self) -> Vec<u8> {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- single bits, MSB first ---

    #[test]
    fn write_read_single_bit() {
        let mut w = BitWriter::new();
        w.write_bool_bit(true);
        let data = w.into_vec();
        assert_eq!(data, vec![0b1000_0000]);

        let mut r = BitReader::new(&data);
        assert!(r.read_bool_bit().unwrap());
    }

    #[test]
    fn write_read_3_bits() {
        let mut w = BitWriter::new();
        w.write_bits(0b101, 3);
        let data = w.into_vec();
        assert_eq!(data, vec![0b1010_0000]);

        let mut r = BitReader::new(&data);
        assert_eq!(r.read_bits(3).unwrap(), 0b101);
    }

    // --- multi-byte fields are big-endian when aligned ---

    #[test]
    fn aligned_u32_is_big_endian() {
        let mut w = BitWriter::new();
        w.write_u32(0xDEAD_BEEF);
        let data = w.into_vec();
        assert_eq!(data, vec![0xDE, 0xAD, 0xBE, 0xEF]);

        let mut r = BitReader::new(&data);
        assert_eq!(r.read_u32().unwrap(), 0xDEAD_BEEF);
    }

    #[test]
    fn write_read_64_bits_unaligned() {
        let val: u64 = 0xDEAD_BEEF_CAFE_BABE;
        let mut w = BitWriter::new();
        w.write_bits(0b101, 3);
        w.write_u64(val);
        let data = w.into_vec();
        assert_eq!(data.len(), 9); // 3 + 64 = 67 bits

        let mut r = BitReader::new(&data);
        assert_eq!(r.read_bits(3).unwrap(), 0b101);
        assert_eq!(r.read_u64().unwrap(), val);
    }

    #[test]
    fn cross_byte_boundary() {
        let mut w = BitWriter::new();
        w.write_bits(0b11, 2);
        w.write_bits(0b10_1010_1010, 10);
        let data = w.into_vec();
        assert_eq!(data, vec![0b1110_1010, 0b1010_0000]);

        let mut r = BitReader::new(&data);
        assert_eq!(r.read_bits(2).unwrap(), 0b11);
        assert_eq!(r.read_bits(10).unwrap(), 0b10_1010_1010);
    }

    // --- zero-width fields ---

    #[test]
    fn zero_bit_write_is_noop() {
        let mut w = BitWriter::new();
        w.write_bits(0xFF, 0);
        assert_eq!(w.bit_position(), 0);
        assert!(w.into_vec().is_empty());
    }

    #[test]
    fn zero_bit_read_is_noop() {
        let mut r = BitReader::new(&[]);
        assert_eq!(r.read_bits(0).unwrap(), 0);
        assert_eq!(r.bit_position(), 0);
    }

    // --- masking: only the lower n bits are taken ---

    #[test]
    fn write_bits_takes_lower_bits_only() {
        let mut w = BitWriter::new();
        w.write_bits(0xFF, 4);
        let data = w.into_vec();
        assert_eq!(data, vec![0b1111_0000]);
    }

    // --- signed reinterpretation ---

    #[test]
    fn signed_round_trip() {
        let mut w = BitWriter::new();
        w.write_i32(-1);
        w.write_i32(i32::MIN);
        w.write_i16(-2);
        let data = w.into_vec();

        let mut r = BitReader::new(&data);
        assert_eq!(r.read_i32().unwrap(), -1);
        assert_eq!(r.read_i32().unwrap(), i32::MIN);
        assert_eq!(r.read_i16().unwrap(), -2);
    }

    // --- alignment ---

    #[test]
    fn writer_align_to_byte_from_partial() {
        let mut w = BitWriter::new();
        w.write_bits(0b111, 3);
        w.align(8);
        assert_eq!(w.bit_position(), 8);
        assert_eq!(w.into_vec(), vec![0b1110_0000]);
    }

    #[test]
    fn writer_align_noop_when_aligned() {
        let mut w = BitWriter::new();
        w.write_u8(0xFF);
        w.align(8);
        assert_eq!(w.bit_position(), 8);
        w.align(1);
        assert_eq!(w.bit_position(), 8);
    }

    #[test]
    fn writer_align_large_block() {
        let mut w = BitWriter::new();
        w.write_u8(0xAB);
        w.write_bits(0b1, 1);
        w.align(64 * 8);
        let data = w.into_vec();
        assert_eq!(data.len(), 64);
        assert_eq!(data[0], 0xAB);
        assert_eq!(data[1], 0b1000_0000);
        assert!(data[2..].iter().all(|&b| b == 0));
    }

    #[test]
    fn writer_align_sub_byte_granularity() {
        let mut w = BitWriter::new();
        w.write_bool_bit(true);
        w.align(4);
        assert_eq!(w.bit_position(), 4);
        w.write_bits(0b1111, 4);
        assert_eq!(w.into_vec(), vec![0b1000_1111]);
    }

    #[test]
    fn reader_align_discards_bits() {
        let data = [0b1010_1111, 0xCD];
        let mut r = BitReader::new(&data);
        assert_eq!(r.read_bits(4).unwrap(), 0b1010);
        r.align(8).unwrap();
        assert_eq!(r.bit_position(), 8);
        assert_eq!(r.read_u8().unwrap(), 0xCD);
    }

    #[test]
    fn reader_align_past_end_is_underrun() {
        let mut r = BitReader::new(&[0xFF]);
        r.read_bits(3).unwrap();
        let err = r.align(32).unwrap_err();
        assert!(matches!(err, Error::BufferUnderrun { .. }));
    }

    // --- position tracking ---

    #[test]
    fn position_tracking() {
        let mut w = BitWriter::new();
        assert_eq!(w.bit_position(), 0);
        w.write_bool_bit(true);
        assert_eq!(w.bit_position(), 1);
        w.write_bits(0, 5);
        assert_eq!(w.bit_position(), 6);
        w.align(8);
        assert_eq!(w.bit_position(), 8);
        w.write_u16(0);
        assert_eq!(w.bit_position(), 24);
        assert_eq!(w.byte_len(), 3);
    }

    // --- error cases ---

    #[test]
    fn read_past_end_is_underrun() {
        let mut r = BitReader::new(&[]);
        let err = r.read_bits(8).unwrap_err();
        assert!(matches!(err, Error::BufferUnderrun { .. }));
    }

    #[test]
    fn failed_read_leaves_position_unchanged() {
        let mut r = BitReader::new(&[0xFF]);
        assert_eq!(r.read_bits(4).unwrap(), 0xF);
        let pos_before = r.bit_position();
        assert!(r.read_bits(8).is_err());
        assert_eq!(r.bit_position(), pos_before);
        // Der Rest ist weiterhin lesbar.
        assert_eq!(r.read_bits(4).unwrap(), 0xF);
    }

    #[test]
    fn seek_within_bounds() {
        let data = [0xAB, 0xCD];
        let mut r = BitReader::new(&data);
        r.read_u8().unwrap();
        r.seek(0).unwrap();
        assert_eq!(r.read_u8().unwrap(), 0xAB);
        r.seek(16).unwrap();
        assert_eq!(r.remaining_bits(), 0);
    }

    #[test]
    fn seek_past_end_is_overrun() {
        let mut r = BitReader::new(&[0xAB]);
        let err = r.seek(9).unwrap_err();
        assert_eq!(
            err,
            Error::BufferOverrun {
                position: 9,
                length: 8
            }
        );
    }

    // --- peek ---

    #[test]
    fn peek_u32_does_not_advance() {
        let data = [0x00, 0x00, 0x00, 0x6B, 0xFF];
        let mut r = BitReader::new(&data);
        assert_eq!(r.peek_u32().unwrap(), 0x6B);
        assert_eq!(r.bit_position(), 0);
        assert_eq!(r.read_u32().unwrap(), 0x6B);
    }

    #[test]
    fn peek_u32_mid_bit_offset() {
        let mut w = BitWriter::new();
        w.write_bits(0b1, 1);
        w.write_u32(0xCAFE_BABE);
        let data = w.into_vec();

        let mut r = BitReader::new(&data);
        r.read_bits(1).unwrap();
        assert_eq!(r.peek_u32().unwrap(), 0xCAFE_BABE);
        assert_eq!(r.bit_position(), 1);
    }

    #[test]
    fn peek_u32_short_buffer_is_exact_failure() {
        let r = BitReader::new(&[0x01, 0x02, 0x03]);
        let err = r.peek_u32().unwrap_err();
        assert!(matches!(err, Error::BufferUnderrun { .. }));
        assert_eq!(r.bit_position(), 0);
    }

    // --- bulk bytes ---

    #[test]
    fn read_write_bytes_aligned() {
        let mut w = BitWriter::new();
        w.write_bytes(&[0xAB, 0xCD, 0xEF]);
        let data = w.into_vec();
        assert_eq!(data, vec![0xAB, 0xCD, 0xEF]);

        let mut r = BitReader::new(&data);
        assert_eq!(r.read_bytes(3).unwrap(), vec![0xAB, 0xCD, 0xEF]);
    }

    #[test]
    fn read_write_bytes_unaligned() {
        let mut w = BitWriter::new();
        w.write_bool_bit(true);
        w.write_bytes(&[0xFF, 0x00]);
        let data = w.into_vec();
        assert_eq!(data, vec![0xFF, 0x80, 0x00]);

        let mut r = BitReader::new(&data);
        assert!(r.read_bool_bit().unwrap());
        assert_eq!(r.read_bytes(2).unwrap(), vec![0xFF, 0x00]);
    }

    #[test]
    fn read_bytes_past_end_is_underrun() {
        let mut r = BitReader::new(&[0xAB]);
        assert!(r.read_bytes(2).is_err());
        // Fehlgeschlagener Bulk-Read laesst die Position stehen.
        assert_eq!(r.bit_position(), 0);
    }

    // --- mixed sequence round trip ---

    #[test]
    fn mixed_sequence_round_trip() {
        let mut w = BitWriter::new();
        w.write_bool_bit(true);
        w.write_bits(42, 7);
        w.write_u16(0xBEEF);
        w.write_bits(0x2A5, 14);
        w.align(8);
        w.write_bytes(b"ok");
        let data = w.into_vec();

        let mut r = BitReader::new(&data);
        assert!(r.read_bool_bit().unwrap());
        assert_eq!(r.read_bits(7).unwrap(), 42);
        assert_eq!(r.read_u16().unwrap(), 0xBEEF);
        assert_eq!(r.read_bits(14).unwrap(), 0x2A5);
        r.align(8).unwrap();
        assert_eq!(r.read_bytes(2).unwrap(), b"ok");
        assert_eq!(r.remaining_bits(), 0);
    }
}
