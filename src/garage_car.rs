//! Fixed 40-byte garage slot record.
//!
//! One slot describes one owned vehicle. Every one of the 320 bits is
//! captured by a struct field, including the three reserved regions, so a
//! decoded record re-encodes to the identical bytes without keeping the raw
//! buffer around. Enumeration fields stay opaque numeric codes; symbolic
//! interpretation lives in [`crate::enums`].

use crate::bitstream::{BitReader, BitWriter};
use crate::Result;

/// Size of one garage slot in bytes.
pub const RECORD_BYTES: usize = 40;

/// Size of one garage slot in bits.
pub const RECORD_BITS: usize = RECORD_BYTES * 8;

/// Wire offset applied to the stored 8-bit model year.
const YEAR_BASE: u16 = 1800;

/// A single decoded garage slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GarageCarRecord {
    /// Slot presence flag; empty slots are all-zero records.
    pub exists: bool,
    /// Country code, 7 bits.
    pub country: u8,
    /// Drivetrain code, 3 bits.
    pub drivetrain: u8,
    /// Model year; stored on the wire as `year - 1800` in 8 bits.
    pub year: u16,
    pub favorite: bool,
    /// Aspiration code, 3 bits.
    pub aspiration: u8,
    pub spec_hidden: bool,
    /// Opaque 28-bit region, round-tripped verbatim.
    pub reserved_a: u32,
    /// Front tire code, 5 bits.
    pub front_tire: u8,
    /// Rear tire code, 5 bits.
    pub rear_tire: u8,
    pub can_dirt_tire: bool,
    pub can_snow_tire: bool,
    /// Tuner/manufacturer code, 8 bits.
    pub tuner: u8,
    /// Opaque 10-bit region.
    pub reserved_b: u16,
    /// Weight in kg, 14 bits.
    pub weight: u16,
    pub ride_count: u16,
    /// Performance points in the format's fixed-point scaling, 14 bits.
    pub pp: u16,
    pub invalid: bool,
    pub tuned: bool,
    /// Engine power in PS, 14 bits.
    pub power: u16,
    pub has_dlc: bool,
    pub has_nos: bool,
    /// Opaque 16-bit region.
    pub reserved_c: u16,
    /// Acquisition order counter.
    pub ride_order: u32,
    pub garage_id: u32,
    pub car_code: u32,
    /// Packed color word, opaque encoding (see [`crate::color`]).
    pub main_color: u32,
    /// Packed color word, opaque encoding.
    pub accent_color: u32,
}

impl Default for GarageCarRecord {
    fn default() -> Self {
        Self {
            exists: false,
            country: 0,
            drivetrain: 0,
            year: YEAR_BASE,
            favorite: false,
            aspiration: 0,
            spec_hidden: false,
            reserved_a: 0,
            front_tire: 0,
            rear_tire: 0,
            can_dirt_tire: false,
            can_snow_tire: false,
            tuner: 0,
            reserved_b: 0,
            weight: 0,
            ride_count: 0,
            pp: 0,
            invalid: false,
            tuned: false,
            power: 0,
            has_dlc: false,
            has_nos: false,
            reserved_c: 0,
            ride_order: 0,
            garage_id: 0,
            car_code: 0,
            main_color: 0,
            accent_color: 0,
        }
    }
}

impl GarageCarRecord {
    /// Decodes one record from the cursor, consuming exactly 320 bits.
    ///
    /// Out-of-range enumeration codes are not an error; they are preserved
    /// as plain integers.
    pub fn decode(bs: &mut BitReader) -> Result<Self> {
        let exists = bs.read_bool_bit()?;
        let country = bs.read_bits(7)? as u8;
        let drivetrain = bs.read_bits(3)? as u8;
        let year = YEAR_BASE + u16::from(bs.read_u8()?);
        let favorite = bs.read_bool_bit()?;
        let aspiration = bs.read_bits(3)? as u8;
        let spec_hidden = bs.read_bool_bit()?;
        let reserved_a = bs.read_bits(28)? as u32;
        let front_tire = bs.read_bits(5)? as u8;
        let rear_tire = bs.read_bits(5)? as u8;
        let can_dirt_tire = bs.read_bool_bit()?;
        let can_snow_tire = bs.read_bool_bit()?;
        let tuner = bs.read_u8()?;
        let reserved_b = bs.read_bits(10)? as u16;
        let weight = bs.read_bits(14)? as u16;
        let ride_count = bs.read_u16()?;
        let pp = bs.read_bits(14)? as u16;
        let invalid = bs.read_bool_bit()?;
        let tuned = bs.read_bool_bit()?;
        let power = bs.read_bits(14)? as u16;
        let has_dlc = bs.read_bool_bit()?;
        let has_nos = bs.read_bool_bit()?;
        let reserved_c = bs.read_u16()?;
        let ride_order = bs.read_u32()?;
        let garage_id = bs.read_u32()?;
        let car_code = bs.read_u32()?;
        let main_color = bs.read_u32()?;
        let accent_color = bs.read_u32()?;

        Ok(Self {
            exists,
            country,
            drivetrain,
            year,
            favorite,
            aspiration,
            spec_hidden,
            reserved_a,
            front_tire,
            rear_tire,
            can_dirt_tire,
            can_snow_tire,
            tuner,
            reserved_b,
            weight,
            ride_count,
            pp,
            invalid,
            tuned,
            power,
            has_dlc,
            has_nos,
            reserved_c,
            ride_order,
            garage_id,
            car_code,
            main_color,
            accent_color,
        })
    }

    /// Encodes the record, producing exactly 320 bits. Field values wider
    /// than their wire width are truncated to the low bits, mirroring the
    /// console's behavior.
    pub fn encode(&self, bs: &mut BitWriter) {
        bs.write_bool_bit(self.exists);
        bs.write_bits(u64::from(self.country), 7);
        bs.write_bits(u64::from(self.drivetrain), 3);
        bs.write_u8(self.year.wrapping_sub(YEAR_BASE) as u8);
        bs.write_bool_bit(self.favorite);
        bs.write_bits(u64::from(self.aspiration), 3);
        bs.write_bool_bit(self.spec_hidden);
        bs.write_bits(u64::from(self.reserved_a), 28);
        bs.write_bits(u64::from(self.front_tire), 5);
        bs.write_bits(u64::from(self.rear_tire), 5);
        bs.write_bool_bit(self.can_dirt_tire);
        bs.write_bool_bit(self.can_snow_tire);
        bs.write_u8(self.tuner);
        bs.write_bits(u64::from(self.reserved_b), 10);
        bs.write_bits(u64::from(self.weight), 14);
        bs.write_u16(self.ride_count);
        bs.write_bits(u64::from(self.pp), 14);
        bs.write_bool_bit(self.invalid);
        bs.write_bool_bit(self.tuned);
        bs.write_bits(u64::from(self.power), 14);
        bs.write_bool_bit(self.has_dlc);
        bs.write_bool_bit(self.has_nos);
        bs.write_u16(self.reserved_c);
        bs.write_u32(self.ride_order);
        bs.write_u32(self.garage_id);
        bs.write_u32(self.car_code);
        bs.write_u32(self.main_color);
        bs.write_u32(self.accent_color);
    }

    /// Decodes a record from a standalone buffer of at least 40 bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut bs = BitReader::new(data);
        Self::decode(&mut bs)
    }

    /// Encodes the record into a fresh 40-byte buffer.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bs = BitWriter::new();
        self.encode(&mut bs);
        bs.into_vec()
    }
}
