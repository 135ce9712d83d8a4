//! Garage container codec and decoded-side queries.
//!
//! Layout: version pair, a discriminator-selected riding-car blob, the DLC
//! table with its shadow bit region, an eight-field scalar header, then up
//! to `max_garage_count` fixed 40-byte car records, the whole thing padded
//! to the 20768-byte save-partition block.

use std::cmp::Reverse;

use log::{debug, warn};

use crate::bitstream::{BitReader, BitWriter};
use crate::enums::{GarageSortKey, SortOrder};
use crate::garage_car::{GarageCarRecord, RECORD_BITS};
use crate::{Error, Result};

/// Fixed size of the garage section in its save partition slot.
pub const GARAGE_BLOCK_BYTES: usize = 20768;

/// Discriminator tag selecting the 512-byte riding-car blob.
const RIDING_CAR_TAG_LONG: u32 = 0x6B;
/// Discriminator tag selecting the 480-byte riding-car blob.
const RIDING_CAR_TAG_SHORT: u32 = 0x6D;

const RIDING_CAR_LONG_BYTES: usize = 0x200;
const RIDING_CAR_SHORT_BYTES: usize = 0x1E0;

/// The riding-car blob, selected by peeking a 4-byte discriminator.
///
/// The blob's internal structure is opaque; the bytes (including the
/// leading tag) are carried verbatim. An unrecognized tag consumes nothing;
/// the tag bytes then flow into whatever field the container reads next,
/// a known ambiguity of the format itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RidingCar {
    /// 512-byte blob behind tag `0x6B`.
    Long(Vec<u8>),
    /// 480-byte blob behind tag `0x6D`.
    Short(Vec<u8>),
    /// No blob recognized at the discriminator position.
    Absent,
}

/// One entry of the DLC vehicle table. Entries are 34 bits on the wire and
/// not individually byte-aligned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DlcEntry {
    pub car_id: u32,
    pub enabled: bool,
    pub invalid: bool,
}

/// A decoded garage container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GarageContainer {
    pub version_major: i32,
    pub version_minor: i32,
    pub riding_car: RidingCar,
    pub dlc_table: Vec<DlcEntry>,
    /// Post-table bit region, one bit per DLC entry. Purpose unconfirmed;
    /// preserved verbatim so the container round-trips bit-exact.
    pub dlc_shadow_bits: Vec<bool>,
    /// Car record format version.
    pub car_version: i32,
    pub next_garage_id: i32,
    pub total_changes: i32,
    pub current_garage_id: i32,
    /// Declared slot capacity; drives the record loop on decode.
    pub max_garage_count: i32,
    /// Opaque header word.
    pub reserved_a: u32,
    /// Opaque header word.
    pub reserved_b: i32,
    /// Opaque header word.
    pub reserved_c: i32,
    pub cars: Vec<GarageCarRecord>,
}

impl Default for RidingCar {
    fn default() -> Self {
        Self::Absent
    }
}

/// Filter and ordering of a decoded garage listing. Filters recognize the
/// same opaque numeric codes the records carry; `None` means "no filter".
#[derive(Debug, Clone, Default)]
pub struct GarageQuery {
    pub sort_key: GarageSortKey,
    pub order: SortOrder,
    pub countries: Option<Vec<u8>>,
    pub tuners: Option<Vec<u8>>,
    pub drivetrains: Option<Vec<u8>>,
    pub favorite: Option<bool>,
    pub invalid: Option<bool>,
}

impl GarageQuery {
    fn matches(&self, car: &GarageCarRecord) -> bool {
        if let Some(countries) = &self.countries {
            if !countries.contains(&car.country) {
                return false;
            }
        }
        if let Some(tuners) = &self.tuners {
            if !tuners.contains(&car.tuner) {
                return false;
            }
        }
        if let Some(drivetrains) = &self.drivetrains {
            if !drivetrains.contains(&car.drivetrain) {
                return false;
            }
        }
        if let Some(favorite) = self.favorite {
            if car.favorite != favorite {
                return false;
            }
        }
        if let Some(invalid) = self.invalid {
            if car.invalid != invalid {
                return false;
            }
        }
        true
    }
}

fn sort_value(key: GarageSortKey, car: &GarageCarRecord) -> u64 {
    match key {
        GarageSortKey::Acquisition => u64::from(car.ride_order),
        GarageSortKey::Tuner => u64::from(car.tuner),
        GarageSortKey::Country => u64::from(car.country),
        GarageSortKey::Power => u64::from(car.power),
        GarageSortKey::Weight => u64::from(car.weight),
        GarageSortKey::Year => u64::from(car.year),
        GarageSortKey::RideCount => u64::from(car.ride_count),
        GarageSortKey::PerformancePoints => u64::from(car.pp),
    }
}

impl GarageContainer {
    /// Decodes a garage container from its save-partition block.
    ///
    /// Tolerates truncated buffers: when fewer than 40 bytes remain before a
    /// record, the record loop stops early and the shorter list is returned.
    pub fn decode(data: &[u8]) -> Result<Self> {
        let mut bs = BitReader::new(data);

        let version_major = bs.read_i32()?;
        let version_minor = bs.read_i32()?;

        let riding_car = match bs.peek_u32()? {
            RIDING_CAR_TAG_LONG => RidingCar::Long(bs.read_bytes(RIDING_CAR_LONG_BYTES)?),
            RIDING_CAR_TAG_SHORT => RidingCar::Short(bs.read_bytes(RIDING_CAR_SHORT_BYTES)?),
            tag => {
                warn!("unrecognized riding-car discriminator {tag:#X}, treating blob as absent");
                RidingCar::Absent
            }
        };

        let dlc_entry_count = bs.read_i32()?;
        let dlc_len = dlc_entry_count.max(0) as usize;
        let mut dlc_table = Vec::with_capacity(dlc_len.min(1024));
        for _ in 0..dlc_len {
            dlc_table.push(DlcEntry {
                car_id: bs.read_u32()?,
                enabled: bs.read_bool_bit()?,
                invalid: bs.read_bool_bit()?,
            });
        }
        bs.align(8)?;
        let mut dlc_shadow_bits = Vec::with_capacity(dlc_len.min(1024));
        for _ in 0..dlc_len {
            dlc_shadow_bits.push(bs.read_bool_bit()?);
        }

        let car_version = bs.read_i32()?;
        let next_garage_id = bs.read_i32()?;
        let total_changes = bs.read_i32()?;
        let current_garage_id = bs.read_i32()?;
        let max_garage_count = bs.read_i32()?;
        let reserved_a = bs.read_u32()?;
        let reserved_b = bs.read_i32()?;
        let reserved_c = bs.read_i32()?;

        let slot_count = max_garage_count.max(0) as usize;
        let mut cars = Vec::with_capacity(slot_count.min(2048));
        for slot in 0..slot_count {
            if bs.remaining_bits() < RECORD_BITS {
                warn!(
                    "garage truncated after {slot} of {slot_count} slots ({} bits left)",
                    bs.remaining_bits()
                );
                break;
            }
            cars.push(GarageCarRecord::decode(&mut bs)?);
        }
        debug!(
            "decoded garage v{version_major}.{version_minor}: {} slots, {} dlc entries",
            cars.len(),
            dlc_table.len()
        );

        Ok(Self {
            version_major,
            version_minor,
            riding_car,
            dlc_table,
            dlc_shadow_bits,
            car_version,
            next_garage_id,
            total_changes,
            current_garage_id,
            max_garage_count,
            reserved_a,
            reserved_b,
            reserved_c,
            cars,
        })
    }

    /// Encodes the container and pads it to the fixed 20768-byte block.
    ///
    /// Fails with [`Error::Oversize`] when the natural content does not fit
    /// the block.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut bs = BitWriter::new();

        bs.write_i32(self.version_major);
        bs.write_i32(self.version_minor);

        match &self.riding_car {
            RidingCar::Long(blob) | RidingCar::Short(blob) => bs.write_bytes(blob),
            RidingCar::Absent => {}
        }

        bs.write_i32(self.dlc_table.len() as i32);
        for entry in &self.dlc_table {
            bs.write_u32(entry.car_id);
            bs.write_bool_bit(entry.enabled);
            bs.write_bool_bit(entry.invalid);
        }
        bs.align(8);
        for &bit in &self.dlc_shadow_bits {
            bs.write_bool_bit(bit);
        }

        bs.write_i32(self.car_version);
        bs.write_i32(self.next_garage_id);
        bs.write_i32(self.total_changes);
        bs.write_i32(self.current_garage_id);
        bs.write_i32(self.max_garage_count);
        bs.write_u32(self.reserved_a);
        bs.write_i32(self.reserved_b);
        bs.write_i32(self.reserved_c);

        for car in &self.cars {
            car.encode(&mut bs);
        }

        if bs.byte_len() > GARAGE_BLOCK_BYTES {
            return Err(Error::Oversize {
                content: bs.byte_len(),
                block: GARAGE_BLOCK_BYTES,
            });
        }
        bs.align(GARAGE_BLOCK_BYTES * 8);
        Ok(bs.into_vec())
    }

    /// Number of occupied slots.
    pub fn car_count(&self) -> usize {
        self.cars.iter().filter(|c| c.exists).count()
    }

    /// Occupied slots filtered and stable-sorted per the query. Ties keep
    /// the original slot order in both sort directions.
    pub fn select_cars(&self, query: &GarageQuery) -> Vec<&GarageCarRecord> {
        let mut out: Vec<&GarageCarRecord> = self
            .cars
            .iter()
            .filter(|c| c.exists && query.matches(c))
            .collect();
        match query.order {
            SortOrder::Ascending => out.sort_by_key(|c| sort_value(query.sort_key, c)),
            SortOrder::Descending => out.sort_by_key(|c| Reverse(sort_value(query.sort_key, c))),
        }
        out
    }
}
