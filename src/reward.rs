//! Event reward and present records, binary wire form.
//!
//! A reward bundles per-rank prize/point/star tables, two present lists and
//! a handful of scalar flags behind a magic + format-version pair. Present
//! items nest their own magic + version. The parallel human-editable form
//! lives in [`crate::reward_xml`]; both transform the same structs.

use std::io::Write as _;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use flate2::write::{ZlibDecoder, ZlibEncoder};
use flate2::Compression;

use crate::aligned_string;
use crate::bitstream::{BitReader, BitWriter};
use crate::enums::{GameItemType, RewardEntryPresentType, RewardPresentType};
use crate::{Error, Result};

/// Magic number of the reward binary form.
pub const REWARD_MAGIC: u32 = 0xE6E6_A107;
/// Format version of the reward binary form.
pub const REWARD_VERSION: u32 = 10_300;
/// Magic number of the nested present binary form.
pub const PRESENT_MAGIC: u32 = 0xE6E6_D2B3;
/// Format version of the nested present binary form.
pub const PRESENT_VERSION: u32 = 10_000;

fn expect_u32(bs: &mut BitReader, field: &'static str, expected: u32) -> Result<()> {
    let found = bs.read_u32()?;
    if found != expected {
        return Err(Error::FormatMismatch {
            field,
            expected,
            found,
        });
    }
    Ok(())
}

/// One present item: an item reference plus four generic arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventPresent {
    /// Item kind code (see [`GameItemType`]).
    pub type_id: u32,
    /// Item category code (see [`crate::enums::GameItemCategory`]).
    pub category_id: i32,
    /// Generic arguments; meaning depends on the item kind. `args[3]`
    /// defaults to the -1 sentinel, the others to 0.
    pub args: [i32; 4],
    /// Free-form label. Usually a display/car label; seasonal roots abuse it
    /// to carry a base64 blob instead (see [`Self::from_car_blob`]).
    pub f_name: String,
}

impl Default for EventPresent {
    fn default() -> Self {
        Self {
            type_id: 0,
            category_id: 0,
            args: [0, 0, 0, -1],
            f_name: String::new(),
        }
    }
}

impl EventPresent {
    /// Present handing out the car named by `label`.
    pub fn from_car(label: &str) -> Self {
        Self {
            f_name: label.to_string(),
            ..Self::default()
        }
    }

    /// Present handing out a paint item.
    pub fn from_paint(paint_id: i32) -> Self {
        Self {
            type_id: GameItemType::DriverItem.code(),
            args: [paint_id, 0, 0, -1],
            ..Self::default()
        }
    }

    /// Present handing out a driver suit.
    pub fn from_suit(suit_id: i32) -> Self {
        Self {
            args: [0, 0, 0, suit_id],
            ..Self::default()
        }
    }

    /// Present carrying an opaque blob in the label slot, zlib-compressed
    /// and base64-encoded the way seasonal roots expect.
    pub fn from_car_blob(blob: &[u8]) -> Result<Self> {
        let mut enc = ZlibEncoder::new(Vec::new(), Compression::default());
        enc.write_all(blob)
            .map_err(|e| Error::BlobCodec(e.to_string()))?;
        let compressed = enc.finish().map_err(|e| Error::BlobCodec(e.to_string()))?;
        Ok(Self {
            type_id: GameItemType::Special.code(),
            f_name: BASE64.encode(compressed),
            ..Self::default()
        })
    }

    /// Recovers the blob stored by [`Self::from_car_blob`].
    pub fn car_blob(&self) -> Result<Vec<u8>> {
        let compressed = BASE64
            .decode(&self.f_name)
            .map_err(|e| Error::BlobCodec(e.to_string()))?;
        let mut dec = ZlibDecoder::new(Vec::new());
        dec.write_all(&compressed)
            .map_err(|e| Error::BlobCodec(e.to_string()))?;
        dec.finish().map_err(|e| Error::BlobCodec(e.to_string()))
    }

    /// Encodes one present: magic, version, six integers, aligned label,
    /// and the always-zero trailing blob-size word.
    pub fn encode(&self, bs: &mut BitWriter) {
        bs.write_u32(PRESENT_MAGIC);
        bs.write_u32(PRESENT_VERSION);
        bs.write_u32(self.type_id);
        bs.write_i32(self.category_id);
        for arg in self.args {
            bs.write_i32(arg);
        }
        aligned_string::encode(bs, &self.f_name);
        bs.write_i32(0);
    }

    /// Decodes one present, verifying magic and version.
    pub fn decode(bs: &mut BitReader) -> Result<Self> {
        expect_u32(bs, "present magic", PRESENT_MAGIC)?;
        expect_u32(bs, "present version", PRESENT_VERSION)?;
        let type_id = bs.read_u32()?;
        let category_id = bs.read_i32()?;
        let mut args = [0i32; 4];
        for arg in &mut args {
            *arg = bs.read_i32()?;
        }
        let f_name = aligned_string::decode(bs)?;
        // Trailing blob size is always written as zero; a nonzero value
        // would mean a payload this layout cannot represent.
        let blob_size = bs.read_i32()?;
        if blob_size != 0 {
            return Err(Error::FormatMismatch {
                field: "present blob size",
                expected: 0,
                found: blob_size as u32,
            });
        }
        Ok(Self {
            type_id,
            category_id,
            args,
            f_name,
        })
    }
}

/// The tuned-car payload carried behind the reward record (`entry_base` in
/// the text mirror). Always emitted on the wire; a default-valued instance
/// stands in when the reward has none, keeping the record length stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TunedCarEntry {
    pub car_label: String,
    pub driver_name: String,
    pub driver_region: String,
}

impl TunedCarEntry {
    pub fn encode(&self, bs: &mut BitWriter) {
        aligned_string::encode(bs, &self.car_label);
        aligned_string::encode(bs, &self.driver_name);
        aligned_string::encode(bs, &self.driver_region);
    }

    pub fn decode(bs: &mut BitReader) -> Result<Self> {
        Ok(Self {
            car_label: aligned_string::decode(bs)?,
            driver_name: aligned_string::decode(bs)?,
            driver_region: aligned_string::decode(bs)?,
        })
    }

    fn is_default(&self) -> bool {
        self.car_label.is_empty() && self.driver_name.is_empty() && self.driver_region.is_empty()
    }
}

/// An event reward record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reward {
    /// Credit prize per rank (index = rank).
    pub prize_table: Vec<i32>,
    /// Point/XP prize per rank.
    pub point_table: Vec<i32>,
    /// Star requirement per rank, opaque finish-result codes
    /// (see [`crate::enums::FinishResult`]).
    pub star_table: Vec<i32>,
    /// Rank presents.
    pub presents: Vec<EventPresent>,
    /// Participation presents. A genuinely separate list from
    /// [`Self::presents`].
    pub entry_presents: Vec<EventPresent>,
    pub special_reward_code: i32,
    /// When set, finishing 1st collects the prizes of every rank below too.
    pub prize_cumulative: bool,
    pub pp_base: i16,
    pub percent_at_pp100: i16,
    /// Reward can only be claimed once.
    pub is_once: bool,
    /// Ordering policy of the rank presents. Text-mirror-only: the binary
    /// form has no field for it.
    pub present_type: RewardPresentType,
    /// Ordering policy of the participation presents.
    pub entry_present_type: RewardEntryPresentType,
    /// Optional tuned-car payload.
    pub tuned_entry: Option<TunedCarEntry>,
}

fn write_i32_table(bs: &mut BitWriter, table: &[i32]) {
    bs.write_i32(table.len() as i32);
    for &v in table {
        bs.write_i32(v);
    }
}

fn read_i32_table(bs: &mut BitReader) -> Result<Vec<i32>> {
    let count = bs.read_i32()?.max(0) as usize;
    let mut table = Vec::with_capacity(count.min(1024));
    for _ in 0..count {
        table.push(bs.read_i32()?);
    }
    Ok(table)
}

fn write_present_list(bs: &mut BitWriter, list: &[EventPresent]) {
    bs.write_i32(list.len() as i32);
    for present in list {
        present.encode(bs);
    }
}

fn read_present_list(bs: &mut BitReader) -> Result<Vec<EventPresent>> {
    let count = bs.read_i32()?.max(0) as usize;
    let mut list = Vec::with_capacity(count.min(1024));
    for _ in 0..count {
        list.push(EventPresent::decode(bs)?);
    }
    Ok(list)
}

impl Reward {
    /// True iff every list is empty and every scalar sits at its default.
    ///
    /// The tuned-car payload is deliberately excluded from the check; see
    /// [`Reward::tuned_entry`].
    pub fn is_default(&self) -> bool {
        let defaults = Reward::default();
        self.prize_table.is_empty()
            && self.point_table.is_empty()
            && self.star_table.is_empty()
            && self.presents.is_empty()
            && self.entry_presents.is_empty()
            && self.special_reward_code == defaults.special_reward_code
            && self.prize_cumulative == defaults.prize_cumulative
            && self.pp_base == defaults.pp_base
            && self.percent_at_pp100 == defaults.percent_at_pp100
            && self.is_once == defaults.is_once
            && self.present_type == defaults.present_type
            && self.entry_present_type == defaults.entry_present_type
    }

    /// Encodes the reward into an existing stream.
    pub fn encode(&self, bs: &mut BitWriter) {
        bs.write_u32(REWARD_MAGIC);
        bs.write_u32(REWARD_VERSION);

        write_i32_table(bs, &self.prize_table);
        write_i32_table(bs, &self.point_table);
        write_i32_table(bs, &self.star_table);
        write_present_list(bs, &self.presents);

        bs.write_i32(self.special_reward_code);
        bs.write_u16(u16::from(self.prize_cumulative));
        bs.write_i16(self.pp_base);
        bs.write_i16(self.percent_at_pp100);
        bs.write_u8(u8::from(self.is_once));
        bs.write_u8(0); // reserved, always zero

        write_present_list(bs, &self.entry_presents);
        bs.write_u8(self.entry_present_type.code());

        // Immer ausgeben: Default-Instanz als Platzhalter haelt die
        // Record-Laenge unabhaengig von der Praesenz konstant.
        self.tuned_entry.clone().unwrap_or_default().encode(bs);
    }

    /// Decodes a reward, verifying the leading magic and version.
    pub fn decode(bs: &mut BitReader) -> Result<Self> {
        expect_u32(bs, "reward magic", REWARD_MAGIC)?;
        expect_u32(bs, "reward version", REWARD_VERSION)?;

        let prize_table = read_i32_table(bs)?;
        let point_table = read_i32_table(bs)?;
        let star_table = read_i32_table(bs)?;
        let presents = read_present_list(bs)?;

        let special_reward_code = bs.read_i32()?;
        let prize_cumulative = bs.read_u16()? != 0;
        let pp_base = bs.read_i16()?;
        let percent_at_pp100 = bs.read_i16()?;
        let is_once = bs.read_u8()? != 0;
        let _reserved = bs.read_u8()?;

        let entry_presents = read_present_list(bs)?;
        let entry_present_type_code = bs.read_u8()?;
        let entry_present_type = RewardEntryPresentType::from_code(entry_present_type_code)
            .unwrap_or_else(|| {
                log::warn!(
                    "unknown entry present ordering code {entry_present_type_code}, using default"
                );
                RewardEntryPresentType::default()
            });

        let tuned = TunedCarEntry::decode(bs)?;
        let tuned_entry = if tuned.is_default() { None } else { Some(tuned) };

        Ok(Self {
            prize_table,
            point_table,
            star_table,
            presents,
            entry_presents,
            special_reward_code,
            prize_cumulative,
            pp_base,
            percent_at_pp100,
            is_once,
            present_type: RewardPresentType::default(),
            entry_present_type,
            tuned_entry,
        })
    }

    /// Encodes the reward into a fresh buffer.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bs = BitWriter::new();
        self.encode(&mut bs);
        bs.into_vec()
    }

    /// Decodes a reward from a standalone buffer.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut bs = BitReader::new(data);
        Self::decode(&mut bs)
    }
}
