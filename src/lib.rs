//! gransave – codec for bit-packed console save-game records.
//!
//! Converts fixed-layout garage containers, 40-byte garage car slots and
//! event reward/present tables between their wire bytes and typed records,
//! byte-for-byte compatible with the original format. Rewards additionally
//! carry a human-editable XML mirror.
//!
//! # Beispiel
//!
//! ```
//! use gransave::GarageCarRecord;
//!
//! let car = GarageCarRecord {
//!     exists: true,
//!     year: 1997,
//!     power: 280,
//!     car_code: 0x0001_04D2,
//!     ..GarageCarRecord::default()
//! };
//!
//! let bytes = car.to_bytes();
//! assert_eq!(bytes.len(), 40);
//! assert_eq!(GarageCarRecord::from_bytes(&bytes).unwrap(), car);
//! ```

pub mod aligned_string;
pub mod bitstream;
pub mod color;
pub mod enums;
pub mod error;
pub mod garage;
pub mod garage_car;
pub mod reward;
pub mod reward_xml;

pub use error::{Error, Result};

// Public API: garage
pub use garage::{DlcEntry, GarageContainer, GarageQuery, RidingCar, GARAGE_BLOCK_BYTES};
pub use garage_car::{GarageCarRecord, RECORD_BYTES};

// Public API: rewards
pub use reward::{EventPresent, Reward, TunedCarEntry};
pub use reward_xml::{from_xml, to_xml};

// Public API: lookup tables
pub use enums::{
    FinishResult, GameItemCategory, GameItemType, GarageSortKey, RewardEntryPresentType,
    RewardPresentType, SortOrder,
};

// Public API: color helper
pub use color::CarColor;
