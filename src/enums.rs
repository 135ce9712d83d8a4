//! Enumeration lookup tables for the text mirror and garage queries.
//!
//! The binary wire formats store plain numeric codes; only the text mirror
//! needs symbolic names. Codes outside these tables are never an error on
//! the binary path: they stay opaque integers and the mirror falls back to
//! the decimal spelling.

/// Item kind of a present (`item/@type_id`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameItemType {
    None = 0,
    Car = 1,
    Driver = 2,
    DriverItem = 3,
    Money = 4,
    TuneParts = 5,
    OtherParts = 6,
    MuseumCard = 7,
    Movie = 8,
    Special = 9,
    PartsTicket = 10,
    Avatar = 11,
    Other = 12,
}

impl GameItemType {
    const TABLE: &'static [(GameItemType, &'static str)] = &[
        (Self::None, "NONE"),
        (Self::Car, "CAR"),
        (Self::Driver, "DRIVER"),
        (Self::DriverItem, "DRIVER_ITEM"),
        (Self::Money, "MONEY"),
        (Self::TuneParts, "TUNE_PARTS"),
        (Self::OtherParts, "OTHERPARTS"),
        (Self::MuseumCard, "MUSEUMCARD"),
        (Self::Movie, "MOVIE"),
        (Self::Special, "SPECIAL"),
        (Self::PartsTicket, "PARTS_TICKET"),
        (Self::Avatar, "AVATAR"),
        (Self::Other, "OTHER"),
    ];

    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn as_str(self) -> &'static str {
        Self::TABLE
            .iter()
            .find(|(v, _)| *v == self)
            .map(|(_, n)| *n)
            .unwrap_or("NONE")
    }

    pub fn from_code(code: u32) -> Option<Self> {
        Self::TABLE.iter().find(|(v, _)| v.code() == code).map(|(v, _)| *v)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::TABLE.iter().find(|(_, n)| *n == name).map(|(v, _)| *v)
    }

    /// Symbolic name for a wire code, or its decimal spelling when unknown.
    pub fn label(code: u32) -> String {
        match Self::from_code(code) {
            Some(v) => v.as_str().to_string(),
            None => code.to_string(),
        }
    }
}

/// Item category of a present (`item/@category_id`). Sparse codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameItemCategory {
    None = 0,
    Car = 100,
    Driver = 200,
    DriverItem = 300,
    DriverHead = 301,
    DriverBody = 302,
    DriverSet = 303,
    Money = 400,
    TunerParts = 500,
    BodyChassis = 511,
    Engine = 521,
    Admission = 531,
    Emission = 532,
    Booster = 541,
    Transmission = 551,
    Drivetrain = 556,
    Suspension = 561,
    Brake = 571,
    BTire = 581,
    CTire = 582,
    VTire = 583,
    STire = 586,
    Others = 591,
    Horn = 596,
    OtherParts = 600,
    PaintItem = 601,
    SpecialPaintItem = 602,
    MuseumCard = 700,
    Movie = 800,
    Special = 900,
    PresentCarTicket = 901,
    PresentItemTicket = 902,
    SpecialTicket = 903,
}

impl GameItemCategory {
    const TABLE: &'static [(GameItemCategory, &'static str)] = &[
        (Self::None, "NONE"),
        (Self::Car, "CAR"),
        (Self::Driver, "DRIVER"),
        (Self::DriverItem, "DRIVER_ITEM"),
        (Self::DriverHead, "DRIVER_HEAD"),
        (Self::DriverBody, "DRIVER_BODY"),
        (Self::DriverSet, "DRIVER_SET"),
        (Self::Money, "MONEY"),
        (Self::TunerParts, "TUNERPARTS"),
        (Self::BodyChassis, "BODY_CHASSIS"),
        (Self::Engine, "ENGINE"),
        (Self::Admission, "ADMISSION"),
        (Self::Emission, "EMISSION"),
        (Self::Booster, "BOOSTER"),
        (Self::Transmission, "TRANSMISSION"),
        (Self::Drivetrain, "DRIVETRAIN"),
        (Self::Suspension, "SUSPENSION"),
        (Self::Brake, "BRAKE"),
        (Self::BTire, "BTIRE"),
        (Self::CTire, "CTIRE"),
        (Self::VTire, "VTIRE"),
        (Self::STire, "STIRE"),
        (Self::Others, "OTHERS"),
        (Self::Horn, "HORN"),
        (Self::OtherParts, "OTHER_PARTS"),
        (Self::PaintItem, "PAINT_ITEM"),
        (Self::SpecialPaintItem, "SPECIAL_PAINT_ITEM"),
        (Self::MuseumCard, "MUSEUMCARD"),
        (Self::Movie, "MOVIE"),
        (Self::Special, "SPECIAL"),
        (Self::PresentCarTicket, "PRESENTCAR_TICKET"),
        (Self::PresentItemTicket, "PRESENTITEM_TICKET"),
        (Self::SpecialTicket, "SPECIAL_TICKET"),
    ];

    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn as_str(self) -> &'static str {
        Self::TABLE
            .iter()
            .find(|(v, _)| *v == self)
            .map(|(_, n)| *n)
            .unwrap_or("NONE")
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::TABLE.iter().find(|(v, _)| v.code() == code).map(|(v, _)| *v)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::TABLE.iter().find(|(_, n)| *n == name).map(|(v, _)| *v)
    }

    /// Symbolic name for a wire code, or its decimal spelling when unknown.
    pub fn label(code: i32) -> String {
        match Self::from_code(code) {
            Some(v) => v.as_str().to_string(),
            None => code.to_string(),
        }
    }
}

/// Finish-result ladder used by `star_table` entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishResult {
    Empty = 0,
    Failure = 1,
    Clear = 2,
    Bronze = 3,
    Silver = 4,
    Gold = 5,
}

impl FinishResult {
    const TABLE: &'static [(FinishResult, &'static str)] = &[
        (Self::Empty, "EMPTY"),
        (Self::Failure, "FAILURE"),
        (Self::Clear, "CLEAR"),
        (Self::Bronze, "BRONZE"),
        (Self::Silver, "SILVER"),
        (Self::Gold, "GOLD"),
    ];

    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn as_str(self) -> &'static str {
        Self::TABLE
            .iter()
            .find(|(v, _)| *v == self)
            .map(|(_, n)| *n)
            .unwrap_or("EMPTY")
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::TABLE.iter().find(|(v, _)| v.code() == code).map(|(v, _)| *v)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::TABLE.iter().find(|(_, n)| *n == name).map(|(v, _)| *v)
    }

    /// Symbolic name for a wire code, or its decimal spelling when unknown.
    pub fn label(code: i32) -> String {
        match Self::from_code(code) {
            Some(v) => v.as_str().to_string(),
            None => code.to_string(),
        }
    }
}

/// Ordering policy for the main present list. Text-mirror-only field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RewardPresentType {
    #[default]
    Order = 0,
    Random = 1,
}

impl RewardPresentType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Order => "ORDER",
            Self::Random => "RANDOM",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ORDER" => Some(Self::Order),
            "RANDOM" => Some(Self::Random),
            _ => None,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Order),
            1 => Some(Self::Random),
            _ => None,
        }
    }
}

/// Ordering policy for the participation present list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RewardEntryPresentType {
    #[default]
    Finish = 0,
    Entry = 1,
}

impl RewardEntryPresentType {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Finish => "FINISH",
            Self::Entry => "ENTRY",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "FINISH" => Some(Self::Finish),
            "ENTRY" => Some(Self::Entry),
            _ => None,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Finish),
            1 => Some(Self::Entry),
            _ => None,
        }
    }
}

/// Sort key for decoded garage listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GarageSortKey {
    #[default]
    Acquisition,
    Tuner,
    Country,
    Power,
    Weight,
    Year,
    RideCount,
    PerformancePoints,
}

impl GarageSortKey {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "acquisition" => Some(Self::Acquisition),
            "tuner" => Some(Self::Tuner),
            "country" => Some(Self::Country),
            "power" => Some(Self::Power),
            "weight" => Some(Self::Weight),
            "year" => Some(Self::Year),
            "rides" => Some(Self::RideCount),
            "pp" => Some(Self::PerformancePoints),
            _ => None,
        }
    }
}

/// Direction of a garage listing sort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}
