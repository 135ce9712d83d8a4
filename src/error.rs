//! Central error types for the save-record codec.
//!
//! One crate-wide enum; variants carry enough context (bit positions,
//! expected/found tags) to diagnose a malformed buffer without a debugger.

use core::fmt;

/// All errors produced by the codec layer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A read would pass the end of the buffer. Positions and sizes in bits.
    BufferUnderrun {
        position: usize,
        requested: usize,
        available: usize,
    },
    /// A seek or alignment moved the cursor past the end of the buffer.
    BufferOverrun { position: usize, length: usize },
    /// Encoded content exceeds the fixed block budget. Sizes in bytes.
    Oversize { content: usize, block: usize },
    /// A magic number or format-version tag does not match the wire constant.
    FormatMismatch {
        field: &'static str,
        expected: u32,
        found: u32,
    },
    /// A symbolic enumeration name in the text mirror is not known.
    UnknownEnumName { kind: &'static str, name: String },
    /// A wire string is not valid UTF-8.
    InvalidString(String),
    /// The base64/zlib payload of a free-form label could not be decoded.
    BlobCodec(String),
    /// The text-mirror document is malformed.
    Xml(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferUnderrun {
                position,
                requested,
                available,
            } => write!(
                f,
                "buffer underrun: {requested} bits requested at bit {position}, {available} available"
            ),
            Self::BufferOverrun { position, length } => {
                write!(f, "buffer overrun: bit position {position} exceeds buffer length {length} bits")
            }
            Self::Oversize { content, block } => {
                write!(f, "encoded content is {content} bytes, exceeding the {block}-byte block")
            }
            Self::FormatMismatch {
                field,
                expected,
                found,
            } => write!(
                f,
                "format mismatch in {field}: expected {expected:#X}, found {found:#X}"
            ),
            Self::UnknownEnumName { kind, name } => {
                write!(f, "unknown {kind} name '{name}'")
            }
            Self::InvalidString(msg) => write!(f, "invalid wire string: {msg}"),
            Self::BlobCodec(msg) => write!(f, "label blob codec failure: {msg}"),
            Self::Xml(msg) => write!(f, "malformed text mirror: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

/// A convenience `Result` type alias using [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn underrun_display_has_positions() {
        let e = Error::BufferUnderrun {
            position: 12,
            requested: 32,
            available: 4,
        };
        let msg = e.to_string();
        assert!(msg.contains("12"), "{msg}");
        assert!(msg.contains("32"), "{msg}");
        assert!(msg.contains("4"), "{msg}");
    }

    #[test]
    fn overrun_display() {
        let e = Error::BufferOverrun {
            position: 400,
            length: 320,
        };
        let msg = e.to_string();
        assert!(msg.contains("400"), "{msg}");
        assert!(msg.contains("320"), "{msg}");
    }

    #[test]
    fn oversize_display_names_block() {
        let e = Error::Oversize {
            content: 21000,
            block: 20768,
        };
        let msg = e.to_string();
        assert!(msg.contains("21000"), "{msg}");
        assert!(msg.contains("20768"), "{msg}");
    }

    #[test]
    fn format_mismatch_display_is_hex() {
        let e = Error::FormatMismatch {
            field: "reward magic",
            expected: 0xE6E6_A107,
            found: 0xDEAD_BEEF,
        };
        let msg = e.to_string();
        assert!(msg.contains("reward magic"), "{msg}");
        assert!(msg.contains("0xE6E6A107"), "{msg}");
        assert!(msg.contains("0xDEADBEEF"), "{msg}");
    }

    #[test]
    fn unknown_enum_name_display() {
        let e = Error::UnknownEnumName {
            kind: "finish result",
            name: "PLATINUM".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("finish result"), "{msg}");
        assert!(msg.contains("PLATINUM"), "{msg}");
    }

    #[test]
    fn error_implements_std_error() {
        let e: Box<dyn std::error::Error> = Box::new(Error::Xml("boom".into()));
        assert!(!e.to_string().is_empty());
    }

    #[test]
    fn error_is_clone_and_eq() {
        let e1 = Error::InvalidString("bad".into());
        let e2 = e1.clone();
        assert_eq!(e1, e2);
    }

    #[test]
    fn result_type_alias_works() {
        let ok: Result<u32> = Ok(7);
        assert_eq!(ok.unwrap(), 7);
        let err: Result<u32> = Err(Error::BufferOverrun {
            position: 1,
            length: 0,
        });
        assert!(err.is_err());
    }
}
