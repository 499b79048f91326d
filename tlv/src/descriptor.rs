//! Per-field wire metadata.
//!
//! A descriptor tag is a comma-separated list: a type number (decimal, or hexadecimal with a
//! `0x` prefix) followed by zero or more of the markers `optional` and `implicit`:
//!
//! ```
//! use commonware_tlv::FieldDescriptor;
//!
//! let desc: FieldDescriptor = "255, optional".parse().unwrap();
//! assert_eq!(desc, FieldDescriptor::new(255).optional());
//!
//! // Tags can also be parsed in constants, where a malformed tag fails the build.
//! const NAME: FieldDescriptor = FieldDescriptor::from_tag("0x07");
//! assert_eq!(NAME.typ, 7);
//! ```

use crate::Error;
use std::str::FromStr;

/// Error returned when a descriptor tag cannot be parsed.
#[derive(thiserror::Error, Clone, Copy, Debug, Eq, PartialEq)]
pub enum DescriptorError {
    #[error("missing type number")]
    MissingType,
    #[error("invalid type number")]
    InvalidType,
    #[error("type number exceeds u64")]
    TypeOverflow,
    #[error("unknown marker")]
    UnknownMarker,
}

impl DescriptorError {
    const fn fail(self) -> ! {
        match self {
            Self::MissingType => panic!("malformed tlv descriptor: missing type number"),
            Self::InvalidType => panic!("malformed tlv descriptor: invalid type number"),
            Self::TypeOverflow => panic!("malformed tlv descriptor: type number exceeds u64"),
            Self::UnknownMarker => panic!("malformed tlv descriptor: unknown marker"),
        }
    }
}

/// Wire metadata attached to one field of a composite.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct FieldDescriptor {
    /// Type number of the records carrying this field.
    pub typ: u64,

    /// Whether the field may be absent when decoding.
    pub optional: bool,

    /// Whether the field is excluded from the wire entirely.
    pub implicit: bool,
}

impl FieldDescriptor {
    /// Descriptor of a field that never appears on the wire.
    pub const IMPLICIT: Self = Self {
        typ: 0,
        optional: false,
        implicit: true,
    };

    /// Creates a required descriptor for records of type `typ`.
    pub const fn new(typ: u64) -> Self {
        Self {
            typ,
            optional: false,
            implicit: false,
        }
    }

    /// Marks the field as optional.
    pub const fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Marks the field as implicit.
    pub const fn implicit(mut self) -> Self {
        self.implicit = true;
        self
    }

    /// Parses a descriptor tag.
    pub const fn parse(tag: &str) -> Result<Self, DescriptorError> {
        let bytes = tag.as_bytes();
        let (start, end, mut next) = next_token(bytes, 0);
        let typ = match parse_number(bytes, start, end) {
            Ok(typ) => typ,
            Err(err) => return Err(err),
        };

        let mut desc = Self::new(typ);
        while next <= bytes.len() {
            let (start, end, after) = next_token(bytes, next);
            if token_is(bytes, start, end, b"optional") {
                desc.optional = true;
            } else if token_is(bytes, start, end, b"implicit") {
                desc.implicit = true;
            } else {
                return Err(DescriptorError::UnknownMarker);
            }
            next = after;
        }
        Ok(desc)
    }

    /// Parses a descriptor tag, panicking if it is malformed.
    ///
    /// Intended for constants, where the panic surfaces as a build error.
    pub const fn from_tag(tag: &str) -> Self {
        match Self::parse(tag) {
            Ok(desc) => desc,
            Err(err) => err.fail(),
        }
    }
}

impl FromStr for FieldDescriptor {
    type Err = Error;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(tag)?)
    }
}

/// Returns the whitespace-trimmed bounds of the token starting at `from` and the index just
/// past its terminating comma (one past the end of input if there is no comma).
const fn next_token(bytes: &[u8], from: usize) -> (usize, usize, usize) {
    let mut end = from;
    while end < bytes.len() && bytes[end] != b',' {
        end += 1;
    }
    let next = end + 1;

    let mut start = from;
    while start < end && bytes[start].is_ascii_whitespace() {
        start += 1;
    }
    while end > start && bytes[end - 1].is_ascii_whitespace() {
        end -= 1;
    }
    (start, end, next)
}

const fn token_is(bytes: &[u8], start: usize, end: usize, word: &[u8]) -> bool {
    if end - start != word.len() {
        return false;
    }
    let mut i = 0;
    while i < word.len() {
        if bytes[start + i] != word[i] {
            return false;
        }
        i += 1;
    }
    true
}

const fn parse_number(bytes: &[u8], start: usize, end: usize) -> Result<u64, DescriptorError> {
    if start == end {
        return Err(DescriptorError::MissingType);
    }

    let (mut i, radix) = if end - start > 2
        && bytes[start] == b'0'
        && (bytes[start + 1] == b'x' || bytes[start + 1] == b'X')
    {
        (start + 2, 16)
    } else {
        (start, 10)
    };

    let mut value: u64 = 0;
    while i < end {
        let digit = match bytes[i] {
            b'0'..=b'9' => bytes[i] - b'0',
            b'a'..=b'f' if radix == 16 => bytes[i] - b'a' + 10,
            b'A'..=b'F' if radix == 16 => bytes[i] - b'A' + 10,
            _ => return Err(DescriptorError::InvalidType),
        };
        value = match value.checked_mul(radix) {
            Some(value) => value,
            None => return Err(DescriptorError::TypeOverflow),
        };
        value = match value.checked_add(digit as u64) {
            Some(value) => value,
            None => return Err(DescriptorError::TypeOverflow),
        };
        i += 1;
    }
    Ok(value)
}
