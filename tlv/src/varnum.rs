//! Variable-length number encoding and decoding
//!
//! Every type and length field of a record is a VarNum. The first byte either holds the value
//! itself (`0..=252`) or is a marker announcing a wider big-endian value:
//! - `0xFD`: a 2-byte value follows
//! - `0xFE`: a 4-byte value follows
//! - `0xFF`: an 8-byte value follows
//!
//! Writing always selects the narrowest form that holds the value. Reading accepts all four
//! forms, including wider-than-necessary ones.

use crate::Error;
use bytes::BufMut;
use std::io::Read;

const MAX_SINGLE_BYTE: u64 = 252;
const MARKER_U16: u8 = 0xFD;
const MARKER_U32: u8 = 0xFE;
const MARKER_U64: u8 = 0xFF;

/// Encodes an unsigned 64-bit integer as a VarNum
pub fn write(value: u64, buf: &mut impl BufMut) {
    if value <= MAX_SINGLE_BYTE {
        buf.put_u8(value as u8);
    } else if value <= u16::MAX as u64 {
        buf.put_u8(MARKER_U16);
        buf.put_u16(value as u16);
    } else if value <= u32::MAX as u64 {
        buf.put_u8(MARKER_U32);
        buf.put_u32(value as u32);
    } else {
        buf.put_u8(MARKER_U64);
        buf.put_u64(value);
    }
}

/// Calculates the number of bytes needed to encode an unsigned integer as a VarNum.
pub fn size(value: u64) -> usize {
    if value <= MAX_SINGLE_BYTE {
        1
    } else if value <= u16::MAX as u64 {
        3
    } else if value <= u32::MAX as u64 {
        5
    } else {
        9
    }
}

/// Decodes an unsigned 64-bit integer from a VarNum
pub fn read(reader: &mut impl Read) -> Result<u64, Error> {
    let mut first = [0u8; 1];
    reader.read_exact(&mut first)?;
    read_with_first(first[0], reader)
}

/// Decodes the remainder of a VarNum whose first byte has already been consumed.
pub fn read_with_first(first: u8, reader: &mut impl Read) -> Result<u64, Error> {
    match first {
        MARKER_U16 => {
            let mut bytes = [0u8; 2];
            reader.read_exact(&mut bytes)?;
            Ok(u16::from_be_bytes(bytes) as u64)
        }
        MARKER_U32 => {
            let mut bytes = [0u8; 4];
            reader.read_exact(&mut bytes)?;
            Ok(u32::from_be_bytes(bytes) as u64)
        }
        MARKER_U64 => {
            let mut bytes = [0u8; 8];
            reader.read_exact(&mut bytes)?;
            Ok(u64::from_be_bytes(bytes))
        }
        value => Ok(value as u64),
    }
}
