//! Codec implementations for unsigned integers and flags.
//!
//! A `u64` payload is the value in big-endian using the narrowest of 1, 2, 4 or 8 bytes. Any
//! other payload length is rejected on decode.
//!
//! A `bool` is represented by the presence of a record: `true` writes one empty record and
//! `false` writes nothing. When decoding, a matching record sets the flag (its payload is
//! ignored) and a missing one leaves the flag unchanged.

use crate::{Config, Error, Field, Payload, Reader, Writer};
use bytes::{Buf, Bytes};
use std::io::Read;

impl Payload for u64 {
    #[inline]
    fn write_payload(&self, writer: &mut Writer) -> Result<(), Error> {
        let value = *self;
        if value <= u8::MAX as u64 {
            writer.put_slice(&[value as u8]);
        } else if value <= u16::MAX as u64 {
            writer.put_slice(&(value as u16).to_be_bytes());
        } else if value <= u32::MAX as u64 {
            writer.put_slice(&(value as u32).to_be_bytes());
        } else {
            writer.put_slice(&value.to_be_bytes());
        }
        Ok(())
    }

    #[inline]
    fn read_payload(&mut self, mut payload: Bytes, _: &Config) -> Result<(), Error> {
        *self = match payload.len() {
            1 => payload.get_u8() as u64,
            2 => payload.get_u16() as u64,
            4 => payload.get_u32() as u64,
            8 => payload.get_u64(),
            len => return Err(Error::InvalidWidth(len)),
        };
        Ok(())
    }
}

impl Field for bool {
    #[inline]
    fn write_field(&self, typ: u64, writer: &mut Writer) -> Result<(), Error> {
        if !*self {
            return Ok(());
        }
        writer.write_record(typ, |_| Ok(()))
    }

    #[inline]
    fn read_field<R: Read>(&mut self, typ: u64, reader: &mut Reader<R>) -> Result<(), Error> {
        if reader.peek()? == Some(typ) {
            reader.read_record()?;
            *self = true;
        }
        Ok(())
    }
}
