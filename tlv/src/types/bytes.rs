//! Codec implementation for raw bytes.
//!
//! The payload is copied verbatim. Unlike other sequences, a [Bytes] value always occupies a
//! single record.

use crate::{Config, Error, Payload, Writer};
use bytes::Bytes;

impl Payload for Bytes {
    #[inline]
    fn write_payload(&self, writer: &mut Writer) -> Result<(), Error> {
        writer.put_slice(self);
        Ok(())
    }

    #[inline]
    fn read_payload(&mut self, payload: Bytes, _: &Config) -> Result<(), Error> {
        *self = payload;
        Ok(())
    }
}
