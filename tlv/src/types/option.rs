//! Codec implementations for lazily-constructed and boxed values.
//!
//! `Option<T>` holds a value that is only constructed when its record is present: encoding
//! `None` writes nothing, and decoding a matching record into `None` first replaces it with
//! `Some(T::default())`. A value already present is decoded in place.
//!
//! `Box<T>` is transparent and allows recursive composites (typically as `Option<Box<T>>`).

use crate::{Config, Error, Field, Payload, Reader, Writer};
use bytes::Bytes;
use std::io::Read;

impl<T: Payload + Default> Field for Option<T> {
    fn write_field(&self, typ: u64, writer: &mut Writer) -> Result<(), Error> {
        match self {
            Some(value) => value.write_field(typ, writer),
            None => Ok(()),
        }
    }

    fn read_field<R: Read>(&mut self, typ: u64, reader: &mut Reader<R>) -> Result<(), Error> {
        let record = reader.expect(typ)?;
        let cfg = *reader.config();
        self.get_or_insert_with(T::default)
            .read_payload(record.value, &cfg)
    }
}

impl<T: Payload> Payload for Box<T> {
    #[inline]
    fn write_payload(&self, writer: &mut Writer) -> Result<(), Error> {
        (**self).write_payload(writer)
    }

    #[inline]
    fn read_payload(&mut self, payload: Bytes, cfg: &Config) -> Result<(), Error> {
        (**self).read_payload(payload, cfg)
    }
}
