//! Codec implementation for UTF-8 text.
//!
//! Payloads are validated on decode: bytes that are not valid UTF-8 are rejected with
//! [crate::Error::InvalidData] rather than copied into the `String`. Use [bytes::Bytes] for
//! fields that may carry arbitrary bytes.

use crate::{Config, Error, Payload, Writer};
use bytes::Bytes;

impl Payload for String {
    #[inline]
    fn write_payload(&self, writer: &mut Writer) -> Result<(), Error> {
        writer.put_slice(self.as_bytes());
        Ok(())
    }

    #[inline]
    fn read_payload(&mut self, payload: Bytes, _: &Config) -> Result<(), Error> {
        *self = String::from_utf8(payload.to_vec())
            .map_err(|err| Error::InvalidData("String".into(), err.to_string()))?;
        Ok(())
    }
}
