//! Core codec traits and entry points

use crate::{Config, Error, Reader, Writer};
use bytes::{BufMut, Bytes};
use std::io::Read;

/// Trait for values carried as the payload of a single record.
///
/// This is the hook for leaf types with a custom binary representation: implementing
/// `Payload` for a type defines its bytes wherever it appears (as a field of a composite, an
/// element of a repeated field, or the target of a lazily-constructed reference). Composites
/// declared with [crate::composite!] implement it by encoding their fields.
pub trait Payload {
    /// Writes the payload bytes of this value.
    fn write_payload(&self, writer: &mut Writer) -> Result<(), Error>;

    /// Decodes this value in place from the payload of a record.
    ///
    /// `cfg` is the configuration of the reader the record came from, for use by any reader
    /// created over `payload`.
    fn read_payload(&mut self, payload: Bytes, cfg: &Config) -> Result<(), Error>;
}

/// Trait for values that map onto zero or more records sharing one type number.
pub trait Field {
    /// Writes the records representing this value.
    fn write_field(&self, typ: u64, writer: &mut Writer) -> Result<(), Error>;

    /// Decodes this value in place from the next record(s) of type `typ`.
    ///
    /// Returns [Error::UnexpectedType] if the next record does not have type `typ` (and this
    /// value cannot be legitimately represented by zero records).
    fn read_field<R: Read>(&mut self, typ: u64, reader: &mut Reader<R>) -> Result<(), Error>;
}

// Every payload is carried by exactly one record.
impl<T: Payload> Field for T {
    fn write_field(&self, typ: u64, writer: &mut Writer) -> Result<(), Error> {
        writer.write_record(typ, |w| self.write_payload(w))
    }

    fn read_field<R: Read>(&mut self, typ: u64, reader: &mut Reader<R>) -> Result<(), Error> {
        let record = reader.expect(typ)?;
        let cfg = *reader.config();
        self.read_payload(record.value, &cfg)
    }
}

/// Encodes `value` as records of type `typ`, appending them to `buf`.
pub fn encode<F: Field>(buf: &mut impl BufMut, value: &F, typ: u64) -> Result<(), Error> {
    encode_cfg(buf, value, typ, &Config::default())
}

/// Encodes `value` as records of type `typ` using the provided [Config], appending them to
/// `buf`.
///
/// Nothing is appended if encoding fails.
pub fn encode_cfg<F: Field>(
    buf: &mut impl BufMut,
    value: &F,
    typ: u64,
    cfg: &Config,
) -> Result<(), Error> {
    let encoded = to_bytes_cfg(value, typ, cfg)?;
    buf.put_slice(&encoded);
    Ok(())
}

/// Encodes `value` as records of type `typ`.
pub fn to_bytes<F: Field>(value: &F, typ: u64) -> Result<Bytes, Error> {
    to_bytes_cfg(value, typ, &Config::default())
}

/// Encodes `value` as records of type `typ` using the provided [Config].
pub fn to_bytes_cfg<F: Field>(value: &F, typ: u64, cfg: &Config) -> Result<Bytes, Error> {
    let mut writer = Writer::with_config(*cfg);
    value.write_field(typ, &mut writer)?;
    Ok(writer.freeze())
}

/// Decodes `value` in place from the next record(s) of type `typ` in `reader`.
///
/// Records after those belonging to `value` are left in `reader`. On error, `value` may be
/// partially written and should be discarded.
pub fn decode<F: Field, R: Read>(
    reader: &mut Reader<R>,
    value: &mut F,
    typ: u64,
) -> Result<(), Error> {
    value.read_field(typ, reader)
}

/// Decodes a value from records of type `typ`, ensuring `bytes` is fully consumed.
pub fn from_bytes<F: Field + Default>(bytes: impl Into<Bytes>, typ: u64) -> Result<F, Error> {
    from_bytes_cfg(bytes, typ, &Config::default())
}

/// Decodes a value from records of type `typ` using the provided [Config], ensuring `bytes`
/// is fully consumed.
pub fn from_bytes_cfg<F: Field + Default>(
    bytes: impl Into<Bytes>,
    typ: u64,
    cfg: &Config,
) -> Result<F, Error> {
    let mut reader = Reader::from_bytes(bytes.into(), *cfg);
    let mut value = F::default();
    value.read_field(typ, &mut reader)?;

    let remaining = reader.remaining();
    if remaining > 0 {
        return Err(Error::ExtraData(remaining));
    }
    Ok(value)
}
