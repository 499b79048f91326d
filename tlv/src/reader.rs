//! Sequential reading of records from a byte source.

use crate::{varnum, Config, Error};
use bytes::{buf, Buf, Bytes};
use std::io::{self, ErrorKind, Read};
use tracing::debug;

/// A single record read from the wire.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    /// Type number of the record.
    pub typ: u64,

    /// Payload of the record (exactly the declared length).
    pub value: Bytes,
}

/// Reads records from an underlying [Read] source, with the ability to inspect the type of the
/// next record without consuming it.
///
/// A peeked type number is held by the `Reader` until the record is read, so the underlying
/// source must not be used directly while a `Reader` wraps it.
pub struct Reader<R> {
    inner: R,
    cfg: Config,
    peeked: Option<u64>,
}

impl<R: Read> Reader<R> {
    /// Creates a `Reader` with the default [Config].
    pub fn new(inner: R) -> Self {
        Self::with_config(inner, Config::default())
    }

    /// Creates a `Reader` with the provided [Config].
    pub fn with_config(inner: R, cfg: Config) -> Self {
        Self {
            inner,
            cfg,
            peeked: None,
        }
    }

    /// Returns the configuration of this reader.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Returns the type number of the next record without consuming it, or `None` if the
    /// source is exhausted.
    ///
    /// Calling `peek` again before reading the record returns the same value.
    pub fn peek(&mut self) -> Result<Option<u64>, Error> {
        if let Some(typ) = self.peeked {
            return Ok(Some(typ));
        }

        // A clean end of input is only possible at a record boundary.
        let mut first = [0u8; 1];
        loop {
            match self.inner.read(&mut first) {
                Ok(0) => return Ok(None),
                Ok(_) => break,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            }
        }
        let typ = varnum::read_with_first(first[0], &mut self.inner)?;
        self.peeked = Some(typ);
        Ok(Some(typ))
    }

    /// Consumes exactly one record.
    ///
    /// Fails with [Error::LengthExceeded] before reading any payload if the declared length is
    /// above the configured limit.
    pub fn read_record(&mut self) -> Result<Record, Error> {
        let typ = match self.peeked.take() {
            Some(typ) => typ,
            None => varnum::read(&mut self.inner)?,
        };
        let len = varnum::read(&mut self.inner)?;
        let max = self.cfg.max_record_size;
        if !self.cfg.allows(len) {
            debug!(typ, len, max, "record exceeds size limit");
            return Err(Error::LengthExceeded(len, max));
        }

        // The buffer grows with the bytes actually read, not the declared length.
        let mut value = Vec::new();
        (&mut self.inner).take(len).read_to_end(&mut value)?;
        if (value.len() as u64) < len {
            return Err(io::Error::from(ErrorKind::UnexpectedEof).into());
        }
        Ok(Record {
            typ,
            value: Bytes::from(value),
        })
    }

    /// Consumes the next record if it has type `typ`.
    ///
    /// Fails with [Error::UnexpectedType] (consuming nothing) if the next record has a
    /// different type or the source is exhausted.
    pub fn expect(&mut self, typ: u64) -> Result<Record, Error> {
        match self.peek()? {
            Some(found) if found == typ => self.read_record(),
            found => Err(Error::UnexpectedType {
                expected: typ,
                found,
            }),
        }
    }

    /// Returns the underlying source.
    ///
    /// If a type number was peeked but its record not read, those bytes are lost.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl Reader<buf::Reader<Bytes>> {
    /// Creates a `Reader` over bytes already in memory (for example, the payload of an
    /// enclosing record).
    pub fn from_bytes(bytes: Bytes, cfg: Config) -> Self {
        Self::with_config(bytes.reader(), cfg)
    }

    /// Returns the number of unread bytes, counting a peeked type number at its canonical
    /// width.
    pub fn remaining(&self) -> usize {
        let peeked = self.peeked.map_or(0, varnum::size);
        self.inner.get_ref().remaining() + peeked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MAX_RECORD_SIZE;

    fn record(typ: u64, value: &[u8]) -> Vec<u8> {
        let mut buf = Vec::new();
        varnum::write(typ, &mut buf);
        varnum::write(value.len() as u64, &mut buf);
        buf.extend_from_slice(value);
        buf
    }

    #[test]
    fn test_peek_is_idempotent() {
        let buf = [record(300, &[1, 2]), record(5, &[])].concat();
        let mut reader = Reader::new(&buf[..]);
        assert_eq!(reader.peek().unwrap(), Some(300));
        assert_eq!(reader.peek().unwrap(), Some(300));

        let first = reader.read_record().unwrap();
        assert_eq!(first.typ, 300);
        assert_eq!(first.value, Bytes::from_static(&[1, 2]));

        assert_eq!(reader.peek().unwrap(), Some(5));
        let second = reader.read_record().unwrap();
        assert_eq!(second.typ, 5);
        assert!(second.value.is_empty());

        assert_eq!(reader.peek().unwrap(), None);
        assert_eq!(reader.peek().unwrap(), None);
    }

    #[test]
    fn test_read_without_peek() {
        let buf = record(u64::MAX, b"abc");
        let mut reader = Reader::new(&buf[..]);
        let record = reader.read_record().unwrap();
        assert_eq!(record.typ, u64::MAX);
        assert_eq!(record.value, Bytes::from_static(b"abc"));
    }

    #[test]
    fn test_expect() {
        let buf = record(7, &[9]);
        let mut reader = Reader::new(&buf[..]);
        assert!(matches!(
            reader.expect(8),
            Err(Error::UnexpectedType {
                expected: 8,
                found: Some(7)
            })
        ));

        // Nothing was consumed by the mismatch.
        assert_eq!(reader.expect(7).unwrap().value, Bytes::from_static(&[9]));
        assert!(matches!(
            reader.expect(7),
            Err(Error::UnexpectedType {
                expected: 7,
                found: None
            })
        ));
    }

    #[test]
    fn test_length_exceeded_before_payload() {
        let payload = vec![0xAA; MAX_RECORD_SIZE as usize + 1];
        let buf = record(1, &payload);
        let mut reader = Reader::new(&buf[..]);
        assert!(matches!(
            reader.read_record(),
            Err(Error::LengthExceeded(8801, 8800))
        ));

        // The payload was left untouched.
        assert_eq!(reader.into_inner(), &payload[..]);
    }

    #[test]
    fn test_length_exceeded_without_payload() {
        let mut buf = Vec::new();
        varnum::write(1, &mut buf);
        varnum::write(u64::MAX, &mut buf);
        let mut reader = Reader::new(&buf[..]);
        assert!(matches!(
            reader.read_record(),
            Err(Error::LengthExceeded(u64::MAX, MAX_RECORD_SIZE))
        ));
    }

    #[test]
    fn test_max_length_accepted() {
        let payload = vec![0x55; MAX_RECORD_SIZE as usize];
        let buf = record(1, &payload);
        let mut reader = Reader::new(&buf[..]);
        assert_eq!(reader.read_record().unwrap().value.len(), payload.len());
    }

    #[test]
    fn test_custom_limit() {
        let buf = record(1, &[0; 5]);
        let mut reader = Reader::with_config(&buf[..], Config::new(4));
        assert!(matches!(
            reader.read_record(),
            Err(Error::LengthExceeded(5, 4))
        ));
    }

    #[test]
    fn test_truncated_record() {
        let buf = record(1, &[1, 2, 3]);
        for cut in 1..buf.len() {
            let mut reader = Reader::new(&buf[..cut]);
            match reader.read_record() {
                Err(Error::Io(err)) => assert_eq!(err.kind(), ErrorKind::UnexpectedEof),
                other => panic!("unexpected result at {cut}: {other:?}"),
            }
        }
    }

    #[test]
    fn test_unbounded_limit_truncated() {
        // A huge declared length with no payload behind it fails without allocating it.
        let mut buf: Vec<u8> = Vec::new();
        varnum::write(1, &mut buf);
        varnum::write(u64::MAX - 1, &mut buf);
        buf.extend_from_slice(&[1, 2, 3]);
        let mut reader = Reader::with_config(&buf[..], Config::new(u64::MAX));
        match reader.read_record() {
            Err(Error::Io(err)) => assert_eq!(err.kind(), ErrorKind::UnexpectedEof),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_truncated_peek() {
        let mut reader = Reader::new(&[0xFEu8, 0x00][..]);
        match reader.peek() {
            Err(Error::Io(err)) => assert_eq!(err.kind(), ErrorKind::UnexpectedEof),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_from_bytes_inherits_config() {
        let cfg = Config::new(2);
        let reader = Reader::from_bytes(Bytes::from(record(1, &[0; 3])), cfg);
        assert_eq!(reader.config(), &cfg);
        assert_eq!(reader.remaining(), 5);
    }

    #[test]
    fn test_remaining_counts_peeked_type() {
        let buf = [record(300, &[1]), record(2, &[])].concat();
        let mut reader = Reader::from_bytes(Bytes::from(buf), Config::default());
        assert_eq!(reader.remaining(), 7);
        reader.read_record().unwrap();
        assert_eq!(reader.peek().unwrap(), Some(2));
        assert_eq!(reader.remaining(), 2);
        reader.read_record().unwrap();
        assert_eq!(reader.remaining(), 0);
    }
}
