//! Construction of records.

use crate::{varnum, Config, Error};
use bytes::{BufMut, Bytes, BytesMut};

/// Accumulates encoded records (or the raw payload of an enclosing record).
#[derive(Debug, Default)]
pub struct Writer {
    buf: BytesMut,
    cfg: Config,
}

impl Writer {
    /// Creates a `Writer` with the default [Config].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a `Writer` with the provided [Config].
    pub fn with_config(cfg: Config) -> Self {
        Self {
            buf: BytesMut::new(),
            cfg,
        }
    }

    /// Returns the configuration of this writer.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Appends raw bytes.
    pub fn put_slice(&mut self, bytes: &[u8]) {
        self.buf.put_slice(bytes);
    }

    /// Appends one record of type `typ` whose payload is produced by `payload`.
    ///
    /// The payload is written to a nested `Writer` sharing this writer's configuration. Fails
    /// with [Error::LengthExceeded] (appending nothing) if the payload exceeds the configured
    /// limit.
    pub fn write_record<F>(&mut self, typ: u64, payload: F) -> Result<(), Error>
    where
        F: FnOnce(&mut Writer) -> Result<(), Error>,
    {
        let mut nested = Writer::with_config(self.cfg);
        payload(&mut nested)?;

        let len = nested.buf.len() as u64;
        if !self.cfg.allows(len) {
            return Err(Error::LengthExceeded(len, self.cfg.max_record_size));
        }
        self.buf
            .reserve(varnum::size(typ) + varnum::size(len) + nested.buf.len());
        varnum::write(typ, &mut self.buf);
        varnum::write(len, &mut self.buf);
        self.buf.put_slice(&nested.buf);
        Ok(())
    }

    /// Returns the number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns the written bytes.
    pub fn freeze(self) -> Bytes {
        self.buf.freeze()
    }
}
