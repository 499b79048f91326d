//! Encode structured data as Type-Length-Value records.
//!
//! # Overview
//!
//! A binary serialization library for the record format used by Named Data Networking. Every
//! value is carried in one or more records of the form `TYPE LENGTH VALUE`, where `TYPE` and
//! `LENGTH` are variable-length numbers (see [varnum]) and `VALUE` is exactly `LENGTH` bytes.
//!
//! Encoding maps a value and a type number to records. Decoding reads records of an expected
//! type from a [Reader] and fills in an existing value in place. Records are limited to
//! [MAX_RECORD_SIZE] bytes of payload (configurable through [Config]), and the limit is checked
//! before any payload is read.
//!
//! # Supported Types
//!
//! Natively supports:
//! - Unsigned integers: `u64`, in the narrowest of 1, 2, 4 or 8 big-endian bytes
//! - Flags: `bool`, encoded as the presence of an empty record
//! - Text and bytes: `String` (UTF-8) and [bytes::Bytes]
//! - Repeated fields: `Vec<T>`, one record per element
//! - Lazily-constructed values: `Option<T>`, built only when its record is present
//! - Composites: structs declared with [composite!], whose fields are nested records
//!
//! Types with their own binary representation can implement [Payload] directly.
//!
//! # Example
//!
//! ```
//! use bytes::Bytes;
//! use commonware_tlv::{composite, from_bytes, to_bytes, Config, Error, Payload, Writer};
//!
//! // A leaf with a custom representation
//! #[derive(Debug, Default, PartialEq)]
//! struct Rgb([u8; 3]);
//!
//! impl Payload for Rgb {
//!     fn write_payload(&self, writer: &mut Writer) -> Result<(), Error> {
//!         writer.put_slice(&self.0);
//!         Ok(())
//!     }
//!
//!     fn read_payload(&mut self, payload: Bytes, _: &Config) -> Result<(), Error> {
//!         self.0 = <[u8; 3]>::try_from(&payload[..])
//!             .map_err(|_| Error::InvalidData("Rgb".into(), "expected 3 bytes".into()))?;
//!         Ok(())
//!     }
//! }
//!
//! composite! {
//!     #[derive(Debug, Default, PartialEq)]
//!     pub struct Pixel {
//!         pub x: u64 = tlv(1),
//!         pub y: u64 = tlv(2),
//!         pub color: Option<Rgb> = tlv(3, optional),
//!         pub hidden: bool = tlv(4),
//!     }
//! }
//!
//! let pixel = Pixel { x: 3, y: 300, color: Some(Rgb([1, 2, 3])), hidden: false };
//! let encoded = to_bytes(&pixel, 0x20).unwrap();
//! assert_eq!(
//!     encoded,
//!     Bytes::from_static(&[0x20, 12, 1, 1, 3, 2, 2, 0x01, 0x2C, 3, 3, 1, 2, 3]),
//! );
//!
//! let decoded: Pixel = from_bytes(encoded, 0x20).unwrap();
//! assert_eq!(decoded, pixel);
//! ```

pub mod codec;
pub mod composite;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod reader;
pub mod types;
pub mod varnum;
pub mod writer;

// Re-export main types and traits
pub use codec::{
    decode, encode, encode_cfg, from_bytes, from_bytes_cfg, to_bytes, to_bytes_cfg, Field,
    Payload,
};
pub use composite::Composite;
pub use config::{Config, MAX_RECORD_SIZE};
pub use descriptor::{DescriptorError, FieldDescriptor};
pub use error::Error;
pub use reader::{Reader, Record};
pub use writer::Writer;

#[doc(hidden)]
pub use bytes;
