//! Composite values: structs whose fields are carried as consecutive records.
//!
//! A composite is declared with [crate::composite!], which attaches a [FieldDescriptor] to each
//! field through a `tlv(..)` tag. The composite's payload is the concatenation of its fields'
//! records in declaration order. Fields without a tag are implicit: they are neither written
//! nor read, and keep their current value when decoding.
//!
//! When decoding, an optional field whose record is missing keeps its current value. A
//! missing required field fails with [Error::UnexpectedType]. Records following the last
//! declared field are ignored.

use crate::{Error, Field, FieldDescriptor, Reader, Writer};
use std::io::Read;
use tracing::{debug, trace};

/// Trait implemented by structs declared with [crate::composite!].
pub trait Composite {
    /// Name and descriptor of every field, in declaration order.
    const FIELDS: &'static [(&'static str, FieldDescriptor)];

    /// Writes the records of all wire fields, in declaration order.
    fn write_fields(&self, writer: &mut Writer) -> Result<(), Error>;

    /// Decodes all wire fields in place, in declaration order.
    fn read_fields<R: Read>(&mut self, reader: &mut Reader<R>) -> Result<(), Error>;
}

/// Writes one field of a composite according to its descriptor.
pub fn write_field<F: Field>(
    value: &F,
    name: &'static str,
    desc: &FieldDescriptor,
    writer: &mut Writer,
) -> Result<(), Error> {
    if desc.implicit {
        return Ok(());
    }
    trace!(field = name, typ = desc.typ, "writing field");
    value.write_field(desc.typ, writer)
}

/// Reads one field of a composite according to its descriptor.
///
/// If the field is optional and the next record has a different type (or there is none), the
/// field is left unchanged. If its record is present but cannot be decoded, the error is
/// discarded and the field is reset to its default.
pub fn read_field<F: Field + Default, R: Read>(
    value: &mut F,
    name: &'static str,
    desc: &FieldDescriptor,
    reader: &mut Reader<R>,
) -> Result<(), Error> {
    if desc.implicit {
        return Ok(());
    }
    if !desc.optional {
        return value.read_field(desc.typ, reader);
    }

    let result = match reader.peek() {
        Ok(Some(found)) if found == desc.typ => value.read_field(desc.typ, reader),
        Ok(found) => {
            debug!(field = name, typ = desc.typ, ?found, "optional field absent");
            return Ok(());
        }
        Err(err) => Err(err),
    };
    if let Err(err) = result {
        debug!(field = name, typ = desc.typ, ?err, "discarding optional field");
        *value = F::default();
    }
    Ok(())
}

/// Declares a struct that is encoded as a composite.
///
/// Each field may be followed by `= tlv(..)` holding its descriptor tag (see
/// [crate::descriptor]). Fields without a tag are implicit. Tags are parsed at compile time, so
/// a malformed tag fails the build. Every tagged field must implement [Default].
///
/// Visibility does not matter: a `pub` field without a tag is implicit too, so forgetting the
/// tag silently drops the field from the wire. Check [Composite::FIELDS] when in doubt.
///
/// The struct implements [Composite] and [crate::Payload], so it can be a field of another
/// composite, an element of a repeated field, or the target of an `Option`. Decoding into an
/// `Option` or `Vec` additionally requires [Default].
///
/// ```
/// use commonware_tlv::{composite, from_bytes, to_bytes};
///
/// composite! {
///     #[derive(Debug, Default, PartialEq)]
///     pub struct Entry {
///         pub id: u64 = tlv(1),
///         pub name: String = tlv(2, optional),
///         pub tags: Vec<String> = tlv(3, optional),
///         cached: bool,
///     }
/// }
///
/// let entry = Entry { id: 7, name: "seven".into(), tags: Vec::new(), cached: true };
/// let encoded = to_bytes(&entry, 0x80).unwrap();
/// let decoded: Entry = from_bytes(encoded, 0x80).unwrap();
/// assert_eq!(decoded.id, 7);
/// assert_eq!(decoded.name, "seven");
/// assert!(!decoded.cached);
/// ```
#[macro_export]
macro_rules! composite {
    (
        $(#[$attr:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fattr:meta])*
                $fvis:vis $fname:ident : $fty:ty $(= tlv($($desc:tt)+))?
            ),* $(,)?
        }
    ) => {
        $(#[$attr])*
        $vis struct $name {
            $(
                $(#[$fattr])*
                $fvis $fname: $fty,
            )*
        }

        impl $crate::Composite for $name {
            const FIELDS: &'static [(&'static str, $crate::FieldDescriptor)] = &[
                $(
                    (stringify!($fname), $crate::__tlv_descriptor!($($($desc)+)?)),
                )*
            ];

            #[allow(unused_variables)]
            fn write_fields(
                &self,
                writer: &mut $crate::Writer,
            ) -> ::core::result::Result<(), $crate::Error> {
                $(
                    $crate::__tlv_field!(write, self.$fname, $fname, writer $(, $($desc)+)?);
                )*
                Ok(())
            }

            #[allow(unused_variables)]
            fn read_fields<R: ::std::io::Read>(
                &mut self,
                reader: &mut $crate::Reader<R>,
            ) -> ::core::result::Result<(), $crate::Error> {
                $(
                    $crate::__tlv_field!(read, self.$fname, $fname, reader $(, $($desc)+)?);
                )*
                Ok(())
            }
        }

        impl $crate::Payload for $name {
            fn write_payload(
                &self,
                writer: &mut $crate::Writer,
            ) -> ::core::result::Result<(), $crate::Error> {
                $crate::Composite::write_fields(self, writer)
            }

            fn read_payload(
                &mut self,
                payload: $crate::bytes::Bytes,
                cfg: &$crate::Config,
            ) -> ::core::result::Result<(), $crate::Error> {
                let mut reader = $crate::Reader::from_bytes(payload, *cfg);
                $crate::Composite::read_fields(self, &mut reader)
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __tlv_descriptor {
    () => {
        $crate::FieldDescriptor::IMPLICIT
    };
    ($($desc:tt)+) => {
        $crate::FieldDescriptor::from_tag(stringify!($($desc)+))
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __tlv_field {
    ($op:ident, $value:expr, $fname:ident, $io:ident) => {};
    (write, $value:expr, $fname:ident, $io:ident, $($desc:tt)+) => {{
        const DESC: $crate::FieldDescriptor = $crate::__tlv_descriptor!($($desc)+);
        $crate::composite::write_field(&$value, stringify!($fname), &DESC, $io)?;
    }};
    (read, $value:expr, $fname:ident, $io:ident, $($desc:tt)+) => {{
        const DESC: $crate::FieldDescriptor = $crate::__tlv_descriptor!($($desc)+);
        $crate::composite::read_field(&mut $value, stringify!($fname), &DESC, $io)?;
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{from_bytes, to_bytes, Config, Payload};
    use bytes::Bytes;
    use commonware_macros::test_traced;

    crate::composite! {
        #[derive(Debug, Default, PartialEq)]
        struct Sample {
            first: u64 = tlv(1),
            second: Option<u64> = tlv(2, optional),
            skipped: u64,
            third: u64 = tlv(0x03, implicit),
            fourth: String = tlv(4),
        }
    }

    crate::composite! {
        #[derive(Debug, Default)]
        struct Empty {}
    }

    #[test]
    fn test_fields() {
        assert_eq!(
            Sample::FIELDS,
            &[
                ("first", FieldDescriptor::new(1)),
                ("second", FieldDescriptor::new(2).optional()),
                ("skipped", FieldDescriptor::IMPLICIT),
                ("third", FieldDescriptor::new(3).implicit()),
                ("fourth", FieldDescriptor::new(4)),
            ]
        );
        assert!(Empty::FIELDS.is_empty());
    }

    #[test]
    fn test_declaration_order() {
        let sample = Sample {
            first: 1,
            second: Some(2),
            skipped: 9,
            third: 9,
            fourth: "x".into(),
        };
        let mut writer = Writer::new();
        sample.write_fields(&mut writer).unwrap();
        assert_eq!(
            writer.freeze(),
            Bytes::from_static(&[1, 1, 1, 2, 1, 2, 4, 1, b'x'])
        );
    }

    #[test_traced]
    fn test_optional_absent() {
        let encoded = Bytes::from_static(&[10, 6, 1, 1, 5, 4, 1, b'y']);
        let decoded: Sample = from_bytes(encoded, 10).unwrap();
        assert_eq!(decoded.first, 5);
        assert_eq!(decoded.second, None);
        assert_eq!(decoded.fourth, "y");
    }

    #[test]
    fn test_required_absent() {
        let encoded = Bytes::from_static(&[10, 6, 1, 1, 5, 2, 1, 6]);
        assert!(matches!(
            from_bytes::<Sample>(encoded, 10),
            Err(Error::UnexpectedType {
                expected: 4,
                found: None
            })
        ));
    }

    #[test_traced]
    fn test_optional_field_error_discarded() {
        let encoded = Bytes::from_static(&[10, 10, 1, 1, 5, 2, 3, 0, 0, 0, 4, 0]);
        let decoded: Sample = from_bytes(encoded, 10).unwrap();
        assert_eq!(decoded.first, 5);
        assert_eq!(decoded.second, None);
        assert_eq!(decoded.fourth, "");

        // A value already present is reset rather than kept.
        let mut sample = Sample {
            second: Some(9),
            ..Default::default()
        };
        let payload = Bytes::from_static(&[1, 1, 5, 2, 3, 0, 0, 0, 4, 1, b'z']);
        sample.read_payload(payload, &Config::default()).unwrap();
        assert_eq!(sample.second, None);
        assert_eq!(sample.fourth, "z");
    }

    #[test]
    fn test_untagged_public_field_implicit() {
        crate::composite! {
            #[derive(Debug, Default)]
            pub struct Visible {
                pub id: u64 = tlv(1),
                pub cache: u64,
            }
        }

        assert_eq!(Visible::FIELDS[1], ("cache", FieldDescriptor::IMPLICIT));
        let value = Visible { id: 1, cache: 500 };
        assert_eq!(to_bytes(&value, 2).unwrap(), Bytes::from_static(&[2, 3, 1, 1, 1]));
    }

    #[test]
    fn test_implicit_untouched() {
        let mut sample = Sample {
            skipped: 11,
            third: 12,
            ..Default::default()
        };
        let payload = Bytes::from_static(&[1, 1, 5, 4, 0]);
        sample.read_payload(payload, &Config::default()).unwrap();
        assert_eq!(sample.first, 5);
        assert_eq!(sample.skipped, 11);
        assert_eq!(sample.third, 12);
    }

    #[test]
    fn test_trailing_records_ignored() {
        let mut sample = Sample::default();
        let payload = Bytes::from_static(&[1, 1, 5, 4, 0, 99, 1, 0]);
        sample.read_payload(payload, &Config::default()).unwrap();
        assert_eq!(sample.first, 5);
    }

    #[test]
    fn test_empty_composite() {
        assert_eq!(to_bytes(&Empty {}, 3).unwrap(), Bytes::from_static(&[3, 0]));
        assert!(from_bytes::<Empty>(Bytes::from_static(&[3, 0]), 3).is_ok());
    }

    #[test]
    fn test_helpers() {
        let mut writer = Writer::new();
        write_field(&5u64, "a", &FieldDescriptor::new(1).implicit(), &mut writer).unwrap();
        assert!(writer.is_empty());
        write_field(&5u64, "a", &FieldDescriptor::new(1), &mut writer).unwrap();
        assert_eq!(writer.len(), 3);

        let mut reader = Reader::new(&[2u8, 1, 7][..]);
        let mut value = 3u64;
        read_field(&mut value, "a", &FieldDescriptor::new(1).optional(), &mut reader).unwrap();
        assert_eq!(value, 3);
        assert!(matches!(
            read_field(&mut value, "a", &FieldDescriptor::new(1), &mut reader),
            Err(Error::UnexpectedType {
                expected: 1,
                found: Some(2)
            })
        ));
        read_field(&mut value, "a", &FieldDescriptor::new(2), &mut reader).unwrap();
        assert_eq!(value, 7);

        // A present but undecodable optional record is consumed and discarded.
        let mut reader = Reader::new(&[2u8, 3, 0, 0, 0, 4, 0][..]);
        read_field(&mut value, "a", &FieldDescriptor::new(2).optional(), &mut reader).unwrap();
        assert_eq!(value, 0);
        assert_eq!(reader.peek().unwrap(), Some(4));
    }
}
