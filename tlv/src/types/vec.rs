//! Codec implementation for repeated fields.
//!
//! Each element of a `Vec<T>` is written as its own record, all sharing the field's type
//! number, with no count prefix. Decoding appends elements for as long as the next record has
//! the field's type.

use crate::{Error, Field, Payload, Reader, Writer};
use std::io::Read;
use tracing::trace;

impl<T: Payload + Default> Field for Vec<T> {
    fn write_field(&self, typ: u64, writer: &mut Writer) -> Result<(), Error> {
        for item in self {
            item.write_field(typ, writer)?;
        }
        Ok(())
    }

    fn read_field<R: Read>(&mut self, typ: u64, reader: &mut Reader<R>) -> Result<(), Error> {
        let mut count = 0usize;
        loop {
            match reader.peek()? {
                Some(found) if found == typ => {}
                found if count == 0 => {
                    return Err(Error::UnexpectedType {
                        expected: typ,
                        found,
                    });
                }
                found => {
                    trace!(typ, count, ?found, "end of repeated field");
                    return Ok(());
                }
            }

            let mut item = T::default();
            item.read_field(typ, reader)?;
            self.push(item);
            count += 1;
        }
    }
}
