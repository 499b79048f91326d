//! Implementations of [crate::Payload] and [crate::Field] for the supported value shapes.
//!
//! | Shape | Type | Records |
//! |---|---|---|
//! | unsigned integer | `u64` | one, big-endian in 1, 2, 4 or 8 bytes |
//! | flag | `bool` | one empty record if set, none otherwise |
//! | text | `String` | one, UTF-8 bytes |
//! | raw bytes | `Bytes` | one, verbatim |
//! | repeated | `Vec<T>` | one per element |
//! | lazily-constructed | `Option<T>` | one if present, none otherwise |
//! | boxed | `Box<T>` | same as `T` |
//!
//! Other shapes (floats, signed integers, maps) are deliberately unsupported.

pub mod bytes;
pub mod option;
pub mod primitives;
pub mod string;
pub mod vec;
