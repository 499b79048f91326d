//! Error types for TLV operations

use crate::descriptor::DescriptorError;
use thiserror::Error;

/// Error type for TLV operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("length exceeded: {0} > {1}")]
    LengthExceeded(u64, u64), // found, max
    #[error("unexpected type: expected {expected}, found {found:?}")]
    UnexpectedType { expected: u64, found: Option<u64> },
    #[error("malformed descriptor: {0}")]
    MalformedDescriptor(#[from] DescriptorError),
    #[error("extra data found: {0} bytes")]
    ExtraData(usize),
    #[error("invalid integer width: {0}")]
    InvalidWidth(usize),
    #[error("invalid data in {0}: {1}")]
    InvalidData(String, String), // context, message
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
