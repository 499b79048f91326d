//! Limits applied while reading and writing records.

/// The largest record payload accepted on decode (and produced on encode).
///
/// One common Ethernet jumbo frame size is 9000 octets. 8800 bytes carries an 8192 byte
/// payload with room left for headers and a signature, and stays within the default
/// maximum UDP datagram size of common operating systems.
pub const MAX_RECORD_SIZE: u64 = 8800;

/// Configuration shared by a [crate::Reader] and any readers nested inside it (and likewise
/// for a [crate::Writer]).
///
/// # Examples
///
/// ```
/// use commonware_tlv::{Config, MAX_RECORD_SIZE};
///
/// let cfg = Config::default();
/// assert_eq!(cfg.max_record_size, MAX_RECORD_SIZE);
/// assert!(cfg.allows(8800));
/// assert!(!cfg.allows(8801));
///
/// let small = Config::new(16);
/// assert!(!small.allows(17));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Config {
    /// Maximum number of payload bytes a single record may declare.
    pub max_record_size: u64,
}

impl Config {
    /// Creates a `Config` with the given record size limit.
    pub const fn new(max_record_size: u64) -> Self {
        Self { max_record_size }
    }

    /// Returns true if a record with `len` payload bytes is within the limit.
    pub const fn allows(&self, len: u64) -> bool {
        len <= self.max_record_size
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(MAX_RECORD_SIZE)
    }
}
