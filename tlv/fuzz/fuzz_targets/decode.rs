#![no_main]

use commonware_tlv::{composite, from_bytes, to_bytes, Error};
use libfuzzer_sys::fuzz_target;

composite! {
    #[derive(Debug, Default, PartialEq)]
    struct Inner {
        id: u64 = tlv(1),
        label: Option<String> = tlv(2, optional),
    }
}

composite! {
    #[derive(Debug, Default, PartialEq)]
    struct Message {
        numbers: Vec<u64> = tlv(255, optional),
        text: String = tlv(65535, optional),
        flag: bool = tlv(7),
        inner: Option<Inner> = tlv(3, optional),
        children: Vec<Inner> = tlv(4, optional),
    }
}

fuzz_target!(|data: &[u8]| {
    // Untrusted input must never panic, only fail.
    let decoded: Message = match from_bytes(data.to_vec(), 1) {
        Ok(decoded) => decoded,
        Err(
            Error::LengthExceeded(_, _)
            | Error::UnexpectedType { .. }
            | Error::ExtraData(_)
            | Error::InvalidWidth(_)
            | Error::InvalidData(_, _)
            | Error::Io(_),
        ) => return,
        Err(err) => panic!("Unexpected error: {err}"),
    };

    // Anything accepted re-encodes to something that decodes to the same value.
    let encoded = to_bytes(&decoded, 1).expect("Failed to re-encode a decoded input!");
    let again: Message = from_bytes(encoded, 1).expect("Failed to decode a re-encoded input!");
    assert_eq!(decoded, again);
});
