#![no_main]

use arbitrary::Arbitrary;
use bytes::Bytes;
use commonware_tlv::{
    composite, from_bytes, to_bytes, varnum, Error, Field, Reader, MAX_RECORD_SIZE,
};
use libfuzzer_sys::fuzz_target;
use std::fmt::Debug;

composite! {
    #[derive(Debug, Default, Clone, PartialEq)]
    struct Inner {
        id: u64 = tlv(1),
        label: Option<String> = tlv(2, optional),
    }
}

composite! {
    #[derive(Debug, Default, Clone, PartialEq)]
    struct Message {
        numbers: Vec<u64> = tlv(255, optional),
        text: String = tlv(65535),
        raw: Bytes = tlv(4294967295),
        flag: bool = tlv(18446744073709551615),
        inner: Option<Inner> = tlv(3, optional),
        children: Vec<Inner> = tlv(4, optional),
    }
}

#[derive(Arbitrary, Debug)]
struct InnerInput {
    id: u64,
    label: Option<String>,
}

impl From<InnerInput> for Inner {
    fn from(input: InnerInput) -> Self {
        Self {
            id: input.id,
            label: input.label,
        }
    }
}

#[derive(Arbitrary, Debug)]
struct MessageInput {
    numbers: Vec<u64>,
    text: String,
    raw: Vec<u8>,
    flag: bool,
    inner: Option<InnerInput>,
    children: Vec<InnerInput>,
}

impl From<MessageInput> for Message {
    fn from(input: MessageInput) -> Self {
        Self {
            numbers: input.numbers,
            text: input.text,
            raw: Bytes::from(input.raw),
            flag: input.flag,
            inner: input.inner.map(Inner::from),
            children: input.children.into_iter().map(Inner::from).collect(),
        }
    }
}

#[derive(Arbitrary, Debug)]
enum FuzzInput {
    VarNum(u64),
    U64 { typ: u64, value: u64 },
    Flag { typ: u64, value: bool },
    Text { typ: u64, value: String },
    Raw { typ: u64, value: Vec<u8> },
    Repeated { typ: u64, value: Vec<u64> },
    Message { typ: u64, value: MessageInput },
}

fn roundtrip_varnum(value: u64) {
    let mut buf: Vec<u8> = Vec::new();
    varnum::write(value, &mut buf);
    assert_eq!(buf.len(), varnum::size(value));
    let decoded = varnum::read(&mut &buf[..]).expect("Failed to decode VarNum!");
    assert_eq!(value, decoded);
}

fn roundtrip<F: Field + Default + PartialEq + Debug>(value: F, typ: u64) {
    let encoded = match to_bytes(&value, typ) {
        Ok(encoded) => encoded,
        Err(Error::LengthExceeded(len, max)) => {
            assert!(len > max);
            return;
        }
        Err(err) => panic!("Failed to encode: {err}"),
    };

    let decoded: F = from_bytes(encoded.clone(), typ)
        .expect("Failed to decode a successfully encoded input!");
    assert_eq!(value, decoded);

    // Every record produced is within the limit.
    let mut reader = Reader::new(&encoded[..]);
    while reader.peek().expect("Failed to peek!").is_some() {
        let record = reader.read_record().expect("Failed to read record!");
        assert!(record.value.len() as u64 <= MAX_RECORD_SIZE);
    }
}

fn fuzz(input: FuzzInput) {
    match input {
        FuzzInput::VarNum(v) => roundtrip_varnum(v),
        FuzzInput::U64 { typ, value } => roundtrip(value, typ),
        FuzzInput::Flag { typ, value } => roundtrip(value, typ),
        FuzzInput::Text { typ, value } => roundtrip(value, typ),
        FuzzInput::Raw { typ, value } => roundtrip(Bytes::from(value), typ),
        FuzzInput::Repeated { typ, value } => {
            // An empty repeated field has no records and cannot be decoded on its own.
            if !value.is_empty() {
                roundtrip(value, typ);
            }
        }
        FuzzInput::Message { typ, value } => roundtrip(Message::from(value), typ),
    };
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
