//! The reference message: the bytes below are what a standard protobuf
//! runtime produces for the same schema.

use protoflat::Message;

#[derive(Clone, Debug, Default, PartialEq, Message)]
struct Sample {
    #[protoflat(int32, tag = 1)]
    id: i32,

    #[protoflat(string, tag = 2)]
    text: String,

    #[protoflat(sint32, tag = 3, repeated)]
    data: Vec<i32>,

    #[protoflat(string, tag = 4, repeated)]
    messages: Vec<String>,
}

/// Same layout, `data` declared as plain `int32`.
#[derive(Clone, Debug, Default, PartialEq, Message)]
struct RawSample {
    #[protoflat(int32, tag = 1)]
    id: i32,

    #[protoflat(string, tag = 2)]
    text: String,

    #[protoflat(int32, tag = 3, repeated)]
    data: Vec<i32>,

    #[protoflat(string, tag = 4, repeated)]
    messages: Vec<String>,
}

#[rustfmt::skip]
const SAMPLE_BYTES: [u8; 35] = [
    0x08, 0xe8, 0x07,
    0x12, 0x06, b'H', b'e', b'l', b'l', b'o', b'!',
    0x1a, 0x06, 0x80, 0x89, 0x7a, 0x8f, 0x4e, 0x01,
    0x22, 0x06, b'H', b'e', b'l', b'l', b'o', b'!',
    0x22, 0x06, b'W', b'o', b'r', b'l', b'd', b'!',
];

#[rustfmt::skip]
const RAW_SAMPLE_BYTES: [u8; 52] = [
    0x08, 0xe8, 0x07,
    0x12, 0x06, b'H', b'e', b'l', b'l', b'o', b'!',
    0x1a, 0x17,
    0xc0, 0x84, 0x3d,
    0xf8, 0xd8, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x01,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x01,
    0x22, 0x06, b'H', b'e', b'l', b'l', b'o', b'!',
    0x22, 0x06, b'W', b'o', b'r', b'l', b'd', b'!',
];

fn sample() -> Sample {
    Sample {
        id: 1000,
        text: "Hello!".to_string(),
        data: vec![1000000, -5000, -1],
        messages: vec!["Hello!".to_string(), "World!".to_string()],
    }
}

fn raw_sample() -> RawSample {
    RawSample {
        id: 1000,
        text: "Hello!".to_string(),
        data: vec![1000000, -5000, -1],
        messages: vec!["Hello!".to_string(), "World!".to_string()],
    }
}

#[test]
fn test_sample_bytes() {
    let message = sample();
    let bytes = protoflat::serialize(&message);

    assert_eq!(bytes, SAMPLE_BYTES);
    assert_eq!(message.size(), SAMPLE_BYTES.len());
    assert_eq!(protoflat::deserialize::<Sample>(&SAMPLE_BYTES), Ok(message));
}

#[test]
fn test_raw_sample_bytes() {
    let message = raw_sample();
    let bytes = protoflat::serialize(&message);

    assert_eq!(bytes, RAW_SAMPLE_BYTES);
    assert_eq!(protoflat::deserialize::<RawSample>(&RAW_SAMPLE_BYTES), Ok(message));
}

#[test]
fn test_buffer_reuse() {
    let message = sample();
    let mut buf = Vec::new();

    for _ in 0..3 {
        buf.clear();
        protoflat::serialize_into(&message, &mut buf);
        assert_eq!(buf, SAMPLE_BYTES);
    }
}

#[test]
fn test_idempotence() {
    let message = sample();

    assert_eq!(message.size(), message.size());
    assert_eq!(protoflat::serialize(&message), protoflat::serialize(&message));
}

#[test]
fn test_truncated_anywhere_fails() {
    // every strict prefix that ends inside a field must be rejected
    let field_ends = [3, 11, 19, 27, 35];

    for len in 1..SAMPLE_BYTES.len() {
        let result = protoflat::deserialize::<Sample>(&SAMPLE_BYTES[..len]);

        match field_ends.contains(&len) {
            true => assert!(result.is_ok(), "prefix of {} bytes", len),
            false => assert_eq!(
                result,
                Err(protoflat::Error::TruncatedInput),
                "prefix of {} bytes",
                len
            ),
        }
    }
}
