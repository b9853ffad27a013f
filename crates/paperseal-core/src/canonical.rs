//! Canonical CBOR encoding of the anchor payload.
//!
//! The payload is the ordered section list plus the submission timestamp.
//! Encoding follows RFC 8949 Core Deterministic Encoding:
//! - Map keys sorted by encoded byte comparison
//! - Integers use smallest valid encoding
//! - Definite lengths only
//! - No floats
//!
//! The same sections and timestamp always produce identical bytes, and
//! therefore an identical [`ContentAddress`].

use ciborium::value::Value;

use crate::crypto::ContentAddress;
use crate::section::Section;

/// Version of the payload layout.
pub const PAYLOAD_VERSION: u8 = 0;

/// Payload field keys (integer keys for compact encoding).
mod keys {
    pub const VERSION: u64 = 0;
    pub const TIMESTAMP: u64 = 1;
    pub const SECTIONS: u64 = 2;
}

/// Section field keys.
mod section_keys {
    pub const ID: u64 = 0;
    pub const KIND: u64 = 1;
    pub const TOKEN_ID: u64 = 2;
    pub const HASH: u64 = 3;
    pub const TIMESTAMP: u64 = 4;
    pub const SIMILARITY: u64 = 5;
}

/// Encode the anchor payload to canonical bytes.
pub fn payload_bytes(sections: &[Section], timestamp: i64) -> Vec<u8> {
    let sections: Vec<Value> = sections.iter().map(section_to_cbor_value).collect();

    let value = Value::Map(vec![
        (
            Value::Integer(keys::VERSION.into()),
            Value::Integer(PAYLOAD_VERSION.into()),
        ),
        (
            Value::Integer(keys::TIMESTAMP.into()),
            Value::Integer(timestamp.into()),
        ),
        (Value::Integer(keys::SECTIONS.into()), Value::Array(sections)),
    ]);

    let mut buf = Vec::new();
    encode_value_to(&mut buf, &value);
    buf
}

/// Content address of the anchor payload.
pub fn payload_address(sections: &[Section], timestamp: i64) -> ContentAddress {
    ContentAddress::derive(&payload_bytes(sections, timestamp))
}

fn section_to_cbor_value(section: &Section) -> Value {
    let similarity = match section.similarity() {
        Some(s) => Value::Integer(s.into()),
        None => Value::Null,
    };

    Value::Map(vec![
        (
            Value::Integer(section_keys::ID.into()),
            Value::Text(section.id().to_string()),
        ),
        (
            Value::Integer(section_keys::KIND.into()),
            Value::Text(section.kind().label().to_string()),
        ),
        (
            Value::Integer(section_keys::TOKEN_ID.into()),
            Value::Text(section.token_id().as_str().to_string()),
        ),
        (
            Value::Integer(section_keys::HASH.into()),
            Value::Bytes(section.hash().0.to_vec()),
        ),
        (
            Value::Integer(section_keys::TIMESTAMP.into()),
            Value::Integer(section.timestamp().into()),
        ),
        (Value::Integer(section_keys::SIMILARITY.into()), similarity),
    ])
}

/// Recursively encode a CBOR value.
///
/// Only the value types built in this module are supported.
fn encode_value_to(buf: &mut Vec<u8>, value: &Value) {
    match value {
        Value::Integer(i) => encode_integer(buf, *i),
        Value::Bytes(b) => {
            encode_uint(buf, 2, b.len() as u64);
            buf.extend_from_slice(b);
        }
        Value::Text(s) => {
            encode_uint(buf, 3, s.len() as u64);
            buf.extend_from_slice(s.as_bytes());
        }
        Value::Array(arr) => {
            encode_uint(buf, 4, arr.len() as u64);
            for item in arr {
                encode_value_to(buf, item);
            }
        }
        Value::Map(entries) => encode_map_canonical(buf, entries),
        Value::Bool(b) => buf.push(if *b { 0xf5 } else { 0xf4 }),
        Value::Null => buf.push(0xf6),
        _ => unreachable!("payload values are built from integers, text, bytes, arrays and maps"),
    }
}

/// Encode a CBOR integer (major types 0 and 1).
fn encode_integer(buf: &mut Vec<u8>, i: ciborium::value::Integer) {
    let n: i128 = i.into();

    if n >= 0 {
        encode_uint(buf, 0, n as u64);
    } else {
        // CBOR encodes -1 as 0, -2 as 1, etc.
        encode_uint(buf, 1, (-1 - n) as u64);
    }
}

/// Encode an unsigned integer with the given major type.
fn encode_uint(buf: &mut Vec<u8>, major: u8, n: u64) {
    let mt = major << 5;
    if n < 24 {
        buf.push(mt | (n as u8));
    } else if n <= 0xff {
        buf.push(mt | 24);
        buf.push(n as u8);
    } else if n <= 0xffff {
        buf.push(mt | 25);
        buf.extend_from_slice(&(n as u16).to_be_bytes());
    } else if n <= 0xffff_ffff {
        buf.push(mt | 26);
        buf.extend_from_slice(&(n as u32).to_be_bytes());
    } else {
        buf.push(mt | 27);
        buf.extend_from_slice(&n.to_be_bytes());
    }
}

/// Encode a map with keys sorted by their encoded bytes.
fn encode_map_canonical(buf: &mut Vec<u8>, entries: &[(Value, Value)]) {
    let mut pairs: Vec<(Vec<u8>, &Value)> = entries
        .iter()
        .map(|(k, v)| {
            let mut key_buf = Vec::new();
            encode_value_to(&mut key_buf, k);
            (key_buf, v)
        })
        .collect();

    pairs.sort_by(|a, b| a.0.cmp(&b.0));

    encode_uint(buf, 5, pairs.len() as u64);
    for (key_bytes, value) in pairs {
        buf.extend_from_slice(&key_bytes);
        encode_value_to(buf, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fingerprint::Fingerprinter;
    use crate::provider::{FixedClock, SeededIds};
    use crate::segment::RawSection;
    use crate::types::SectionKind;
    use std::sync::Arc;

    fn sections(seed: u64) -> Vec<Section> {
        let fp = Fingerprinter::new(Arc::new(FixedClock::new(1_000)), Arc::new(SeededIds::new(seed)));
        let mut out = fp.fingerprint_all(vec![
            RawSection {
                id: "section-0".into(),
                kind: SectionKind::Abstract,
                title: "Abstract".into(),
                content: "Abstract text".into(),
            },
            RawSection {
                id: "section-5".into(),
                kind: SectionKind::Conclusion,
                title: "Conclusion".into(),
                content: "Conclusion text".into(),
            },
        ]);
        out[0].record_score(12, Some(0)).unwrap();
        out
    }

    #[test]
    fn test_payload_deterministic() {
        let a = payload_bytes(&sections(1), 5_000);
        let b = payload_bytes(&sections(1), 5_000);
        assert_eq!(a, b);
        assert_eq!(payload_address(&sections(1), 5_000), payload_address(&sections(1), 5_000));
    }

    #[test]
    fn test_payload_sensitive_to_inputs() {
        let base = payload_address(&sections(1), 5_000);
        assert_ne!(base, payload_address(&sections(1), 5_001));
        assert_ne!(base, payload_address(&sections(2), 5_000));
    }

    #[test]
    fn test_payload_is_valid_cbor() {
        let bytes = payload_bytes(&sections(1), 5_000);
        let value: Value = ciborium::de::from_reader(bytes.as_slice()).unwrap();

        let Value::Map(entries) = value else {
            panic!("expected map");
        };
        assert_eq!(entries.len(), 3);
        let Value::Array(secs) = &entries[2].1 else {
            panic!("expected sections array");
        };
        assert_eq!(secs.len(), 2);
    }

    #[test]
    fn test_integer_encoding() {
        let mut buf = Vec::new();
        encode_uint(&mut buf, 0, 23);
        assert_eq!(buf, vec![0x17]);

        buf.clear();
        encode_uint(&mut buf, 0, 500);
        assert_eq!(buf, vec![0x19, 0x01, 0xf4]);

        buf.clear();
        encode_integer(&mut buf, (-1i64).into());
        assert_eq!(buf, vec![0x20]);
    }
}
