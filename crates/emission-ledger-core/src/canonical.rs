//! Canonical CBOR encoding for deterministic document digests.
//!
//! Documents are first lowered to a [`ciborium::value::Value`] through their
//! serde representation, then written with:
//! - Map keys sorted by encoded byte comparison
//! - Integers in their smallest valid encoding
//! - Definite lengths only
//! - Floats always as 64-bit (major type 7, additional info 27)
//!
//! Floats are never shortened, so the same measured value always produces
//! the same bytes regardless of whether it would fit in a half or single.

use ciborium::value::Value;
use serde::Serialize;

use crate::error::CoreError;
use crate::types::DocumentDigest;

/// Encode any serializable document to canonical CBOR bytes.
pub fn canonical_bytes<T: Serialize + ?Sized>(document: &T) -> Result<Vec<u8>, CoreError> {
    let value = Value::serialized(document).map_err(|e| CoreError::Encoding(e.to_string()))?;
    let mut buf = Vec::new();
    encode_value_to(&mut buf, &value)?;
    Ok(buf)
}

/// Blake3 digest of a document's canonical bytes.
pub fn document_digest<T: Serialize + ?Sized>(document: &T) -> Result<DocumentDigest, CoreError> {
    let bytes = canonical_bytes(document)?;
    Ok(DocumentDigest(*blake3::hash(&bytes).as_bytes()))
}

fn encode_value_to(buf: &mut Vec<u8>, value: &Value) -> Result<(), CoreError> {
    match value {
        Value::Integer(i) => encode_integer(buf, *i),
        Value::Bytes(b) => encode_bytes(buf, b),
        Value::Text(s) => encode_text(buf, s),
        Value::Array(arr) => encode_array(buf, arr)?,
        Value::Map(entries) => encode_map_canonical(buf, entries)?,
        Value::Bool(b) => buf.push(if *b { 0xf5 } else { 0xf4 }),
        Value::Null => buf.push(0xf6),
        Value::Float(f) => encode_float(buf, *f)?,
        Value::Tag(tag, inner) => {
            encode_uint(buf, 6, *tag);
            encode_value_to(buf, inner)?;
        }
        _ => return Err(CoreError::Encoding("unsupported CBOR value type".into())),
    }
    Ok(())
}

fn encode_integer(buf: &mut Vec<u8>, i: ciborium::value::Integer) {
    let n: i128 = i.into();

    if n >= 0 {
        encode_uint(buf, 0, n as u64);
    } else {
        // -1 encodes as 0, -2 as 1, ...
        encode_uint(buf, 1, (-1 - n) as u64);
    }
}

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

fn encode_float(buf: &mut Vec<u8>, f: f64) -> Result<(), CoreError> {
    if !f.is_finite() {
        return Err(CoreError::Encoding(format!("non-finite float {f}")));
    }
    buf.push(0xfb);
    buf.extend_from_slice(&f.to_be_bytes());
    Ok(())
}

fn encode_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    encode_uint(buf, 2, bytes.len() as u64);
    buf.extend_from_slice(bytes);
}

fn encode_text(buf: &mut Vec<u8>, s: &str) {
    encode_uint(buf, 3, s.len() as u64);
    buf.extend_from_slice(s.as_bytes());
}

fn encode_array(buf: &mut Vec<u8>, arr: &[Value]) -> Result<(), CoreError> {
    encode_uint(buf, 4, arr.len() as u64);
    for item in arr {
        encode_value_to(buf, item)?;
    }
    Ok(())
}

/// Keys are sorted by their encoded bytes, not by their textual value.
fn encode_map_canonical(buf: &mut Vec<u8>, entries: &[(Value, Value)]) -> Result<(), CoreError> {
    let mut pairs = Vec::with_capacity(entries.len());
    for (k, v) in entries {
        let mut key_buf = Vec::new();
        encode_value_to(&mut key_buf, k)?;
        pairs.push((key_buf, v));
    }
    pairs.sort_by(|a, b| a.0.cmp(&b.0));

    encode_uint(buf, 5, pairs.len() as u64);
    for (key_bytes, value) in pairs {
        buf.extend_from_slice(&key_bytes);
        encode_value_to(buf, value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, HashMap};

    #[test]
    fn test_integer_encoding() {
        let mut buf = Vec::new();

        encode_uint(&mut buf, 0, 0);
        assert_eq!(buf, vec![0x00]);

        buf.clear();
        encode_uint(&mut buf, 0, 23);
        assert_eq!(buf, vec![0x17]);

        buf.clear();
        encode_uint(&mut buf, 0, 24);
        assert_eq!(buf, vec![0x18, 24]);

        buf.clear();
        encode_uint(&mut buf, 0, 256);
        assert_eq!(buf, vec![0x19, 0x01, 0x00]);

        buf.clear();
        encode_integer(&mut buf, (-1i64).into());
        assert_eq!(buf, vec![0x20]);
    }

    #[test]
    fn test_floats_are_always_double_width() {
        let bytes = canonical_bytes(&1.5f64).unwrap();
        assert_eq!(bytes.len(), 9);
        assert_eq!(bytes[0], 0xfb);
        assert_eq!(&bytes[1..], &1.5f64.to_be_bytes());
    }

    #[test]
    fn test_non_finite_float_rejected() {
        let result = canonical_bytes(&f64::NAN);
        assert!(matches!(result, Err(CoreError::Encoding(_))));
    }

    #[test]
    fn test_map_key_ordering_ignores_insertion_order() {
        let mut a = HashMap::new();
        a.insert("tocId", 1);
        a.insert("a", 2);
        a.insert("hocData", 3);

        let mut b = BTreeMap::new();
        b.insert("hocData", 3);
        b.insert("tocId", 1);
        b.insert("a", 2);

        assert_eq!(canonical_bytes(&a).unwrap(), canonical_bytes(&b).unwrap());
    }

    #[test]
    fn test_shorter_keys_sort_first() {
        let mut map = BTreeMap::new();
        map.insert("bb", 0);
        map.insert("c", 0);
        let bytes = canonical_bytes(&map).unwrap();
        // 0xa2 map(2), 0x61 'c' before 0x62 "bb"
        assert_eq!(bytes[0], 0xa2);
        assert_eq!(&bytes[1..3], &[0x61, b'c']);
    }

    #[test]
    fn test_digest_is_stable() {
        let doc = serde_json::json!({"mass": 5000.0, "shipmentId": "S1"});
        let d1 = document_digest(&doc).unwrap();
        let d2 = document_digest(&doc).unwrap();
        assert_eq!(d1, d2);

        let other = serde_json::json!({"mass": 5000.5, "shipmentId": "S1"});
        assert_ne!(d1, document_digest(&other).unwrap());
    }
}
