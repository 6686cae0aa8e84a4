//! Reversible text-safe encoding of variable values.
//!
//! Values are stored as standard (padded) base64 so delimiters such as `,`,
//! `=`, and newlines survive the backend unambiguously.
//!
//! Decoding is best-effort: text that is not valid base64, or that decodes
//! to bytes that are not UTF-8, is returned unchanged. Records are only ever
//! written by this crate, so foreign values are not expected; the fallback
//! keeps hand-edited documents readable instead of failing the whole read.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::variables::Variable;

pub fn encode(value: &str) -> String {
    STANDARD.encode(value.as_bytes())
}

pub fn decode(text: &str) -> String {
    STANDARD
        .decode(text)
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .unwrap_or_else(|| text.to_string())
}

/// Encode every value in place, immediately before a write.
pub fn encode_all(variables: &mut [Variable]) {
    for variable in variables {
        variable.value = encode(&variable.value);
    }
}

/// Decode every value in place, immediately after a fetch.
pub fn decode_all(variables: &mut [Variable]) {
    for variable in variables {
        variable.value = decode(&variable.value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_encodings() {
        assert_eq!(encode("two"), "dHdv");
        assert_eq!(encode("four"), "Zm91cg==");
        assert_eq!(encode("six"), "c2l4");
    }

    #[test]
    fn round_trip_with_delimiters() {
        for value in ["", "a,b=c", "line1\nline2", "ünïcødé ✓", "  padded  "] {
            assert_eq!(decode(&encode(value)), value);
        }
    }

    #[test]
    fn invalid_base64_left_unchanged() {
        assert_eq!(decode("not base64!"), "not base64!");
    }

    #[test]
    fn non_utf8_payload_left_unchanged() {
        // "//79" decodes to 0xFF 0xFE 0xFD
        assert_eq!(decode("//79"), "//79");
    }

    #[test]
    fn encode_and_decode_all() {
        let mut vars = vec![Variable::new("one", "two"), Variable::new("three", "four")];
        encode_all(&mut vars);
        assert_eq!(vars[0].value, "dHdv");
        assert_eq!(vars[1].value, "Zm91cg==");
        decode_all(&mut vars);
        assert_eq!(vars[0].value, "two");
        assert_eq!(vars[1].value, "four");
    }
}
