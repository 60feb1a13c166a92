//! Request path decoding and re-encoding.
//!
//! Prefixes are matched against the decoded path, so `%2F` counts as a
//! separator. A stripped remainder is re-encoded before it goes on the wire;
//! paths forwarded whole keep their original encoding.

use std::borrow::Cow;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Bytes left as-is in a path: unreserved marks plus the sub-delimiters,
/// `:`, `@` and `/`.
const PATH: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b',')
    .remove(b'/')
    .remove(b':')
    .remove(b';')
    .remove(b'=')
    .remove(b'@');

/// Percent-decode `raw`. `None` when the decoded bytes are not UTF-8.
pub fn decode(raw: &str) -> Option<Cow<'_, str>> {
    percent_decode_str(raw).decode_utf8().ok()
}

/// Percent-encode a decoded path for use as a request target.
pub fn encode(path: &str) -> Cow<'_, str> {
    utf8_percent_encode(path, PATH).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode() {
        assert_eq!(decode("/a%20b").unwrap(), "/a b");
        assert_eq!(decode("/services%2Fgo-apis").unwrap(), "/services/go-apis");
        assert_eq!(decode("/plain").unwrap(), "/plain");
        assert!(decode("/bad%FF").is_none());
    }

    #[test]
    fn test_encode() {
        assert_eq!(encode("/widgets"), "/widgets");
        assert_eq!(encode("/a b"), "/a%20b");
        assert_eq!(encode("/q?#"), "/q%3F%23");
        assert_eq!(encode("/caf\u{e9}"), "/caf%C3%A9");
        assert_eq!(encode("/v1;x=1,y@z:8"), "/v1;x=1,y@z:8");
        assert_eq!(encode("/100%"), "/100%25");
        assert_eq!(encode(""), "");
    }
}
