//! Response body decoding.
//!
//! A `charset=` declared in the `Content-Type` header wins. Without one (or with
//! a label `encoding_rs` does not know) the encoding is guessed from the bytes.

use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static CHARSET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"charset=([^;]+)").expect("charset pattern is valid"));

/// Returns the raw charset label from a `Content-Type` value, if any.
pub fn charset_from_content_type(content_type: &str) -> Option<&str> {
    CHARSET_RE
        .captures(content_type)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().trim().trim_matches(|c| c == '"' || c == '\''))
        .filter(|label| !label.is_empty())
}

pub fn declared_encoding(content_type: Option<&str>) -> Option<&'static Encoding> {
    let label = charset_from_content_type(content_type?)?;
    let encoding = Encoding::for_label(label.as_bytes());
    if encoding.is_none() {
        debug!("Unknown charset label {:?}, falling back to detection", label);
    }
    encoding
}

pub fn detect_encoding(body: &[u8]) -> &'static Encoding {
    let mut detector = EncodingDetector::new();
    detector.feed(body, true);
    detector.guess(None, true)
}

/// Decodes `body` to text using the declared charset, else a detected one.
pub fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    let encoding = match declared_encoding(content_type) {
        Some(encoding) => encoding,
        None => {
            let guessed = detect_encoding(body);
            debug!("No usable charset declared, detected {}", guessed.name());
            guessed
        }
    };

    let (text, used, had_errors) = encoding.decode(body);
    if had_errors {
        debug!("Malformed {} sequences replaced while decoding", used.name());
    }
    text.into_owned()
}
