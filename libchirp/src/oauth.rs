//! OAuth 1.0a request signing (RFC 5849, HMAC-SHA1 variant)
//!
//! The signature is computed over a canonical "base string" assembled from
//! the HTTP method, the bare endpoint URL, and the full parameter set.
//! The exact percent-encoding and ordering rules below must be reproduced
//! byte-for-byte or the receiving service rejects the request.

use std::borrow::Cow;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use sha1::Sha1;
use uuid::Uuid;

use crate::credentials::Credentials;

type HmacSha1 = Hmac<Sha1>;

// https://tools.ietf.org/html/rfc5849#section-3.6
// * ALPHA, DIGIT, '-', '.', '_', '~' MUST NOT be encoded.
// * All other characters MUST be encoded, with uppercase hex digits.
//   Space becomes "%20", never "+".
const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";
pub const OAUTH_VERSION: &str = "1.0";

/// Percent-encode a string per RFC 5849 §3.6
pub fn percent_encode(input: &str) -> Cow<'_, str> {
    utf8_percent_encode(input, UNRESERVED).into()
}

/// Canonical parameter string: encode every key and value, sort by encoded
/// key (ties broken by encoded value), join as `key=value` pairs with `&`.
fn parameter_string(params: &[(&str, &str)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| {
            (
                percent_encode(k).into_owned(),
                percent_encode(v).into_owned(),
            )
        })
        .collect();
    encoded.sort();

    encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

/// Signature base string: `METHOD&enc(url)&enc(parameter_string)`
///
/// Parameter values end up encoded twice here: once inside the parameter
/// string and again when the whole parameter string is encoded.
pub fn signature_base_string(method: &str, url: &str, params: &[(&str, &str)]) -> String {
    format!(
        "{}&{}&{}",
        percent_encode(&method.to_ascii_uppercase()),
        percent_encode(url),
        percent_encode(&parameter_string(params))
    )
}

/// Signing key: `enc(consumer_secret)&enc(token_secret)`
pub fn signing_key(consumer_secret: &str, token_secret: &str) -> String {
    format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret)
    )
}

/// Base64-encoded HMAC-SHA1 signature over the base string
///
/// Pure function of its inputs; nonce and timestamp are supplied by the
/// caller through `params`.
pub fn sign(
    method: &str,
    url: &str,
    params: &[(&str, &str)],
    consumer_secret: &str,
    token_secret: &str,
) -> String {
    let base_string = signature_base_string(method, url, params);
    sign_base_string(&base_string, consumer_secret, token_secret)
}

/// Sign an already-assembled base string
pub fn sign_base_string(base_string: &str, consumer_secret: &str, token_secret: &str) -> String {
    let key = signing_key(consumer_secret, token_secret);
    // HMAC accepts keys of any length, so new_from_slice never fails.
    let mut mac =
        HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(base_string.as_bytes());
    BASE64.encode(mac.finalize().into_bytes())
}

/// Fresh 32-hex-character nonce, generated per request and never reused
pub fn nonce() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Current Unix time as a decimal string
pub fn timestamp() -> String {
    chrono::Utc::now().timestamp().to_string()
}

/// `Authorization` header value: `OAuth ` followed by comma-space-joined
/// `key="enc(value)"` pairs, restricted to `oauth_*` parameters and sorted
/// lexicographically by key.
pub fn authorization_header(params: &[(&str, &str)]) -> String {
    let mut oauth_params: Vec<(String, String)> = params
        .iter()
        .filter(|(k, _)| k.starts_with("oauth_"))
        .map(|(k, v)| {
            (
                percent_encode(k).into_owned(),
                percent_encode(v).into_owned(),
            )
        })
        .collect();
    oauth_params.sort();

    let joined = oauth_params
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, v))
        .collect::<Vec<_>>()
        .join(", ");

    format!("OAuth {}", joined)
}

/// A fully signed request
///
/// Holds the base string that was hashed, the resulting signature, and the
/// `Authorization` header carrying it. The parameter set used for the base
/// string and for the header are identical except that `oauth_signature`
/// is added after the base string is computed.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    pub base_string: String,
    pub signature: String,
    pub authorization: String,
}

impl SignedRequest {
    /// Sign a request with explicit nonce and timestamp
    ///
    /// `extra_params` carries the non-protocol parameters (here: `status`).
    /// Callers wanting fresh per-request values pass `oauth::nonce()` and
    /// `oauth::timestamp()`.
    pub fn new(
        method: &str,
        url: &str,
        extra_params: &[(&str, &str)],
        credentials: &Credentials,
        nonce: &str,
        timestamp: &str,
    ) -> Self {
        let mut params: Vec<(&str, &str)> = vec![
            ("oauth_consumer_key", &credentials.consumer_key),
            ("oauth_nonce", nonce),
            ("oauth_signature_method", SIGNATURE_METHOD),
            ("oauth_timestamp", timestamp),
            ("oauth_token", &credentials.access_token),
            ("oauth_version", OAUTH_VERSION),
        ];
        params.extend(extra_params.iter().copied());

        let base_string = signature_base_string(method, url, &params);
        let signature = sign_base_string(
            &base_string,
            &credentials.consumer_secret,
            &credentials.access_token_secret,
        );

        params.push(("oauth_signature", &signature));
        let authorization = authorization_header(&params);

        Self {
            base_string,
            signature,
            authorization,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use percent_encoding::percent_decode_str;

    const URL: &str = "https://api.twitter.com/1.1/statuses/update.json";

    fn spec_params() -> Vec<(&'static str, &'static str)> {
        vec![
            ("status", "hello world"),
            ("oauth_consumer_key", "CK"),
            ("oauth_nonce", "abc123"),
            ("oauth_signature_method", "HMAC-SHA1"),
            ("oauth_timestamp", "1700000000"),
            ("oauth_token", "TK"),
            ("oauth_version", "1.0"),
        ]
    }

    #[test]
    fn test_percent_encode_twitter_examples() {
        // https://developer.twitter.com/en/docs/authentication/oauth-1-0a/percent-encoding-parameters
        assert_eq!(percent_encode("Ladies + Gentlemen"), "Ladies%20%2B%20Gentlemen");
        assert_eq!(percent_encode("An encoded string!"), "An%20encoded%20string%21");
        assert_eq!(percent_encode("Dogs, Cats & Mice"), "Dogs%2C%20Cats%20%26%20Mice");
        assert_eq!(percent_encode("☃"), "%E2%98%83");
        assert_eq!(percent_encode("unreserved-._~09AZaz"), "unreserved-._~09AZaz");
    }

    #[test]
    fn test_percent_encode_round_trips() {
        let inputs = ["hello world", "a=b&c=d", "100% of ~tildes~", "☃ snow"];
        for input in inputs {
            let encoded = percent_encode(input).into_owned();
            let decoded = percent_decode_str(&encoded)
                .decode_utf8()
                .expect("Failed to decode");
            assert_eq!(decoded, input);
        }
    }

    #[test]
    fn test_base_string_matches_reference() {
        let base = signature_base_string("POST", URL, &spec_params());
        assert_eq!(
            base,
            "POST&https%3A%2F%2Fapi.twitter.com%2F1.1%2Fstatuses%2Fupdate.json&\
             oauth_consumer_key%3DCK%26oauth_nonce%3Dabc123%26\
             oauth_signature_method%3DHMAC-SHA1%26oauth_timestamp%3D1700000000%26\
             oauth_token%3DTK%26oauth_version%3D1.0%26status%3Dhello%2520world"
        );
    }

    #[test]
    fn test_signature_matches_reference() {
        // Expected value computed with an independent RFC 5849 implementation.
        let signature = sign("POST", URL, &spec_params(), "CS", "TS");
        assert_eq!(signature, "FsAp5nqevqE3ixLf5Xk0WpCw0xo=");
    }

    #[test]
    fn test_signature_with_special_characters() {
        let params = vec![
            ("status", "Dogs, Cats & Mice ~ 100%"),
            ("oauth_consumer_key", "key with space"),
            ("oauth_nonce", "n0nce"),
            ("oauth_signature_method", "HMAC-SHA1"),
            ("oauth_timestamp", "1700000001"),
            ("oauth_token", "tok/en"),
            ("oauth_version", "1.0"),
        ];
        let signature = sign("POST", URL, &params, "c&s=ecret", "t s/ecret");
        assert_eq!(signature, "7SSLejsETo/RgLBZ2S+duIKRd5w=");
    }

    #[test]
    fn test_signing_key_encodes_secrets() {
        assert_eq!(signing_key("c&s=ecret", "t s/ecret"), "c%26s%3Decret&t%20s%2Fecret");
        assert_eq!(signing_key("CS", "TS"), "CS&TS");
    }

    #[test]
    fn test_sign_is_deterministic() {
        let a = sign("POST", URL, &spec_params(), "CS", "TS");
        let b = sign("POST", URL, &spec_params(), "CS", "TS");
        assert_eq!(a, b);
    }

    #[test]
    fn test_insertion_order_does_not_change_base_string() {
        let mut reversed = spec_params();
        reversed.reverse();

        assert_eq!(
            signature_base_string("POST", URL, &spec_params()),
            signature_base_string("POST", URL, &reversed)
        );
    }

    #[test]
    fn test_method_is_uppercased() {
        assert_eq!(
            signature_base_string("post", URL, &spec_params()),
            signature_base_string("POST", URL, &spec_params())
        );
    }

    #[test]
    fn test_changing_any_parameter_changes_signature() {
        let reference = sign("POST", URL, &spec_params(), "CS", "TS");

        for i in 0..spec_params().len() {
            let mut params = spec_params();
            let changed = format!("{}x", params[i].1);
            params[i].1 = changed.as_str();
            assert_ne!(
                sign("POST", URL, &params, "CS", "TS"),
                reference,
                "changing parameter {:?} did not change the signature",
                spec_params()[i].0
            );
        }
    }

    #[test]
    fn test_authorization_header_reference() {
        let mut params = spec_params();
        params.push(("oauth_signature", "FsAp5nqevqE3ixLf5Xk0WpCw0xo="));

        assert_eq!(
            authorization_header(&params),
            "OAuth oauth_consumer_key=\"CK\", oauth_nonce=\"abc123\", \
             oauth_signature=\"FsAp5nqevqE3ixLf5Xk0WpCw0xo%3D\", \
             oauth_signature_method=\"HMAC-SHA1\", oauth_timestamp=\"1700000000\", \
             oauth_token=\"TK\", oauth_version=\"1.0\""
        );
    }

    #[test]
    fn test_authorization_header_excludes_payload_parameters() {
        let header = authorization_header(&spec_params());
        assert!(!header.contains("status"));
        assert!(header.starts_with("OAuth oauth_consumer_key="));
    }

    #[test]
    fn test_signed_request_matches_piecewise_construction() {
        let credentials = Credentials {
            consumer_key: "CK".to_string(),
            consumer_secret: "CS".to_string(),
            access_token: "TK".to_string(),
            access_token_secret: "TS".to_string(),
        };

        let signed = SignedRequest::new(
            "POST",
            URL,
            &[("status", "hello world")],
            &credentials,
            "abc123",
            "1700000000",
        );

        assert_eq!(signed.signature, "FsAp5nqevqE3ixLf5Xk0WpCw0xo=");
        assert_eq!(signed.base_string, signature_base_string("POST", URL, &spec_params()));
        assert!(signed.authorization.contains("oauth_signature=\"FsAp5nqevqE3ixLf5Xk0WpCw0xo%3D\""));
        // The payload parameter is signed but never leaks into the header.
        assert!(!signed.authorization.contains("status"));
    }

    #[test]
    fn test_nonce_is_fresh_32_hex_chars() {
        let a = nonce();
        let b = nonce();

        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn test_timestamp_is_decimal_unix_time() {
        let ts: i64 = timestamp().parse().expect("timestamp should be decimal");
        // Sanity bound: after 2020-01-01.
        assert!(ts > 1_577_836_800);
    }
}
