use once_cell::sync::Lazy;
use regex::Regex;

const INLINE_REDACTION: &str = "***REDACTED***";

static TOKEN_PARAM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([?&]token=)[^&]*").expect("token redaction regex"));

/// Masks the access token in a callback URL before it is logged or printed.
pub fn redact_callback_url(url: &str) -> String {
    TOKEN_PARAM
        .replace_all(url, format!("${{1}}{}", INLINE_REDACTION).as_str())
        .into_owned()
}
