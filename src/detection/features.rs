//! Request feature extraction.
//!
//! # Responsibilities
//! - Map a parsed [`RequestView`] to the fixed 22-slot feature vector the
//!   model was trained on
//!
//! # Design Decisions
//! - Pure and total: the same view always yields a bit-identical vector,
//!   missing fields contribute their documented defaults (usually 0)
//! - f32 end to end, matching the offline training pipeline
//! - Oversized inputs are truncated before analysis (combined path?query at
//!   [`MAX_COMBINED_LEN`] bytes, header names at [`MAX_HEADER_NAME_LEN`]);
//!   the scaler statistics assume exactly this preprocessing

use crate::detection::patterns::{
    is_common_header, LOGIN_KEYWORDS, SQLI_PATTERNS, SUSPICIOUS_UA_KEYWORDS, XSS_PATTERNS,
};
use crate::detection::text::{contains_any, parse_query_params, shannon_entropy, truncate_bytes};
use crate::http::request::{strip_prefix_ci, RequestView};

/// Width of the feature vector. Slots 19-21 are reserved (always zero) but
/// the weight matrix is calibrated to this exact width.
pub const N_FEATURES: usize = 22;

/// Analysis bound for the combined `path?query` buffer.
pub const MAX_COMBINED_LEN: usize = 383;

/// Analysis bound for a header name (bytes before the first `:`).
pub const MAX_HEADER_NAME_LEN: usize = 63;

/// Fixed-size numeric summary of one request.
pub type FeatureVector = [f32; N_FEATURES];

/// Extract the 22-slot feature vector from a request view.
pub fn extract(view: &RequestView) -> FeatureVector {
    let mut f: FeatureVector = [0.0; N_FEATURES];

    // f0-f3: method one-hot, exactly one slot set
    let is_get = view.method.eq_ignore_ascii_case("GET");
    let is_post = view.method.eq_ignore_ascii_case("POST");
    let is_head = view.method.eq_ignore_ascii_case("HEAD");
    f[0] = is_get as u8 as f32;
    f[1] = is_post as u8 as f32;
    f[2] = is_head as u8 as f32;
    f[3] = (!is_get && !is_post && !is_head) as u8 as f32;

    // f4: path length
    f[4] = view.path.len() as f32;

    // f5-f6: query parameter count and longest value
    let stats = parse_query_params(&view.query);
    f[5] = stats.num_params as f32;
    f[6] = stats.max_value_len as f32;

    // f7-f10: pattern flags and entropy over the bounded path?query buffer
    let combined = format!("{}?{}", view.path, view.query);
    let combined = truncate_bytes(&combined, MAX_COMBINED_LEN);
    f[7] = contains_any(combined, LOGIN_KEYWORDS) as u8 as f32;
    f[8] = contains_any(combined, SQLI_PATTERNS) as u8 as f32;
    f[9] = contains_any(combined, XSS_PATTERNS) as u8 as f32;
    f[10] = shannon_entropy(combined);

    // f11: header line count
    f[11] = view.header_lines.len() as f32;

    // f12-f13: user-agent length and suspicious-client flag
    let ua = view.user_agent.as_deref().unwrap_or("");
    f[12] = ua.len() as f32;
    f[13] = contains_any(ua, SUSPICIOUS_UA_KEYWORDS) as u8 as f32;

    // f14: declared content length
    f[14] = view.content_length as f32;

    // f15: any header name outside the allow-list (first match wins)
    for line in &view.header_lines {
        if let Some((name, _)) = line.split_once(':') {
            let name = truncate_bytes(name, MAX_HEADER_NAME_LEN);
            if !is_common_header(name) {
                f[15] = 1.0;
                break;
            }
        }
    }

    // f16-f18: raw remainder length after well-known header prefixes.
    // Leading whitespace is counted; the scaler statistics were computed
    // over exactly this measurement.
    for line in &view.header_lines {
        if let Some(rest) = strip_prefix_ci(line, "Accept-Language:") {
            f[16] = rest.len() as f32;
        } else if let Some(rest) = strip_prefix_ci(line, "Host:") {
            f[17] = rest.len() as f32;
        } else if let Some(rest) = strip_prefix_ci(line, "Referer:") {
            f[18] = rest.len() as f32;
        }
    }

    // f19-f21: reserved for per-client behavioral signals, permanently zero
    f
}
