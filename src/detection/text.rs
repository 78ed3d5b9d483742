//! Text primitives shared by the feature extractor.
//!
//! # Responsibilities
//! - Case-insensitive substring containment over pattern sets
//! - Shannon entropy (base 2) over raw bytes
//! - Bounded query-string parameter parsing
//!
//! # Design Decisions
//! - Entropy uses a 256-bucket byte histogram; empty input scores 0
//! - Containment is a presence flag that short-circuits on first match
//! - The query split truncates its input to [`MAX_QUERY_LEN`] bytes first;
//!   this is a trained-in approximation, not a bug to fix

/// Analysis bound for query strings. Longer inputs are truncated, not rejected.
pub const MAX_QUERY_LEN: usize = 255;

/// Returns true if `needle` occurs in `haystack`, ignoring ASCII case.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    let h = haystack.as_bytes();
    let n = needle.as_bytes();
    if n.is_empty() || n.len() > h.len() {
        return n.is_empty();
    }
    h.windows(n.len())
        .any(|w| w.eq_ignore_ascii_case(n))
}

/// Returns true if any pattern in the set occurs in `haystack`.
pub fn contains_any(haystack: &str, patterns: &[&str]) -> bool {
    patterns.iter().any(|p| contains_ci(haystack, p))
}

/// Shannon entropy (base 2) of the input bytes.
pub fn shannon_entropy(s: &str) -> f32 {
    let bytes = s.as_bytes();
    if bytes.is_empty() {
        return 0.0;
    }
    let mut freq = [0u32; 256];
    for &b in bytes {
        freq[b as usize] += 1;
    }
    let len = bytes.len() as f32;
    let mut ent = 0.0f32;
    for &count in freq.iter() {
        if count > 0 {
            let p = count as f32 / len;
            ent -= p * p.log2();
        }
    }
    ent
}

/// Parameter statistics of a query string: token count and the longest
/// value length (substring after the first `=`, or the whole token).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct QueryStats {
    pub num_params: usize,
    pub max_value_len: usize,
}

/// Split a query string on `&` and collect [`QueryStats`].
///
/// The input is truncated to [`MAX_QUERY_LEN`] bytes before splitting and
/// empty tokens are skipped, matching the trained preprocessing.
pub fn parse_query_params(query: &str) -> QueryStats {
    let mut stats = QueryStats::default();
    if query.is_empty() {
        return stats;
    }
    let bounded = truncate_bytes(query, MAX_QUERY_LEN);
    for token in bounded.split('&').filter(|t| !t.is_empty()) {
        stats.num_params += 1;
        let value = match token.split_once('=') {
            Some((_, v)) => v,
            None => token,
        };
        stats.max_value_len = stats.max_value_len.max(value.len());
    }
    stats
}

/// Truncate a string to at most `max` bytes without splitting a UTF-8
/// sequence.
pub fn truncate_bytes(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entropy_edge_cases() {
        assert_eq!(shannon_entropy(""), 0.0);
        assert_eq!(shannon_entropy("aaaa"), 0.0);
        assert!((shannon_entropy("ab") - 1.0).abs() < 1e-5);
    }

    #[test]
    fn entropy_of_uniform_four_symbols() {
        assert!((shannon_entropy("abcd") - 2.0).abs() < 1e-5);
    }

    #[test]
    fn containment_is_case_fold_symmetric() {
        assert!(contains_ci("/ADMIN/panel", "admin"));
        assert!(contains_ci("/admin/panel", "ADMIN"));
        assert!(!contains_ci("/index.html", "admin"));
    }

    #[test]
    fn containment_over_pattern_set_is_a_presence_flag() {
        let set = &["union", "select", "--"];
        assert!(contains_any("id=1 UNION SELECT *", set));
        assert!(contains_any("x--y", set));
        assert!(!contains_any("plain", set));
    }

    #[test]
    fn query_params_basic() {
        let s = parse_query_params("a=1&b=22&c");
        assert_eq!(s.num_params, 3);
        // "c" has no '=', so the whole token counts as the value
        assert_eq!(s.max_value_len, 2);
    }

    #[test]
    fn query_params_skip_empty_tokens() {
        let s = parse_query_params("a=1&&b=2&");
        assert_eq!(s.num_params, 2);
        assert_eq!(s.max_value_len, 1);
    }

    #[test]
    fn query_params_empty_value() {
        let s = parse_query_params("a=");
        assert_eq!(s.num_params, 1);
        assert_eq!(s.max_value_len, 0);
    }

    #[test]
    fn query_params_truncate_before_split() {
        // A 300-byte value gets cut at the 255-byte analysis bound:
        // 2 bytes of "v=" leave 253 bytes of value visible.
        let long = format!("v={}", "x".repeat(300));
        let s = parse_query_params(&long);
        assert_eq!(s.num_params, 1);
        assert_eq!(s.max_value_len, MAX_QUERY_LEN - 2);
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let s = "aé"; // 'é' is 2 bytes starting at offset 1
        assert_eq!(truncate_bytes(s, 2), "a");
        assert_eq!(truncate_bytes(s, 3), "aé");
    }
}
