//! Static pattern tables used by the feature extractor.
//!
//! # Responsibilities
//! - Hold the immutable keyword/marker sets the extractor tests against
//! - Group patterns by category (credentials, SQLi, XSS, client, headers)
//!
//! # Design Decisions
//! - Tables are `'static` slices: read-only for the process lifetime, no
//!   synchronization needed
//! - All matching is case-insensitive substring containment, never counting
//! - The sets mirror the statistics the model was trained with; editing them
//!   invalidates the scaler/weight constants

/// Credential and admin-panel path keywords.
pub const LOGIN_KEYWORDS: &[&str] = &[
    "admin", "login", "wp-admin", "wp-login", "phpmyadmin",
    "shell", "xmlrpc", "console", "manager", "cpanel", "roundcube",
];

/// SQL-injection and path-traversal markers.
pub const SQLI_PATTERNS: &[&str] = &[
    "union", "select", " or 1=1", "%27", "'", "\"", "--", "/*",
    "../", "..%2f", "%2e%2e/",
];

/// Cross-site-scripting markers.
pub const XSS_PATTERNS: &[&str] = &[
    "<script", "</script", "onerror=", "onload=", "javascript:",
    "<img", "alert(",
];

/// Keywords that flag scanner/tooling user agents.
pub const SUSPICIOUS_UA_KEYWORDS: &[&str] = &[
    "sqlmap", "nikto", "nessus", "acunetix", "wpscan",
    "nmap", "curl", "wget", "bot", "crawler", "spider", "scanner",
    "scripting engine", "compatible;", "nikto/",
];

/// Allow-list of well-known request header names (lowercase).
pub const COMMON_HEADERS: &[&str] = &[
    "host", "user-agent", "accept", "accept-language",
    "accept-encoding", "connection", "cookie", "referer",
    "content-length", "content-type", "upgrade-insecure-requests",
];

/// Returns true if `name` (already lowercased) is a well-known header name.
pub fn is_common_header(name: &str) -> bool {
    COMMON_HEADERS.iter().any(|h| h.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_header_lookup_is_case_insensitive() {
        assert!(is_common_header("Host"));
        assert!(is_common_header("user-agent"));
        assert!(!is_common_header("x-forwarded-for"));
    }

    #[test]
    fn tables_are_nonempty() {
        assert_eq!(LOGIN_KEYWORDS.len(), 11);
        assert_eq!(SQLI_PATTERNS.len(), 11);
        assert_eq!(XSS_PATTERNS.len(), 7);
        assert_eq!(COMMON_HEADERS.len(), 11);
    }
}
