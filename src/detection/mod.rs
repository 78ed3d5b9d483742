//! Detection pipeline subsystem.
//!
//! # Data Flow
//! ```text
//! RequestView
//!     → features.rs (22-slot numeric vector, reads patterns.rs + text.rs)
//!     → scaler.rs   (per-slot affine normalization)
//!     → model.rs    (MLP inference → probability)
//!     → classify    (threshold comparison → verdict)
//! ```
//!
//! # Design Decisions
//! - The whole pipeline is pure: same view in, same probability out
//! - All tables and weights are compiled-in constants from the offline
//!   training export; nothing here mutates at runtime
//! - Truncation bounds (query, combined buffer, header names) are part of
//!   the trained preprocessing and must match the extractor exactly

pub mod features;
pub mod model;
pub mod patterns;
pub mod scaler;
pub mod text;

use crate::http::request::RequestView;

/// Probability plus the thresholded verdict for one request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassificationResult {
    /// Attack probability in `[0, 1]`.
    pub probability: f32,
    /// True when `probability >= threshold`.
    pub malicious: bool,
}

/// Run the full detection pipeline over a parsed request.
pub fn score_request(view: &RequestView, threshold: f32) -> ClassificationResult {
    let raw = features::extract(view);
    let scaled = scaler::scale(&raw);
    let probability = model::infer(&scaled);
    ClassificationResult {
        probability,
        malicious: model::classify(probability, threshold),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::model::DEFAULT_THRESHOLD;

    fn benign_view() -> RequestView {
        RequestView {
            method: "GET".into(),
            path: "/index.html".into(),
            query: String::new(),
            user_agent: Some("Mozilla/5.0".into()),
            content_length: 0,
            header_lines: vec![
                "Host: localhost".into(),
                "User-Agent: Mozilla/5.0".into(),
                "Accept: text/html".into(),
            ],
        }
    }

    fn attack_view() -> RequestView {
        RequestView {
            method: "GET".into(),
            path: "/admin/login".into(),
            query: "user=admin' OR 1=1 --".into(),
            user_agent: Some("sqlmap/1.0".into()),
            content_length: 0,
            header_lines: vec![
                "Host: localhost".into(),
                "User-Agent: sqlmap/1.0".into(),
            ],
        }
    }

    #[test]
    fn benign_request_passes() {
        let result = score_request(&benign_view(), DEFAULT_THRESHOLD);
        assert!(!result.malicious, "p = {}", result.probability);
    }

    #[test]
    fn attack_request_is_flagged() {
        let result = score_request(&attack_view(), DEFAULT_THRESHOLD);
        assert!(result.malicious, "p = {}", result.probability);
        assert!(result.probability > 0.9);
    }

    #[test]
    fn threshold_is_respected() {
        let result = score_request(&attack_view(), 1.1);
        assert!(!result.malicious, "threshold above 1.0 can never block");
    }
}
