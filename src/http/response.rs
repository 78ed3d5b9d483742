//! Synthetic responses.
//!
//! # Responsibilities
//! - Produce the literal byte responses the gateway sends when it answers
//!   for the backend: 403 on block, 502 on backend failure, 500 on parse
//!   failure
//!
//! # Design Decisions
//! - Responses are complete, well-formed HTTP/1.1 messages with
//!   `Connection: close`; the connection never outlives one request
//! - The block page embeds the detection probability so operators can
//!   correlate client reports with the scoring logs

/// 403 block page embedding the detection confidence as a percentage with
/// two decimal places.
pub fn forbidden(probability: f32) -> Vec<u8> {
    let body = format!(
        "<!DOCTYPE html>\r\n\
         <html><head><title>403 Forbidden</title></head>\r\n\
         <body>\r\n\
         <h1>403 Forbidden</h1>\r\n\
         <p>Your request has been blocked by the Web Application Firewall.</p>\r\n\
         <p>Reason: Malicious pattern detected</p>\r\n\
         <p>Detection confidence: {:.2}%</p>\r\n\
         <hr><p><small>miniwaf</small></p>\r\n\
         </body></html>\r\n",
        probability * 100.0
    );
    format!(
        "HTTP/1.1 403 Forbidden\r\nContent-Type: text/html\r\nConnection: close\r\n\r\n{body}"
    )
    .into_bytes()
}

/// 502 sent when the backend connection cannot be established.
pub fn bad_gateway() -> Vec<u8> {
    b"HTTP/1.1 502 Bad Gateway\r\nContent-Type: text/plain\r\nConnection: close\r\n\r\nBackend unavailable\r\n"
        .to_vec()
}

/// 500 sent when the request head cannot be parsed.
pub fn internal_error() -> Vec<u8> {
    b"HTTP/1.1 500 Internal Server Error\r\nContent-Type: text/plain\r\nConnection: close\r\n\r\nWAF error\r\n"
        .to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_page_formats_confidence_to_two_decimals() {
        let bytes = forbidden(0.987654);
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("HTTP/1.1 403 Forbidden\r\n"));
        assert!(text.contains("Detection confidence: 98.77%"));
        assert!(text.contains("Connection: close"));
    }

    #[test]
    fn failure_responses_are_well_formed() {
        assert!(bad_gateway().starts_with(b"HTTP/1.1 502 Bad Gateway\r\n"));
        assert!(internal_error().starts_with(b"HTTP/1.1 500 Internal Server Error\r\n"));
    }
}
