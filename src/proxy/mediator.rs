//! Per-connection decision pipeline.
//!
//! # Responsibilities
//! - Drive one connection through PARSE → EXTRACT → SCORE → FORWARD/BLOCK
//! - Resolve every failure locally into a complete synthetic response or a
//!   silent close; nothing escapes to the accept loop
//!
//! # Design Decisions
//! - Strict ordering: scoring always completes before any backend contact,
//!   there is no speculative forwarding
//! - A connection that stays silent past the initial deadline, or closes
//!   before a request line, is abandoned without counting or responding;
//!   only the wait for the first byte is bounded, not the whole head
//! - Counters and metrics are recorded exactly once, on the taken branch

use std::time::{Duration, Instant};

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::config::WafConfig;
use crate::detection::score_request;
use crate::http::request::{read_head, RequestView};
use crate::http::response;
use crate::observability::metrics;
use crate::proxy::counters::Counters;
use crate::proxy::relay::forward_and_relay;
use crate::proxy::GatewayError;

/// Terminal state of one mediated connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Benign request forwarded and response relayed (possibly partially,
    /// when the relay timed out mid-stream).
    Forwarded,
    /// Malicious request answered with the block page.
    Blocked,
    /// Benign request, but the backend was unreachable.
    BackendUnavailable,
    /// Unparseable request-line answered with a 500.
    ParseFailed,
    /// No request head arrived before the deadline or the peer closed.
    Abandoned,
}

/// Mediate one client connection to completion.
///
/// The connection is consumed; it is closed on drop regardless of outcome.
pub async fn mediate(stream: TcpStream, config: &WafConfig, counters: &Counters) -> Outcome {
    let start = Instant::now();
    let mut reader = BufReader::new(stream);

    // AWAIT_REQUEST: bounded wait for the first inbound byte; once the
    // client has started talking the head may arrive at its own pace
    let initial = Duration::from_millis(config.timeouts.initial_read_ms);
    match timeout(initial, reader.fill_buf()).await {
        Ok(Ok(available)) if available.is_empty() => {
            tracing::debug!("Peer closed before sending a request line");
            return Outcome::Abandoned;
        }
        Ok(Ok(_)) => {}
        Ok(Err(e)) => {
            tracing::debug!(error = %e, "Inbound read failed");
            return Outcome::Abandoned;
        }
        Err(_) => {
            tracing::debug!(
                timeout_ms = config.timeouts.initial_read_ms,
                "Inbound request timed out"
            );
            return Outcome::Abandoned;
        }
    }

    let head = match read_head(&mut reader).await {
        Ok(Some(head)) => head,
        Ok(None) => {
            tracing::debug!("Peer closed before completing the request line");
            return Outcome::Abandoned;
        }
        Err(e) => {
            tracing::debug!(error = %e, "Inbound read failed");
            return Outcome::Abandoned;
        }
    };

    let (request_line, header_lines) = head;
    let request_number = counters.record_request();
    tracing::debug!(request = request_number, line = %request_line, "New request");

    // PARSE
    let view = match RequestView::from_head(&request_line, header_lines) {
        Ok(view) => view,
        Err(e) => {
            tracing::warn!(error = %e, "Rejecting unparseable request");
            write_and_close(reader, &response::internal_error()).await;
            metrics::record_request("parse_error", 500, start);
            return Outcome::ParseFailed;
        }
    };

    // EXTRACT + SCORE
    let result = score_request(&view, config.detection.threshold);
    tracing::debug!(
        method = %view.method,
        path = %view.path,
        probability = result.probability,
        malicious = result.malicious,
        "Request scored"
    );

    if result.malicious {
        // BLOCK
        counters.record_blocked();
        tracing::info!(
            path = %view.path,
            probability = result.probability,
            "Blocked malicious request"
        );
        write_and_close(reader, &response::forbidden(result.probability)).await;
        metrics::record_request("blocked", 403, start);
        log_stats(counters);
        return Outcome::Blocked;
    }

    // FORWARD
    counters.record_allowed();
    let client = reader.get_mut();
    let outcome = match forward_and_relay(client, &view, &config.backend.address, &config.timeouts)
        .await
    {
        Ok(relayed) => {
            tracing::debug!(path = %view.path, relayed_bytes = relayed, "Response relayed");
            metrics::record_request("allowed", 200, start);
            Outcome::Forwarded
        }
        Err(GatewayError::BackendUnavailable(e)) => {
            tracing::error!(backend = %config.backend.address, error = %e, "Backend connection failed");
            write_and_close(reader, &response::bad_gateway()).await;
            metrics::record_request("backend_error", 502, start);
            log_stats(counters);
            return Outcome::BackendUnavailable;
        }
        Err(GatewayError::RelayTimeout { relayed }) => {
            // already-sent bytes stand; both connections close now
            tracing::warn!(relayed_bytes = relayed, "Backend relay timed out");
            metrics::record_request("relay_timeout", 200, start);
            Outcome::Forwarded
        }
        Err(GatewayError::Io(e)) => {
            tracing::warn!(error = %e, "Relay aborted by IO error");
            metrics::record_request("relay_error", 200, start);
            Outcome::Forwarded
        }
    };

    log_stats(counters);
    outcome
}

/// Best-effort synthetic response write; the connection closes either way.
async fn write_and_close(reader: BufReader<TcpStream>, bytes: &[u8]) {
    let mut stream = reader.into_inner();
    if let Err(e) = stream.write_all(bytes).await {
        tracing::debug!(error = %e, "Failed to write synthetic response");
    }
    let _ = stream.shutdown().await;
}

fn log_stats(counters: &Counters) {
    let snap = counters.snapshot();
    tracing::debug!(
        total = snap.requests,
        allowed = snap.allowed,
        blocked = snap.blocked,
        "Request stats"
    );
}
