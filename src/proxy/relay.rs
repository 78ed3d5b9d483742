//! Backend forwarding and response relay.
//!
//! # Responsibilities
//! - Open the single outbound connection to the protected backend
//! - Re-serialize the original request head unmodified
//! - Relay the backend's response bytes to the client as they arrive
//!
//! # Design Decisions
//! - No header rewriting, no re-encoding: the client sees exactly the bytes
//!   the backend sent, and the backend sees the original header lines
//! - The relay inactivity timeout resets on every chunk received; on
//!   expiry already-sent bytes stand and both connections are closed
//! - One attempt only: a failed connect or a stalled relay ends the request

use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::config::TimeoutConfig;
use crate::http::request::RequestView;
use crate::proxy::GatewayError;

/// Serialize the request head exactly as it will be sent to the backend:
/// `METHOD path[?query] HTTP/1.1`, the original header lines, blank line.
pub fn serialize_head(view: &RequestView) -> Vec<u8> {
    let mut head = String::new();
    head.push_str(&view.method);
    head.push(' ');
    head.push_str(&view.path);
    if !view.query.is_empty() {
        head.push('?');
        head.push_str(&view.query);
    }
    head.push_str(" HTTP/1.1\r\n");
    for line in &view.header_lines {
        head.push_str(line);
        head.push_str("\r\n");
    }
    head.push_str("\r\n");
    head.into_bytes()
}

/// Forward the request head to the backend and relay the response to the
/// client byte-for-byte.
///
/// Returns the number of bytes relayed. [`GatewayError::BackendUnavailable`]
/// is returned before anything is sent; [`GatewayError::RelayTimeout`] may
/// leave a partial response with the client.
pub async fn forward_and_relay<C>(
    client: &mut C,
    view: &RequestView,
    backend_addr: &str,
    timeouts: &TimeoutConfig,
) -> Result<u64, GatewayError>
where
    C: AsyncWrite + Unpin,
{
    let connect = TcpStream::connect(backend_addr);
    let mut backend = match timeout(Duration::from_millis(timeouts.connect_ms), connect).await {
        Ok(Ok(stream)) => stream,
        Ok(Err(e)) => return Err(GatewayError::BackendUnavailable(e)),
        Err(_) => {
            return Err(GatewayError::BackendUnavailable(std::io::Error::new(
                std::io::ErrorKind::TimedOut,
                "backend connect timed out",
            )))
        }
    };

    backend.write_all(&serialize_head(view)).await?;
    backend.flush().await?;

    relay_response(&mut backend, client, timeouts.relay_idle_ms).await
}

/// Copy backend bytes to the client until EOF or inactivity timeout.
async fn relay_response<B, C>(
    backend: &mut B,
    client: &mut C,
    idle_ms: u64,
) -> Result<u64, GatewayError>
where
    B: AsyncRead + Unpin,
    C: AsyncWrite + Unpin,
{
    let idle = Duration::from_millis(idle_ms);
    let mut buf = [0u8; 4096];
    let mut relayed = 0u64;

    loop {
        match timeout(idle, backend.read(&mut buf)).await {
            Ok(Ok(0)) => break,
            Ok(Ok(n)) => {
                client.write_all(&buf[..n]).await?;
                relayed += n as u64;
            }
            Ok(Err(e)) => return Err(GatewayError::Io(e)),
            Err(_) => return Err(GatewayError::RelayTimeout { relayed }),
        }
    }
    client.flush().await?;
    Ok(relayed)
}
