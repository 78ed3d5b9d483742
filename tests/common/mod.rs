//! Shared utilities for gateway integration tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use miniwaf::config::WafConfig;
use miniwaf::http::WafServer;
use miniwaf::lifecycle::Shutdown;
use miniwaf::proxy::Counters;

/// Start a simple mock backend that returns a fixed raw response.
pub async fn start_mock_backend(addr: SocketAddr, response: &'static str) {
    let listener = TcpListener::bind(addr).await.unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        // drain the forwarded head before responding
                        let mut buf = [0u8; 4096];
                        let _ = socket.read(&mut buf).await;
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });
}

/// Start a backend that writes a partial response and then stalls forever.
#[allow(dead_code)]
pub async fn start_stalling_backend(addr: SocketAddr, partial: &'static str) {
    let listener = TcpListener::bind(addr).await.unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let mut buf = [0u8; 4096];
                        let _ = socket.read(&mut buf).await;
                        let _ = socket.write_all(partial.as_bytes()).await;
                        let _ = socket.flush().await;
                        // hold the connection open without further bytes
                        tokio::time::sleep(Duration::from_secs(3600)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });
}

/// Spawn a gateway bound to `listen_addr`, protecting `backend_addr`.
/// Returns the shutdown handle and the server's counters.
pub async fn spawn_gateway(
    listen_addr: SocketAddr,
    backend_addr: SocketAddr,
    tune: impl FnOnce(&mut WafConfig),
) -> (Shutdown, Arc<Counters>) {
    let mut config = WafConfig::default();
    config.listener.bind_address = listen_addr.to_string();
    config.backend.address = backend_addr.to_string();
    tune(&mut config);

    let shutdown = Shutdown::new();
    let server = WafServer::new(config);
    let counters = server.counters();
    let listener = TcpListener::bind(listen_addr).await.unwrap();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    (shutdown, counters)
}

/// Send raw bytes to the gateway and collect the full response until EOF.
pub async fn send_raw(addr: SocketAddr, request: &[u8]) -> Vec<u8> {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request).await.unwrap();
    let mut response = Vec::new();
    let _ = stream.read_to_end(&mut response).await;
    response
}
