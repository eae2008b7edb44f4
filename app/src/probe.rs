//! Always-200 liveness probe.
//!
//! Hosting platforms ping this to decide the process is alive. It shares
//! no state with the bot and never inspects the request.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tracing::{info, warn};

const RESPONSE: &[u8] = b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 2\r\nConnection: close\r\n\r\nok";

pub async fn serve(port: u16) -> anyhow::Result<()> {
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Liveness probe listening on port {port}");

    loop {
        let (mut stream, _) = listener.accept().await?;
        tokio::spawn(async move {
            let mut buf = [0u8; 512];
            let _ = stream.read(&mut buf).await;
            if let Err(e) = stream.write_all(RESPONSE).await {
                warn!("Probe response failed: {e}");
            }
        });
    }
}
