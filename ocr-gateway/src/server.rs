//! HTTP/1 accept loop.
//!
//! `axum::serve` exposes no per-connection timeouts, so connections are driven
//! by hyper directly. With a timeout configured, every connection must deliver
//! a complete request head within that window. This covers slow or silent
//! clients as well as keep-alive connections that sit idle between requests.

use std::io;
use std::time::Duration;

use axum::Router;
use hyper::server::conn::http1;
use hyper_util::rt::{TokioIo, TokioTimer};
use hyper_util::service::TowerToHyperService;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, error};

const ACCEPT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Serves `app` on `listener` until `shutdown` is cancelled, then lets open
/// connections finish their in-flight request before returning.
pub async fn serve(
    listener: TcpListener,
    app: Router,
    timeout: Option<Duration>,
    shutdown: CancellationToken,
) -> io::Result<()> {
    let mut builder = http1::Builder::new();
    if let Some(timeout) = timeout {
        builder.timer(TokioTimer::new()).header_read_timeout(timeout);
    }

    let tracker = TaskTracker::new();

    loop {
        let (stream, peer) = tokio::select! {
            _ = shutdown.cancelled() => break,
            accepted = listener.accept() => match accepted {
                Ok(accepted) => accepted,
                Err(e) => {
                    error!("Accept error: {}", e);
                    tokio::time::sleep(ACCEPT_RETRY_DELAY).await;
                    continue;
                }
            },
        };

        let builder = builder.clone();
        let service = TowerToHyperService::new(app.clone());
        let token = shutdown.child_token();

        tracker.spawn(async move {
            let conn = builder.serve_connection(TokioIo::new(stream), service);
            tokio::pin!(conn);

            let result = tokio::select! {
                result = conn.as_mut() => result,
                _ = token.cancelled() => {
                    conn.as_mut().graceful_shutdown();
                    conn.await
                }
            };

            if let Err(e) = result {
                debug!(%peer, "Connection closed: {}", e);
            }
        });
    }

    tracker.close();
    tracker.wait().await;
    Ok(())
}
