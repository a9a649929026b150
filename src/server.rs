use axum::Router;
use hyper::body::Incoming;
use hyper::Request;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder;
use std::future::Future;
use std::io;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tower::Service;
use tracing::{debug, info, warn};

/// Serves `app` until `signal` resolves, then drains in-flight requests.
///
/// After the signal no new connections are accepted and open ones finish
/// their current request. Connections still open after `grace` are closed
/// and their requests dropped before this returns.
pub async fn serve<F>(
    listener: TcpListener,
    app: Router,
    grace: Duration,
    signal: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send,
{
    let drain = CancellationToken::new();
    let mut connections = JoinSet::new();

    if let Ok(addr) = listener.local_addr() {
        info!("Server listening on {addr}");
    }

    tokio::pin!(signal);
    loop {
        tokio::select! {
            _ = &mut signal => {
                info!("Shutdown signal received");
                break;
            }
            accepted = listener.accept() => match accepted {
                Ok((stream, _)) => {
                    connections.spawn(serve_connection(stream, app.clone(), drain.clone()));
                }
                Err(err) => {
                    warn!("Failed to accept connection: {err}");
                    tokio::time::sleep(Duration::from_millis(100)).await;
                }
            },
            Some(_) = connections.join_next(), if !connections.is_empty() => {}
        }
    }

    drop(listener);
    drain.cancel();

    let drained = tokio::time::timeout(grace, async {
        while connections.join_next().await.is_some() {}
    })
    .await;

    match drained {
        Ok(()) => info!("Server stopped gracefully"),
        Err(_) => {
            warn!(
                "Graceful shutdown timed out after {grace:?}, closing {} remaining connections",
                connections.len()
            );
            connections.shutdown().await;
        }
    }

    Ok(())
}

async fn serve_connection(stream: TcpStream, app: Router, drain: CancellationToken) {
    let _ = stream.set_nodelay(true);

    let service =
        hyper::service::service_fn(move |request: Request<Incoming>| app.clone().call(request));
    let builder = Builder::new(TokioExecutor::new());
    let conn = builder.serve_connection_with_upgrades(TokioIo::new(stream), service);
    tokio::pin!(conn);

    let mut draining = false;
    loop {
        tokio::select! {
            res = conn.as_mut() => {
                if let Err(err) = res {
                    debug!("Connection closed with error: {err}");
                }
                break;
            }
            _ = drain.cancelled(), if !draining => {
                draining = true;
                conn.as_mut().graceful_shutdown();
            }
        }
    }
}

/// Resolves on Ctrl-C or, on unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => {
                warn!("Failed to listen for SIGTERM: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
