use anyhow::{Context, Result};
use bytes::Bytes;
use std::net::{IpAddr, SocketAddr};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_rustls::TlsAcceptor;
use tracing::info;

use crate::config::{Http2Config, Settings, Variant};
use crate::router::build_router;
use crate::state::AppState;
use crate::tls::{self, CertPaths};

pub fn socket_addr(host: &str, port: u16) -> Result<SocketAddr> {
    let ip: IpAddr = host
        .parse()
        .with_context(|| format!("invalid listen host '{}'", host))?;
    Ok(SocketAddr::from((ip, port)))
}

/// Serves the variant until Ctrl-C / SIGTERM.
pub async fn run(settings: Settings, variant: Variant) -> Result<()> {
    let addr = socket_addr(&settings.server.host, settings.server.port)?;

    let http2 = if variant.serves_http2() && settings.http2.enabled {
        Some(spawn_http2(&settings.http2).await?)
    } else {
        None
    };

    info!(
        "Mock upstream ({}) listening on {}, fixtures at {}, delay {}ms",
        variant,
        addr,
        settings.fixtures.root.display(),
        settings.pacing.delay_ms
    );

    let app = build_router(AppState::new(settings, variant));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = http2 {
        handle.abort();
    }
    info!("Mock upstream stopped");
    Ok(())
}

/// Makes sure the certificate exists, binds the TLS port and spawns the accept loop.
pub async fn spawn_http2(cfg: &Http2Config) -> Result<JoinHandle<()>> {
    let paths = CertPaths::new(cfg.cert_path.clone(), cfg.key_path.clone());
    tls::ensure_self_signed(&paths, &cfg.subject_alt_names)?;
    let acceptor = TlsAcceptor::from(tls::server_config(&paths)?);

    let addr = socket_addr(&cfg.host, cfg.port)?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind HTTP/2 listener {}", addr))?;

    let body = Bytes::from(cfg.body.clone());
    Ok(tokio::spawn(tls::h2::serve(listener, acceptor, body)))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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
    info!("Shutdown signal received");
}
