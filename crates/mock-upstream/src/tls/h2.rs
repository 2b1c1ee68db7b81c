use bytes::Bytes;
use http_body_util::Full;
use hyper::{
    body::Incoming,
    header::{HeaderValue, CONTENT_TYPE},
    server::conn::http2,
    service::service_fn,
    Request, Response,
};
use hyper_util::rt::{TokioExecutor, TokioIo};
use std::convert::Infallible;
use tokio::net::TcpListener;
use tokio_rustls::TlsAcceptor;
use tracing::{debug, error, info};

/// Every request, whatever the method or path, gets `body` as text/plain.
async fn greet(_req: Request<Incoming>, body: Bytes) -> Result<Response<Full<Bytes>>, Infallible> {
    let mut response = Response::new(Full::new(body));
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
    Ok(response)
}

/// Accept loop for the HTTP/2-over-TLS listener. Runs until the task is dropped.
pub async fn serve(listener: TcpListener, acceptor: TlsAcceptor, body: Bytes) {
    if let Ok(addr) = listener.local_addr() {
        info!("HTTP/2 listener on https://{}", addr);
    }

    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                error!("HTTP/2 accept error: {}", e);
                continue;
            }
        };
        stream.set_nodelay(true).ok();

        let acceptor = acceptor.clone();
        let body = body.clone();
        tokio::spawn(async move {
            let tls = match acceptor.accept(stream).await {
                Ok(tls) => tls,
                Err(e) => {
                    debug!("TLS handshake with {} failed: {}", peer, e);
                    return;
                }
            };

            let service = service_fn(move |req| greet(req, body.clone()));
            if let Err(e) = http2::Builder::new(TokioExecutor::new())
                .serve_connection(TokioIo::new(tls), service)
                .await
            {
                debug!("HTTP/2 connection with {} ended: {}", peer, e);
            }
        });
    }
}
