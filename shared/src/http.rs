//! Generic hyper plumbing shared by service binaries: an accept loop and a
//! few body/response helpers.

use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::service::Service;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder;
use serde::Serialize;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Binds `host:port` and serves `service` on every accepted connection.
///
/// Runs until the listener fails; per-connection errors are logged and do not
/// take the loop down.
pub async fn run_http_service<S, E>(host: &str, port: u16, service: S) -> Result<(), E>
where
    S: Service<Request<Incoming>, Response = Response<BoxBody<Bytes, E>>, Error = E>
        + Send
        + Sync
        + 'static,
    S::Future: Send + 'static,
    E: From<std::io::Error> + std::error::Error + Send + Sync + 'static,
{
    let listener = TcpListener::bind(format!("{host}:{port}")).await?;
    tracing::info!(host, port, "listening");
    let service_arc = Arc::new(service);

    loop {
        let (stream, peer_addr) = listener.accept().await?;
        let _ = stream.set_nodelay(true);
        let io = TokioIo::new(stream);
        let svc = service_arc.clone();

        // Hand the connection to hyper; auto-detect h1/h2 on this socket
        tokio::spawn(async move {
            if let Err(err) = Builder::new(TokioExecutor::new())
                .serve_connection(io, svc)
                .await
            {
                tracing::debug!(%peer_addr, error = %err, "connection error");
            }
        });
    }
}

/// Serializes a value into a JSON response body.
pub fn json_body<E>(value: &impl Serialize) -> Result<BoxBody<Bytes, E>, serde_json::Error> {
    let bytes = serde_json::to_vec(value).map(Bytes::from)?;
    Ok(Full::new(bytes).map_err(|e| match e {}).boxed())
}

/// Wraps a static string in a response body.
pub fn text_body<E>(text: &'static str) -> BoxBody<Bytes, E> {
    Full::new(Bytes::from_static(text.as_bytes()))
        .map_err(|e| match e {})
        .boxed()
}

/// Builds a response carrying only the status code and its reason phrase.
pub fn make_error_response<E>(status: StatusCode) -> Response<BoxBody<Bytes, E>> {
    let reason = status.canonical_reason().unwrap_or("error");
    let body = Full::new(Bytes::from(format!("{reason}\n")))
        .map_err(|e| match e {})
        .boxed();

    let mut response = Response::new(body);
    *response.status_mut() = status;
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use std::convert::Infallible;

    #[derive(Serialize)]
    struct Payload {
        ok: bool,
    }

    #[tokio::test]
    async fn test_json_body_serializes() {
        let body: BoxBody<Bytes, Infallible> = json_body(&Payload { ok: true }).unwrap();
        let bytes = body.collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], br#"{"ok":true}"#);
    }

    #[test]
    fn test_error_response_status_and_reason() {
        let response: Response<BoxBody<Bytes, Infallible>> =
            make_error_response(StatusCode::NOT_FOUND);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
