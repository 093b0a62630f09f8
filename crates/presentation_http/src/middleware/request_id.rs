//! Request correlation
//!
//! Every request runs inside an `http_request` span carrying a request id.
//! A well-formed `X-Request-Id` from the client is reused; otherwise a UUIDv7
//! is minted. The id is echoed on the response.

use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

/// The header name for the request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest client-supplied id that is accepted as-is
const MAX_CLIENT_ID_LEN: usize = 64;

/// Request ID stored in request extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn client_id(request: &Request) -> Option<String> {
    let value = request.headers().get(REQUEST_ID_HEADER)?.to_str().ok()?;
    let acceptable = !value.is_empty()
        && value.len() <= MAX_CLIENT_ID_LEN
        && value
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'));
    acceptable.then(|| value.to_string())
}

/// Middleware attaching a request id and per-request span
pub async fn request_id(mut request: Request, next: Next) -> Response {
    let id = client_id(&request).unwrap_or_else(|| Uuid::now_v7().to_string());

    let span = tracing::info_span!(
        "http_request",
        request_id = %id,
        method = %request.method(),
        uri = %request.uri().path(),
    );

    request.extensions_mut().insert(RequestId(id.clone()));

    let mut response = next.run(request).instrument(span).await;
    if let Ok(value) = HeaderValue::from_str(&id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
