use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest caller-supplied id that is echoed back unchanged.
const MAX_REQUEST_ID_LEN: usize = 128;

/// Correlation id for one HTTP request, available to handlers as an
/// `Extension<RequestId>` and copied into every response `meta`.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

impl RequestId {
    /// Keeps a caller-supplied id when it is printable ASCII of a sane
    /// length; otherwise mints a fresh `UUIDv4`.
    fn from_header(value: Option<&HeaderValue>) -> Self {
        let supplied = value
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|id| !id.is_empty() && id.len() <= MAX_REQUEST_ID_LEN);

        match supplied {
            Some(id) => Self(id.to_owned()),
            None => Self(Uuid::new_v4().to_string()),
        }
    }
}

/// Attaches a [`RequestId`] to the request and echoes it on the response so
/// analysis runs can be correlated with server logs.
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = RequestId::from_header(req.headers().get(REQUEST_ID_HEADER));
    let echoed = HeaderValue::from_str(&id.0).ok();

    let span = tracing::debug_span!(
        "request",
        request_id = %id.0,
        method = %req.method(),
        path = req.uri().path()
    );
    req.extensions_mut().insert(id);

    let mut res = next.run(req).instrument(span).await;

    if let Some(value) = echoed {
        res.headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }
    res
}
