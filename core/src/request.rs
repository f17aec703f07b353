use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, Method, Uri};

use crate::Result;

/// A request body to be covered by the signature.
///
/// Bodies may be textual, raw bytes, or a structured value that is
/// serialized to text before hashing.
#[derive(Debug, Clone)]
pub enum Body {
    /// A textual body, hashed over its UTF-8 bytes.
    Text(String),
    /// A raw binary body.
    Bytes(Bytes),
    /// A structured body, serialized to its JSON text form before hashing.
    Json(serde_json::Value),
}

impl Body {
    /// Check if the body carries no content.
    pub fn is_empty(&self) -> bool {
        match self {
            Body::Text(s) => s.is_empty(),
            Body::Bytes(b) => b.is_empty(),
            Body::Json(_) => false,
        }
    }
}

impl From<String> for Body {
    fn from(value: String) -> Self {
        Body::Text(value)
    }
}

impl From<&str> for Body {
    fn from(value: &str) -> Self {
        Body::Text(value.to_string())
    }
}

impl From<Bytes> for Body {
    fn from(value: Bytes) -> Self {
        Body::Bytes(value)
    }
}

impl From<serde_json::Value> for Body {
    fn from(value: serde_json::Value) -> Self {
        Body::Json(value)
    }
}

/// A description of a request to be signed.
///
/// Ephemeral: built per call and consumed by the signer. The method is
/// normalized to upper case at construction; header lookups are
/// case-insensitive.
#[derive(Debug, Clone)]
pub struct SignableRequest {
    /// HTTP method.
    pub method: Method,
    /// Request path, optionally already carrying a query string.
    pub path: String,
    /// HTTP headers.
    pub headers: HeaderMap,
    /// Query parameters to append to the path. Repeated keys produce
    /// repeated query entries.
    pub query: Vec<(String, String)>,
    /// Optional request body.
    pub body: Option<Body>,
    /// Names of the headers to include in the signature, in the order the
    /// verifying server expects them. Empty means no headers are signed.
    pub headers_to_sign: Vec<String>,
}

impl SignableRequest {
    /// Create a new signable request for `method` and `path`.
    ///
    /// The method token is case-insensitive; a path without a leading `/`
    /// gets one.
    pub fn new(method: &str, path: &str) -> Result<Self> {
        let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())?;
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };

        Ok(Self {
            method,
            path,
            headers: HeaderMap::new(),
            query: Vec::new(),
            body: None,
            headers_to_sign: Vec::new(),
        })
    }

    /// Append a header.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self> {
        self.headers
            .append(HeaderName::try_from(name)?, HeaderValue::try_from(value)?);
        Ok(self)
    }

    /// Append a query parameter.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Set the request body.
    pub fn with_body(mut self, body: impl Into<Body>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Append a header name to the signed-headers list.
    pub fn with_signed_header(mut self, name: impl Into<String>) -> Self {
        self.headers_to_sign.push(name.into());
        self
    }
}

/// A signed request, ready to hand to the transport.
///
/// Carries the resolved absolute URL and the finalized header mapping
/// including `Authorization`. Ownership transfers to the caller; the
/// transport must not re-derive the `Authorization` header.
#[derive(Debug)]
pub struct AuthenticatedRequest {
    /// HTTP method.
    pub method: Method,
    /// The resolved absolute URL.
    pub uri: Uri,
    /// Finalized headers, including `Authorization`.
    pub headers: HeaderMap,
    /// The request body, unchanged from the signable request.
    pub body: Option<Body>,
}

/// Normalize a header value for signing.
///
/// Leading and trailing whitespace is trimmed and internal whitespace runs
/// collapse to a single space.
pub fn normalize_header_value(value: &str) -> String {
    let mut s = String::with_capacity(value.len());
    for (idx, part) in value.split_whitespace().enumerate() {
        if idx > 0 {
            s.push(' ');
        }
        s.push_str(part);
    }
    s
}

/// Canonicalize headers for signing.
///
/// Produces one `lowercased-name:normalized-value` entry per header, joined
/// with a single tab, in the iteration order of the input. Callers that
/// need cross-implementation determinism over an unordered source must
/// pre-sort; the EdgeGrid signer passes the verifier's ordered list.
pub fn canonicalize_headers<'a>(headers: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    let mut s = String::new();
    for (idx, (name, value)) in headers.into_iter().enumerate() {
        if idx > 0 {
            s.push('\t');
        }
        s.push_str(&name.trim().to_ascii_lowercase());
        s.push(':');
        s.push_str(&normalize_header_value(value));
    }
    s
}
