use std::collections::HashSet;

use once_cell::sync::Lazy;

// Env values used by EdgeGrid credential loading.
pub const AKAMAI_CLIENT_TOKEN: &str = "AKAMAI_CLIENT_TOKEN";
pub const AKAMAI_CLIENT_SECRET: &str = "AKAMAI_CLIENT_SECRET";
pub const AKAMAI_ACCESS_TOKEN: &str = "AKAMAI_ACCESS_TOKEN";
pub const AKAMAI_HOST: &str = "AKAMAI_HOST";

/// The authorization scheme token carried on the wire.
pub const AUTH_SCHEME: &str = "EG1-HMAC-SHA256";

/// Bodies longer than this are truncated before hashing.
pub const MAX_SIGNED_BODY_SIZE: usize = 131072;

pub const DEFAULT_CONTENT_TYPE: &str = "application/json";
pub const DEFAULT_ACCEPT: &str = "application/json";
pub const DEFAULT_USER_AGENT: &str = concat!("gridsign-edgegrid/", env!("CARGO_PKG_VERSION"));

/// Headers that must never feed the signature: they are either regenerated
/// by the transport or are not caller-controlled inputs.
pub static FORBIDDEN_HEADERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "authorization",
        "host",
        "content-length",
        "connection",
        "upgrade",
        "proxy-authorization",
        "te",
        "trailers",
        "transfer-encoding",
    ])
});
