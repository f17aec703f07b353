//! End-to-end signing tests driving the full `Signer` pipeline.

use anyhow::Result;
use chrono::{TimeZone, Utc};
use gridsign_core::{Context, FixedClock, SignableRequest, Signer, StaticRandom};
use gridsign_edgegrid::{Credential, RequestSigner, StaticCredentialProvider};

fn test_credential() -> Credential {
    Credential::new(
        "akab-client-token-xxx-xxxxxxxxxxxxxxxx",
        "client-secret-xxxxxxxxxxxxxxxxxxxxxxxxxx=",
        "akab-access-token-xxx-xxxxxxxxxxxxxxxx",
        "akab-custom-host.luna.akamaiapis.net",
    )
    .unwrap()
}

fn fixed_signer() -> Signer<Credential> {
    let ctx = Context::new()
        .with_clock(FixedClock(
            Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        ))
        .with_random(StaticRandom { bytes: vec![0xab] });

    Signer::new(
        ctx,
        StaticCredentialProvider::new(test_credential()),
        RequestSigner::new(),
    )
}

/// Split an `EG1-HMAC-SHA256` header value into its key=value fields.
fn auth_fields(header: &str) -> Vec<(String, String)> {
    let value = header
        .strip_prefix("EG1-HMAC-SHA256 ")
        .expect("header must carry the scheme token");
    value
        .trim_end_matches(';')
        .split(';')
        .map(|pair| {
            let (k, v) = pair.split_once('=').expect("fields are key=value");
            (k.to_string(), v.to_string())
        })
        .collect()
}

#[tokio::test]
async fn test_signed_request_carries_authorization() -> Result<()> {
    let signer = fixed_signer();

    let req = SignableRequest::new("get", "/papi/v1/contracts")?;
    let authed = signer.sign(req).await?;

    assert_eq!(authed.method, http::Method::GET);
    assert_eq!(
        authed.uri.to_string(),
        "https://akab-custom-host.luna.akamaiapis.net/papi/v1/contracts"
    );

    let auth = authed.headers.get("authorization").unwrap().to_str()?;
    let fields = auth_fields(auth);
    let keys: Vec<&str> = fields.iter().map(|(k, _)| k.as_str()).collect();

    // Fixed field order is part of the wire contract.
    assert_eq!(
        keys,
        ["client_token", "access_token", "timestamp", "nonce", "signature"]
    );
    assert_eq!(fields[0].1, "akab-client-token-xxx-xxxxxxxxxxxxxxxx");
    assert_eq!(fields[1].1, "akab-access-token-xxx-xxxxxxxxxxxxxxxx");
    // The embedded timestamp and nonce are the pinned ones, proving the
    // header carries exactly the values that were signed.
    assert_eq!(fields[2].1, "20240601T12:00:00+0000");
    assert_eq!(fields[3].1, "abababab-abab-4bab-abab-abababababab");
    assert!(!fields[4].1.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_signing_is_deterministic_under_fixed_inputs() -> Result<()> {
    let signer = fixed_signer();

    let first = signer
        .sign(SignableRequest::new("GET", "/papi/v1/groups")?)
        .await?;
    let second = signer
        .sign(SignableRequest::new("GET", "/papi/v1/groups")?)
        .await?;

    assert_eq!(
        first.headers.get("authorization").unwrap(),
        second.headers.get("authorization").unwrap()
    );

    Ok(())
}

#[tokio::test]
async fn test_forbidden_headers_never_reach_the_wire() -> Result<()> {
    let signer = fixed_signer();

    let req = SignableRequest::new("GET", "/papi/v1/groups")?
        .with_header("HOST", "spoofed.example.com")?
        .with_header("Content-Length", "10")?
        .with_header("Proxy-Authorization", "Basic xxx")?
        .with_header("X-Forwarded-For", "203.0.113.7")?;
    let authed = signer.sign(req).await?;

    assert!(!authed.headers.contains_key("host"));
    assert!(!authed.headers.contains_key("content-length"));
    assert!(!authed.headers.contains_key("proxy-authorization"));
    // Non-forbidden caller headers pass through untouched.
    assert_eq!(authed.headers.get("x-forwarded-for").unwrap(), "203.0.113.7");

    Ok(())
}

#[tokio::test]
async fn test_default_headers_do_not_override_caller() -> Result<()> {
    let signer = fixed_signer();

    let req = SignableRequest::new("POST", "/papi/v1/properties")?
        .with_header("Content-Type", "text/plain")?
        .with_body("raw payload");
    let authed = signer.sign(req).await?;

    assert_eq!(authed.headers.get("content-type").unwrap(), "text/plain");
    assert_eq!(authed.headers.get("accept").unwrap(), "application/json");
    assert!(authed.headers.contains_key("user-agent"));

    Ok(())
}

#[tokio::test]
async fn test_body_survives_signing() -> Result<()> {
    let signer = fixed_signer();

    let req = SignableRequest::new("POST", "/papi/v1/properties")?.with_body("payload");
    let authed = signer.sign(req).await?;

    match authed.body {
        Some(gridsign_core::Body::Text(text)) => assert_eq!(text, "payload"),
        other => panic!("body changed shape: {other:?}"),
    }

    Ok(())
}
