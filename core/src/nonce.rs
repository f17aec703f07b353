//! Nonce generation utils.

use crate::{Context, Result};
use uuid::Builder;

/// Generate a fresh single-use nonce, formatted as a canonical UUIDv4.
///
/// The 128-bit value is drawn from the context's secure random source, with
/// the version and variant bits fixed per the UUIDv4 convention. Fails with
/// a `RandomnessUnavailable` error when the random source does.
///
/// A nonce must never be cached or reused across requests; reuse defeats
/// replay protection.
pub fn generate(ctx: &Context) -> Result<String> {
    let mut bytes = [0u8; 16];
    ctx.rand_fill(&mut bytes)?;

    Ok(Builder::from_random_bytes(bytes)
        .into_uuid()
        .hyphenated()
        .to_string())
}
