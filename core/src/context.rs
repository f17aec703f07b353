// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::time::DateTime;
use crate::{Error, Result};
use rand::RngCore;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

/// Context provides the context for the request signing.
///
/// Signing only ever reads four ambient capabilities: environment
/// variables (credential loading), the clock (timestamps), a secure random
/// source (nonces), and the digest/MAC primitives. Each sits behind a
/// trait so alternate backends (hardware RNG, FIPS-validated modules,
/// fixed values in tests) can be substituted without touching the signing
/// engine.
///
/// ## Example
///
/// ```
/// use gridsign_core::{Context, StaticEnv};
/// use std::collections::HashMap;
///
/// // OS-backed clock, randomness, and environment by default.
/// let ctx = Context::new();
///
/// // Swap any capability, e.g. a fixed environment for tests.
/// let ctx = Context::new().with_env(StaticEnv {
///     envs: HashMap::new(),
/// });
/// ```
#[derive(Clone)]
pub struct Context {
    env: Arc<dyn Env>,
    clock: Arc<dyn Clock>,
    rng: Arc<dyn RandomSource>,
    crypto: Arc<dyn CryptoBackend>,
}

impl Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("env", &self.env)
            .field("clock", &self.clock)
            .field("rng", &self.rng)
            .field("crypto", &self.crypto)
            .finish()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Create a new Context backed by the OS environment, the system
    /// clock, and the OS secure random source.
    pub fn new() -> Self {
        Self {
            env: Arc::new(OsEnv),
            clock: Arc::new(SystemClock),
            rng: Arc::new(OsRandom),
            crypto: Arc::new(RustCrypto),
        }
    }

    /// Replace the environment implementation.
    pub fn with_env(mut self, env: impl Env) -> Self {
        self.env = Arc::new(env);
        self
    }

    /// Replace the clock implementation.
    pub fn with_clock(mut self, clock: impl Clock) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Replace the random source implementation.
    pub fn with_random(mut self, rng: impl RandomSource) -> Self {
        self.rng = Arc::new(rng);
        self
    }

    /// Replace the crypto backend implementation.
    pub fn with_crypto(mut self, crypto: impl CryptoBackend) -> Self {
        self.crypto = Arc::new(crypto);
        self
    }

    /// Get the environment variable.
    ///
    /// - Returns `Some(v)` if the environment variable is found and is valid utf-8.
    /// - Returns `None` if the environment variable is not found or value is invalid.
    #[inline]
    pub fn env_var(&self, key: &str) -> Option<String> {
        self.env.var(key)
    }

    /// Returns an hashmap of (variable, value) pairs of strings, for all the
    /// environment variables of the current process.
    #[inline]
    pub fn env_vars(&self) -> HashMap<String, String> {
        self.env.vars()
    }

    /// Read the current time from the configured clock.
    #[inline]
    pub fn now(&self) -> DateTime {
        self.clock.now()
    }

    /// Fill `buf` with bytes from the configured secure random source.
    #[inline]
    pub fn rand_fill(&self, buf: &mut [u8]) -> Result<()> {
        self.rng.fill(buf)
    }

    /// Compute a SHA-256 digest with the configured crypto backend.
    #[inline]
    pub fn sha256(&self, content: &[u8]) -> Result<Vec<u8>> {
        self.crypto.sha256(content)
    }

    /// Compute an HMAC-SHA256 with the configured crypto backend.
    #[inline]
    pub fn hmac_sha256(&self, key: &[u8], content: &[u8]) -> Result<Vec<u8>> {
        self.crypto.hmac_sha256(key, content)
    }
}

/// Env is used to read environment variables during credential loading.
pub trait Env: Debug + Send + Sync + 'static {
    /// Get an environment variable.
    ///
    /// - Returns `Some(v)` if the environment variable is found and is valid utf-8.
    /// - Returns `None` if the environment variable is not found or value is invalid.
    fn var(&self, key: &str) -> Option<String>;

    /// Returns an hashmap of (variable, value) pairs of strings, for all the
    /// environment variables of the current process.
    fn vars(&self) -> HashMap<String, String>;
}

/// Implements Env for the OS context.
#[derive(Debug, Copy, Clone, Default)]
pub struct OsEnv;

impl Env for OsEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var_os(key)?.into_string().ok()
    }

    fn vars(&self) -> HashMap<String, String> {
        std::env::vars().collect()
    }
}

/// StaticEnv provides a static env environment.
///
/// This is useful for testing or for providing a fixed environment.
#[derive(Debug, Clone, Default)]
pub struct StaticEnv {
    /// The environment variables to use.
    pub envs: HashMap<String, String>,
}

impl Env for StaticEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.envs.get(key).cloned()
    }

    fn vars(&self) -> HashMap<String, String> {
        self.envs.clone()
    }
}

/// NoopEnv is a no-op implementation that always returns None/empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEnv;

impl Env for NoopEnv {
    fn var(&self, _key: &str) -> Option<String> {
        None
    }

    fn vars(&self) -> HashMap<String, String> {
        HashMap::new()
    }
}

/// Clock is used to read the current time during signing.
pub trait Clock: Debug + Send + Sync + 'static {
    /// The current time, in UTC.
    fn now(&self) -> DateTime;
}

/// Implements Clock via the system clock.
#[derive(Debug, Copy, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime {
        crate::time::now()
    }
}

/// FixedClock always returns the same instant.
///
/// # Note
///
/// We should always take current time to sign requests.
/// Only use this clock for testing.
#[derive(Debug, Copy, Clone)]
pub struct FixedClock(pub DateTime);

impl Clock for FixedClock {
    fn now(&self) -> DateTime {
        self.0
    }
}

/// CryptoBackend supplies the digest and MAC primitives used in signing.
///
/// The default backend sits on the RustCrypto crates; swap it for a
/// hardware-backed or FIPS-validated module without touching the engine.
/// Failures surface as `CryptoFailed` errors.
pub trait CryptoBackend: Debug + Send + Sync + 'static {
    /// SHA-256 digest of `content`.
    fn sha256(&self, content: &[u8]) -> Result<Vec<u8>>;

    /// HMAC-SHA256 of `content` keyed by `key`.
    fn hmac_sha256(&self, key: &[u8], content: &[u8]) -> Result<Vec<u8>>;
}

/// Implements CryptoBackend over the RustCrypto crates.
#[derive(Debug, Copy, Clone, Default)]
pub struct RustCrypto;

impl CryptoBackend for RustCrypto {
    fn sha256(&self, content: &[u8]) -> Result<Vec<u8>> {
        use sha2::Digest;

        Ok(sha2::Sha256::digest(content).to_vec())
    }

    fn hmac_sha256(&self, key: &[u8], content: &[u8]) -> Result<Vec<u8>> {
        Ok(crate::hash::hmac_sha256(key, content))
    }
}

/// RandomSource is used to draw bytes for nonces during signing.
pub trait RandomSource: Debug + Send + Sync + 'static {
    /// Fill `buf` entirely with random bytes.
    fn fill(&self, buf: &mut [u8]) -> Result<()>;
}

/// Implements RandomSource via the OS cryptographically secure generator.
#[derive(Debug, Copy, Clone, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill(&self, buf: &mut [u8]) -> Result<()> {
        rand::rngs::OsRng
            .try_fill_bytes(buf)
            .map_err(|e| Error::randomness_unavailable("OS random source failed").with_source(e))
    }
}

/// StaticRandom repeats a fixed byte sequence.
///
/// # Note
///
/// Nonces must come from a cryptographically strong source.
/// Only use this random source for testing.
#[derive(Debug, Clone)]
pub struct StaticRandom {
    /// The bytes to repeat.
    pub bytes: Vec<u8>,
}

impl RandomSource for StaticRandom {
    fn fill(&self, buf: &mut [u8]) -> Result<()> {
        if self.bytes.is_empty() {
            return Err(Error::randomness_unavailable(
                "static random source has no bytes",
            ));
        }
        for (i, b) in buf.iter_mut().enumerate() {
            *b = self.bytes[i % self.bytes.len()];
        }
        Ok(())
    }
}
