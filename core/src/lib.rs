//! Core components for signing API requests.
//!
//! This crate provides the foundational types and traits for the gridsign
//! ecosystem. It defines the abstractions that protocol crates build on:
//!
//! - **Context**: a container holding the environment, clock, and secure
//!   randomness implementations the signing process reads from
//! - **Traits**: abstract interfaces for credential loading
//!   (`ProvideCredential`) and request signing (`SignRequest`)
//! - **Signer**: the orchestrator that coordinates credential loading and
//!   request signing
//!
//! ## Example
//!
//! ```no_run
//! use gridsign_core::{
//!     Context, ProvideCredential, SignRequest, SignableRequest,
//!     AuthenticatedRequest, Signer, SigningCredential,
//! };
//! use async_trait::async_trait;
//! use gridsign_core::Result;
//!
//! // Define your credential type
//! #[derive(Clone, Debug)]
//! struct MyCredential {
//!     token: String,
//!     secret: String,
//! }
//!
//! impl SigningCredential for MyCredential {
//!     fn is_valid(&self) -> bool {
//!         !self.token.is_empty() && !self.secret.is_empty()
//!     }
//! }
//!
//! // Implement a credential loader
//! #[derive(Debug)]
//! struct MyLoader;
//!
//! #[async_trait]
//! impl ProvideCredential for MyLoader {
//!     type Credential = MyCredential;
//!
//!     async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
//!         Ok(Some(MyCredential {
//!             token: "my-token".to_string(),
//!             secret: "my-secret".to_string(),
//!         }))
//!     }
//! }
//!
//! // Implement a request signer
//! #[derive(Debug)]
//! struct MySigner;
//!
//! #[async_trait]
//! impl SignRequest for MySigner {
//!     type Credential = MyCredential;
//!
//!     async fn sign_request(
//!         &self,
//!         _ctx: &Context,
//!         _req: SignableRequest,
//!         _cred: Option<&Self::Credential>,
//!     ) -> Result<AuthenticatedRequest> {
//!         // Build your authenticated request here
//!         todo!()
//!     }
//! }
//!
//! # async fn example() -> Result<()> {
//! let ctx = Context::default();
//! let signer = Signer::new(ctx, MyLoader, MySigner);
//!
//! let req = SignableRequest::new("GET", "/status")?;
//! let authed = signer.sign(req).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: cryptographic hashing and encoding utilities
//! - [`time`]: timestamp formatting utilities
//! - [`nonce`]: secure nonce generation
//! - [`utils`]: general utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod nonce;
pub mod time;
pub mod utils;

mod context;
pub use context::{
    Clock, Context, CryptoBackend, Env, FixedClock, NoopEnv, OsEnv, OsRandom, RandomSource,
    RustCrypto, StaticEnv, StaticRandom, SystemClock,
};

mod error;
pub use error::{Error, ErrorKind, Result};

mod request;
pub use request::{canonicalize_headers, normalize_header_value};
pub use request::{AuthenticatedRequest, Body, SignableRequest};

mod api;
pub use api::{ProvideCredential, SignRequest, SigningCredential};

mod signer;
pub use signer::Signer;
