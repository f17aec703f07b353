//! Akamai EdgeGrid service signer
//!
//! This crate provides a complete EdgeGrid authentication implementation:
//! the `EG1-HMAC-SHA256` authorization header, credential loading from the
//! environment, and the canonicalization rules that make signatures
//! deterministic.
//!
//! ```no_run
//! use gridsign_core::{Context, SignableRequest, Signer};
//! use gridsign_edgegrid::{DefaultCredentialProvider, RequestSigner};
//!
//! #[tokio::main]
//! async fn main() -> gridsign_core::Result<()> {
//!     // Credentials resolve from AKAMAI_* environment variables.
//!     let signer = Signer::new(
//!         Context::new(),
//!         DefaultCredentialProvider::new(),
//!         RequestSigner::new(),
//!     );
//!
//!     let req = SignableRequest::new("GET", "/papi/v1/contracts")?;
//!     let authed = signer.sign(req).await?;
//!     println!("{} {}", authed.method, authed.uri);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod provide_credential;
pub use provide_credential::{
    ConfigCredentialProvider, DefaultCredentialProvider, EnvCredentialProvider,
    ProvideCredentialChain, StaticCredentialProvider,
};

mod sign_request;
pub use sign_request::RequestSigner;

mod constants;
