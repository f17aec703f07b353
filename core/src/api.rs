use crate::{AuthenticatedRequest, Context, Result, SignableRequest};
use std::fmt::Debug;

/// SigningCredential is the trait used by the signer as the signing key.
pub trait SigningCredential: Clone + Debug + Send + Sync + Unpin + 'static {
    /// Check if the credential is valid.
    fn is_valid(&self) -> bool;
}

impl<T: SigningCredential> SigningCredential for Option<T> {
    fn is_valid(&self) -> bool {
        let Some(cred) = self else {
            return false;
        };

        cred.is_valid()
    }
}

/// ProvideCredential is the trait used by the signer to load the credential
/// from the environment.
///
/// Protocols may require different credentials to sign requests; EdgeGrid
/// needs a client token, client secret, access token, and host.
#[async_trait::async_trait]
pub trait ProvideCredential: Debug + Send + Sync + 'static {
    /// Credential returned by this provider.
    type Credential: SigningCredential;

    /// Load a credential from the current context.
    ///
    /// Returns `Ok(None)` when this source has nothing to offer; the caller
    /// decides whether that is fatal.
    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>>;
}

/// SignRequest is the trait used by the signer to build the authenticated
/// request.
#[async_trait::async_trait]
pub trait SignRequest: Debug + Send + Sync + 'static {
    /// Credential used by this signer.
    type Credential: SigningCredential;

    /// Sign the request description, returning it with a resolved URL and
    /// finalized headers.
    ///
    /// ## Credential
    ///
    /// The `credential` parameter carries the key material required to sign
    /// the request. Implementations decide how to handle its absence; a
    /// protocol that cannot emit an unsigned request should return a
    /// credential error.
    async fn sign_request(
        &self,
        ctx: &Context,
        req: SignableRequest,
        credential: Option<&Self::Credential>,
    ) -> Result<AuthenticatedRequest>;
}
