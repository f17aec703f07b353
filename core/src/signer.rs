use crate::{
    AuthenticatedRequest, Context, ProvideCredential, Result, SignRequest, SignableRequest,
    SigningCredential,
};
use std::sync::{Arc, Mutex};

/// Signer is the main struct used to sign the request.
///
/// Each call is an independent pipeline over the immutable credential; the
/// only shared mutable state is the credential cache, so a signer can be
/// cloned and used from many tasks concurrently.
#[derive(Clone, Debug)]
pub struct Signer<C: SigningCredential> {
    ctx: Context,
    loader: Arc<dyn ProvideCredential<Credential = C>>,
    builder: Arc<dyn SignRequest<Credential = C>>,
    credential: Arc<Mutex<Option<C>>>,
}

impl<C: SigningCredential> Signer<C> {
    /// Create a new signer.
    pub fn new(
        ctx: Context,
        loader: impl ProvideCredential<Credential = C>,
        builder: impl SignRequest<Credential = C>,
    ) -> Self {
        Self {
            ctx,

            loader: Arc::new(loader),
            builder: Arc::new(builder),
            credential: Arc::new(Mutex::new(None)),
        }
    }

    /// Sign a request description, returning the authenticated request.
    pub async fn sign(&self, req: SignableRequest) -> Result<AuthenticatedRequest> {
        let credential = self.credential.lock().expect("lock poisoned").clone();
        let credential = if credential.is_valid() {
            credential
        } else {
            let loaded = self.loader.provide_credential(&self.ctx).await?;
            *self.credential.lock().expect("lock poisoned") = loaded.clone();
            loaded
        };

        self.builder
            .sign_request(&self.ctx, req, credential.as_ref())
            .await
    }
}
