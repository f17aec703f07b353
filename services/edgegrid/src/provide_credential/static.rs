use crate::Credential;
use async_trait::async_trait;
use gridsign_core::{Context, ProvideCredential, Result};

/// StaticCredentialProvider provides a fixed EdgeGrid credential.
///
/// This provider is used when you already hold the credential bundle and
/// want to use it without any dynamic loading. Validation happened when the
/// [`Credential`] was constructed, so providing it can never fail.
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider {
    credential: Credential,
}

impl StaticCredentialProvider {
    /// Create a new StaticCredentialProvider around a validated credential.
    pub fn new(credential: Credential) -> Self {
        Self { credential }
    }
}

#[async_trait]
impl ProvideCredential for StaticCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        Ok(Some(self.credential.clone()))
    }
}
