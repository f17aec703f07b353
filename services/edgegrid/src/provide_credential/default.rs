use async_trait::async_trait;
use gridsign_core::{Context, ProvideCredential, Result};

use crate::credential::Credential;
use crate::provide_credential::{EnvCredentialProvider, ProvideCredentialChain};

/// DefaultCredentialProvider will try to load credential from different sources.
///
/// Resolution order:
///
/// 1. Environment variables
#[derive(Debug)]
pub struct DefaultCredentialProvider {
    chain: ProvideCredentialChain,
}

impl Default for DefaultCredentialProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultCredentialProvider {
    /// Create a new DefaultCredentialProvider
    pub fn new() -> Self {
        let chain = ProvideCredentialChain::new().push(EnvCredentialProvider::new());

        Self { chain }
    }

    /// Create with a custom credential chain.
    pub fn with_chain(chain: ProvideCredentialChain) -> Self {
        Self { chain }
    }

    /// Add a credential provider to the front of the default chain.
    ///
    /// This allows adding a high-priority credential source that will be tried
    /// before all other providers in the default chain.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use gridsign_edgegrid::{Credential, DefaultCredentialProvider, StaticCredentialProvider};
    ///
    /// # fn example() -> gridsign_core::Result<()> {
    /// let credential = Credential::new(
    ///     "client_token",
    ///     "client_secret",
    ///     "access_token",
    ///     "example.luna.akamaiapis.net",
    /// )?;
    /// let provider = DefaultCredentialProvider::new()
    ///     .push_front(StaticCredentialProvider::new(credential));
    /// # Ok(())
    /// # }
    /// ```
    pub fn push_front(
        mut self,
        provider: impl ProvideCredential<Credential = Credential> + 'static,
    ) -> Self {
        self.chain = self.chain.push_front(provider);
        self
    }
}

#[async_trait]
impl ProvideCredential for DefaultCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        self.chain.provide_credential(ctx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use gridsign_core::StaticEnv;
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_default_provider_without_env() {
        let ctx = Context::new().with_env(StaticEnv {
            envs: HashMap::new(),
        });

        let provider = DefaultCredentialProvider::new();
        let credential = provider.provide_credential(&ctx).await.unwrap();

        assert!(credential.is_none());
    }

    #[tokio::test]
    async fn test_default_provider_with_env() {
        let ctx = Context::new().with_env(StaticEnv {
            envs: HashMap::from_iter([
                (AKAMAI_CLIENT_TOKEN.to_string(), "client_token".to_string()),
                (AKAMAI_CLIENT_SECRET.to_string(), "client_secret".to_string()),
                (AKAMAI_ACCESS_TOKEN.to_string(), "access_token".to_string()),
                (AKAMAI_HOST.to_string(), "example.luna.akamaiapis.net".to_string()),
            ]),
        });

        let provider = DefaultCredentialProvider::new();
        let credential = provider.provide_credential(&ctx).await.unwrap().unwrap();

        assert_eq!("client_token", credential.client_token);
        assert_eq!("https://example.luna.akamaiapis.net", credential.host);
    }
}
