use async_trait::async_trait;
use gridsign_core::{Context, ProvideCredential, Result};
use std::sync::Arc;

use crate::config::Config;
use crate::credential::Credential;

/// ConfigCredentialProvider will load credential from config.
///
/// Explicit config fields win; anything left unset is filled from the
/// environment before the credential is assembled.
#[derive(Debug)]
pub struct ConfigCredentialProvider {
    config: Arc<Config>,
}

impl ConfigCredentialProvider {
    /// Create a new provider via config.
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ProvideCredential for ConfigCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        // Fill unset fields from the environment.
        let config = self.config.as_ref().clone().from_env(ctx);

        if let (Some(client_token), Some(client_secret), Some(access_token), Some(host)) = (
            &config.client_token,
            &config.client_secret,
            &config.access_token,
            &config.host,
        ) {
            return Credential::new(client_token, client_secret, access_token, host).map(Some);
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use gridsign_core::StaticEnv;
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_config_credential_provider() -> anyhow::Result<()> {
        let config = Config::new()
            .with_client_token("test_client_token")
            .with_client_secret("test_client_secret")
            .with_access_token("test_access_token")
            .with_host("test.luna.akamaiapis.net");
        let provider = ConfigCredentialProvider::new(Arc::new(config));

        let ctx = Context::new().with_env(StaticEnv::default());
        let cred = provider.provide_credential(&ctx).await?.unwrap();
        assert_eq!(cred.client_token, "test_client_token");
        assert_eq!(cred.host, "https://test.luna.akamaiapis.net");

        Ok(())
    }

    #[tokio::test]
    async fn test_config_credential_provider_merges_env() -> anyhow::Result<()> {
        let _ = env_logger::builder().is_test(true).try_init();

        let config = Config::new()
            .with_client_token("test_client_token")
            .with_access_token("test_access_token");
        let provider = ConfigCredentialProvider::new(Arc::new(config));

        let ctx = Context::new().with_env(StaticEnv {
            envs: HashMap::from([
                (AKAMAI_CLIENT_SECRET.to_string(), "env_client_secret".to_string()),
                (AKAMAI_HOST.to_string(), "env.luna.akamaiapis.net".to_string()),
            ]),
        });

        let cred = provider.provide_credential(&ctx).await?.unwrap();
        assert_eq!(cred.client_token, "test_client_token");
        assert_eq!(cred.client_secret, "env_client_secret");
        assert_eq!(cred.host, "https://env.luna.akamaiapis.net");

        Ok(())
    }

    #[tokio::test]
    async fn test_config_credential_provider_incomplete() -> anyhow::Result<()> {
        let config = Config::new().with_client_token("test_client_token");
        let provider = ConfigCredentialProvider::new(Arc::new(config));

        let ctx = Context::new().with_env(StaticEnv::default());
        assert!(provider.provide_credential(&ctx).await?.is_none());

        Ok(())
    }
}
