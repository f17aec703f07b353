use crate::{constants::*, Credential};
use async_trait::async_trait;
use gridsign_core::{Context, ProvideCredential, Result};

/// EnvCredentialProvider loads EdgeGrid credentials from environment
/// variables.
///
/// This provider looks for the following environment variables:
/// - `AKAMAI_CLIENT_TOKEN`: the client token
/// - `AKAMAI_CLIENT_SECRET`: the client secret
/// - `AKAMAI_ACCESS_TOKEN`: the access token
/// - `AKAMAI_HOST`: the API host
#[derive(Debug, Default)]
pub struct EnvCredentialProvider;

impl EnvCredentialProvider {
    /// Create a new EnvCredentialProvider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let envs = ctx.env_vars();

        match (
            envs.get(AKAMAI_CLIENT_TOKEN),
            envs.get(AKAMAI_CLIENT_SECRET),
            envs.get(AKAMAI_ACCESS_TOKEN),
            envs.get(AKAMAI_HOST),
        ) {
            (Some(client_token), Some(client_secret), Some(access_token), Some(host)) => {
                Credential::new(client_token, client_secret, access_token, host).map(Some)
            }
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridsign_core::StaticEnv;
    use std::collections::HashMap;

    fn ctx_with_envs(envs: HashMap<String, String>) -> Context {
        Context::new().with_env(StaticEnv { envs })
    }

    #[tokio::test]
    async fn test_env_credential_provider() -> anyhow::Result<()> {
        let ctx = ctx_with_envs(HashMap::from([
            (AKAMAI_CLIENT_TOKEN.to_string(), "test_client_token".to_string()),
            (AKAMAI_CLIENT_SECRET.to_string(), "test_client_secret".to_string()),
            (AKAMAI_ACCESS_TOKEN.to_string(), "test_access_token".to_string()),
            (AKAMAI_HOST.to_string(), "test.luna.akamaiapis.net".to_string()),
        ]));

        let provider = EnvCredentialProvider::new();
        let cred = provider.provide_credential(&ctx).await?;
        assert!(cred.is_some());
        let cred = cred.unwrap();
        assert_eq!(cred.client_token, "test_client_token");
        assert_eq!(cred.client_secret, "test_client_secret");
        assert_eq!(cred.access_token, "test_access_token");
        assert_eq!(cred.host, "https://test.luna.akamaiapis.net");

        Ok(())
    }

    #[tokio::test]
    async fn test_env_credential_provider_missing_credentials() -> anyhow::Result<()> {
        let ctx = ctx_with_envs(HashMap::new());

        let provider = EnvCredentialProvider::new();
        let cred = provider.provide_credential(&ctx).await?;
        assert!(cred.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_env_credential_provider_partial_credentials() -> anyhow::Result<()> {
        // Only the client token is set.
        let ctx = ctx_with_envs(HashMap::from([(
            AKAMAI_CLIENT_TOKEN.to_string(),
            "test_client_token".to_string(),
        )]));

        let provider = EnvCredentialProvider::new();
        let cred = provider.provide_credential(&ctx).await?;
        assert!(cred.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_env_credential_provider_blank_value_errors() {
        // Present but blank is a configuration error, not a silent skip.
        let ctx = ctx_with_envs(HashMap::from([
            (AKAMAI_CLIENT_TOKEN.to_string(), "test_client_token".to_string()),
            (AKAMAI_CLIENT_SECRET.to_string(), "  ".to_string()),
            (AKAMAI_ACCESS_TOKEN.to_string(), "test_access_token".to_string()),
            (AKAMAI_HOST.to_string(), "test.luna.akamaiapis.net".to_string()),
        ]));

        let provider = EnvCredentialProvider::new();
        let err = provider.provide_credential(&ctx).await.unwrap_err();
        assert_eq!(err.kind(), gridsign_core::ErrorKind::ConfigInvalid);
    }
}
