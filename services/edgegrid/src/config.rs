use std::fmt::{Debug, Formatter};

use super::constants::*;
use gridsign_core::{utils::Redact, Context};

/// Config carries all the configuration for EdgeGrid services.
#[derive(Clone, Default)]
pub struct Config {
    /// `client_token` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AKAMAI_CLIENT_TOKEN`]
    pub client_token: Option<String>,
    /// `client_secret` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AKAMAI_CLIENT_SECRET`]
    pub client_secret: Option<String>,
    /// `access_token` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AKAMAI_ACCESS_TOKEN`]
    pub access_token: Option<String>,
    /// `host` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AKAMAI_HOST`]
    pub host: Option<String>,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set client_token
    pub fn with_client_token(mut self, client_token: impl Into<String>) -> Self {
        self.client_token = Some(client_token.into());
        self
    }

    /// Set client_secret
    pub fn with_client_secret(mut self, client_secret: impl Into<String>) -> Self {
        self.client_secret = Some(client_secret.into());
        self
    }

    /// Set access_token
    pub fn with_access_token(mut self, access_token: impl Into<String>) -> Self {
        self.access_token = Some(access_token.into());
        self
    }

    /// Set host
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Load config from env.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(AKAMAI_CLIENT_TOKEN) {
            self.client_token.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(AKAMAI_CLIENT_SECRET) {
            self.client_secret.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(AKAMAI_ACCESS_TOKEN) {
            self.access_token.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(AKAMAI_HOST) {
            self.host.get_or_insert(v);
        }

        self
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("client_token", &self.client_token.as_ref().map(Redact::from))
            .field("client_secret", &self.client_secret.as_ref().map(Redact::from))
            .field("access_token", &self.access_token.as_ref().map(Redact::from))
            .field("host", &self.host)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridsign_core::StaticEnv;
    use std::collections::HashMap;

    #[test]
    fn test_from_env_fills_missing_fields() {
        let ctx = Context::new().with_env(StaticEnv {
            envs: HashMap::from([
                (AKAMAI_CLIENT_TOKEN.to_string(), "env_token".to_string()),
                (AKAMAI_HOST.to_string(), "env_host".to_string()),
            ]),
        });

        let config = Config::new().with_client_token("explicit_token").from_env(&ctx);

        // Explicit values win over the environment.
        assert_eq!(config.client_token.as_deref(), Some("explicit_token"));
        assert_eq!(config.host.as_deref(), Some("env_host"));
        assert!(config.client_secret.is_none());
    }
}
