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

use std::fmt::{Debug, Formatter};

use gridsign_core::{utils::Redact, Error, Result, SigningCredential};

/// Credential for EdgeGrid.
///
/// Immutable once constructed. All four fields are validated and the host
/// normalized at construction time; nothing is re-checked per request.
#[derive(Clone)]
pub struct Credential {
    /// Client token identifying the API client.
    pub client_token: String,
    /// Client secret the signing key is derived from.
    pub client_secret: String,
    /// Access token identifying the API grant.
    pub access_token: String,
    /// API host, always carrying a transport scheme prefix.
    pub host: String,
}

impl Credential {
    /// Create a new credential.
    ///
    /// Fields are trimmed; any field left empty fails with a configuration
    /// error before any cryptographic work happens. A host without a scheme
    /// gets an `https://` prefix so later URL resolution never guesses.
    pub fn new(
        client_token: &str,
        client_secret: &str,
        access_token: &str,
        host: &str,
    ) -> Result<Self> {
        let client_token = client_token.trim();
        let client_secret = client_secret.trim();
        let access_token = access_token.trim();
        let host = host.trim();

        if client_token.is_empty() {
            return Err(Error::config_invalid("client_token must not be empty"));
        }
        if client_secret.is_empty() {
            return Err(Error::config_invalid("client_secret must not be empty"));
        }
        if access_token.is_empty() {
            return Err(Error::config_invalid("access_token must not be empty"));
        }
        if host.is_empty() {
            return Err(Error::config_invalid("host must not be empty"));
        }

        let host = if host.contains("://") {
            host.to_string()
        } else {
            format!("https://{host}")
        };

        // Catch a malformed host here rather than on the first signing call.
        let uri: http::Uri = host
            .parse()
            .map_err(|e| Error::config_invalid(format!("host is not a valid URL: {host}")).with_source(e))?;
        if uri.authority().is_none() {
            return Err(Error::config_invalid(format!(
                "host carries no authority: {host}"
            )));
        }

        Ok(Self {
            client_token: client_token.to_string(),
            client_secret: client_secret.to_string(),
            access_token: access_token.to_string(),
            host,
        })
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("client_token", &Redact::from(&self.client_token))
            .field("client_secret", &Redact::from(&self.client_secret))
            .field("access_token", &Redact::from(&self.access_token))
            .field("host", &self.host)
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        !self.client_token.is_empty()
            && !self.client_secret.is_empty()
            && !self.access_token.is_empty()
            && !self.host.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridsign_core::ErrorKind;

    #[test]
    fn test_new_trims_fields() {
        let cred = Credential::new(
            " client_token ",
            "client_secret",
            "access_token",
            "akaa-example.luna.akamaiapis.net",
        )
        .unwrap();

        assert_eq!(cred.client_token, "client_token");
        assert_eq!(cred.host, "https://akaa-example.luna.akamaiapis.net");
    }

    #[test]
    fn test_new_keeps_existing_scheme() {
        let cred = Credential::new(
            "client_token",
            "client_secret",
            "access_token",
            "https://akaa-example.luna.akamaiapis.net",
        )
        .unwrap();
        assert_eq!(cred.host, "https://akaa-example.luna.akamaiapis.net");

        let cred =
            Credential::new("client_token", "client_secret", "access_token", "http://localhost")
                .unwrap();
        assert_eq!(cred.host, "http://localhost");
    }

    #[test]
    fn test_new_rejects_empty_fields() {
        for (ct, cs, at, host) in [
            ("", "secret", "token", "host"),
            ("token", "  ", "token", "host"),
            ("token", "secret", "", "host"),
            ("token", "secret", "token", " "),
        ] {
            let err = Credential::new(ct, cs, at, host).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        }
    }

    #[test]
    fn test_new_rejects_malformed_host() {
        let err =
            Credential::new("token", "secret", "token", "not a host").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let cred = Credential::new(
            "akab-client-token-xxxxxxxxxxxxxxxx",
            "client-secret-xxxxxxxxxxxxxxxxxxxxxxxxxx=",
            "akab-access-token-xxxxxxxxxxxxxxxx",
            "akaa-example.luna.akamaiapis.net",
        )
        .unwrap();

        let debug = format!("{cred:?}");
        assert!(!debug.contains("client-secret-x"));
        assert!(debug.contains("aka***xxx"));
        assert!(debug.contains("https://akaa-example.luna.akamaiapis.net"));
    }
}
