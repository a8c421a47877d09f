//! HTTP implementation of [`AuthApi`].

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use url::Url;

use super::{
    AuthApi, AuthError, Credentials, IDENTITY_PATH, Identity, LOGIN_PATH, LOGOUT_PATH, TokenGrant,
};
use crate::config::Config;

/// Auth client talking to a Bantay service over HTTP.
#[derive(Debug, Clone)]
pub struct HttpAuthClient {
    base_url: Url,
    http: reqwest::Client,
}

impl HttpAuthClient {
    /// Creates a client for `base_url`.
    ///
    /// The base may carry a path prefix (`https://host/bantay`); endpoint paths
    /// are resolved beneath it.
    ///
    /// # Errors
    /// Returns an error if the URL does not parse or the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AuthError> {
        let mut base_url = Url::parse(base_url).map_err(|source| AuthError::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        })?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(AuthError::Client)?;

        Ok(Self { base_url, http })
    }

    /// Creates a client from the loaded configuration.
    ///
    /// # Errors
    /// Returns an error if the configured base URL is invalid.
    pub fn from_config(config: &Config) -> Result<Self, AuthError> {
        Self::new(&config.base_url, config.timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, AuthError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|source| AuthError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                source,
            })
    }

    /// Tells the server the session is over.
    ///
    /// The server only acknowledges the call; discarding the local session is
    /// up to the caller.
    ///
    /// # Errors
    /// [`AuthError::LogoutFailed`] on any non-success status, or a transport error.
    pub async fn logout(&self, authorization: &str) -> Result<(), AuthError> {
        let url = self.endpoint(LOGOUT_PATH)?;
        let response = self
            .http
            .post(url)
            .header(AUTHORIZATION, authorization)
            .send()
            .await
            .map_err(|source| AuthError::Transport {
                endpoint: LOGOUT_PATH.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "logout rejected");
            return Err(AuthError::LogoutFailed {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}

impl AuthApi for HttpAuthClient {
    async fn exchange_credentials(
        &self,
        credentials: &Credentials,
    ) -> Result<TokenGrant, AuthError> {
        let url = self.endpoint(LOGIN_PATH)?;
        tracing::debug!(%url, email = credentials.email(), "exchanging credentials");

        let response = self
            .http
            .post(url)
            .json(credentials)
            .send()
            .await
            .map_err(|source| AuthError::Transport {
                endpoint: LOGIN_PATH.to_string(),
                source,
            })?;

        // Body of a rejected login is not inspected.
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "login rejected");
            return Err(AuthError::LoginFailed {
                status: status.as_u16(),
            });
        }

        response
            .json::<TokenGrant>()
            .await
            .map_err(|source| AuthError::Decode {
                endpoint: LOGIN_PATH.to_string(),
                source,
            })
    }

    async fn fetch_identity(&self, authorization: &str) -> Result<Identity, AuthError> {
        let url = self.endpoint(IDENTITY_PATH)?;
        tracing::debug!(%url, "fetching identity");

        let response = self
            .http
            .get(url)
            .header(AUTHORIZATION, authorization)
            .send()
            .await
            .map_err(|source| AuthError::Transport {
                endpoint: IDENTITY_PATH.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "identity lookup rejected");
            return Err(AuthError::FetchUserFailed {
                status: status.as_u16(),
            });
        }

        response
            .json::<Identity>()
            .await
            .map_err(|source| AuthError::Decode {
                endpoint: IDENTITY_PATH.to_string(),
                source,
            })
    }
}
