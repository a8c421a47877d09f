//! Auth client for the Bantay service.
//!
//! Two exchanges make up a login: trading credentials for a token grant
//! (`POST /api/auth/login`) and resolving who the token belongs to
//! (`GET /api/auth/me`). Both are plain request/response calls with no retries
//! and no session side effects; persisting the token is the caller's job.

mod client;
mod credentials;

pub use client::HttpAuthClient;
pub use credentials::{Credentials, CredentialsError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

pub const LOGIN_PATH: &str = "/api/auth/login";
pub const IDENTITY_PATH: &str = "/api/auth/me";
pub const LOGOUT_PATH: &str = "/api/auth/logout";

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The login endpoint answered with a non-success status.
    #[error("login failed")]
    LoginFailed { status: u16 },

    /// The identity endpoint answered with a non-success status.
    #[error("failed to fetch user")]
    FetchUserFailed { status: u16 },

    #[error("logout failed")]
    LogoutFailed { status: u16 },

    #[error("could not reach the server at {endpoint}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected response from {endpoint}")]
    Decode {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid base URL '{url}'")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),
}

/// Successful response of the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenGrant {
    pub token_type: String,
    pub access_token: String,
}

impl TokenGrant {
    /// Composes the `Authorization` header value (`"<token_type> <access_token>"`).
    pub fn authorization(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

/// Caller role as reported by the identity endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RoleTag {
    Administrator,
    CoastGuard,
    /// Any other tag; routed like a fisherfolk account.
    Other(String),
}

impl RoleTag {
    pub fn parse(tag: &str) -> Self {
        match tag {
            "administrator" => Self::Administrator,
            "coast_guard" => Self::CoastGuard,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Administrator => "administrator",
            Self::CoastGuard => "coast_guard",
            Self::Other(tag) => tag,
        }
    }
}

impl std::fmt::Display for RoleTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wire shapes accepted for the `role` field.
#[derive(Deserialize)]
#[serde(untagged)]
enum RolePayload {
    Tag(String),
    Named(serde_json::Map<String, serde_json::Value>),
    Unrecognized(serde::de::IgnoredAny),
}

impl RolePayload {
    fn into_tag(self) -> Option<RoleTag> {
        match self {
            Self::Tag(tag) => Some(RoleTag::parse(&tag)),
            Self::Named(fields) => fields
                .get("name")
                .and_then(serde_json::Value::as_str)
                .map(RoleTag::parse),
            Self::Unrecognized(_) => None,
        }
    }
}

fn deserialize_role<'de, D>(deserializer: D) -> Result<Option<RoleTag>, D::Error>
where
    D: Deserializer<'de>,
{
    let payload = Option::<RolePayload>::deserialize(deserializer)?;
    Ok(payload.and_then(RolePayload::into_tag))
}

/// Decodes an optional profile field, treating a value of the wrong type as absent.
fn deserialize_lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Identity of the token holder.
///
/// `role` is normalized from either a bare tag or a `{ "name": tag }` object;
/// a missing, null, or otherwise shaped role decodes to `None`. Profile fields
/// of an unexpected type decode to `None` instead of failing the payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Identity {
    #[serde(default, deserialize_with = "deserialize_role")]
    pub role: Option<RoleTag>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub is_active: Option<bool>,
}

/// The two network exchanges of a login.
pub trait AuthApi {
    /// Trades credentials for a token grant.
    ///
    /// # Errors
    /// [`AuthError::LoginFailed`] on any non-success status, or a transport/decode error.
    async fn exchange_credentials(
        &self,
        credentials: &Credentials,
    ) -> Result<TokenGrant, AuthError>;

    /// Looks up the identity behind an `Authorization` header value.
    ///
    /// # Errors
    /// [`AuthError::FetchUserFailed`] on any non-success status, or a transport/decode error.
    async fn fetch_identity(&self, authorization: &str) -> Result<Identity, AuthError>;
}
