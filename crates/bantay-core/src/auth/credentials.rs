//! Login credentials.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

// Same shape browsers accept for `<input type="email">`.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern compiles")
});

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsError {
    #[error("email is required")]
    MissingEmail,
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
    #[error("password is required")]
    MissingPassword,
}

/// Email/password pair sent to the login endpoint.
///
/// Only constructible through [`Credentials::new`], so a value always holds a
/// non-empty, well-formed email and a non-empty password.
#[derive(Clone, Serialize)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    /// Validates and builds credentials. Surrounding whitespace is trimmed
    /// from the email; the password is taken verbatim.
    ///
    /// # Errors
    /// Returns an error if the email is empty or malformed, or the password is empty.
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, CredentialsError> {
        let email = email.into().trim().to_string();
        let password = password.into();

        if email.is_empty() {
            return Err(CredentialsError::MissingEmail);
        }
        if !EMAIL_RE.is_match(&email) {
            return Err(CredentialsError::InvalidEmail(email));
        }
        if password.is_empty() {
            return Err(CredentialsError::MissingPassword);
        }

        Ok(Self { email, password })
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_credentials() {
        let creds = Credentials::new("  a@b.com ", "x").unwrap();
        assert_eq!(creds.email(), "a@b.com");

        let body = serde_json::to_value(&creds).unwrap();
        assert_eq!(body, serde_json::json!({"email": "a@b.com", "password": "x"}));
    }

    #[test]
    fn test_rejects_missing_fields() {
        assert_eq!(
            Credentials::new("", "x").unwrap_err(),
            CredentialsError::MissingEmail
        );
        assert_eq!(
            Credentials::new("   ", "x").unwrap_err(),
            CredentialsError::MissingEmail
        );
        assert_eq!(
            Credentials::new("a@b.com", "").unwrap_err(),
            CredentialsError::MissingPassword
        );
    }

    #[test]
    fn test_rejects_malformed_email() {
        for email in ["plainaddress", "a@", "@b.com", "a b@c.com", "a@b@c.com", "a@-b.com"] {
            assert!(
                matches!(
                    Credentials::new(email, "x"),
                    Err(CredentialsError::InvalidEmail(_))
                ),
                "{email} should be rejected"
            );
        }
    }

    #[test]
    fn test_accepts_single_label_domain() {
        assert!(Credentials::new("admin@localhost", "x").is_ok());
    }

    #[test]
    fn test_debug_redacts_password() {
        let creds = Credentials::new("a@b.com", "hunter2").unwrap();
        let debug = format!("{creds:?}");
        assert!(debug.contains("a@b.com"));
        assert!(!debug.contains("hunter2"));
    }
}
