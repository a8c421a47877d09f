//! Login flow controller.
//!
//! Drives one login attempt at a time through
//! `Idle -> Submitting -> Settled(success | failure)`:
//!
//! 1. [`LoginFlow::begin`] clears the previous error, raises `loading`, and
//!    hands out an [`AttemptId`]. A second `begin` while an attempt is in
//!    flight is rejected.
//! 2. [`run_attempt`] performs the exchanges in order: credentials, persist
//!    the composed token, identity. It never touches UI state.
//! 3. [`LoginFlow::settle`] applies the result of an attempt. Results for an
//!    attempt that is no longer active (cancelled) are dropped.
//!
//! [`LoginFlow::submit`] chains the three and navigates on success. Failures
//! never escape it; they end up in [`UiState::error`].

mod attempt;

pub use attempt::{AttemptId, AttemptSeq};

use crate::auth::{AuthApi, AuthError, Credentials, RoleTag};
use crate::router::{Navigator, Route};
use crate::session::{SessionStore, StoreError, mask_token};

/// Message shown when a failure carries no text of its own.
pub const FALLBACK_ERROR: &str = "login error";

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("a login attempt is already in progress")]
    InFlight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success(Route),
    Failure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginState {
    #[default]
    Idle,
    Submitting {
        attempt: AttemptId,
    },
    Settled(Outcome),
}

/// What the login view renders besides the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    pub loading: bool,
    pub error: Option<String>,
}

/// Maps a resolved role to its view. Unknown and absent roles land on the
/// fisherfolk view.
pub fn route_for(role: Option<&RoleTag>) -> Route {
    match role {
        Some(RoleTag::Administrator) => Route::Admin,
        Some(RoleTag::CoastGuard) => Route::CoastGuard,
        Some(RoleTag::Other(_)) | None => Route::Fisherfolk,
    }
}

/// Runs the network part of one attempt.
///
/// The token is persisted before the identity lookup, so a failed lookup
/// still leaves a session behind.
///
/// # Errors
/// Returns the first failing step: credential exchange, session write, or
/// identity lookup.
pub async fn run_attempt<A, S>(
    api: &A,
    store: &S,
    credentials: &Credentials,
) -> Result<Route, LoginError>
where
    A: AuthApi,
    S: SessionStore + ?Sized,
{
    let grant = api.exchange_credentials(credentials).await?;
    let authorization = grant.authorization();
    store.save(&authorization)?;
    tracing::debug!(token = %mask_token(&authorization), "session stored");

    let identity = api.fetch_identity(&authorization).await?;
    let route = route_for(identity.role.as_ref());
    tracing::info!(
        role = identity.role.as_ref().map_or("<none>", RoleTag::as_str),
        %route,
        "identity resolved"
    );
    Ok(route)
}

#[derive(Debug, Default)]
pub struct LoginFlow {
    state: LoginState,
    ui: UiState,
    seq: AttemptSeq,
}

impl LoginFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LoginState {
        self.state
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, LoginState::Submitting { .. })
    }

    /// Enters `Submitting` for a fresh attempt.
    ///
    /// # Errors
    /// [`SubmitError::InFlight`] if an attempt is already running; state is unchanged.
    pub fn begin(&mut self) -> Result<AttemptId, SubmitError> {
        if let LoginState::Submitting { attempt } = self.state {
            tracing::debug!(%attempt, "submit ignored, attempt in flight");
            return Err(SubmitError::InFlight);
        }

        let attempt = self.seq.next_id();
        self.state = LoginState::Submitting { attempt };
        self.ui = UiState {
            loading: true,
            error: None,
        };
        tracing::debug!(%attempt, "login attempt started");
        Ok(attempt)
    }

    /// Abandons the active attempt and returns to `Idle`.
    ///
    /// Its eventual result is treated as stale by [`LoginFlow::settle`].
    pub fn cancel(&mut self) -> Option<AttemptId> {
        let LoginState::Submitting { attempt } = self.state else {
            return None;
        };
        self.state = LoginState::Idle;
        self.ui.loading = false;
        tracing::debug!(%attempt, "login attempt cancelled");
        Some(attempt)
    }

    /// Applies the result of `attempt`.
    ///
    /// Returns the route to navigate to when the attempt is current and
    /// succeeded. Stale results leave the state untouched.
    pub fn settle(
        &mut self,
        attempt: AttemptId,
        result: Result<Route, LoginError>,
    ) -> Option<Route> {
        if self.state != (LoginState::Submitting { attempt }) {
            tracing::debug!(%attempt, "discarding stale login result");
            return None;
        }

        self.ui.loading = false;
        match result {
            Ok(route) => {
                self.ui.error = None;
                self.state = LoginState::Settled(Outcome::Success(route));
                Some(route)
            }
            Err(err) => {
                tracing::warn!(%attempt, error = %err, "login attempt failed");
                let message = err.to_string();
                self.ui.error = Some(if message.trim().is_empty() {
                    FALLBACK_ERROR.to_string()
                } else {
                    message
                });
                self.state = LoginState::Settled(Outcome::Failure);
                None
            }
        }
    }

    /// Runs a whole attempt and navigates on success.
    ///
    /// Returns the route navigated to, or `None` when the attempt failed (see
    /// [`UiState::error`]).
    ///
    /// # Errors
    /// [`SubmitError::InFlight`] if another attempt is still active.
    pub async fn submit<A, S, N>(
        &mut self,
        credentials: &Credentials,
        api: &A,
        store: &S,
        navigator: &mut N,
    ) -> Result<Option<Route>, SubmitError>
    where
        A: AuthApi,
        S: SessionStore + ?Sized,
        N: Navigator + ?Sized,
    {
        let attempt = self.begin()?;
        let result = run_attempt(api, store, credentials).await;
        let route = self.settle(attempt, result);
        if let Some(route) = route {
            navigator.navigate(route);
        }
        Ok(route)
    }
}
