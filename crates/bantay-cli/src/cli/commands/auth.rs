//! Auth command handlers.

use anyhow::Result;
use bantay_core::auth::{AuthApi, Credentials, HttpAuthClient};
use bantay_core::config::Config;
use bantay_core::login::{FALLBACK_ERROR, LoginFlow, LoginState, Outcome, route_for};
use bantay_core::router::Location;
use bantay_core::session::{FileSessionStore, SessionStore, mask_token};

use super::route::print_view;
use crate::cli::prompt::{read_line, read_password};

pub async fn login(config: &Config, email: Option<String>, password_stdin: bool) -> Result<()> {
    let email = match email {
        Some(email) => email,
        None => read_line("Email: ")?,
    };
    let password = if password_stdin {
        read_line("")?
    } else {
        read_password("Password: ")?
    };
    let credentials = Credentials::new(email, password)?;

    let api = HttpAuthClient::from_config(config)?;
    let store = FileSessionStore::default();
    let mut location = Location::new();
    let mut flow = LoginFlow::new();

    println!("Logging in to {}...", api.base_url());
    flow.submit(&credentials, &api, &store, &mut location).await?;

    match flow.state() {
        LoginState::Settled(Outcome::Success(_)) => {
            println!("✓ Logged in as {}", credentials.email());
            println!("  Session saved to: {}", store.path().display());
            println!();
            print_view(location.current());
            Ok(())
        }
        _ => {
            let message = flow.ui().error.as_deref().unwrap_or(FALLBACK_ERROR);
            anyhow::bail!("{message}")
        }
    }
}

pub async fn whoami(config: &Config) -> Result<()> {
    let store = FileSessionStore::default();
    let Some(token) = store.load()? else {
        anyhow::bail!("Not logged in (no session found). Run `bantay login` first.");
    };

    let api = HttpAuthClient::from_config(config)?;
    let identity = api.fetch_identity(&token).await?;
    let route = route_for(identity.role.as_ref());

    if let Some(email) = identity.email.as_deref() {
        println!("Email: {email}");
    }
    if let Some(name) = identity.name.as_deref() {
        println!("Name:  {name}");
    }
    match identity.role.as_ref() {
        Some(role) => println!("Role:  {role}"),
        None => println!("Role:  (none)"),
    }
    println!("Token: {}", mask_token(&token));
    println!("View:  {route}");
    Ok(())
}

pub async fn logout(config: &Config) -> Result<()> {
    let store = FileSessionStore::default();
    let Some(token) = store.load()? else {
        println!("Not logged in (no session found).");
        return Ok(());
    };

    // The server keeps no session state; a failed call must not keep the local token.
    let api = HttpAuthClient::from_config(config)?;
    if let Err(e) = api.logout(&token).await {
        tracing::warn!(error = %e, "server logout failed, clearing local session anyway");
    }

    store.clear()?;
    println!("✓ Logged out");
    println!("  Session removed from: {}", store.path().display());
    Ok(())
}
