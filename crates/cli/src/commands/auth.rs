//! Authentication commands.
//!
//! # Usage
//!
//! ```bash
//! clipjoint signup --data '{"name":"Ada","email":"ada@example.com","password":"hunter2"}'
//! clipjoint login --email ada@example.com --password hunter2
//! clipjoint logout
//! clipjoint status
//! ```

use secrecy::SecretString;
use thiserror::Error;

use clipjoint_client::{ApiError, BookingClient};
use clipjoint_core::{Email, EmailError};

use crate::commands::{emit, parse_payload};
use crate::nav;

/// Errors that can occur during authentication commands.
#[derive(Debug, Error)]
pub enum AuthCommandError {
    /// The `--data` argument is not valid JSON.
    #[error("Invalid --data payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    /// Email failed validation before reaching the backend.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// The client operation failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Sign up and log in.
///
/// # Errors
///
/// Returns an error if the payload is not JSON or the request fails.
pub async fn signup(client: &BookingClient, data: &str) -> Result<(), AuthCommandError> {
    let user_info = parse_payload(data)?;
    let user = client.signup(&user_info).await?;

    tracing::info!("Signed up and logged in");
    emit(&user);
    nav::render(client);
    Ok(())
}

/// Log in with email and password.
///
/// # Errors
///
/// Returns an error if the email is malformed or the request fails.
pub async fn login(
    client: &BookingClient,
    email: &str,
    password: String,
) -> Result<(), AuthCommandError> {
    let email = Email::parse(email)?;
    let password = SecretString::from(password);

    let user = client.login(&email, &password).await?;

    tracing::info!("Logged in as {email}");
    emit(&user);
    nav::render(client);
    Ok(())
}

/// Log out.
///
/// Local state clears before the backend notification completes; the footer
/// re-render below already shows the logged-out state.
///
/// # Errors
///
/// Returns an error only if the session marker cannot be removed.
pub fn logout(client: &BookingClient) -> Result<(), AuthCommandError> {
    client.logout()?;

    tracing::info!("Logged out");
    nav::render(client);
    Ok(())
}

/// Show login state and the stored session marker.
///
/// # Errors
///
/// Returns an error if the stored marker exists but cannot be parsed.
pub fn status(client: &BookingClient) -> Result<(), AuthCommandError> {
    if client.is_logged_in() {
        tracing::info!("Logged in");
        if let Some(user) = client.local_user()? {
            emit(&user);
        }
    } else {
        tracing::info!("Logged out");
    }
    Ok(())
}
