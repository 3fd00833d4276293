//! Booking API client.
//!
//! Single point of contact with the backend REST service. Owns the
//! persisted session marker and funnels every failure through
//! [`ApiError`].
//!
//! # Example
//!
//! ```rust,ignore
//! use clipjoint_client::{BookingClient, ClientConfig};
//!
//! let client = BookingClient::new(&ClientConfig::from_env()?)?;
//!
//! let user = client.login(&email, &password).await?;
//! let shops = client.barber_shops().await?;
//! ```

use std::sync::Arc;

use chrono::NaiveDate;
use reqwest::RequestBuilder;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tokio::sync::watch;

use clipjoint_core::{AppointmentId, BarberShopId, Email};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::session::SessionStore;

/// Client for the booking REST API.
///
/// Cheaply cloneable; all clones share one connection pool, cookie store,
/// and session marker. Requests are issued immediately, never retried, and
/// never deduplicated - every call is independent.
#[derive(Clone)]
pub struct BookingClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    base_url: String,
    session: SessionStore,
}

impl BookingClient {
    /// Create a new booking client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        // Cookie store so backend credentials ride on every request.
        let http = reqwest::Client::builder().cookie_store(true).build()?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                base_url: config.api_url.as_str().trim_end_matches('/').to_owned(),
                session: SessionStore::new(&config.session_file),
            }),
        })
    }

    // =========================================================================
    // Session state (synchronous, local)
    // =========================================================================

    /// Whether a user is currently logged in.
    ///
    /// Presence of the persisted session marker is the sole truth value;
    /// no network call is made.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.inner.session.is_logged_in()
    }

    /// The parsed session marker content, if any.
    ///
    /// This is the payload of the last successful signup/login, which may
    /// be stale relative to the backend.
    ///
    /// # Errors
    ///
    /// Returns a `Local` error if the marker exists but cannot be read or
    /// parsed.
    pub fn local_user(&self) -> Result<Option<Value>, ApiError> {
        Ok(self.inner.session.get()?)
    }

    /// Subscribe to login-state transitions.
    #[must_use]
    pub fn subscribe_login(&self) -> watch::Receiver<bool> {
        self.inner.session.subscribe()
    }

    /// The session store owned by this client.
    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Register a new user and log them in.
    ///
    /// `user_info` is forwarded to the backend untouched. On success the
    /// returned payload is persisted as the session marker and resolved to
    /// the caller.
    ///
    /// # Errors
    ///
    /// Returns the normalized backend or transport error, or a `Local`
    /// error if the marker cannot be written.
    pub async fn signup(&self, user_info: &Value) -> Result<Value, ApiError> {
        let user = self.execute(self.post("signup").json(user_info)).await?;
        self.inner.session.set(&user)?;
        Ok(user)
    }

    /// Log in with email and password.
    ///
    /// Persistence behavior is identical to [`signup`](Self::signup).
    ///
    /// # Errors
    ///
    /// Returns the normalized backend or transport error, or a `Local`
    /// error if the marker cannot be written.
    pub async fn login(&self, email: &Email, password: &SecretString) -> Result<Value, ApiError> {
        let body = serde_json::json!({
            "email": email,
            "password": password.expose_secret(),
        });

        let user = self.execute(self.post("login").json(&body)).await?;
        self.inner.session.set(&user)?;
        Ok(user)
    }

    /// Log out.
    ///
    /// The session marker is removed synchronously - the user counts as
    /// logged out as soon as this returns - then the backend is notified
    /// with a fire-and-forget request whose completion is never awaited.
    ///
    /// # Errors
    ///
    /// Returns a `Local` error only if removing the marker fails; the
    /// notification outcome never reaches the caller.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime, which the notification
    /// task is spawned on.
    pub fn logout(&self) -> Result<(), ApiError> {
        self.inner.session.clear()?;

        let request = self.get("logout");
        tokio::spawn(async move {
            if let Err(error) = request.send().await {
                tracing::debug!(error = %error, "logout notification failed");
            }
        });

        Ok(())
    }

    // =========================================================================
    // Barbershops
    // =========================================================================

    /// List all barbershops.
    ///
    /// # Errors
    ///
    /// Returns the normalized backend or transport error.
    pub async fn barber_shops(&self) -> Result<Value, ApiError> {
        self.execute(self.get("barbershop")).await
    }

    /// Fetch a single barbershop by id.
    ///
    /// # Errors
    ///
    /// Returns the normalized backend or transport error.
    pub async fn barber_shop(&self, id: &BarberShopId) -> Result<Value, ApiError> {
        self.execute(self.get(&format!("barbershop/{id}"))).await
    }

    /// Create a barbershop.
    ///
    /// # Errors
    ///
    /// Returns the normalized backend or transport error.
    pub async fn add_barber_shop(&self, data: &Value) -> Result<Value, ApiError> {
        self.execute(self.post("barbershop").json(data)).await
    }

    // =========================================================================
    // Appointments
    // =========================================================================

    /// List all appointments.
    ///
    /// # Errors
    ///
    /// Returns the normalized backend or transport error.
    pub async fn appointments(&self) -> Result<Value, ApiError> {
        self.execute(self.get("appointment")).await
    }

    /// Fetch a single appointment by id.
    ///
    /// # Errors
    ///
    /// Returns the normalized backend or transport error.
    pub async fn appointment(&self, id: &AppointmentId) -> Result<Value, ApiError> {
        self.execute(self.get(&format!("appointment/{id}"))).await
    }

    /// Create an appointment.
    ///
    /// # Errors
    ///
    /// Returns the normalized backend or transport error.
    pub async fn add_appointment(&self, data: &Value) -> Result<Value, ApiError> {
        self.execute(self.post("appointment").json(data)).await
    }

    /// Delete an appointment.
    ///
    /// # Errors
    ///
    /// Returns the normalized backend or transport error.
    pub async fn delete_appointment(&self, id: &AppointmentId) -> Result<Value, ApiError> {
        self.execute(self.delete(&format!("appointment/{id}"))).await
    }

    /// Available slots for a shop on a given date.
    ///
    /// The date rides as a `date=YYYY-MM-DD` query parameter; the response
    /// payload is resolved unchanged.
    ///
    /// # Errors
    ///
    /// Returns the normalized backend or transport error.
    pub async fn available_times(
        &self,
        shop_id: &BarberShopId,
        date: NaiveDate,
    ) -> Result<Value, ApiError> {
        let request = self
            .get(&format!("available-times/{shop_id}"))
            .query(&[("date", date.to_string())]);
        self.execute(request).await
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn get(&self, path: &str) -> RequestBuilder {
        self.inner.http.get(self.url(path))
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.inner.http.post(self.url(path))
    }

    fn delete(&self, path: &str) -> RequestBuilder {
        self.inner.http.delete(self.url(path))
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.inner.base_url)
    }

    /// Issue a request and normalize the outcome.
    ///
    /// Every failure is logged exactly once here before being surfaced.
    async fn execute(&self, request: RequestBuilder) -> Result<Value, ApiError> {
        let outcome = dispatch(request).await;

        if let Err(error) = &outcome {
            tracing::error!(error = %error, kind = ?error.kind(), "api request failed");
        }

        outcome
    }
}

/// Send a request and decode the response payload.
async fn dispatch(request: RequestBuilder) -> Result<Value, ApiError> {
    let response = request.send().await?;
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::from_response(status.as_u16(), body));
    }

    Ok(response.json().await?)
}
