//! Authentication service
//!
//! Login, registration and logout against the backend's `/auth` endpoints.
//! A successful login is stored in the [`SessionStore`]; nothing here ever
//! clears the session except [`AuthService::logout`].

use reqwest::{Method, StatusCode};
use serde::de::Error as _;
use serde_json::Value;

use crate::api::{ApiClient, ApiError, Payload};
use crate::models::{LoginInput, LoginResponse, RegisterInput, SessionUser};
use crate::services::resource::require_fields;
use crate::session::{SessionStore, StorageError};

/// Error types for authentication operations
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The backend call failed or the input was rejected locally
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The token could not be persisted or removed
    #[error("Session storage error: {0}")]
    Storage(#[from] StorageError),
}

#[derive(Clone, Debug)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    fn session(&self) -> &SessionStore {
        self.client.session()
    }

    /// Exchange credentials for a token and start the session.
    pub async fn login(&self, input: &LoginInput) -> Result<SessionUser, AuthError> {
        require_fields(&[("email", input.email.as_str()), ("password", input.password.as_str())])?;

        let response: LoginResponse = self.client.post_json("/auth/login", input).await?;
        if response.token.trim().is_empty() {
            return Err(ApiError::Decode(serde_json::Error::custom(
                "login response carries an empty token",
            ))
            .into());
        }
        let user = response.user.clone();
        self.session().login(response.token, response.user)?;
        Ok(user)
    }

    /// Create an account. Does not sign the new user in.
    pub async fn register(&self, input: &RegisterInput) -> Result<(), AuthError> {
        if input.password != input.confirm_password {
            return Err(ApiError::validation("Passwords do not match").into());
        }
        require_fields(&[
            ("username", input.username.as_str()),
            ("email", input.email.as_str()),
            ("password", input.password.as_str()),
        ])?;

        self.client
            .send(Method::POST, "/auth/register", Payload::json(input)?)
            .await?;
        tracing::info!(username = %input.username, "Account registered");
        Ok(())
    }

    pub fn logout(&self) -> Result<(), AuthError> {
        self.session().logout()?;
        Ok(())
    }
}

/// Message shown to the user after a failed login.
pub fn login_failure_message(error: &AuthError) -> String {
    match error {
        AuthError::Api(ApiError::Validation(message)) => message.clone(),
        AuthError::Api(ApiError::Network(_)) => {
            "Network error. Please check your connection.".to_string()
        }
        AuthError::Api(api) => match api.status() {
            Some(StatusCode::UNAUTHORIZED) => "Invalid credentials. Please try again.".to_string(),
            Some(StatusCode::NOT_FOUND) => "API endpoint not found.".to_string(),
            _ => "An unexpected error occurred. Please try again later.".to_string(),
        },
        AuthError::Storage(_) => "An unexpected error occurred. Please try again later.".to_string(),
    }
}

/// Message shown to the user after a failed registration.
///
/// Prefers the backend's field complaint about `username`, then `email`.
pub fn registration_failure_message(error: &AuthError) -> String {
    match error {
        AuthError::Api(ApiError::Validation(message)) => message.clone(),
        AuthError::Api(api) => api
            .body_json()
            .and_then(|body| {
                ["username", "email"]
                    .iter()
                    .find_map(|key| field_message(body.get(key)?))
            })
            .unwrap_or_else(|| "Registration failed".to_string()),
        AuthError::Storage(_) => "Registration failed".to_string(),
    }
}

/// A field error is either a string or a list of strings
fn field_message(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => items.iter().find_map(|v| v.as_str()).map(str::to_string),
        _ => None,
    }
}
