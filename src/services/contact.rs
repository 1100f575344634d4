//! Contact form submission

use reqwest::Method;

use crate::api::{ApiClient, ApiError, Payload};
use crate::models::ContactMessage;
use crate::services::resource::require_fields;

#[derive(Clone, Debug)]
pub struct ContactService {
    client: ApiClient,
}

impl ContactService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Post a visitor message to `/messages`. No sign-in required.
    pub async fn send(&self, message: &ContactMessage) -> Result<(), ApiError> {
        validate(message)?;

        self.client
            .send(Method::POST, "/messages", Payload::json(message)?)
            .await?;
        tracing::info!(from = %message.email, "Contact message sent");
        Ok(())
    }
}

fn validate(message: &ContactMessage) -> Result<(), ApiError> {
    require_fields(&[
        ("name", message.name.as_str()),
        ("email", message.email.as_str()),
        ("message", message.message.as_str()),
    ])?;

    if !message.email.contains('@') {
        return Err(ApiError::validation(format!(
            "'{}' is not an email address",
            message.email
        )));
    }
    Ok(())
}
