//! HTTP client for the CMS backend
//!
//! [`ApiClient`] is the single outbound gateway: it owns the base URL and the
//! injected [`SessionStore`], and attaches `Authorization: Bearer <token>` to
//! every request while a token is present. There is no retry, no backoff and
//! no response interception; a failed call is returned to the caller as an
//! [`ApiError`] and never touches the session.

mod error;
mod payload;

pub use error::ApiError;
pub use payload::{content_type_for, FileUpload, FormData, Payload};

use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};

use crate::config::ApiConfig;
use crate::session::SessionStore;

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    asset_origin: String,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, session: SessionStore) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        Ok(Self {
            http: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            asset_origin: config.asset_origin(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Origin serving uploaded files
    pub fn asset_origin(&self) -> &str {
        &self.asset_origin
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method.clone(), self.url(path));
        match self.session.token() {
            Some(token) => {
                tracing::debug!(%method, path, "Sending authenticated request");
                builder.bearer_auth(token)
            }
            None => {
                tracing::debug!(%method, path, "Sending anonymous request");
                builder
            }
        }
    }

    async fn execute(&self, builder: RequestBuilder, path: &str) -> Result<Response, ApiError> {
        let response = builder.send().await.map_err(|e| {
            tracing::debug!(path, error = %e, "Request did not complete");
            ApiError::Network(e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::debug!(path, %status, "Backend rejected request");
        Err(ApiError::Status { status, body })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// GET `path` and decode the JSON body
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.execute(self.request(Method::GET, path), path).await?;
        Self::decode(response).await
    }

    /// GET `path` with query parameters and decode the JSON body
    pub async fn get_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let builder = self.request(Method::GET, path).query(query);
        let response = self.execute(builder, path).await?;
        Self::decode(response).await
    }

    /// POST a JSON body and decode the JSON response
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::POST, path).json(body);
        let response = self.execute(builder, path).await?;
        Self::decode(response).await
    }

    /// Send a create/update payload; the response body is not interpreted.
    pub async fn send(&self, method: Method, path: &str, payload: Payload) -> Result<(), ApiError> {
        let builder = self.request(method, path);
        let builder = match payload {
            Payload::Json(value) => builder.json(&value),
            Payload::Multipart(form) => builder.multipart(form.into_form()?),
        };
        self.execute(builder, path).await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(self.request(Method::DELETE, path), path).await?;
        Ok(())
    }
}
