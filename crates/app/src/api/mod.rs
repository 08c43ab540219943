//! REST client
//!
//! Every backend call goes through one [`ApiClient`]. It attaches the bearer token when a
//! session exists, tags each request with a fresh `X-Request-Id`, and turns answers into
//! either JSON or an [`ApiError`]. A 401 purges the stored session before the error is
//! returned, so the next command starts signed out.

use std::time::Instant;

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{config::client::ClientConfig, session::SessionStore};

pub mod envelope;
mod errors;

pub use envelope::{ErrorEnvelope, Page};
pub use errors::{ApiError, LOGIN_PATH};

/// Header carrying the per-request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// HTTP client for the storefront API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
    session: SessionStore,
}

impl ApiClient {
    /// Build a client for `config`, authenticating with `session`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when the HTTP client cannot be built.
    pub fn new(config: &ClientConfig, session: SessionStore) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            base_url: config.base_url().to_string(),
            http,
            session,
        })
    }

    /// Session used for authentication.
    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Absolute URL for an API path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// `GET path?query`.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, ApiError> {
        let request = self.http.get(self.url(path)).query(query);

        self.send(Method::GET, path, request).await
    }

    /// `POST path` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn post<B>(&self, path: &str, body: &B) -> Result<Value, ApiError>
    where
        B: Serialize + ?Sized + Sync,
    {
        let request = self.http.post(self.url(path)).json(body);

        self.send(Method::POST, path, request).await
    }

    /// `POST path` without a body.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn post_empty(&self, path: &str) -> Result<Value, ApiError> {
        let request = self.http.post(self.url(path));

        self.send(Method::POST, path, request).await
    }

    /// `PUT path` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn put<B>(&self, path: &str, body: &B) -> Result<Value, ApiError>
    where
        B: Serialize + ?Sized + Sync,
    {
        let request = self.http.put(self.url(path)).json(body);

        self.send(Method::PUT, path, request).await
    }

    /// `DELETE path`.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        let request = self.http.delete(self.url(path));

        self.send(Method::DELETE, path, request).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        request: RequestBuilder,
    ) -> Result<Value, ApiError> {
        let request_id = Uuid::now_v7();
        let mut request = request.header(REQUEST_ID_HEADER, request_id.to_string());

        if let Some(token) = self.session.token()? {
            request = request.bearer_auth(token.expose());
        }

        let started = Instant::now();
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        debug!(
            %request_id,
            %method,
            path,
            status = status.as_u16(),
            elapsed = ?started.elapsed(),
            "api response"
        );

        self.interpret(status, &body)
    }

    fn interpret(&self, status: StatusCode, body: &str) -> Result<Value, ApiError> {
        if status == StatusCode::UNAUTHORIZED {
            if let Err(error) = self.session.purge() {
                warn!(%error, "failed to purge rejected session");
            }

            return Err(ApiError::Unauthorized {
                redirect: LOGIN_PATH,
            });
        }

        if !status.is_success() {
            let envelope = ErrorEnvelope::parse(body);

            return Err(ApiError::Status {
                status: status.as_u16(),
                message: envelope.message.unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("unknown error")
                        .to_string()
                }),
                errors: envelope.errors,
            });
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(body)?)
    }
}
