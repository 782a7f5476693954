//! Request builder, response parser and async client for the user API.
//!
//! # Design
//! `ApiClient` holds only a base URL and the caller's session and carries no
//! mutable state between calls. Each operation is split into a `build_*`
//! method that produces an `HttpRequest` and the shared `parse_envelope`
//! that consumes an `HttpResponse`. The async methods glue the two together
//! through the [`Transport`], issuing exactly one request per call.

use std::fmt;

use url::Url;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{Envelope, UserUpdate};

/// Host used when none is configured.
pub const DEFAULT_HOST: &str = "http://testapi.ru";

/// Port used when none is configured.
pub const DEFAULT_PORT: &str = "80";

const JSON_CONTENT_TYPE: (&str, &str) = ("content-type", "application/json");

/// Client for the user API.
///
/// `T` is the session every request goes through. It is owned by the caller
/// in the sense that matters: `reqwest::Client` is a handle to a shared
/// connection pool, so cloning it into several clients reuses the same
/// connections.
#[derive(Debug, Clone)]
pub struct ApiClient<T = reqwest::Client> {
    base_url: Url,
    session: T,
}

impl<T> ApiClient<T> {
    /// Create a client for `base_url` (scheme, host and optional port).
    pub fn new(session: T, base_url: &str) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(format!(
                "{base_url} cannot carry a path"
            )));
        }
        Ok(Self { base_url, session })
    }

    /// Create a client for `{host}:{port}`, e.g. `("http://127.0.0.1", 8080)`.
    pub fn with_host(session: T, host: &str, port: impl fmt::Display) -> Result<Self, ApiError> {
        Self::new(session, &format!("{}:{port}", host.trim_end_matches('/')))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn session(&self) -> &T {
        &self.session
    }

    pub fn build_auth(&self, login: &str, password: &str) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Get,
            url: self.endpoint(&["auth"])?,
            query: vec![
                ("login".to_string(), login.to_string()),
                ("pass".to_string(), password.to_string()),
            ],
            headers: Vec::new(),
            body: None,
        })
    }

    pub fn build_get_user(&self, username: &str, token: &str) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Get,
            url: self.endpoint(&["get-user", username])?,
            query: vec![("token".to_string(), token.to_string())],
            headers: Vec::new(),
            body: None,
        })
    }

    pub fn build_update_user(
        &self,
        user_id: impl fmt::Display,
        token: &str,
        fields: &UserUpdate,
    ) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(fields).map_err(|e| ApiError::Serialization(e.to_string()))?;
        let user_id = user_id.to_string();
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: self.endpoint(&["user", &user_id, "update"])?,
            query: vec![("token".to_string(), token.to_string())],
            headers: vec![(
                JSON_CONTENT_TYPE.0.to_string(),
                JSON_CONTENT_TYPE.1.to_string(),
            )],
            body: Some(body),
        })
    }

    /// Check for HTTP 200 and decode the body as a JSON object.
    pub fn parse_envelope(&self, response: HttpResponse) -> Result<Envelope, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    /// Append percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<String, ApiError> {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url.into())
    }
}

impl<T: Transport> ApiClient<T> {
    /// `GET /auth?login=..&pass=..`. The body carries `status` and `token`.
    pub async fn authenticate(&self, login: &str, password: &str) -> Result<Envelope, ApiError> {
        let request = self.build_auth(login, password)?;
        self.send(request).await
    }

    /// `GET /get-user/{username}?token=..`. Returns the user record as sent.
    pub async fn get_user(&self, username: &str, token: &str) -> Result<Envelope, ApiError> {
        let request = self.build_get_user(username, token)?;
        self.send(request).await
    }

    /// `POST /user/{user_id}/update?token=..` with `fields` as the JSON body.
    pub async fn update_user(
        &self,
        user_id: impl fmt::Display,
        token: &str,
        fields: &UserUpdate,
    ) -> Result<Envelope, ApiError> {
        let request = self.build_update_user(user_id, token, fields)?;
        self.send(request).await
    }

    async fn send(&self, request: HttpRequest) -> Result<Envelope, ApiError> {
        // The query string stays out of the logs: it holds the password and token.
        let method = request.method;
        let url = request.url.clone();
        tracing::debug!(%method, %url, "sending request");

        let response = self.session.execute(request).await?;
        tracing::debug!(%method, %url, status = response.status, "received response");

        self.parse_envelope(response)
    }
}

/// Only 200 counts as success; 404 gets its own variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    match response.status {
        200 => Ok(()),
        404 => Err(ApiError::NotFound),
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}
