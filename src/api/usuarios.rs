use async_trait::async_trait;
use reqwest::{Method, Response};

use crate::error::ApiError;
use crate::models::{UserId, UserPayload, UserRecord};
use super::client::{log_request, log_response};

pub const COLLECTION_PATH: &str = "/api/usuarios";

/// The four calls the directory makes against the user collection.
#[async_trait]
pub trait UsuariosBackend: Send + Sync {
    /// Full snapshot of the collection, in backend order.
    async fn list(&self) -> Result<Vec<UserRecord>, ApiError>;
    /// `Err(ApiError::Status)` when the backend answers with a non-success status.
    async fn create(&self, payload: &UserPayload) -> Result<(), ApiError>;
    async fn update(&self, id: UserId, payload: &UserPayload) -> Result<(), ApiError>;
    /// The response status is not inspected; only transport failures are errors.
    async fn delete(&self, id: UserId) -> Result<(), ApiError>;
}

/// reqwest-backed client for `{base_url}/api/usuarios`.
#[derive(Clone, Debug)]
pub struct UsuariosClient {
    client: reqwest::Client,
    base_url: String,
}

impl UsuariosClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn collection_url(&self) -> String {
        format!("{}{}", self.base_url, COLLECTION_PATH)
    }

    pub fn record_url(&self, id: UserId) -> String {
        format!("{}/{}", self.collection_url(), id)
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<&UserPayload>,
    ) -> Result<Response, ApiError> {
        let body_json = body.map(serde_json::to_value).transpose()?;
        log_request(&method, url, body_json.as_ref());

        let mut req = self.client.request(method, url);
        if let Some(b) = body {
            req = req.json(b);
        }
        Ok(req.send().await?)
    }

    async fn send_checked(
        &self,
        method: Method,
        url: &str,
        body: Option<&UserPayload>,
    ) -> Result<(), ApiError> {
        let resp = self.send(method, url, body).await?;
        let status = resp.status();
        log_response(status, None);
        if status.is_success() {
            Ok(())
        } else {
            Err(ApiError::Status(status.as_u16()))
        }
    }
}

#[async_trait]
impl UsuariosBackend for UsuariosClient {
    async fn list(&self) -> Result<Vec<UserRecord>, ApiError> {
        let resp = self.send(Method::GET, &self.collection_url(), None).await?;
        let status = resp.status();
        let bytes = resp.bytes().await?;
        log_response(status, Some(&bytes[..]));
        // Status is not inspected; the body alone decides.
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn create(&self, payload: &UserPayload) -> Result<(), ApiError> {
        self.send_checked(Method::POST, &self.collection_url(), Some(payload)).await
    }

    async fn update(&self, id: UserId, payload: &UserPayload) -> Result<(), ApiError> {
        self.send_checked(Method::PUT, &self.record_url(id), Some(payload)).await
    }

    async fn delete(&self, id: UserId) -> Result<(), ApiError> {
        let resp = self.send(Method::DELETE, &self.record_url(id), None).await?;
        log_response(resp.status(), None);
        Ok(())
    }
}
