//! Typed HTTP client for the NoteFlow API.

use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use noteflow_entity::export::{ExportFormat, ExportJobView};
use noteflow_entity::import::ImportReport;
use noteflow_entity::user::UserSummary;

use crate::error::ClientError;

/// Body of a successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginReply {
    /// Bearer token for later requests.
    pub token: String,
    /// The authenticated user.
    pub user: UserSummary,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Client bound to one server and, optionally, one bearer token.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Creates a client for `base_url` (for example `http://localhost:3000`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
            token: None,
        }
    }

    /// Returns a copy of the client that authenticates with `token`.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Turns non-success responses into `ClientError::Api`.
    async fn check(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string(),
        };
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ClientError> {
        let response = Self::check(request.send().await?).await?;
        Ok(response.json().await?)
    }

    /// POST /api/auth/login
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginReply, ClientError> {
        let request = self
            .http
            .post(self.url("/auth/login"))
            .json(&serde_json::json!({ "username": username, "password": password }));
        Self::json(request).await
    }

    /// POST /api/export
    pub async fn create_export(&self, format: ExportFormat) -> Result<ExportJobView, ClientError> {
        let request = self
            .authorized(self.http.post(self.url("/export")))
            .json(&serde_json::json!({ "format": format.as_str() }));
        Self::json(request).await
    }

    /// GET /api/jobs/{id}
    pub async fn job_status(&self, job_id: &str) -> Result<ExportJobView, ClientError> {
        let request = self.authorized(self.http.get(self.url(&format!("/jobs/{job_id}"))));
        Self::json(request).await
    }

    /// GET /api/export/{id}
    pub async fn download_export(&self, job_id: &str) -> Result<Bytes, ClientError> {
        let request = self.authorized(self.http.get(self.url(&format!("/export/{job_id}"))));
        let response = Self::check(request.send().await?).await?;
        Ok(response.bytes().await?)
    }

    /// POST /api/import
    pub async fn import(
        &self,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<ImportReport, ClientError> {
        let part = Part::bytes(contents)
            .file_name(file_name.to_string())
            .mime_str("application/json")?;
        let form = Form::new().part("file", part);
        let request = self
            .authorized(self.http.post(self.url("/import")))
            .multipart(form);
        Self::json(request).await
    }
}
