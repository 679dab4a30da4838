//! HTTP client with an explicit interceptor pipeline.
//!
//! Every request goes through `execute`: request interceptors in order,
//! send, response interceptors in order, then status mapping. There are no
//! retries and no backoff; that policy belongs to the caller.

use std::sync::Arc;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::ApiError;
use super::middleware::{
    BearerAuth, ClientTypeHeader, RequestInterceptor, ResponseInterceptor, UnauthorizedTeardown,
};
use crate::config::Config;
use crate::state::AuthState;

/// Value of the `X-Client-Type` header sent by this client.
pub const CLIENT_TYPE: &str = "cli";

/// HTTP client wrapper for Swarmy API communication.
pub struct ApiClient {
    client: Client,
    base_url: String,
    request_interceptors: Vec<Arc<dyn RequestInterceptor>>,
    response_interceptors: Vec<Arc<dyn ResponseInterceptor>>,
}

impl ApiClient {
    /// Create a client with no interceptors.
    pub fn new(config: &Config) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            request_interceptors: Vec::new(),
            response_interceptors: Vec::new(),
        }
    }

    /// Create a client wired to the auth stores: client-type header, bearer
    /// attachment, and 401 teardown.
    pub fn with_auth(config: &Config, auth: &AuthState) -> Self {
        Self::new(config)
            .with_request_interceptor(ClientTypeHeader::new(CLIENT_TYPE))
            .with_request_interceptor(BearerAuth::new(Arc::clone(&auth.session)))
            .with_response_interceptor(UnauthorizedTeardown::new(auth.clone()))
    }

    pub fn with_request_interceptor(mut self, interceptor: impl RequestInterceptor + 'static) -> Self {
        self.request_interceptors.push(Arc::new(interceptor));
        self
    }

    pub fn with_response_interceptor(
        mut self,
        interceptor: impl ResponseInterceptor + 'static,
    ) -> Self {
        self.response_interceptors.push(Arc::new(interceptor));
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get(&self, path: &str) -> Result<Response, ApiError> {
        self.execute(self.client.get(self.url(path))).await
    }

    /// POST with a JSON body.
    pub async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<Response, ApiError> {
        self.execute(self.client.post(self.url(path)).json(body))
            .await
    }

    /// POST with no body.
    pub async fn post_empty(&self, path: &str) -> Result<Response, ApiError> {
        self.execute(self.client.post(self.url(path))).await
    }

    /// PUT with no body.
    pub async fn put_empty(&self, path: &str) -> Result<Response, ApiError> {
        self.execute(self.client.put(self.url(path))).await
    }

    pub async fn delete(&self, path: &str) -> Result<Response, ApiError> {
        self.execute(self.client.delete(self.url(path))).await
    }

    /// POST a multipart form (file uploads).
    pub async fn post_multipart(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<Response, ApiError> {
        self.execute(self.client.post(self.url(path)).multipart(form))
            .await
    }

    pub async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        read_json(self.get(path).await?).await
    }

    async fn execute(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let mut request = builder.build()?;
        for interceptor in &self.request_interceptors {
            interceptor.on_request(&mut request)?;
        }

        let method = request.method().clone();
        let path = request.url().path().to_string();
        log::debug!("{} {}", method, path);

        let response = self.client.execute(request).await.map_err(|e| {
            log::debug!("{} {} failed: {}", method, path, e);
            ApiError::from(e)
        })?;

        let status = response.status();
        for interceptor in &self.response_interceptors {
            interceptor.on_response(status);
        }

        if status.is_success() {
            return Ok(response);
        }

        log::debug!("{} {} returned {}", method, path, status);
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status { status, body })
    }
}

/// Parse a JSON response body. An empty body reads as JSON `null`, so
/// `Option<T>` and `serde_json::Value` targets accept it.
pub async fn read_json<R: DeserializeOwned>(response: Response) -> Result<R, ApiError> {
    let text = response.text().await?;
    let body = if text.trim().is_empty() { "null" } else { text.as_str() };
    Ok(serde_json::from_str(body)?)
}
