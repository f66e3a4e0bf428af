use anyhow::{anyhow, Context};
use reqwest::{Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

use crate::middleware::ADMIN_TOKEN_HEADER;

/// Thin JSON client for the Portfolio API
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    admin_token: Option<String>,
}

/// Where a write is sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Public,
    Admin,
}

impl ApiClient {
    pub fn new(base_url: &str, admin_token: Option<String>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            admin_token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_admin_token(&self) -> bool {
        self.admin_token.is_some()
    }

    fn url(&self, route: Route, path: &str) -> String {
        match route {
            Route::Public => format!("{}/api{}", self.base_url, path),
            Route::Admin => format!("{}/api/admin{}", self.base_url, path),
        }
    }

    /// GET against the server root (outside `/api`)
    pub async fn get_root(&self, path: &str) -> anyhow::Result<(StatusCode, serde_json::Value)> {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .with_context(|| format!("GET {} failed", path))?;
        let status = response.status();
        Ok((status, response.json().await.unwrap_or(serde_json::Value::Null)))
    }

    /// GET returning the status alongside the decoded body, for callers that
    /// treat some error statuses as answers.
    pub async fn get_status<T: DeserializeOwned>(&self, path: &str) -> anyhow::Result<(StatusCode, Option<T>)> {
        let response = self
            .http
            .get(self.url(Route::Public, path))
            .send()
            .await
            .with_context(|| format!("GET /api{} failed", path))?;

        let status = response.status();
        if !status.is_success() {
            return Ok((status, None));
        }
        let body = response
            .json()
            .await
            .with_context(|| format!("GET /api{} returned an unexpected body", path))?;
        Ok((status, Some(body)))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> anyhow::Result<T> {
        match self.get_status(path).await? {
            (_, Some(body)) => Ok(body),
            (status, None) => Err(anyhow!("GET /api{} returned {}", path, status)),
        }
    }

    pub async fn send<B, T>(&self, method: Method, route: Route, path: &str, body: Option<&B>) -> anyhow::Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self.http.request(method.clone(), self.url(route, path));
        if route == Route::Admin {
            let token = self
                .admin_token
                .as_deref()
                .ok_or_else(|| anyhow!("admin route requested but no admin token given"))?;
            request = request.header(ADMIN_TOKEN_HEADER, token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("{} {} failed", method, path))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(anyhow!("{} {} returned {}: {}", method, path, status, detail));
        }

        response
            .json()
            .await
            .with_context(|| format!("{} {} returned an unexpected body", method, path))
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&self, route: Route, path: &str, body: &B) -> anyhow::Result<T> {
        self.send(Method::POST, route, path, Some(body)).await
    }

    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(&self, route: Route, path: &str, body: &B) -> anyhow::Result<T> {
        self.send(Method::PUT, route, path, Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, route: Route, path: &str) -> anyhow::Result<T> {
        self.send::<(), T>(Method::DELETE, route, path, None).await
    }
}
