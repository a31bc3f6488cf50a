//! Enginn API client.
//!
//! Low-level HTTP client that handles authentication and raw requests.
//! Resource-level operations live on [`Resource`](crate::Resource) and
//! [`ResourceIndex`](crate::ResourceIndex), which reach the API through the
//! [`Transport`] implementation below.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use url::Url;

use crate::error::{EnginnError, RemoteError, Result};
use crate::models::Project;
use crate::resource::Resource;
use crate::resource_index::ResourceIndex;
use crate::scope::Scope;
use crate::traits::{QueryPairs, Transport};

/// Default API location.
pub const DEFAULT_API_URL: &str = "https://app.enginn.tech/api/v1";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

const USER_AGENT: &str = concat!("enginn/", env!("CARGO_PKG_VERSION"));

/// Low-level Enginn API client.
///
/// Sends every request with a bearer token and JSON bodies. Non-2xx
/// responses become [`RemoteError`]s carrying the status and the response
/// body.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use enginn::EnginnClient;
///
/// # async fn example() -> enginn::Result<()> {
/// // Create from environment variables
/// let client = EnginnClient::from_env()?;
///
/// // Or configure manually
/// let client = EnginnClient::new("your-api-token", "https://app.enginn.tech/api/v1")?;
///
/// let mut projects = client.projects();
/// let mut cursor = projects.iter();
/// while let Some(project) = cursor.next().await {
///     println!("{:?}", project?.name());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct EnginnClient {
    http: Client,
    base_url: Arc<Url>,
    token: String,
}

impl std::fmt::Debug for EnginnClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnginnClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl EnginnClient {
    /// Create a client from environment variables.
    ///
    /// Uses `ENGINN_API_TOKEN` for authentication and optionally
    /// `ENGINN_API_URL` for the base URL (defaults to [`DEFAULT_API_URL`]).
    ///
    /// # Errors
    ///
    /// Returns an error if `ENGINN_API_TOKEN` is not set.
    pub fn from_env() -> Result<Self> {
        let token = env::var("ENGINN_API_TOKEN").map_err(|_| {
            EnginnError::ConfigMissing("ENGINN_API_TOKEN environment variable not set".to_string())
        })?;

        let base_url = env::var("ENGINN_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Self::new(&token, &base_url)
    }

    /// Create a new client with the provided token and base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(token: &str, base_url: &str) -> Result<Self> {
        Self::with_timeout(token, base_url, DEFAULT_TIMEOUT)
    }

    /// Create a new client with a custom request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot
    /// be built.
    pub fn with_timeout(token: &str, base_url: &str, timeout: Duration) -> Result<Self> {
        // Ensure base URL ends with / so relative routes join under it
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&base_url_str)?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .gzip(true)
            .timeout(timeout)
            .build()
            .map_err(EnginnError::HttpError)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            token: token.to_string(),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Root scope backed by this client.
    pub fn scope(&self) -> Scope {
        Scope::root(Arc::new(self.clone()))
    }

    /// Every project the token has access to.
    pub fn projects(&self) -> ResourceIndex<Project> {
        ResourceIndex::new(self.scope())
    }

    /// A project handle by uid, not fetched yet.
    pub fn project(&self, uid: &str) -> Resource<Project> {
        Resource::with_identifier(self.scope(), uid)
    }

    /// Attach auth and send, mapping connection failures to `NilStatus`.
    async fn send(&self, request: RequestBuilder) -> Result<Value> {
        let response = request
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| RemoteError::nil_status(e.to_string()))?;

        Self::check_response(response).await
    }

    /// Check response status and decode the JSON body.
    async fn check_response(response: Response) -> Result<Value> {
        let status = response.status();
        let text = response.text().await.map_err(EnginnError::HttpError)?;
        let body = Self::parse_body(&text);

        if status.is_success() {
            return match body {
                Some(Ok(value)) => Ok(value),
                Some(Err(e)) => Err(EnginnError::ParseError(e)),
                None => Ok(Value::Null),
            };
        }

        // Keep non-JSON error bodies as plain strings
        let body = match body {
            Some(Ok(value)) => value,
            Some(Err(_)) => Value::String(text),
            None => Value::Null,
        };
        Err(RemoteError::from_response(status.as_u16(), body).into())
    }

    fn parse_body(text: &str) -> Option<serde_json::Result<Value>> {
        if text.trim().is_empty() {
            None
        } else {
            Some(serde_json::from_str(text))
        }
    }
}

#[async_trait]
impl Transport for EnginnClient {
    #[tracing::instrument(skip(self, query))]
    async fn get(&self, route: &str, query: &QueryPairs) -> Result<Value> {
        let url = self.base_url.join(route)?;
        self.send(self.http.get(url).query(query)).await
    }

    #[tracing::instrument(skip(self, body))]
    async fn post(&self, route: &str, body: &Value) -> Result<Value> {
        let url = self.base_url.join(route)?;
        self.send(self.http.post(url).json(body)).await
    }

    #[tracing::instrument(skip(self, body))]
    async fn patch(&self, route: &str, body: &Value) -> Result<Value> {
        let url = self.base_url.join(route)?;
        self.send(self.http.patch(url).json(body)).await
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, route: &str) -> Result<Value> {
        let url = self.base_url.join(route)?;
        self.send(self.http.delete(url)).await
    }
}
