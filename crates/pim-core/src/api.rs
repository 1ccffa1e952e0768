//! Typed gateway for the particles backend.
//!
//! Thin wrapper over the REST API. One attempt per call, no retries, no
//! timeout handling; failures are normalized into [`ApiFailure`] and reported
//! to the caller for user-facing handling.

use serde::Deserialize;
use serde_json::json;

/// Outcome of a failed gateway call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiFailure {
    /// Non-2xx response. `message` is the server's `error` field when
    /// present, otherwise a generic message keyed by the status code.
    Request { status: u16, message: String },
    /// The request never completed (connection refused, DNS, timeout).
    Network { message: String },
}

impl ApiFailure {
    /// HTTP status of the failure; 0 if the request never completed.
    pub fn status(&self) -> u16 {
        match self {
            ApiFailure::Request { status, .. } => *status,
            ApiFailure::Network { .. } => 0,
        }
    }

    /// User-facing message for this failure.
    pub fn message(&self) -> &str {
        match self {
            ApiFailure::Request { message, .. } | ApiFailure::Network { message } => message,
        }
    }
}

impl std::fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ApiFailure {}

pub type ApiResult<T> = Result<T, ApiFailure>;

/// A user-owned note record.
///
/// Identity is normalized from the wire's `particle_id`/`article_id` (number
/// or string) into a single `String` key. Within one fetched set the id is
/// unique and is the sole key correlating a rendered row back to its data.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "WireArticle")]
pub struct ArticleRecord {
    pub id: String,
    pub title: String,
    pub content: String,
}

/// Wire shape of an article. The backend emits `particle_id` on list and
/// `article_id` on search; both are honored here.
#[derive(Debug, Deserialize)]
struct WireArticle {
    #[serde(rename = "particle_id", alias = "article_id")]
    id: WireId,
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireId {
    Num(i64),
    Text(String),
}

impl From<WireArticle> for ArticleRecord {
    fn from(wire: WireArticle) -> Self {
        let id = match wire.id {
            WireId::Num(n) => n.to_string(),
            WireId::Text(s) => s,
        };
        Self {
            id,
            title: wire.title,
            content: wire.content,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ItemsResponse {
    #[serde(default)]
    items: Vec<ArticleRecord>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Particles API client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Creates a client for the given base URL (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /auth/login` - verifies credentials. Establishes nothing
    /// server-side; the client persists the session on success.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<()> {
        let url = format!("{}/auth/login", self.base_url);
        let body = json!({ "username": username, "password": password });
        ack(self.http.post(&url).json(&body).send().await).await
    }

    /// `POST /auth/register` - creates an account. No session side effects.
    pub async fn register(&self, username: &str, password: &str) -> ApiResult<()> {
        let url = format!("{}/auth/register", self.base_url);
        let body = json!({ "username": username, "password": password });
        ack(self.http.post(&url).json(&body).send().await).await
    }

    /// `GET /particles/{username}` - full article list, server order.
    pub async fn list_articles(&self, username: &str) -> ApiResult<Vec<ArticleRecord>> {
        let url = format!("{}/particles/{}", self.base_url, username);
        items(self.http.get(&url).send().await).await
    }

    /// `GET /particles/{username}/search?q=` - filtered article list.
    pub async fn search_articles(
        &self,
        username: &str,
        term: &str,
    ) -> ApiResult<Vec<ArticleRecord>> {
        let url = format!("{}/particles/{}/search", self.base_url, username);
        items(self.http.get(&url).query(&[("q", term)]).send().await).await
    }

    /// `POST /particles/create` - requires password re-confirmation.
    pub async fn create_article(
        &self,
        username: &str,
        password: &str,
        title: &str,
        content: &str,
    ) -> ApiResult<()> {
        let url = format!("{}/particles/create", self.base_url);
        let body = json!({
            "username": username,
            "password": password,
            "title": title,
            "content": content,
        });
        ack(self.http.post(&url).json(&body).send().await).await
    }

    /// `PUT /particles/{id}` - requires password re-confirmation.
    pub async fn update_article(
        &self,
        id: &str,
        username: &str,
        password: &str,
        title: &str,
        content: &str,
    ) -> ApiResult<()> {
        let url = format!("{}/particles/{}", self.base_url, id);
        let body = json!({
            "username": username,
            "password": password,
            "title": title,
            "content": content,
        });
        ack(self.http.put(&url).json(&body).send().await).await
    }

    /// `DELETE /particles/{id}` - keyed by record identity alone.
    pub async fn delete_article(&self, id: &str) -> ApiResult<()> {
        let url = format!("{}/particles/{}", self.base_url, id);
        ack(self.http.delete(&url).send().await).await
    }

    /// `GET /health` - backend reachability probe.
    pub async fn health(&self) -> ApiResult<()> {
        let url = format!("{}/health", self.base_url);
        ack(self.http.get(&url).send().await).await
    }
}

/// Collapses a response into an acknowledgment, normalizing failures.
async fn ack(sent: reqwest::Result<reqwest::Response>) -> ApiResult<()> {
    let response = sent.map_err(network_failure)?;
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    Err(request_failure(status.as_u16(), response).await)
}

/// Decodes an `{ items: [...] }` payload, normalizing failures.
async fn items(sent: reqwest::Result<reqwest::Response>) -> ApiResult<Vec<ArticleRecord>> {
    let response = sent.map_err(network_failure)?;
    let status = response.status();
    if !status.is_success() {
        return Err(request_failure(status.as_u16(), response).await);
    }
    let payload: ItemsResponse = response.json().await.map_err(network_failure)?;
    Ok(payload.items)
}

fn network_failure(e: reqwest::Error) -> ApiFailure {
    tracing::debug!(error = %e, "request failed without a response");
    ApiFailure::Network {
        message: format!("Network error: {e}"),
    }
}

async fn request_failure(status: u16, response: reqwest::Response) -> ApiFailure {
    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.error)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("Request failed (status {status})"));
    ApiFailure::Request { status, message }
}
