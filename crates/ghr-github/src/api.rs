//! GitHub REST API client
//!
//! Read-only access to gists, organization members, repositories and user
//! events. The token, if any, is passed through as a bearer token.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error};
use url::Url;

use ghr_core::GitHubConfig;

use crate::error::{GitHubError, Result};
use crate::types::{Event, Gist, Member, Repository};

/// Read-only GitHub operations used by the chat commands
#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// Public gists of a user, newest first
    async fn user_gists(&self, user: &str, per_page: usize) -> Result<Vec<Gist>>;

    /// Public members of an organization
    async fn org_members(&self, org: &str, per_page: usize) -> Result<Vec<Member>>;

    /// Public repositories of a user or organization
    async fn user_repos(&self, owner: &str, per_page: usize) -> Result<Vec<Repository>>;

    /// Recent events performed by a user, newest first
    async fn user_events(&self, user: &str, per_page: usize) -> Result<Vec<Event>>;
}

/// Error body returned by the GitHub API
#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// reqwest implementation of [`GitHubApi`]
#[derive(Clone)]
pub struct GitHubClient {
    client: Client,
    token: Option<String>,
    base_url: Url,
}

impl GitHubClient {
    /// Create a client from the `[github]` config section
    pub fn new(config: &GitHubConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()
            .map_err(GitHubError::HttpError)?;

        let base_url = Url::parse(&config.base_url)
            .map_err(|e| GitHubError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(GitHubError::InvalidUrl(config.base_url.clone()));
        }

        Ok(Self {
            client,
            token: config.token.clone().filter(|t| !t.is_empty()),
            base_url,
        })
    }

    /// Build an endpoint URL from path segments
    ///
    /// Segments are percent-encoded, so user input cannot change the path.
    fn endpoint(&self, segments: &[&str], per_page: usize) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| GitHubError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        url.query_pairs_mut()
            .append_pair("per_page", &per_page.to_string());
        Ok(url)
    }

    /// GET a JSON resource
    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str], per_page: usize) -> Result<T> {
        let url = self.endpoint(segments, per_page)?;

        debug!("GET {}", url);

        let mut request = self.client.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(GitHubError::HttpError)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("GitHub request failed: {} - {}", status, error_text);
            let message = serde_json::from_str::<ApiErrorBody>(&error_text)
                .map(|b| b.message)
                .unwrap_or(error_text);
            return Err(GitHubError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| GitHubError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn user_gists(&self, user: &str, per_page: usize) -> Result<Vec<Gist>> {
        self.get_json(&["users", user, "gists"], per_page).await
    }

    async fn org_members(&self, org: &str, per_page: usize) -> Result<Vec<Member>> {
        self.get_json(&["orgs", org, "members"], per_page).await
    }

    async fn user_repos(&self, owner: &str, per_page: usize) -> Result<Vec<Repository>> {
        self.get_json(&["users", owner, "repos"], per_page).await
    }

    async fn user_events(&self, user: &str, per_page: usize) -> Result<Vec<Event>> {
        self.get_json(&["users", user, "events"], per_page).await
    }
}
